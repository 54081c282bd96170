use std::collections::HashMap;

use thiserror::Error;

use crate::http::error::HttpError;
use crate::http::request::{parse_cookies, split_target, Method, Request};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// More bytes are needed before a request can be produced.
    #[error("incomplete request")]
    Incomplete,
    #[error("invalid request line")]
    InvalidRequestLine,
    #[error("unsupported method {0:?}")]
    UnsupportedMethod(String),
    #[error("invalid header line")]
    InvalidHeader,
    #[error("invalid Content-Length")]
    InvalidContentLength,
    #[error("request head exceeds {0} bytes")]
    HeadTooLarge(usize),
    #[error("declared body of {declared} bytes exceeds {limit} bytes")]
    BodyTooLarge { declared: usize, limit: usize },
}

impl From<ParseError> for HttpError {
    fn from(err: ParseError) -> Self {
        HttpError::MalformedRequest(err.to_string())
    }
}

/// Size limits applied while parsing.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Request line plus headers, including line terminators.
    pub max_head_bytes: usize,
    /// Largest accepted Content-Length.
    pub max_body_bytes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_head_bytes: 64 * 1024,
            max_body_bytes: 8 * 1024 * 1024,
        }
    }
}

/// Parses one request from the front of `buf` using default limits.
///
/// Returns the request and the number of bytes it occupied.
pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    parse_with_limits(buf, &Limits::default())
}

/// Parses one request from the front of `buf`.
///
/// Lines may end in CRLF or a bare LF. `ParseError::Incomplete` means the
/// head or the declared body has not fully arrived yet.
pub fn parse_with_limits(buf: &[u8], limits: &Limits) -> Result<(Request, usize), ParseError> {
    let (lines, body_start) = match split_head(buf) {
        Some(head) => head,
        None if buf.len() > limits.max_head_bytes => {
            return Err(ParseError::HeadTooLarge(limits.max_head_bytes));
        }
        None => return Err(ParseError::Incomplete),
    };

    if body_start > limits.max_head_bytes {
        return Err(ParseError::HeadTooLarge(limits.max_head_bytes));
    }

    let mut lines = lines.into_iter();

    // Request line
    let request_line = lines.next().ok_or(ParseError::InvalidRequestLine)?;
    let request_line =
        std::str::from_utf8(request_line).map_err(|_| ParseError::InvalidRequestLine)?;
    let parts: Vec<&str> = request_line.trim().split(' ').collect();
    let (method_str, target, version) = match parts.as_slice() {
        [method, target, version] => (*method, *target, *version),
        _ => return Err(ParseError::InvalidRequestLine),
    };

    if !target.starts_with('/') || !version.starts_with("HTTP/") {
        return Err(ParseError::InvalidRequestLine);
    }

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::UnsupportedMethod(method_str.to_string()))?;

    // Headers
    let mut headers = HashMap::new();

    for line in lines {
        let line = std::str::from_utf8(line).map_err(|_| ParseError::InvalidHeader)?;
        let (key, value) = line.split_once(':').ok_or(ParseError::InvalidHeader)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::InvalidHeader);
        }

        headers
            .entry(key.to_ascii_lowercase())
            .or_insert_with(|| value.trim().to_string());
    }

    // Body
    let content_length = headers
        .get("content-length")
        .map(|v| v.parse::<usize>().map_err(|_| ParseError::InvalidContentLength))
        .transpose()?
        .unwrap_or(0);

    if content_length > limits.max_body_bytes {
        return Err(ParseError::BodyTooLarge {
            declared: content_length,
            limit: limits.max_body_bytes,
        });
    }

    let body_bytes = &buf[body_start..];
    if body_bytes.len() < content_length {
        return Err(ParseError::Incomplete);
    }

    let body = (content_length > 0).then(|| body_bytes[..content_length].to_vec());

    let cookies = headers
        .get("cookie")
        .map(|raw| parse_cookies(raw))
        .unwrap_or_default();

    let (path, query) = split_target(target);

    let request = Request {
        method,
        path,
        query,
        version: version.to_string(),
        headers,
        cookies,
        body,
    };

    Ok((request, body_start + content_length))
}

/// Splits the head into lines (terminators stripped) up to the first empty line.
///
/// Returns the lines and the offset where the body begins, or `None` if the
/// empty line has not been received yet.
fn split_head(buf: &[u8]) -> Option<(Vec<&[u8]>, usize)> {
    let mut lines = Vec::new();
    let mut start = 0;

    while let Some(offset) = buf[start..].iter().position(|&b| b == b'\n') {
        let end = start + offset;
        let line = buf[start..end].strip_suffix(b"\r").unwrap_or(&buf[start..end]);
        start = end + 1;

        if line.is_empty() {
            return Some((lines, start));
        }
        lines.push(line);
    }

    None
}
