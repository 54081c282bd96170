use std::collections::HashMap;
use std::fmt;

/// HTTP request methods.
///
/// Only GET and POST are served. Any other token on the request line is
/// rejected by the parser with a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET - Retrieve a resource
    GET,
    /// POST - Submit form data
    POST,
}

impl Method {
    /// Parses an HTTP method from a string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the method (case-sensitive, uppercase)
    ///
    /// # Returns
    ///
    /// `Some(Method)` if the string matches a supported method, `None` otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::request::Method;
    /// assert_eq!(Method::from_str("GET"), Some(Method::GET));
    /// assert_eq!(Method::from_str("get"), None);
    /// assert_eq!(Method::from_str("PUT"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(Method::GET),
            "POST" => Some(Method::POST),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents a parsed HTTP request from a client.
///
/// Header names are stored lowercased so lookups are case-insensitive.
/// `body` is `None` unless a `Content-Length` greater than zero was declared.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET or POST)
    pub method: Method,
    /// The request path without the query string (e.g., "/index.html")
    pub path: String,
    /// Raw query string after `?`, if any
    pub query: Option<String>,
    /// HTTP version (typically "HTTP/1.1")
    pub version: String,
    /// Request headers keyed by lowercased name
    pub headers: HashMap<String, String>,
    /// Cookies from the `Cookie` header
    pub cookies: HashMap<String, String>,
    /// Request body, present only for a positive Content-Length
    pub body: Option<Vec<u8>>,
}

/// Builder for constructing Request objects outside the parser.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    version: Option<String>,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            version: None,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the request-target; a `?query` suffix is split off on build.
    pub fn path(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Adds a header unless one with the same (case-insensitive) name exists.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .entry(key.into().to_ascii_lowercase())
            .or_insert_with(|| value.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        self.body = if body.is_empty() { None } else { Some(body) };
        self
    }

    pub fn build(self) -> Result<Request, &'static str> {
        let target = self.target.ok_or("path missing")?;
        let (path, query) = split_target(&target);
        let cookies = self
            .headers
            .get("cookie")
            .map(|raw| parse_cookies(raw))
            .unwrap_or_default();

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            path,
            query,
            version: self.version.unwrap_or_else(|| "HTTP/1.1".to_string()),
            headers: self.headers,
            cookies,
            body: self.body,
        })
    }
}

impl Request {
    /// Retrieves a header value by name, ignoring ASCII case.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .get(&key.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Retrieves a cookie value by name.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(|v| v.as_str())
    }

    /// Retrieves the Content-Length header value and parses it as a usize.
    ///
    /// Returns 0 if the header is missing or not a valid number.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Decoded query parameters. Empty when the target had no query string.
    pub fn query_params(&self) -> HashMap<String, String> {
        self.query
            .as_deref()
            .map(|q| crate::http::form::parse(q.as_bytes()))
            .unwrap_or_default()
    }

    /// Whether the `Accept` header mentions the given media type.
    pub fn accepts(&self, media_type: &str) -> bool {
        self.header("Accept")
            .map(|v| v.contains(media_type))
            .unwrap_or(false)
    }
}

/// Splits a request-target into its path and optional raw query.
pub(crate) fn split_target(target: &str) -> (String, Option<String>) {
    match target.split_once('?') {
        Some((path, query)) => (path.to_string(), Some(query.to_string())),
        None => (target.to_string(), None),
    }
}

/// Parses a `Cookie` header value (`a=1; b=2`) into name/value pairs.
///
/// Pairs without `=` are skipped. The first occurrence of a name wins.
pub(crate) fn parse_cookies(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for pair in raw.split(';') {
        if let Some((name, value)) = pair.split_once('=') {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            cookies
                .entry(name.to_string())
                .or_insert_with(|| value.trim().to_string());
        }
    }
    cookies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookies_split_and_trim() {
        let cookies = parse_cookies("yummy_cookie=choco; tasty_cookie=strawberry ; JSESSIONID=abc");
        assert_eq!(cookies.get("yummy_cookie").unwrap(), "choco");
        assert_eq!(cookies.get("tasty_cookie").unwrap(), "strawberry");
        assert_eq!(cookies.get("JSESSIONID").unwrap(), "abc");
    }

    #[test]
    fn cookie_without_value_is_skipped() {
        let cookies = parse_cookies("flag; a=1");
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("a").unwrap(), "1");
    }

    #[test]
    fn target_split() {
        assert_eq!(
            split_target("/search?q=rust"),
            ("/search".to_string(), Some("q=rust".to_string()))
        );
        assert_eq!(split_target("/"), ("/".to_string(), None));
    }
}
