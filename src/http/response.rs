/// HTTP status codes supported by the server.
///
/// Reason phrases are rendered in upper snake case on the wire
/// (`302 FOUND`, `401 UNAUTHORIZED`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 302 FOUND
    Found,
    /// 400 BAD_REQUEST
    BadRequest,
    /// 401 UNAUTHORIZED
    Unauthorized,
    /// 404 NOT_FOUND
    NotFound,
    /// 500 INTERNAL_SERVER_ERROR
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::Found.as_u16(), 302);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the reason phrase written on the status line.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
    /// assert_eq!(StatusCode::Unauthorized.reason_phrase(), "UNAUTHORIZED");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "FOUND",
            StatusCode::BadRequest => "BAD_REQUEST",
            StatusCode::Unauthorized => "UNAUTHORIZED",
            StatusCode::NotFound => "NOT_FOUND",
            StatusCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

/// Media types the server emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextHtml,
    TextCss,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html;charset=utf-8",
            ContentType::TextCss => "text/css;charset=utf-8",
        }
    }
}

/// Represents a complete HTTP response ready to be serialized.
///
/// Content-Length is not stored; the writer always derives it from `body`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// Content-Type header, if any
    pub content_type: Option<ContentType>,
    /// Redirect target written as `Location`
    pub location: Option<String>,
    /// Cookies written as one `Set-Cookie` line each, in insertion order
    pub cookies: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use lantern::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Found)
///     .redirect("/index.html")
///     .cookie("JSESSIONID", "abc")
///     .build();
/// assert_eq!(response.location.as_deref(), Some("/index.html"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: Option<ContentType>,
    location: Option<String>,
    cookies: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            location: None,
            cookies: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = Some(content_type);
        self
    }

    /// Sets the `Location` header.
    pub fn redirect(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Appends a `Set-Cookie` pair.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Builds the final Response.
    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            location: self.location,
            cookies: self.cookies,
            body: self.body,
        }
    }
}

impl Response {
    /// Creates a 200 OK HTML response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(ContentType::TextHtml)
            .body(body)
            .build()
    }

    /// Creates a 302 FOUND response redirecting to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        ResponseBuilder::new(StatusCode::Found)
            .redirect(location)
            .build()
    }
}
