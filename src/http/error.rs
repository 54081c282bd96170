//! Domain errors raised by the parser and handlers.
//!
//! Handlers return `Result<Response, HttpError>`. Errors are rendered by
//! `into_response` in two places: the router, for requests that parsed, and
//! the connection, for requests that did not.

use thiserror::Error;

use crate::http::request::Method;
use crate::http::response::{ContentType, Response, ResponseBuilder, StatusCode};

/// Errors that end a request with an HTTP error status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HttpError {
    /// The request line or headers could not be parsed.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// No handler is registered for the method and path.
    #[error("no route for {method} {path}")]
    UnsupportedRoute { method: Method, path: String },

    /// A static resource lookup missed.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// Bad credentials or an unusable session.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The request conflicts with existing state, e.g. a duplicate account.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A collaborator failed in a way the client cannot fix.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::MalformedRequest(_) => StatusCode::BadRequest,
            HttpError::UnsupportedRoute { .. } => StatusCode::BadRequest,
            HttpError::ResourceNotFound(_) => StatusCode::NotFound,
            HttpError::Unauthorized(_) => StatusCode::Unauthorized,
            HttpError::Conflict(_) => StatusCode::BadRequest,
            HttpError::Internal(_) => StatusCode::InternalServerError,
        }
    }

    /// Renders the error as a short HTML response.
    pub fn into_response(self) -> Response {
        let status = self.status();
        let body = format!("{} {}: {}", status.as_u16(), status.reason_phrase(), self);
        ResponseBuilder::new(status)
            .content_type(ContentType::TextHtml)
            .body(body)
            .build()
    }
}
