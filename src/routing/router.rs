//! Route lookup and dispatch.
//!
//! Exact routes are tried first, in registration order. Prefix routes are
//! consulted only when no exact route matched. A miss, or any error a handler
//! returns, is rendered here so callers always get a well-formed response.

use crate::http::error::HttpError;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// Result type returned by handlers.
pub type HandlerResult = Result<Response, HttpError>;

/// Something that can answer a request.
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> HandlerResult + Send + Sync,
{
    fn handle(&self, req: &Request) -> HandlerResult {
        self(req)
    }
}

/// How a route's path is compared against the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatch {
    Exact(String),
    Prefix(String),
}

impl PathMatch {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathMatch::Exact(expected) => path == expected,
            PathMatch::Prefix(prefix) => path.starts_with(prefix.as_str()),
        }
    }
}

struct Route {
    method: Method,
    path: PathMatch,
    handler: Box<dyn Handler>,
}

/// Registry of handlers keyed by method and path rule.
///
/// Immutable once shared; wrap in `Arc` to hand it to connections.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for an exact path.
    pub fn route<F>(mut self, method: Method, path: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> HandlerResult + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            path: PathMatch::Exact(path.into()),
            handler: Box::new(handler),
        });
        self
    }

    /// Registers a fallback handler for every path under `prefix`.
    pub fn prefix<F>(mut self, method: Method, prefix: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Request) -> HandlerResult + Send + Sync + 'static,
    {
        self.routes.push(Route {
            method,
            path: PathMatch::Prefix(prefix.into()),
            handler: Box::new(handler),
        });
        self
    }

    fn find(&self, req: &Request) -> Option<&dyn Handler> {
        self.find_where(req, |p| matches!(p, PathMatch::Exact(_)))
            .or_else(|| self.find_where(req, |p| matches!(p, PathMatch::Prefix(_))))
    }

    fn find_where(
        &self,
        req: &Request,
        kind: impl Fn(&PathMatch) -> bool,
    ) -> Option<&dyn Handler> {
        self.routes
            .iter()
            .filter(|r| r.method == req.method && kind(&r.path))
            .find(|r| r.path.matches(&req.path))
            .map(|r| r.handler.as_ref())
    }

    /// Runs the matching handler and returns its response or a rendered error.
    ///
    /// Only parsed requests get here. Parse failures are rendered by
    /// `Connection` before dispatch.
    pub fn dispatch(&self, req: &Request) -> Response {
        let result = match self.find(req) {
            Some(handler) => handler.handle(req),
            None => Err(HttpError::UnsupportedRoute {
                method: req.method,
                path: req.path.clone(),
            }),
        };

        match result {
            Ok(response) => {
                tracing::info!(
                    method = %req.method,
                    path = %req.path,
                    status = response.status.as_u16(),
                    "Request handled"
                );
                response
            }
            Err(e) => {
                tracing::warn!(
                    method = %req.method,
                    path = %req.path,
                    status = e.status().as_u16(),
                    error = %e,
                    "Request failed"
                );
                e.into_response()
            }
        }
    }
}
