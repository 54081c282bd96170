//! Serves files from the static root for any unmatched GET.

use std::sync::Arc;

use crate::app::static_files::ResourceLoader;
use crate::http::request::Request;
use crate::http::response::{ContentType, ResponseBuilder, StatusCode};
use crate::routing::HandlerResult;

#[derive(Clone)]
pub struct ResourceController {
    resources: Arc<dyn ResourceLoader>,
}

impl ResourceController {
    pub fn new(resources: Arc<dyn ResourceLoader>) -> Self {
        Self { resources }
    }

    /// Serves `path` as HTML, or as CSS when the client's Accept header asks for it.
    pub fn serve(&self, req: &Request, path: &str) -> HandlerResult {
        let content_type = if req.accepts("text/css") {
            ContentType::TextCss
        } else {
            ContentType::TextHtml
        };

        let body = self.resources.load(path)?;

        Ok(ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .body(body)
            .build())
    }

    pub fn handle(&self, req: &Request) -> HandlerResult {
        self.serve(req, &req.path)
    }
}
