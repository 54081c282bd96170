use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::HandlerResult;

pub const GREETING: &str = "Hello world!";

pub fn home(_req: &Request) -> HandlerResult {
    Ok(Response::ok(GREETING))
}
