//! Request routing
//!
//! Maps a parsed request to a handler by method and path, and collapses
//! handler errors into error responses.

pub mod router;

pub use router::{Handler, HandlerResult, PathMatch, Router};
