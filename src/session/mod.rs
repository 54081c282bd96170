//! Server-side session state
//!
//! Sessions correlate a client cookie with state held in this process. They
//! are never expired or destroyed and last as long as the store does.

pub mod store;

pub use store::{Attribute, Session, SessionError, SessionStore};
