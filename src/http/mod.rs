//! HTTP/1.1 protocol implementation.
//!
//! Each accepted connection carries exactly one request and one response.
//! `Connection: keep-alive` is accepted but ignored.
//!
//! # Architecture
//!
//! - **`connection`**: Drives one exchange: read, dispatch, write, close
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: Parsed request with case-insensitive headers and cookies
//! - **`response`**: Response representation with builder pattern
//! - **`writer`**: Serializes and writes responses to the client
//! - **`error`**: Errors that end a request with an error status
//! - **`form`**: URL-encoded form decoding
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for a complete request
//!        └──────┬──────┘
//!               │ Request parsed          (malformed → 400 straight to Writing)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Router dispatch
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod error;
pub mod form;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
