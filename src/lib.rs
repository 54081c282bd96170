//! Lantern - minimal HTTP/1.1 server
//!
//! Core library: wire parsing and serialization, routing, and sessions,
//! plus a small demo application with login and registration.

pub mod app;
pub mod config;
pub mod http;
pub mod routing;
pub mod server;
pub mod session;
