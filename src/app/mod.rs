//! Demo application
//!
//! A home page, static assets, login and registration wired onto the router.
//! The credential store and static file lookup are injected so tests can
//! substitute their own.

pub mod home;
pub mod login;
pub mod register;
pub mod resource;
pub mod static_files;
pub mod user;

use std::sync::Arc;

use crate::http::request::{Method, Request};
use crate::routing::Router;
use crate::session::SessionStore;

pub use login::LoginController;
pub use register::RegisterController;
pub use resource::ResourceController;
pub use static_files::{FsResourceLoader, ResourceError, ResourceLoader};
pub use user::{InMemoryUserRepository, RepositoryError, User, UserRepository};

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "JSESSIONID";
/// Session attribute holding the logged-in `User`.
pub const USER_ATTRIBUTE: &str = "user";
/// Where successful logins and registrations land.
pub const INDEX_PAGE: &str = "/index.html";

/// Builds the application's route table.
pub fn router(
    sessions: SessionStore,
    users: Arc<dyn UserRepository>,
    resources: Arc<dyn ResourceLoader>,
) -> Router {
    let pages = ResourceController::new(resources);
    let login = Arc::new(LoginController::new(sessions, users.clone(), pages.clone()));
    let register = Arc::new(RegisterController::new(users, pages.clone()));

    let show_login = login.clone();
    let show_register = register.clone();

    Router::new()
        .route(Method::GET, "/", home::home)
        .route(Method::GET, "/login", move |req: &Request| show_login.show_form(req))
        .route(Method::POST, "/login", move |req: &Request| login.submit(req))
        .route(Method::GET, "/register", move |req: &Request| show_register.show_form(req))
        .route(Method::POST, "/register", move |req: &Request| register.submit(req))
        .prefix(Method::GET, "/", move |req: &Request| pages.handle(req))
}
