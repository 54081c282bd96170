//! Login flow
//!
//! ```text
//!   Anonymous ──valid credentials──▶ Authenticated (session created, cookie issued)
//!       │
//!       └──invalid credentials──▶ Anonymous (401)
//!
//!   cookie presented ──token known, user bound──▶ Authenticated (302)
//!                    ├─token unknown──▶ 401 invalid session
//!                    └─no user bound──▶ 401 no user bound to session
//! ```

use std::sync::Arc;

use crate::app::resource::ResourceController;
use crate::app::user::{User, UserRepository};
use crate::app::{INDEX_PAGE, SESSION_COOKIE, USER_ATTRIBUTE};
use crate::http::error::HttpError;
use crate::http::form;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routing::HandlerResult;
use crate::session::SessionStore;

const LOGIN_PAGE: &str = "/login.html";

pub struct LoginController {
    sessions: SessionStore,
    users: Arc<dyn UserRepository>,
    pages: ResourceController,
}

impl LoginController {
    pub fn new(
        sessions: SessionStore,
        users: Arc<dyn UserRepository>,
        pages: ResourceController,
    ) -> Self {
        Self {
            sessions,
            users,
            pages,
        }
    }

    /// `GET /login`: the form for anonymous clients, a redirect for logged-in ones.
    pub fn show_form(&self, req: &Request) -> HandlerResult {
        match req.cookie(SESSION_COOKIE) {
            Some(token) => self.resume(token),
            None => self.pages.serve(req, LOGIN_PAGE),
        }
    }

    /// `POST /login`: continue a presented session or authenticate form credentials.
    pub fn submit(&self, req: &Request) -> HandlerResult {
        if let Some(token) = req.cookie(SESSION_COOKIE) {
            return self.resume(token);
        }

        let fields = form::parse(req.body.as_deref().unwrap_or_default());
        let account = required(&fields, "account")?;
        let password = required(&fields, "password")?;

        self.login(account, password)
    }

    fn resume(&self, token: &str) -> HandlerResult {
        let user = self.sessions.attribute::<User>(token, USER_ATTRIBUTE)?;
        tracing::debug!(account = %user.account, "Session resumed");
        Ok(Response::redirect(INDEX_PAGE))
    }

    fn login(&self, account: &str, password: &str) -> HandlerResult {
        let user = self
            .users
            .find_by_account(account)
            .filter(|user| user.check_password(password))
            .ok_or_else(|| HttpError::Unauthorized("invalid account or password".to_string()))?;

        let token = self.sessions.create();
        self.sessions.set_attribute(&token, USER_ATTRIBUTE, user)?;
        tracing::info!(account = %account, "User logged in");

        Ok(ResponseBuilder::new(StatusCode::Found)
            .redirect(INDEX_PAGE)
            .cookie(SESSION_COOKIE, token)
            .build())
    }
}

/// Looks up a form field, treating a missing one as a malformed request.
pub(crate) fn required<'a>(
    fields: &'a std::collections::HashMap<String, String>,
    name: &str,
) -> Result<&'a str, HttpError> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| HttpError::MalformedRequest(format!("missing form field {:?}", name)))
}
