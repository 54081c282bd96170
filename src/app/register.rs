use std::sync::Arc;

use crate::app::INDEX_PAGE;
use crate::app::login::required;
use crate::app::resource::ResourceController;
use crate::app::user::{User, UserRepository};
use crate::http::form;
use crate::http::request::Request;
use crate::http::response::Response;
use crate::routing::HandlerResult;

const REGISTER_PAGE: &str = "/register.html";

pub struct RegisterController {
    users: Arc<dyn UserRepository>,
    pages: ResourceController,
}

impl RegisterController {
    pub fn new(users: Arc<dyn UserRepository>, pages: ResourceController) -> Self {
        Self { users, pages }
    }

    pub fn show_form(&self, req: &Request) -> HandlerResult {
        self.pages.serve(req, REGISTER_PAGE)
    }

    /// `POST /register`: store a new account. An existing account is left untouched.
    pub fn submit(&self, req: &Request) -> HandlerResult {
        let fields = form::parse(req.body.as_deref().unwrap_or_default());
        let user = User::new(
            required(&fields, "account")?,
            required(&fields, "password")?,
            required(&fields, "email")?,
        );

        let account = user.account.clone();
        self.users.save(user)?;
        tracing::info!(account = %account, "User registered");

        Ok(Response::redirect(INDEX_PAGE))
    }
}
