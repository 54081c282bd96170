//! Process-wide session storage
//!
//! Sessions live in a concurrent map keyed by an opaque random token. The
//! store is the only owner; callers read and write attributes by token.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::http::error::HttpError;

/// Value stored under a session attribute name.
pub type Attribute = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// No session exists for the presented token.
    #[error("invalid session")]
    UnknownSession,

    /// The session exists but holds no attribute of the requested name and type.
    #[error("session has no attribute {0:?}")]
    MissingAttribute(String),
}

impl From<SessionError> for HttpError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::UnknownSession => HttpError::Unauthorized("invalid session".to_string()),
            SessionError::MissingAttribute(_) => {
                HttpError::Unauthorized("no user bound to session".to_string())
            }
        }
    }
}

/// Server-held state for one client.
pub struct Session {
    /// Opaque token handed to the client as a cookie value
    pub id: String,

    attributes: HashMap<String, Attribute>,
}

impl Session {
    fn new(id: String) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Concurrent token → session map shared by all connections.
///
/// Cloning is cheap and every clone refers to the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty session under a fresh random token and returns the token.
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), Session::new(id.clone()));
        tracing::debug!(sessions = self.sessions.len(), "Session created");
        id
    }

    pub fn contains(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    /// Stores `value` under `name`, replacing any previous value.
    pub fn set_attribute<T>(&self, token: &str, name: &str, value: T) -> Result<(), SessionError>
    where
        T: Any + Send + Sync,
    {
        let mut session = self
            .sessions
            .get_mut(token)
            .ok_or(SessionError::UnknownSession)?;
        session.attributes.insert(name.to_string(), Arc::new(value));
        Ok(())
    }

    /// Reads the attribute `name` as a `T`.
    ///
    /// An attribute stored with a different type counts as missing.
    pub fn attribute<T>(&self, token: &str, name: &str) -> Result<Arc<T>, SessionError>
    where
        T: Any + Send + Sync,
    {
        let session = self
            .sessions
            .get(token)
            .ok_or(SessionError::UnknownSession)?;

        let value = session
            .attributes
            .get(name)
            .cloned()
            .ok_or_else(|| SessionError::MissingAttribute(name.to_string()))?;

        value
            .downcast::<T>()
            .map_err(|_| SessionError::MissingAttribute(name.to_string()))
    }

    /// Removes an attribute, returning whether it was present.
    pub fn remove_attribute(&self, token: &str, name: &str) -> Result<bool, SessionError> {
        let mut session = self
            .sessions
            .get_mut(token)
            .ok_or(SessionError::UnknownSession)?;
        Ok(session.attributes.remove(name).is_some())
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
