//! Static resource lookup under a fixed root directory

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::http::error::HttpError;

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("resource {0:?} not found")]
    NotFound(String),
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<ResourceError> for HttpError {
    fn from(err: ResourceError) -> Self {
        match err {
            ResourceError::NotFound(path) => HttpError::ResourceNotFound(path),
            other => HttpError::Internal(other.to_string()),
        }
    }
}

/// Resolves a request path to file bytes.
pub trait ResourceLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Reads resources from the filesystem below `root`.
#[derive(Debug, Clone)]
pub struct FsResourceLoader {
    root: PathBuf,
}

impl FsResourceLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps `/css/a.css` to `<root>/css/a.css`; anything leaving the root yields `None`.
    fn resolve(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();

        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }

        Some(resolved)
    }
}

impl ResourceLoader for FsResourceLoader {
    fn load(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let file = self
            .resolve(path)
            .ok_or_else(|| ResourceError::NotFound(path.to_string()))?;

        if !file.is_file() {
            return Err(ResourceError::NotFound(path.to_string()));
        }

        std::fs::read(&file).map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => ResourceError::NotFound(path.to_string()),
            _ => ResourceError::Io {
                path: path.to_string(),
                source,
            },
        })
    }
}
