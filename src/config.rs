use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

use crate::app::User;
use crate::http::parser::Limits;

/// Env var naming a YAML config file.
pub const CONFIG_ENV: &str = "LANTERN_CONFIG";
/// Env var overriding `listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Bind address (e.g., "127.0.0.1:8080")
    pub listen_addr: String,

    /// Directory static resources are served from
    pub static_root: String,

    /// Default tracing filter, overridden by RUST_LOG
    pub log_level: String,

    /// Largest accepted request line plus headers
    pub max_head_bytes: usize,

    /// Largest accepted Content-Length
    pub max_body_bytes: usize,

    /// Accounts seeded into the credential store at startup
    pub users: Vec<User>,
}

impl Default for Config {
    fn default() -> Self {
        let limits = Limits::default();
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            static_root: "static".to_string(),
            log_level: "info".to_string(),
            max_head_bytes: limits.max_head_bytes,
            max_body_bytes: limits.max_body_bytes,
            users: vec![User::new("gugu", "password", "hkkang@woowahan.com")],
        }
    }
}

impl Config {
    /// Loads the file named by `LANTERN_CONFIG` (defaults when unset), then
    /// applies the `LISTEN` override.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(listen_addr) = std::env::var(LISTEN_ENV) {
            cfg.listen_addr = listen_addr;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(content)?;
        if cfg.max_head_bytes == 0 {
            anyhow::bail!("max_head_bytes must be greater than zero");
        }
        Ok(cfg)
    }

    pub fn limits(&self) -> Limits {
        Limits {
            max_head_bytes: self.max_head_bytes,
            max_body_bytes: self.max_body_bytes,
        }
    }
}
