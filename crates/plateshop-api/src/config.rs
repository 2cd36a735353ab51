//! Server configuration.
//!
//! Resolution order: compiled defaults, then an optional TOML file, then
//! environment variables. The binary applies CLI flags last.

use std::path::{Path, PathBuf};

use plateshop_auth::{AuthConfig, TokenMode};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Listening port override.
pub const ENV_PORT: &str = "PORT";
/// Data file override.
pub const ENV_DATA_FILE: &str = "PLATESHOP_DATA_FILE";
/// Admin username override.
pub const ENV_USERNAME: &str = "PLATESHOP_ADMIN_USERNAME";
/// Admin password override.
pub const ENV_PASSWORD: &str = "PLATESHOP_ADMIN_PASSWORD";
/// Static admin token override.
pub const ENV_TOKEN: &str = "PLATESHOP_ADMIN_TOKEN";
/// Token mode override (`static` or `jwt`).
pub const ENV_TOKEN_MODE: &str = "PLATESHOP_TOKEN_MODE";
/// JWT signing secret.
pub const ENV_JWT_SECRET: &str = "PLATESHOP_JWT_SECRET";

/// Top-level server settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// CSV file holding the products.
    pub data_file: PathBuf,
    /// Directory of storefront assets served at `/`, if any.
    pub static_dir: Option<PathBuf>,
    /// Admin credentials and token settings.
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3100,
            data_file: PathBuf::from("data").join("products.csv"),
            static_dir: Some(PathBuf::from("public")),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load defaults, overlay `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Parse TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Overlay values from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("Invalid {ENV_PORT} value '{port}': {e}")))?;
        }
        if let Some(path) = lookup(ENV_DATA_FILE) {
            self.data_file = PathBuf::from(path);
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.auth.username = username;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.auth.password = password;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.auth.token = token;
        }
        if let Some(mode) = lookup(ENV_TOKEN_MODE) {
            self.auth.mode = mode.parse::<TokenMode>()?;
        }
        if let Some(secret) = lookup(ENV_JWT_SECRET) {
            self.auth.jwt_secret = Some(secret);
        }
        Ok(())
    }

    /// `host:port` string for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
