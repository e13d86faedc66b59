//! Application configuration
//!
//! Loaded from a TOML file. Every field has a default, so a missing file
//! or a partial one still yields a bootable config.
//!
//! ```toml
//! [server]
//! api_port = 8080
//!
//! [security]
//! jwt_secret = "..."
//!
//! [admin]
//! user_ids = ["6f1c2f9e-1d2b-4e0a-9a35-0c6f4b8f5e21"]
//!
//! [storefront]
//! currency = "EUR"
//! segment_images = { exotic = "https://cdn.example.com/exotic.jpg" }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::domain::vehicle::{Segment, SegmentImages};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;
use crate::shared::errors::InfraError;

/// Env var pointing at the config file
pub const CONFIG_ENV: &str = "LUXE_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter, `RUST_LOG` takes precedence
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_issuer: Option<String>,
    pub jwt_audience: Option<String>,
    pub jwt_leeway_secs: u64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            jwt_issuer: jwt.issuer,
            jwt_audience: jwt.audience,
            jwt_leeway_secs: jwt.leeway_secs,
        }
    }
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"***")
            .field("jwt_issuer", &self.jwt_issuer)
            .field("jwt_audience", &self.jwt_audience)
            .field("jwt_leeway_secs", &self.jwt_leeway_secs)
            .finish()
    }
}

/// Users granted the admin role at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub user_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Appended to formatted amounts
    pub currency: String,
    /// Segment name to fallback image URL
    pub segment_images: HashMap<String, String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            segment_images: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub storefront: StorefrontConfig,
}

impl AppConfig {
    /// Read the config file. A file that does not exist yields the defaults.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, InfraError> {
        Ok(toml::from_str(raw)?)
    }

    /// Write the config as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), InfraError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, raw)?;
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            issuer: self.security.jwt_issuer.clone(),
            audience: self.security.jwt_audience.clone(),
            leeway_secs: self.security.jwt_leeway_secs,
        }
    }

    /// Configured fallback images; unknown segment names are skipped
    pub fn segment_images(&self) -> SegmentImages {
        let images = self
            .storefront
            .segment_images
            .iter()
            .filter_map(|(name, url)| match Segment::parse(&name.to_lowercase()) {
                Some(segment) => Some((segment, url.clone())),
                None => {
                    warn!(segment = %name, "Ignoring image for unknown segment");
                    None
                }
            })
            .collect();
        SegmentImages::new(images)
    }

    /// True while the shipped placeholder secret is in use
    pub fn uses_default_secret(&self) -> bool {
        self.security.jwt_secret == JwtConfig::default().secret
    }
}

/// `$LUXE_CONFIG`, else `~/.config/luxe-rental/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("luxe-rental")
        .join("config.toml")
}
