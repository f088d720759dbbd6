//! Configuration for survey-kml

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fields::{FieldResolver, FieldSynonyms};
use crate::projection::ZoneDescriptor;

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Maximum upload size in megabytes
    #[serde(default = "default_body_limit_mb")]
    pub body_limit_mb: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_body_limit_mb() -> usize {
    100
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_mb: default_body_limit_mb(),
        }
    }
}

impl ServerConfig {
    /// Returns the body limit in bytes
    pub fn body_limit_bytes(&self) -> usize {
        self.body_limit_mb.saturating_mul(1024 * 1024)
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Zone used when a request or command does not name one
    #[serde(default = "default_zone")]
    pub default_zone: String,

    /// Extra header aliases, tried after the built-in ones
    #[serde(default)]
    pub fields: FieldSynonyms,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_zone() -> String {
    "51S".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_zone: default_zone(),
            fields: FieldSynonyms::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file and validates it
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Checks values that serde cannot
    pub fn validate(&self) -> Result<()> {
        ZoneDescriptor::parse(&self.default_zone)
            .map_err(|e| Error::Config(format!("default_zone: {}", e)))?;
        if self.server.body_limit_mb == 0 {
            return Err(Error::Config("server.body_limit_mb must be positive".to_string()));
        }
        Ok(())
    }

    /// Parses the configured default zone
    pub fn zone(&self) -> Result<ZoneDescriptor> {
        ZoneDescriptor::parse(&self.default_zone)
    }

    /// Builds the field resolver including configured aliases
    pub fn resolver(&self) -> FieldResolver {
        FieldResolver::with_synonyms(&self.fields)
    }
}
