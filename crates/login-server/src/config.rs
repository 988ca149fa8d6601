// File: src/config.rs
// Purpose: Configuration parsing from login.toml

use anyhow::{Context, Result};
use login_validation_core::RuleSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    /// Field rules for both tiers; the built-in login rules when absent
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Static assets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory holding the wasm-pack output, served under /pkg
    #[serde(default = "default_pkg_dir")]
    pub pkg_dir: String,
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_pkg_dir() -> String {
    "pkg".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            pkg_dir: default_pkg_dir(),
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./login.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("login.toml")
    }

    /// Apply a `PORT` value from the environment, if it parses
    pub fn with_port_override(mut self, port: Option<String>) -> Self {
        if let Some(port) = port.and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        self
    }

    pub fn rule_set(&self) -> RuleSet {
        self.rules.clone().unwrap_or_default()
    }
}
