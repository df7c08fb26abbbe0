//! Sohayok Configuration
//!
//! Configuration lives in /etc/sohayok/config.toml unless `$SOHAYOK_CONFIG`
//! or an explicit path says otherwise. A missing file means defaults; a file
//! that exists but does not parse is an error.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1:7865"
//! max_sessions = 1000
//! session_idle_secs = 1800
//! max_messages_per_session = 2000
//!
//! [log]
//! level = "info"
//!
//! [knowledge]
//! rules_file = "/etc/sohayok/rules.toml"
//! ```

use crate::error::SohayokError;
use crate::knowledge_base;
use crate::rule_table::RuleTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// System configuration directory
pub const SYSTEM_CONFIG_DIR: &str = "/etc/sohayok";
const CONFIG_FILE: &str = "config.toml";

/// Environment override for the config path
pub const CONFIG_ENV: &str = "SOHAYOK_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Live sessions the daemon keeps before refusing new ones
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Sessions untouched for this long are discarded
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// Log size at which a session stops accepting messages
    #[serde(default = "default_max_messages_per_session")]
    pub max_messages_per_session: usize,
}

fn default_bind() -> String {
    // Localhost only; a reverse proxy fronts the portal
    "127.0.0.1:7865".to_string()
}

fn default_max_sessions() -> usize {
    1000
}

fn default_session_idle_secs() -> u64 {
    30 * 60
}

fn default_max_messages_per_session() -> usize {
    2000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            max_sessions: default_max_sessions(),
            session_idle_secs: default_session_idle_secs(),
            max_messages_per_session: default_max_messages_per_session(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogConfig {
    /// Used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeConfig {
    /// TOML rule file replacing the built-in knowledge base
    #[serde(default)]
    pub rules_file: Option<PathBuf>,
}

/// Where a loaded configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    /// Nothing at this path, defaults in effect
    Defaults(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults(path) => write!(f, "defaults (no file at {})", path.display()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SohayokConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl SohayokConfig {
    /// Resolve the config path: explicit, then environment, then system default
    pub fn config_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return PathBuf::from(path);
            }
        }
        Path::new(SYSTEM_CONFIG_DIR).join(CONFIG_FILE)
    }

    pub fn from_toml_str(body: &str) -> Result<Self, SohayokError> {
        Ok(toml::from_str(body)?)
    }

    /// Load from a path; defaults when the file does not exist.
    /// Callers log the returned source once their subscriber is up.
    pub fn load_from(path: &Path) -> Result<(Self, ConfigSource), SohayokError> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults(path.to_path_buf())));
        }
        let body = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&body)?;
        Ok((config, ConfigSource::File(path.to_path_buf())))
    }

    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource), SohayokError> {
        Self::load_from(&Self::config_path(explicit))
    }

    /// The configured rule file if any, otherwise the built-in knowledge base
    pub fn load_rule_table(&self) -> Result<RuleTable, SohayokError> {
        match &self.knowledge.rules_file {
            Some(path) => {
                let table = RuleTable::load(path)?;
                info!(
                    "Loaded {} rules from {}",
                    table.rule_count(),
                    path.display()
                );
                Ok(table)
            }
            None => Ok(knowledge_base::default_table()?),
        }
    }
}
