//! Error types for Sohayok.

use thiserror::Error;

/// A malformed rule table. Raised only while a table is being built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Rule table has no fallback entry")]
    MissingFallback,

    #[error("Rule table has more than one fallback entry")]
    DuplicateFallback,

    #[error("Fallback entry must be the last entry of the rule table")]
    FallbackNotLast,

    #[error("Fallback entry must not declare triggers")]
    FallbackHasTriggers,

    #[error("Rule '{rule}' has no triggers")]
    EmptyTriggers { rule: String },

    #[error("Rule '{rule}' has an empty trigger")]
    EmptyTrigger { rule: String },

    #[error("Rule '{rule}' has an empty response")]
    EmptyResponse { rule: String },

    #[error("Rule id '{0}' is used more than once")]
    DuplicateRuleId(String),

    #[error("Rule table has no rules besides the fallback")]
    NoRules,
}

#[derive(Error, Debug)]
pub enum SohayokError {
    #[error("Invalid rule table: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}
