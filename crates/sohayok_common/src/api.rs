//! JSON request/response bodies shared by sohayokd and sohayokctl.

use crate::resolver::Resolution;
use crate::transcript::ConversationLog;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default daemon address
pub const DEFAULT_DAEMON_URL: &str = "http://127.0.0.1:7865";

/// User text in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Stateless resolution out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveResponse {
    pub text: String,
    pub rule_id: String,
    #[serde(default)]
    pub trigger: Option<String>,
    pub fallback: bool,
}

impl From<Resolution> for ResolveResponse {
    fn from(r: Resolution) -> Self {
        Self {
            text: r.response,
            rule_id: r.rule_id,
            trigger: r.trigger,
            fallback: r.fallback,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLog {
    pub session_id: Uuid,
    pub messages: ConversationLog,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Rules in the current table, fallback included
    pub rules: usize,
    pub sessions: usize,
    pub uptime_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub rules: usize,
}
