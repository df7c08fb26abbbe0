//! Sohayok Common - the community assistant's intent resolution core
//!
//! Ordered keyword rules, first match wins, a fallback always answers.

pub mod api;
pub mod config;
pub mod error;
pub mod knowledge_base;
pub mod normalize;
pub mod resolver;
pub mod rule_table;
pub mod session;
pub mod transcript;

pub use config::{ConfigSource, SohayokConfig};
pub use error::{ConfigurationError, SohayokError};
pub use normalize::normalize;
pub use resolver::{explain, resolve, IntentEngine, Resolution};
pub use rule_table::{Rule, RuleSpec, RuleTable, RuleTableBuilder};
pub use session::{Clock, ConversationSession, SharedSession, SystemClock};
pub use transcript::{ConversationLog, Message, Sender};
