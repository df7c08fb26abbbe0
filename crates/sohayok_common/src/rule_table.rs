//! Rule Table - the ordered, read-only knowledge base
//!
//! A table is an ordered list of rules followed by exactly one fallback.
//! Order is priority: the resolver walks the rules front to back and the
//! first rule with a matching trigger wins, so a specific rule must sit
//! before any broader rule sharing one of its keywords.
//!
//! Tables are validated once, at construction, and never change afterwards.
//! Replacing the knowledge base means building a new table.
//!
//! Rule files are TOML:
//!
//! ```toml
//! [[rule]]
//! id = "greeting"
//! triggers = ["hello", "হ্যালো"]
//! response = "Hello! How can I help?"
//!
//! [[rule]]
//! id = "fallback"
//! fallback = true
//! response = "Sorry, I did not understand that."
//! ```

use crate::error::{ConfigurationError, SohayokError};
use crate::normalize::normalize;
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Id given to the fallback by the builder
pub const FALLBACK_ID: &str = "fallback";

/// One entry of a rule table definition, before validation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    pub id: String,
    #[serde(default)]
    pub triggers: Vec<String>,
    pub response: String,
    /// Marks the terminal always-matching entry
    #[serde(default)]
    pub fallback: bool,
}

impl RuleSpec {
    pub fn rule<I, S>(id: impl Into<String>, triggers: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            triggers: triggers.into_iter().map(Into::into).collect(),
            response: response.into(),
            fallback: false,
        }
    }

    pub fn fallback(id: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            triggers: Vec::new(),
            response: response.into(),
            fallback: true,
        }
    }
}

/// A validated rule. Triggers are stored normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    id: String,
    triggers: Vec<String>,
    response: String,
}

impl Rule {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn triggers(&self) -> &[String] {
        &self.triggers
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    /// The fallback is the only rule without triggers
    pub fn is_fallback(&self) -> bool {
        self.triggers.is_empty()
    }

    /// First trigger (in declaration order) contained in already-normalized input
    pub fn matching_trigger(&self, normalized_input: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|t| normalized_input.contains(t.as_str()))
            .map(String::as_str)
    }
}

/// Ordered, immutable rule table with a terminal fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<Rule>,
    fallback: Rule,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(rename = "rule", default)]
    rules: Vec<RuleSpec>,
}

impl RuleTable {
    /// Validate an ordered definition and build the table
    pub fn new(specs: Vec<RuleSpec>) -> Result<Self, ConfigurationError> {
        let fallback_count = specs.iter().filter(|s| s.fallback).count();
        match fallback_count {
            0 => return Err(ConfigurationError::MissingFallback),
            1 => {}
            _ => return Err(ConfigurationError::DuplicateFallback),
        }
        if !specs.last().is_some_and(|s| s.fallback) {
            return Err(ConfigurationError::FallbackNotLast);
        }
        if specs.len() < 2 {
            return Err(ConfigurationError::NoRules);
        }

        let mut seen_ids = HashSet::new();
        for spec in &specs {
            if !seen_ids.insert(spec.id.as_str()) {
                return Err(ConfigurationError::DuplicateRuleId(spec.id.clone()));
            }
        }

        let mut specs = specs;
        let fallback_spec = specs.pop().ok_or(ConfigurationError::MissingFallback)?;
        if !fallback_spec.triggers.is_empty() {
            return Err(ConfigurationError::FallbackHasTriggers);
        }
        if fallback_spec.response.trim().is_empty() {
            return Err(ConfigurationError::EmptyResponse {
                rule: fallback_spec.id,
            });
        }

        let rules = specs
            .into_iter()
            .map(Self::validate_rule)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Built rule table: {} rules, fallback '{}'",
            rules.len(),
            fallback_spec.id
        );

        Ok(Self {
            rules,
            fallback: Rule {
                id: fallback_spec.id,
                triggers: Vec::new(),
                response: fallback_spec.response,
            },
        })
    }

    fn validate_rule(spec: RuleSpec) -> Result<Rule, ConfigurationError> {
        if spec.triggers.is_empty() {
            return Err(ConfigurationError::EmptyTriggers { rule: spec.id });
        }
        if spec.response.trim().is_empty() {
            return Err(ConfigurationError::EmptyResponse { rule: spec.id });
        }

        let mut triggers: Vec<String> = Vec::with_capacity(spec.triggers.len());
        for raw in &spec.triggers {
            let trigger = normalize(raw);
            if trigger.is_empty() {
                return Err(ConfigurationError::EmptyTrigger { rule: spec.id });
            }
            if !triggers.contains(&trigger) {
                triggers.push(trigger);
            }
        }

        Ok(Rule {
            id: spec.id,
            triggers,
            response: spec.response,
        })
    }

    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::default()
    }

    /// Parse and validate a TOML rule file body
    pub fn from_toml_str(body: &str) -> Result<Self, SohayokError> {
        let file: RuleFile = toml::from_str(body)?;
        Ok(Self::new(file.rules)?)
    }

    /// Load a rule file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SohayokError> {
        let body = fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&body)
    }

    /// Non-fallback rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn fallback(&self) -> &Rule {
        &self.fallback
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.iter().find(|r| r.id == id)
    }

    /// All rules in evaluation order, fallback last
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }

    /// Number of rules including the fallback
    pub fn rule_count(&self) -> usize {
        self.rules.len() + 1
    }
}

/// Collects rule definitions in order; `build` validates them
#[derive(Debug, Default)]
pub struct RuleTableBuilder {
    specs: Vec<RuleSpec>,
}

impl RuleTableBuilder {
    pub fn rule<I, S>(mut self, id: impl Into<String>, triggers: I, response: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specs.push(RuleSpec::rule(id, triggers, response));
        self
    }

    pub fn fallback(mut self, response: impl Into<String>) -> Self {
        self.specs.push(RuleSpec::fallback(FALLBACK_ID, response));
        self
    }

    pub fn build(self) -> Result<RuleTable, ConfigurationError> {
        RuleTable::new(self.specs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> RuleTable {
        RuleTable::builder()
            .rule("greeting", ["Hello", "হ্যালো"], "hi there")
            .rule("bus", ["bus", "বাস"], "bus info")
            .fallback("sorry")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_keeps_order() {
        let table = small_table();
        let ids: Vec<&str> = table.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["greeting", "bus", FALLBACK_ID]);
        assert_eq!(table.rule_count(), 3);
        assert!(table.fallback().is_fallback());
    }

    #[test]
    fn test_triggers_normalized_at_load() {
        let table = small_table();
        let greeting = table.get("greeting").unwrap();
        assert_eq!(greeting.triggers(), &["hello".to_string(), "হ্যালো".to_string()]);
    }

    #[test]
    fn test_duplicate_triggers_collapse() {
        let table = RuleTable::builder()
            .rule("greeting", ["hello", "HELLO", " hello "], "hi")
            .fallback("sorry")
            .build()
            .unwrap();
        assert_eq!(table.rules()[0].triggers().len(), 1);
    }

    #[test]
    fn test_missing_fallback() {
        let err = RuleTable::builder().rule("a", ["x"], "y").build().unwrap_err();
        assert_eq!(err, ConfigurationError::MissingFallback);
    }

    #[test]
    fn test_duplicate_fallback() {
        let err = RuleTable::new(vec![
            RuleSpec::rule("a", ["x"], "y"),
            RuleSpec::fallback("f1", "one"),
            RuleSpec::fallback("f2", "two"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateFallback);
    }

    #[test]
    fn test_fallback_not_last() {
        let err = RuleTable::new(vec![
            RuleSpec::fallback("f", "sorry"),
            RuleSpec::rule("a", ["x"], "y"),
        ])
        .unwrap_err();
        assert_eq!(err, ConfigurationError::FallbackNotLast);
    }

    #[test]
    fn test_fallback_with_triggers() {
        let mut fallback = RuleSpec::fallback("f", "sorry");
        fallback.triggers.push("x".to_string());
        let err = RuleTable::new(vec![RuleSpec::rule("a", ["x"], "y"), fallback]).unwrap_err();
        assert_eq!(err, ConfigurationError::FallbackHasTriggers);
    }

    #[test]
    fn test_fallback_only_is_rejected() {
        let err = RuleTable::builder().fallback("sorry").build().unwrap_err();
        assert_eq!(err, ConfigurationError::NoRules);
    }

    #[test]
    fn test_empty_trigger_set() {
        let err = RuleTable::builder()
            .rule("a", Vec::<String>::new(), "y")
            .fallback("sorry")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyTriggers { rule: "a".to_string() });
    }

    #[test]
    fn test_blank_trigger() {
        let err = RuleTable::builder()
            .rule("a", ["ok", "   "], "y")
            .fallback("sorry")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyTrigger { rule: "a".to_string() });
    }

    #[test]
    fn test_empty_response() {
        let err = RuleTable::builder()
            .rule("a", ["x"], "")
            .fallback("sorry")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::EmptyResponse { rule: "a".to_string() });

        let err = RuleTable::builder().rule("a", ["x"], "y").fallback(" ").build().unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::EmptyResponse {
                rule: FALLBACK_ID.to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_id() {
        let err = RuleTable::builder()
            .rule("a", ["x"], "y")
            .rule("a", ["z"], "w")
            .fallback("sorry")
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::DuplicateRuleId("a".to_string()));
    }

    #[test]
    fn test_from_toml() {
        let body = r#"
            [[rule]]
            id = "history"
            triggers = ["ইতিহাস", "History"]
            response = "history text"

            [[rule]]
            id = "fallback"
            fallback = true
            response = "sorry"
        "#;
        let table = RuleTable::from_toml_str(body).unwrap();
        assert_eq!(table.rules().len(), 1);
        assert_eq!(table.rules()[0].triggers()[1], "history");
        assert_eq!(table.fallback().response(), "sorry");
    }

    #[test]
    fn test_from_toml_validation_error() {
        let body = r#"
            [[rule]]
            id = "history"
            triggers = ["history"]
            response = "history text"
        "#;
        let err = RuleTable::from_toml_str(body).unwrap_err();
        assert!(matches!(
            err,
            SohayokError::Configuration(ConfigurationError::MissingFallback)
        ));
    }

    #[test]
    fn test_from_toml_parse_error() {
        let err = RuleTable::from_toml_str("[[rule]\nid = ").unwrap_err();
        assert!(matches!(err, SohayokError::Toml(_)));
    }

    #[test]
    fn test_matching_trigger_declaration_order() {
        let table = RuleTable::builder()
            .rule("a", ["bus", "bus stand"], "y")
            .fallback("sorry")
            .build()
            .unwrap();
        assert_eq!(table.rules()[0].matching_trigger("the bus stand"), Some("bus"));
        assert_eq!(table.rules()[0].matching_trigger("train"), None);
    }
}
