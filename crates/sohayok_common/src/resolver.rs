//! Intent Resolver - deterministic first-match-wins selection
//!
//! Maps user text to exactly one canned response:
//! 1. Normalize the input (lower-case, trim)
//! 2. Walk the non-fallback rules in table order
//! 3. The first rule with a trigger contained in the input wins
//! 4. Nothing matched (blank input included): the fallback answers
//!
//! Resolution is pure. Same input and table, same answer, no side effects.

use crate::normalize::normalize;
use crate::rule_table::{Rule, RuleTable};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Resolution outcome with the diagnostics behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Id of the rule that answered
    pub rule_id: String,
    /// Trigger that fired, None when the fallback answered
    pub trigger: Option<String>,
    /// Whether the fallback answered
    pub fallback: bool,
    /// Canned response, verbatim
    pub response: String,
}

/// Pick the answering rule and the trigger that selected it
fn select<'t>(input: &str, table: &'t RuleTable) -> (&'t Rule, Option<&'t str>) {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return (table.fallback(), None);
    }

    for rule in table.rules() {
        if let Some(trigger) = rule.matching_trigger(&normalized) {
            return (rule, Some(trigger));
        }
    }

    (table.fallback(), None)
}

/// Resolve user text to a response
pub fn resolve(input: &str, table: &RuleTable) -> String {
    select(input, table).0.response().to_string()
}

/// Resolve and report which rule and trigger answered
pub fn explain(input: &str, table: &RuleTable) -> Resolution {
    let (rule, trigger) = select(input, table);
    Resolution {
        rule_id: rule.id().to_string(),
        trigger: trigger.map(str::to_string),
        fallback: rule.is_fallback(),
        response: rule.response().to_string(),
    }
}

/// Shareable handle over an immutable table
#[derive(Debug, Clone)]
pub struct IntentEngine {
    table: Arc<RuleTable>,
}

impl IntentEngine {
    pub fn new(table: RuleTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn resolve(&self, input: &str) -> String {
        resolve(input, &self.table)
    }

    pub fn explain(&self, input: &str) -> Resolution {
        explain(input, &self.table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RuleTable {
        RuleTable::builder()
            .rule("greeting", ["hello", "হ্যালো"], "greeting")
            .rule("sadar", ["sadar hospital"], "sadar")
            .rule("hospital", ["hospital", "হাসপাতাল"], "hospital")
            .fallback("fallback")
            .build()
            .unwrap()
    }

    #[test]
    fn test_case_insensitive_match() {
        let t = table();
        assert_eq!(resolve("hello", &t), "greeting");
        assert_eq!(resolve("HeLLo", &t), "greeting");
        assert_eq!(resolve("  HELLO friend  ", &t), "greeting");
    }

    #[test]
    fn test_bengali_exact_substring() {
        let t = table();
        assert_eq!(resolve("কাছের হাসপাতাল কোথায়?", &t), "hospital");
    }

    #[test]
    fn test_first_match_wins() {
        let t = table();
        // Matches both "sadar hospital" and "hospital"
        assert_eq!(resolve("where is sadar hospital", &t), "sadar");
        // Greeting is listed first, so it wins over hospital
        assert_eq!(resolve("hello, which hospital?", &t), "greeting");
    }

    #[test]
    fn test_blank_input_falls_back() {
        let t = table();
        assert_eq!(resolve("", &t), "fallback");
        assert_eq!(resolve(" \t\n ", &t), "fallback");
    }

    #[test]
    fn test_unknown_input_falls_back() {
        let t = table();
        assert_eq!(resolve("xyzxyz-not-a-keyword", &t), "fallback");
        assert_eq!(resolve("こんにちは", &t), "fallback");
    }

    #[test]
    fn test_explain() {
        let t = table();
        let r = explain("Sadar Hospital timings", &t);
        assert_eq!(r.rule_id, "sadar");
        assert_eq!(r.trigger.as_deref(), Some("sadar hospital"));
        assert!(!r.fallback);

        let r = explain("???", &t);
        assert_eq!(r.rule_id, "fallback");
        assert_eq!(r.trigger, None);
        assert!(r.fallback);
        assert_eq!(r.response, "fallback");
    }

    #[test]
    fn test_engine_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IntentEngine>();

        let engine = IntentEngine::new(table());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.resolve("hello"))
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), "greeting");
        }
    }
}
