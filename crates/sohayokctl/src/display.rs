//! Terminal rendering for answers, transcripts and rule listings

use owo_colors::OwoColorize;
use sohayok_common::api::ResolveResponse;
use sohayok_common::{ConversationLog, Message, Rule, RuleTable, Sender};

const PREVIEW_CHARS: usize = 60;

pub fn speaker_label(sender: Sender) -> String {
    match sender {
        Sender::User => "you".cyan().bold().to_string(),
        Sender::Assistant => "sohayok".green().bold().to_string(),
    }
}

pub fn format_message(message: &Message) -> String {
    format!(
        "{} {}\n{}",
        speaker_label(message.sender),
        message.timestamp.format("%H:%M:%S").dimmed(),
        indent(&message.text)
    )
}

pub fn format_log(log: &ConversationLog) -> String {
    log.iter()
        .map(format_message)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Diagnostics line for `ask --explain`
pub fn format_explanation(answer: &ResolveResponse) -> String {
    match (&answer.trigger, answer.fallback) {
        (_, true) => format!("rule: {} (no trigger matched)", answer.rule_id),
        (Some(trigger), false) => format!("rule: {}  trigger: \"{}\"", answer.rule_id, trigger),
        (None, false) => format!("rule: {}", answer.rule_id),
    }
}

pub fn format_rule(position: usize, rule: &Rule) -> String {
    let triggers = if rule.is_fallback() {
        "(fallback)".to_string()
    } else {
        rule.triggers().join(", ")
    };
    format!(
        "{:>3}. {}\n     {}\n     {}",
        position,
        rule.id().bold(),
        triggers,
        preview(rule.response()).dimmed()
    )
}

pub fn format_table(table: &RuleTable) -> String {
    table
        .iter()
        .enumerate()
        .map(|(i, rule)| format_rule(i + 1, rule))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First line of a response, cut to a fixed number of characters
fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or("");
    let mut out: String = first.chars().take(PREVIEW_CHARS).collect();
    if first.chars().count() > PREVIEW_CHARS || text.lines().count() > 1 {
        out.push('…');
    }
    out
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
