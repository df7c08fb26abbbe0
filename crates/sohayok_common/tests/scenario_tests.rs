//! End-to-end scenarios against the built-in knowledge base.

use sohayok_common::knowledge_base::default_table;
use sohayok_common::{explain, resolve, ConversationSession, IntentEngine, Sender};

#[test]
fn test_bengali_history_keyword() {
    let table = default_table().unwrap();
    let r = explain("ইতিহাস", &table);
    assert_eq!(r.rule_id, "history");
    assert!(!r.fallback);
}

#[test]
fn test_english_greeting() {
    let table = default_table().unwrap();
    assert_eq!(explain("hello", &table).rule_id, "greeting");
    assert_eq!(resolve("HeLLo", &table), resolve("hello", &table));
}

#[test]
fn test_empty_and_unknown_fall_back() {
    let table = default_table().unwrap();
    let fallback = table.fallback().response();
    assert_eq!(resolve("", &table), fallback);
    assert_eq!(resolve("xyzxyz-not-a-keyword", &table), fallback);
}

#[test]
fn test_place_before_category() {
    let table = default_table().unwrap();
    assert_eq!(explain("সদর হাসপাতাল কখন খোলা?", &table).rule_id, "sadar_hospital");
    assert_eq!(explain("Sadar Hospital", &table).rule_id, "sadar_hospital");
    assert_eq!(explain("কাছের হাসপাতাল", &table).rule_id, "hospital");
    assert_eq!(explain("hospital emergency number", &table).rule_id, "emergency");
}

#[test]
fn test_category_keywords() {
    let table = default_table().unwrap();
    let cases = [
        ("ডাক্তার লাগবে", "doctor"),
        ("bus to Dhaka", "bus"),
        ("থানার নম্বর", "police"),
        ("need a lawyer", "lawyer"),
        ("উকিল", "lawyer"),
        ("পৌরসভা অফিস", "municipality"),
        ("journalist list", "journalist"),
        ("blood donor", "blood"),
        ("heritage sites", "history"),
        ("ধন্যবাদ", "thanks"),
        ("what can you do", "help"),
    ];
    for (input, expected) in cases {
        assert_eq!(explain(input, &table).rule_id, expected, "input {:?}", input);
    }
}

#[test]
fn test_two_greetings_in_one_session() {
    let engine = IntentEngine::new(default_table().unwrap());
    let greeting = engine.resolve("hello");
    let mut session = ConversationSession::new(engine);

    session.submit("hello");
    session.submit("hello");

    let log: Vec<(Sender, &str)> = session
        .log()
        .iter()
        .map(|m| (m.sender, m.text.as_str()))
        .collect();
    assert_eq!(
        log,
        vec![
            (Sender::User, "hello"),
            (Sender::Assistant, greeting.as_str()),
            (Sender::User, "hello"),
            (Sender::Assistant, greeting.as_str()),
        ]
    );
}
