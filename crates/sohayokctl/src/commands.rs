//! Command implementations for sohayokctl

use crate::backend::{load_local_table, Backend, Chat};
use crate::cli::GlobalOpts;
use crate::display;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use sohayok_common::RuleTable;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

/// A line typed at the chat prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatInput {
    Quit,
    ShowLog,
    Blank,
    Say(String),
}

impl ChatInput {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            "/quit" | "/exit" => ChatInput::Quit,
            "/log" => ChatInput::ShowLog,
            "" => ChatInput::Blank,
            _ => ChatInput::Say(line.to_string()),
        }
    }
}

pub async fn ask(opts: &GlobalOpts, words: &[String], explain: bool) -> Result<()> {
    let backend = Backend::from_options(opts)?;
    let text = words.join(" ");
    let answer = backend.explain(&text).await?;

    println!("{}", answer.text);
    if explain {
        println!("{}", display::format_explanation(&answer).dimmed());
    }
    Ok(())
}

pub async fn chat(opts: &GlobalOpts) -> Result<()> {
    let backend = Backend::from_options(opts)?;
    let chat = backend.open_chat().await?;

    println!(
        "{}",
        "Sohayok community assistant. Type /log for the conversation, /quit to leave.".bold()
    );

    let stdin = io::stdin();
    run_chat(chat, stdin.lock()).await
}

/// Drive a conversation from `input`. The chat is closed on every exit path.
pub async fn run_chat<R: BufRead>(mut chat: Chat, input: R) -> Result<()> {
    let outcome = converse(&mut chat, input).await;
    let closed = chat.close().await;
    if let (Err(_), Err(e)) = (&outcome, &closed) {
        debug!("Closing after a failed chat also failed: {:#}", e);
    }
    outcome.and(closed)
}

async fn converse<R: BufRead>(chat: &mut Chat, input: R) -> Result<()> {
    let mut lines = input.lines();
    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match ChatInput::parse(&line?) {
            ChatInput::Quit => break,
            ChatInput::Blank => continue,
            ChatInput::ShowLog => {
                let log = chat.log().await?;
                println!("{}", display::format_log(&log));
            }
            ChatInput::Say(text) => {
                let reply = chat.submit(&text).await?;
                debug!("Reply #{} received", reply.id);
                println!("{}", display::format_message(&reply));
            }
        }
    }
    Ok(())
}

pub fn rules(opts: &GlobalOpts) -> Result<()> {
    let table = load_local_table(opts)?;
    println!("{}", display::format_table(&table));
    Ok(())
}

pub fn check(file: &Path) -> Result<()> {
    let table = RuleTable::load(file)
        .with_context(|| format!("{} is not a valid rule file", file.display()))?;
    println!(
        "{} {}: {} rules, fallback '{}'",
        "✓".green(),
        file.display(),
        table.rule_count(),
        table.fallback().id()
    );
    Ok(())
}
