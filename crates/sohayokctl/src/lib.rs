//! Sohayok Control - command-line client for the community assistant

pub mod backend;
pub mod cli;
pub mod client;
pub mod commands;
pub mod display;
