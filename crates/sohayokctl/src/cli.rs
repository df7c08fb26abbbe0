//! Command-line definition for sohayokctl

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sohayokctl")]
#[command(about = "Sohayok - community assistant client", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file (defaults to $SOHAYOK_CONFIG, then /etc/sohayok/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Rule file to use instead of the configured knowledge base
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Talk to a running sohayokd instead of resolving locally
    #[arg(long, global = true, value_name = "URL")]
    pub remote: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask one question and print the answer
    Ask {
        /// Also show which rule and trigger answered
        #[arg(long)]
        explain: bool,

        /// Question text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Start an interactive conversation
    Chat,

    /// List the rule table in evaluation order
    Rules,

    /// Validate a rule file
    Check {
        /// Rule file to validate
        file: PathBuf,
    },
}
