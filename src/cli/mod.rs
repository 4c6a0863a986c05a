//! CLI entry point for toctoc.

pub mod chat;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::router::Intent;

/// TocToc conversational agents
#[derive(Parser, Debug)]
#[command(name = "toctoc", version, about = "TocToc: conversational real-estate agents")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML configuration file (environment variables still take precedence)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Talk to a collection agent on stdin
    Chat(ChatArgs),
    /// Print the intent detected for a message
    Classify(ClassifyArgs),
}

/// Arguments for the `chat` subcommand.
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Agent to talk to; `auto` routes the first message
    #[arg(short, long, value_enum, default_value_t = AgentChoice::Auto)]
    pub agent: AgentChoice,

    /// Send a finished appraisal to the valuation API
    #[arg(long)]
    pub appraise: bool,

    /// Model id (overrides configuration)
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the `classify` subcommand.
#[derive(Parser, Debug)]
pub struct ClassifyArgs {
    /// Message to classify
    pub message: String,

    /// Use function-call routing instead of a plain completion
    #[arg(long)]
    pub function_call: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentChoice {
    Auto,
    Busqueda,
    Hipotecario,
    Tasar,
}

impl AgentChoice {
    /// The fixed intent, or `None` when the router decides.
    pub fn intent(self) -> Option<Intent> {
        match self {
            Self::Auto => None,
            Self::Busqueda => Some(Intent::Busqueda),
            Self::Hipotecario => Some(Intent::Hipotecario),
            Self::Tasar => Some(Intent::Tasar),
        }
    }
}
