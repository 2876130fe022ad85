//! CLI interface for commtrack

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "commtrack")]
#[command(version)]
#[command(about = "Track company communications and what is due", long_about = None)]
pub struct Cli {
    /// Path to commtrack.toml (defaults to searching upward from the current directory)
    #[arg(short, long, global = true, env = "COMMTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented commtrack.toml to the current directory
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (overrides server.host)
        #[arg(long, env = "COMMTRACK_HOST")]
        host: Option<String>,

        /// Port to listen on (overrides server.port)
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Prepare storage, create the superadmin and seed default methods
    Migrate,

    /// Show overdue and due-today communications
    Notifications {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show recent and upcoming communications per company
    Dashboard {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
