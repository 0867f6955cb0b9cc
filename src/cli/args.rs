//! CLI argument definitions using clap
//!
//! Commands:
//! - crmgate serve --config <path>
//! - crmgate translate [--query <text>]
//! - crmgate validate <collection>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// crmgate - bounded query translation in front of a CRM search API
#[derive(Parser, Debug)]
#[command(name = "crmgate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP gateway
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./crmgate.json")]
        config: PathBuf,
    },

    /// Translate query text into a search request and exit
    Translate {
        /// Query text; read from stdin when omitted
        #[arg(long)]
        query: Option<String>,
    },

    /// Validate a search body read from stdin and exit
    Validate {
        /// Target collection, e.g. `contacts`
        collection: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
