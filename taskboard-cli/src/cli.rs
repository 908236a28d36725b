//! CLI definition for the task board.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use taskboard::Priority;

/// Taskboard - a small kanban board with a JSON file backend.
///
/// `serve` runs the HTTP API over a JSON document. The `cards` and `watch`
/// commands talk to that server and fall back to a local store when it cannot
/// be reached.
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Kanban task board with an HTTP API and offline fallback")]
#[command(
    long_about = "Kanban task board with an HTTP API and offline fallback.\n\n\
    Configuration is read from taskboard.toml or taskboard.yaml in the working \
    directory (or --config), then TASKBOARD_* environment variables, then flags.\n\n\
    Environment variables:\n  \
    TASKBOARD_DATA_FILE    Board document served by `serve`\n  \
    TASKBOARD_SERVER_URL   Server used by `cards` and `watch`\n  \
    PORT                   Listening port for `serve`\n  \
    RUST_LOG               Log filter, overrides log_level"
)]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read configuration from this file instead of taskboard.toml/yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Board document path
    #[arg(long, global = true, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Task board server URL
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,

    /// Directory for the offline card store
    #[arg(long, global = true, value_name = "DIR")]
    pub local_store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (0 picks a free port)
        #[arg(short, long)]
        port: Option<u16>,
        /// Serve front-end files from this directory
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Create a new board document
    Init {
        /// Comma-separated column names, in display order
        #[arg(long, value_delimiter = ',')]
        columns: Option<Vec<String>>,
        /// Include the sample cards
        #[arg(long)]
        samples: bool,
    },

    /// Work with cards
    Cards {
        #[command(subcommand)]
        command: CardsCommand,
    },

    /// Show the board grouped by column
    Board {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the board and redraw it when the server's cards change
    Watch {
        /// Seconds between refreshes
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardsCommand {
    /// List cards
    List {
        /// Only cards in this column
        #[arg(long)]
        column: Option<String>,
        /// Only cards for this assignee (case-insensitive)
        #[arg(long)]
        assignee: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one card
    Show { id: String },

    /// Create a card
    Add {
        title: String,
        #[command(flatten)]
        fields: CardFields,
    },

    /// Edit a card's fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[command(flatten)]
        fields: CardFields,
    },

    /// Move a card to another column
    Move { id: String, column: String },

    /// Delete a card
    Delete { id: String },
}

/// Optional card fields shared by `add` and `update`
#[derive(Args, Debug, Default, Clone)]
pub struct CardFields {
    #[arg(long)]
    pub assignee: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = parse_priority)]
    pub priority: Option<Priority>,
    #[arg(long)]
    pub column: Option<String>,
}

fn parse_priority(s: &str) -> Result<Priority, String> {
    s.parse()
}
