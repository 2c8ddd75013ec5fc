//! Command-line surface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jotter")]
#[command(version, about = "Local note store")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file holding the note collection
    #[arg(long, global = true, default_value = "jotter.sqlite3")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files (logging is off when omitted)
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes in creation order
    List {
        /// Only notes whose title or content contains this text (any case)
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Print one note
    Show {
        /// Note ID
        id: String,
    },

    /// Create a note, or update one when --id is given
    Save {
        /// Existing note to update
        #[arg(long)]
        id: Option<String>,

        /// Note title (kept from the existing note when updating and omitted)
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Note content (kept from the existing note when updating and omitted)
        #[arg(long, short = 'c')]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },

    /// Check that the core library is linked
    Ping,
}
