use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "corkboard")]
#[command(version, about = "A sticky-note whiteboard with persistent layout")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log engine activity to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new board in the current directory
    Init {
        /// Storage backend (json, sqlite)
        #[arg(long, default_value = "json")]
        backend: String,
    },

    /// Add a note, as if the background were double-clicked at (X, Y)
    Add {
        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,

        /// Width override (150-700), defaults to the board setting
        #[arg(long)]
        width: Option<f64>,

        /// Height override (150-700), defaults to the board setting
        #[arg(long)]
        height: Option<f64>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes from bottom to top of the stack
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID or unique prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Drag a note by its header so its top-left lands on (X, Y)
    Move {
        /// Note ID or unique prefix
        id: String,

        #[arg(allow_negative_numbers = true)]
        x: f64,

        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Drag a note's resize handle (sizes below 150 are clamped)
    Resize {
        /// Note ID or unique prefix
        id: String,

        #[arg(allow_negative_numbers = true)]
        width: f64,

        #[arg(allow_negative_numbers = true)]
        height: f64,
    },

    /// Change a note's color (yellow, pink, aqua, lavender, peach or hex)
    Color {
        /// Note ID or unique prefix
        id: String,

        color: String,
    },

    /// Bring a note to the front
    Front {
        /// Note ID or unique prefix
        id: String,
    },

    /// Delete a note
    Delete {
        /// Note ID or unique prefix
        id: String,
    },

    /// Show or change the size given to new notes
    Defaults {
        /// New default width (150-700)
        #[arg(long)]
        width: Option<f64>,

        /// New default height (150-700)
        #[arg(long)]
        height: Option<f64>,
    },

    /// Apply a JSON file of input events to the board
    Replay {
        /// Path to a JSON array of events
        file: PathBuf,

        /// Output actions as JSON
        #[arg(long)]
        json: bool,
    },
}
