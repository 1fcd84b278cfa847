//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::{StylePreset, TraversalOrder};

/// Sibling-threaded trees: render, walk, measure and compare indented outlines
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file (TOML), layered over the global config
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print an outline as a box-drawing tree
    Render {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Connector glyphs (default from config)
        #[arg(short, long, value_enum)]
        style: Option<StylePreset>,
        /// Render through termtree instead of the built-in renderer
        #[arg(long)]
        termtree: bool,
    },

    /// Print node payloads in traversal order, one per line
    Walk {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
        /// Traversal order (default from config)
        #[arg(short, long, value_enum)]
        order: Option<TraversalOrder>,
    },

    /// Show size, depth and leaves
    Stats {
        /// Outline file, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Compare two outlines structurally (exit 1 if they differ)
    Diff {
        #[arg(value_hint = ValueHint::FilePath)]
        left: PathBuf,
        #[arg(value_hint = ValueHint::FilePath)]
        right: PathBuf,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print effective settings as TOML
    Show,
    /// Print the global config file location
    Path,
}
