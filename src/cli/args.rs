//! CLI argument definitions

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::identity::IdEncoding;

#[derive(Parser)]
#[command(name = "liballophone")]
#[command(about = "Phonological feature vectors, allophone rules and composite phoneme ids")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the feature vector of an inventory phoneme
    Vector {
        /// Phoneme id or symbol
        phoneme: String,

        /// Extra modification tokens to apply (e.g. aspirated, nasalized)
        #[arg(short, long = "modifier")]
        modifiers: Vec<String>,

        /// Inventory file (standard inventory if not specified)
        #[arg(short, long)]
        inventory: Option<PathBuf>,

        /// Also print the 32-bit binary form
        #[arg(short, long)]
        binary: bool,
    },

    /// Parse a rule and show its bundles
    Parse {
        /// Rule text, e.g. "[-continuant] → [+continuant] / V_V"
        rule: String,
    },

    /// List the allophones of a phoneme under a rulebook
    Allophones {
        /// Phoneme id or symbol
        phoneme: String,

        /// Rulebook file
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Inventory file (standard inventory if not specified)
        #[arg(short, long)]
        inventory: Option<PathBuf>,
    },

    /// Resolve the surface symbol for a phoneme and a rule output
    Resolve {
        /// Phoneme id or symbol
        phoneme: String,

        /// Rule output text, e.g. "[+continuant]" or "[ɾ]"
        output: String,

        /// Inventory file (standard inventory if not specified)
        #[arg(short, long)]
        inventory: Option<PathBuf>,
    },

    /// Encode or decode composite phoneme ids
    Id {
        #[command(subcommand)]
        action: IdCommand,
    },

    /// Show or update user settings
    Config {
        /// Set default inventory path
        #[arg(long)]
        set_inventory: Option<PathBuf>,

        /// Set default rulebook path
        #[arg(long)]
        set_rules: Option<PathBuf>,

        /// Set default id payload encoding
        #[arg(long)]
        set_encoding: Option<IdEncoding>,

        /// Set default log verbosity (0-3)
        #[arg(long)]
        set_verbosity: Option<u8>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}

#[derive(Subcommand)]
pub enum IdCommand {
    /// Build an id from a base phoneme and modification tokens
    Encode {
        /// Base phoneme id
        base: String,

        /// Modification tokens (e.g. aspirated long high)
        tokens: Vec<String>,

        /// Payload encoding
        #[arg(short, long)]
        encoding: Option<IdEncoding>,
    },

    /// Decode an id into its base and modifications
    Decode {
        /// Composite id, e.g. "t#dHw1MjQyODg="
        id: String,
    },
}
