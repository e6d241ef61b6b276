//! CLI interface for liballophone
//!
//! Command-line access to feature vectors, rule parsing, allophone
//! realization and composite ids.

pub mod args;
pub mod commands;
pub mod paths;

pub use args::{Cli, Commands, IdCommand};
pub use paths::{config_dir, PersistentConfig};

/// Log level for a `-v` count: warnings by default, up to trace at 3.
pub fn log_level(verbosity: u8) -> tracing::Level {
    match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }
}
