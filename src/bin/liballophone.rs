//! liballophone - phonological feature vectors and allophone rules
//!
//! Command-line front end for the library.

use clap::Parser;
use colored::Colorize;
use std::process;
use tracing_subscriber::FmtSubscriber;

use liballophone::cli::commands;
use liballophone::cli::{log_level, Cli, PersistentConfig};

fn main() {
    let cli = Cli::parse();

    let configured = PersistentConfig::load_from(cli.config.clone())
        .ok()
        .and_then(|config| config.verbosity)
        .unwrap_or(0);
    let verbosity = if cli.verbose > 0 { cli.verbose } else { configured };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(e) = commands::execute(cli.command, cli.config) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        process::exit(1);
    }
}
