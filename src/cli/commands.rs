//! CLI command implementations

use anyhow::{anyhow, bail, Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::identity::{
    decode_flags, decode_strict, display_name, display_symbol, encode_with, has_conflicts,
    IdEncoding,
};
use crate::inventory::{find_by_id_or_symbol, inventory_entries, standard_inventory, PhonemeModel};
use crate::modifiers::{ModificationFlags, ModificationToken};
use crate::resolver::{realize_allophones, ResolutionSource, ResolveRequest};
use crate::rules::{parse_feature_bundle, parse_rule_strict, parse_rules, Rule};
use crate::serialization::{load_inventory, load_rulebook};

use super::args::{Commands, IdCommand};
use super::paths::{config_file_path_with_override, PersistentConfig};

/// Execute a CLI command
pub fn execute(command: Commands, config_path: Option<PathBuf>) -> Result<()> {
    let config = PersistentConfig::load_from(config_path.clone())?;

    match command {
        Commands::Vector {
            phoneme,
            modifiers,
            inventory,
            binary,
        } => {
            let config = config.merge_with_cli(inventory, None, None, None);
            cmd_vector(&phoneme, &modifiers, config.inventory_path.as_deref(), binary)
        }
        Commands::Parse { rule } => cmd_parse(&rule),
        Commands::Allophones {
            phoneme,
            rules,
            inventory,
        } => {
            let config = config.merge_with_cli(inventory, rules, None, None);
            cmd_allophones(
                &phoneme,
                config.rulebook_path.as_deref(),
                config.inventory_path.as_deref(),
            )
        }
        Commands::Resolve {
            phoneme,
            output,
            inventory,
        } => {
            let config = config.merge_with_cli(inventory, None, None, None);
            cmd_resolve(&phoneme, &output, config.inventory_path.as_deref())
        }
        Commands::Id { action } => match action {
            IdCommand::Encode {
                base,
                tokens,
                encoding,
            } => {
                let config = config.merge_with_cli(None, None, encoding, None);
                cmd_id_encode(&base, &tokens, config.encoding())
            }
            IdCommand::Decode { id } => cmd_id_decode(&id),
        },
        Commands::Config {
            set_inventory,
            set_rules,
            set_encoding,
            set_verbosity,
            reset,
        } => cmd_config(
            config,
            config_path,
            set_inventory,
            set_rules,
            set_encoding,
            set_verbosity,
            reset,
        ),
    }
}

/// Load an inventory file, or the standard inventory when no path is given
pub fn load_models(path: Option<&Path>) -> Result<Vec<PhonemeModel>> {
    match path {
        Some(path) => {
            let models = load_inventory(path)
                .with_context(|| format!("Failed to load inventory: {}", path.display()))?;
            info!(path = %path.display(), count = models.len(), "loaded inventory");
            Ok(models)
        }
        None => Ok(standard_inventory()),
    }
}

/// Load and parse a rulebook; unparsable rules are skipped with a warning
pub fn load_rules(path: Option<&Path>) -> Result<Vec<Rule>> {
    let path = path.ok_or_else(|| {
        anyhow!("No rulebook given. Pass --rules or set one with `liballophone config --set-rules <path>`")
    })?;
    let sources = load_rulebook(path)
        .with_context(|| format!("Failed to load rulebook: {}", path.display()))?;
    let rules = parse_rules(&sources);
    if rules.len() < sources.len() {
        warn!(
            skipped = sources.len() - rules.len(),
            "some rules could not be parsed"
        );
    }
    Ok(rules)
}

/// Look up a phoneme by id, then by symbol
pub fn lookup<'m>(models: &'m [PhonemeModel], key: &str) -> Result<&'m PhonemeModel> {
    find_by_id_or_symbol(models, key).ok_or_else(|| anyhow!("Unknown phoneme: {}", key))
}

/// Parse modification token names into a flags word
pub fn parse_tokens(tokens: &[String]) -> Result<ModificationFlags> {
    tokens
        .iter()
        .map(|t| {
            t.parse::<ModificationToken>()
                .with_context(|| format!("Invalid modification token: {}", t))
        })
        .collect()
}

/// Vector command
fn cmd_vector(
    phoneme: &str,
    modifiers: &[String],
    inventory: Option<&Path>,
    binary: bool,
) -> Result<()> {
    let models = load_models(inventory)?;
    let model = lookup(&models, phoneme)?;

    let mut model = model.clone();
    model.descriptor = model.descriptor.with_flags(parse_tokens(modifiers)?);
    let vector = model.vector();

    println!(
        "{} {}",
        model.symbol.bold(),
        format!("({})", model.name()).dimmed()
    );
    println!("  {}", vector.to_string().cyan());
    if binary {
        println!("  {}", format!("{:b}", vector).yellow());
    }
    Ok(())
}

/// Parse command
fn cmd_parse(text: &str) -> Result<()> {
    let rule = parse_rule_strict("cli", "", text)?;

    println!("{}", "Rule:".bold().underline());
    println!();
    println!("  Input:   {}", rule.input().to_string().cyan());
    println!("  Output:  {}", rule.output().to_string().green());
    println!("  Text:    {}", rule.output_text);
    if rule.context.is_empty() {
        println!("  Context: {}", "(none)".dimmed());
    } else {
        println!("  Context: {}", rule.context.yellow());
    }
    Ok(())
}

/// Allophones command
fn cmd_allophones(phoneme: &str, rulebook: Option<&Path>, inventory: Option<&Path>) -> Result<()> {
    let models = load_models(inventory)?;
    let rules = load_rules(rulebook)?;
    let model = lookup(&models, phoneme)?;
    let entries = inventory_entries(&models);

    let allophones = realize_allophones(&model.symbol, model.vector(), &rules, &entries);
    if allophones.is_empty() {
        println!("{}", "No applicable rules".yellow());
        return Ok(());
    }

    for allophone in &allophones {
        let label = if allophone.rule_name.is_empty() {
            allophone.rule_id.clone()
        } else {
            format!("{} ({})", allophone.rule_name, allophone.rule_id)
        };
        let context = if allophone.context.is_empty() {
            String::new()
        } else {
            format!(" / {}", allophone.context)
        };
        println!(
            "  {} → {}{}  {}  {}",
            model.symbol,
            allophone.resolution.symbol.green().bold(),
            context,
            label.dimmed(),
            describe_source(&allophone.resolution.source).dimmed()
        );
    }
    Ok(())
}

/// Resolve command
fn cmd_resolve(phoneme: &str, output: &str, inventory: Option<&Path>) -> Result<()> {
    let models = load_models(inventory)?;
    let model = lookup(&models, phoneme)?;
    let entries = inventory_entries(&models);
    let bundle = parse_feature_bundle(output);

    let resolution = ResolveRequest::new(&model.symbol, output)
        .base_vector(model.vector())
        .output(bundle.mask, bundle.values)
        .inventory(&entries)
        .resolve();

    println!(
        "{}  {}",
        resolution.symbol.green().bold(),
        describe_source(&resolution.source).dimmed()
    );
    Ok(())
}

/// Id encode command
fn cmd_id_encode(base: &str, tokens: &[String], encoding: IdEncoding) -> Result<()> {
    if base.is_empty() {
        bail!("Base phoneme id must not be empty");
    }
    let flags = parse_tokens(tokens)?;
    if has_conflicts(flags) {
        eprintln!(
            "  {}: more than one token per category; decoding keeps only one",
            "Warning".yellow().bold()
        );
    }
    println!("{}", encode_with(base, flags, encoding));
    Ok(())
}

/// Id decode command
fn cmd_id_decode(id: &str) -> Result<()> {
    let decoded = decode_strict(id).with_context(|| format!("Failed to decode id: {}", id))?;
    let state = decode_flags(decoded.flags);

    println!("{}", "Composite Id:".bold().underline());
    println!();
    println!("  Base:    {}", decoded.base.cyan());
    println!("  Flags:   {}", decoded.flags.to_string().yellow());
    println!("  Symbol:  {}", display_symbol(&decoded.base, decoded.flags).green().bold());
    println!("  Name:    {}", display_name(&decoded.base, &state));
    if has_conflicts(decoded.flags) {
        println!(
            "  {}: conflicting tokens in one category",
            "Warning".yellow().bold()
        );
    }
    Ok(())
}

/// Config command
#[allow(clippy::too_many_arguments)]
fn cmd_config(
    mut config: PersistentConfig,
    config_path: Option<PathBuf>,
    set_inventory: Option<PathBuf>,
    set_rules: Option<PathBuf>,
    set_encoding: Option<IdEncoding>,
    set_verbosity: Option<u8>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = PersistentConfig::default();
        config.save_to(config_path.clone())?;
        println!("{}", "Configuration reset to defaults".green().bold());
        println!();
        print_config(&config, config_path)?;
        return Ok(());
    }

    let mut changed = false;

    if let Some(path) = set_inventory {
        println!(
            "  Set default inventory path: {}",
            path.display().to_string().cyan()
        );
        config.inventory_path = Some(path);
        changed = true;
    }

    if let Some(path) = set_rules {
        println!(
            "  Set default rulebook path: {}",
            path.display().to_string().cyan()
        );
        config.rulebook_path = Some(path);
        changed = true;
    }

    if let Some(encoding) = set_encoding {
        config.id_encoding = Some(encoding);
        println!("  Set default id encoding: {}", encoding_name(encoding).green());
        changed = true;
    }

    if let Some(verbosity) = set_verbosity {
        if verbosity > 3 {
            bail!("Verbosity must be between 0 and 3, got {}", verbosity);
        }
        config.verbosity = Some(verbosity);
        println!("  Set default verbosity: {}", verbosity.to_string().green());
        changed = true;
    }

    if changed {
        config.save_to(config_path.clone())?;
        println!();
        println!("{}", "Configuration saved".green().bold());
    }

    println!();
    print_config(&config, config_path)
}

/// Print current configuration
fn print_config(config: &PersistentConfig, config_path: Option<PathBuf>) -> Result<()> {
    println!("{}", "Current Configuration:".bold().underline());
    println!();

    let inventory = config
        .inventory_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(standard)".to_string());
    println!("  Inventory:   {}", inventory.cyan());

    let rulebook = config
        .rulebook_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());
    println!("  Rulebook:    {}", rulebook.cyan());

    println!("  Id Encoding: {}", encoding_name(config.encoding()).yellow());
    println!(
        "  Verbosity:   {}",
        config.verbosity.unwrap_or(0).to_string().yellow()
    );

    println!();
    println!(
        "  Config file: {}",
        config_file_path_with_override(config_path)?
            .display()
            .to_string()
            .cyan()
    );
    Ok(())
}

fn encoding_name(encoding: IdEncoding) -> &'static str {
    match encoding {
        IdEncoding::Base64 => "base64",
        IdEncoding::Hex => "hex",
    }
}

fn describe_source(source: &ResolutionSource) -> String {
    match source {
        ResolutionSource::Literal => "literal".to_string(),
        ResolutionSource::NearestNeighbor { id, distance } => {
            format!("nearest: {} (distance {})", id, distance)
        }
        ResolutionSource::Diacritics => "diacritics".to_string(),
        ResolutionSource::Unchanged => "unchanged".to_string(),
    }
}
