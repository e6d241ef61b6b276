//! Integration tests for CLI functionality

#[cfg(feature = "cli")]
mod cli_integration_tests {
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    use liballophone::cli::args::{Commands, IdCommand};
    use liballophone::cli::commands::{execute, load_models, load_rules, lookup, parse_tokens};
    use liballophone::cli::log_level;
    use liballophone::cli::paths::{validate_config_path, PersistentConfig};
    use liballophone::identity::IdEncoding;
    use liballophone::inventory::standard_inventory;
    use liballophone::modifiers::{ModificationFlags, ModificationToken};
    use liballophone::rules::RuleSource;
    use liballophone::serialization::{save_inventory, save_rulebook};

    fn config_in(dir: &TempDir) -> PathBuf {
        dir.path().join("config.json")
    }

    #[test]
    fn test_persistent_config_default() {
        let config = PersistentConfig::default();
        assert_eq!(config.inventory_path, None);
        assert_eq!(config.rulebook_path, None);
        assert_eq!(config.verbosity, None);
        assert_eq!(config.encoding(), IdEncoding::Base64);
    }

    #[test]
    fn test_config_merge() {
        let base_config = PersistentConfig {
            inventory_path: Some(PathBuf::from("inventory.json")),
            rulebook_path: Some(PathBuf::from("rules.json")),
            id_encoding: Some(IdEncoding::Hex),
            verbosity: Some(1),
        };
        let merged = base_config.merge_with_cli(
            None,
            Some(PathBuf::from("other-rules.json")),
            Some(IdEncoding::Base64),
            None,
        );

        assert_eq!(merged.inventory_path, Some(PathBuf::from("inventory.json")));
        assert_eq!(merged.rulebook_path, Some(PathBuf::from("other-rules.json")));
        assert_eq!(merged.id_encoding, Some(IdEncoding::Base64));
        assert_eq!(merged.verbosity, Some(1)); // unchanged
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_in(&temp_dir);

        let missing = PersistentConfig::load_from(Some(path.clone())).unwrap();
        assert_eq!(missing, PersistentConfig::default());

        let config = PersistentConfig {
            id_encoding: Some(IdEncoding::Hex),
            verbosity: Some(2),
            ..PersistentConfig::default()
        };
        config.save_to(Some(path.clone())).unwrap();
        assert_eq!(PersistentConfig::load_from(Some(path)).unwrap(), config);
    }

    #[test]
    fn test_config_rejects_non_json_path() {
        assert!(validate_config_path(&PathBuf::from("config.toml")).is_err());
        assert!(validate_config_path(&PathBuf::from("config")).is_err());
        assert!(validate_config_path(&PathBuf::from("config.json")).is_ok());
    }

    #[test]
    fn test_config_command_persists_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = config_in(&temp_dir);

        execute(
            Commands::Config {
                set_inventory: None,
                set_rules: Some(PathBuf::from("rules.json")),
                set_encoding: Some(IdEncoding::Hex),
                set_verbosity: None,
                reset: false,
            },
            Some(path.clone()),
        )
        .unwrap();

        let saved = PersistentConfig::load_from(Some(path.clone())).unwrap();
        assert_eq!(saved.rulebook_path, Some(PathBuf::from("rules.json")));
        assert_eq!(saved.id_encoding, Some(IdEncoding::Hex));

        let too_loud = Commands::Config {
            set_inventory: None,
            set_rules: None,
            set_encoding: None,
            set_verbosity: Some(9),
            reset: false,
        };
        assert!(execute(too_loud, Some(path)).is_err());
    }

    #[test]
    fn test_load_models_default_and_file() {
        assert_eq!(load_models(None).unwrap().len(), 41);

        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("inventory.json");
        let models: Vec<_> = standard_inventory().into_iter().take(3).collect();
        save_inventory(&models, &path).unwrap();

        let loaded = load_models(Some(&path)).unwrap();
        assert_eq!(loaded, models);
        assert!(lookup(&loaded, "t").is_ok());
        assert!(lookup(&loaded, "z").is_err());
    }

    #[test]
    fn test_load_rules_skips_unparsable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.json");
        save_rulebook(
            &[
                RuleSource::new("r1", "Voicing", "[+consonantal, -voice] → [+voice] / V_V"),
                RuleSource::new("r2", "Broken", "[+voice]"),
            ],
            &path,
        )
        .unwrap();

        let rules = load_rules(Some(&path)).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].id, "r1");

        assert!(load_rules(None).is_err());
    }

    #[test]
    fn test_load_rules_reports_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rules.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(load_rules(Some(&path)).is_err());
    }

    #[test]
    fn test_parse_tokens() {
        let flags = parse_tokens(&["aspirated".to_string(), "long".to_string()]).unwrap();
        assert_eq!(
            flags,
            ModificationFlags::EMPTY | ModificationToken::Aspirated | ModificationToken::Long
        );
        assert!(parse_tokens(&["sparkly".to_string()]).is_err());
        assert_eq!(parse_tokens(&[]).unwrap(), ModificationFlags::EMPTY);
    }

    #[test]
    fn test_commands_run() {
        let temp_dir = TempDir::new().unwrap();
        let config = Some(config_in(&temp_dir));

        execute(
            Commands::Parse {
                rule: "[+consonantal,-continuant,+coronal] → [+continuant] / V_V".into(),
            },
            config.clone(),
        )
        .unwrap();
        assert!(execute(Commands::Parse { rule: "[+voice]".into() }, config.clone()).is_err());

        execute(
            Commands::Vector {
                phoneme: "t".into(),
                modifiers: vec!["aspirated".into()],
                inventory: None,
                binary: true,
            },
            config.clone(),
        )
        .unwrap();

        execute(
            Commands::Resolve {
                phoneme: "p".into(),
                output: "[+voice]".into(),
                inventory: None,
            },
            config.clone(),
        )
        .unwrap();

        execute(
            Commands::Id {
                action: IdCommand::Encode {
                    base: "t".into(),
                    tokens: vec!["aspirated".into()],
                    encoding: None,
                },
            },
            config.clone(),
        )
        .unwrap();
        execute(
            Commands::Id {
                action: IdCommand::Decode {
                    id: "t#dHw1MjQyODg=".into(),
                },
            },
            config.clone(),
        )
        .unwrap();
        assert!(execute(
            Commands::Id {
                action: IdCommand::Decode { id: "t".into() }
            },
            config,
        )
        .is_err());
    }

    #[test]
    fn test_allophones_needs_a_rulebook() {
        let temp_dir = TempDir::new().unwrap();
        let result = execute(
            Commands::Allophones {
                phoneme: "t".into(),
                rules: None,
                inventory: None,
            },
            Some(config_in(&temp_dir)),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(log_level(0), tracing::Level::WARN);
        assert_eq!(log_level(2), tracing::Level::DEBUG);
        assert_eq!(log_level(7), tracing::Level::TRACE);
    }
}
