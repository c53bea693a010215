use clap::Parser;
use garlic::cli::commands::{collect_keys, with_base_options};
use garlic::cli::config::{
    AppConfig, Cli, Commands, StoreAction, load_config, resolve_store_dir, resolve_trace_path,
};
use garlic::dom::snapshot::DocumentSnapshot;
use garlic::field::config::GarlicOptions;
use garlic::script::script_model::{ReplayScript, ReplayStep};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_keys_minimal() {
    let cli = Cli::parse_from(["garlic", "keys", "--document", "page.json"]);
    match cli.command {
        Commands::Keys { document, selector } => {
            assert_eq!(document, "page.json");
            assert_eq!(selector, None);
        }
        _ => panic!("Expected Keys command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_replay_with_globals() {
    let cli = Cli::parse_from([
        "garlic",
        "replay",
        "--document",
        "https://example.com/snapshot.json",
        "--script",
        "draft.yaml",
        "--store-dir",
        "/tmp/store",
        "--trace",
        "trace.jsonl",
        "-vv",
    ]);
    match &cli.command {
        Commands::Replay { document, script } => {
            assert_eq!(document, "https://example.com/snapshot.json");
            assert_eq!(script, "draft.yaml");
        }
        _ => panic!("Expected Replay command"),
    }
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.store_dir.as_deref(), Some("/tmp/store"));
    assert_eq!(cli.trace.as_deref(), Some("trace.jsonl"));
}

#[test]
fn cli_parse_store_actions() {
    let cli = Cli::parse_from(["garlic", "store", "--origin", "example.com", "set", "k", "v"]);
    match cli.command {
        Commands::Store { origin, action } => {
            assert_eq!(origin.as_deref(), Some("example.com"));
            assert_eq!(
                action,
                StoreAction::Set {
                    key: "k".into(),
                    value: "v".into()
                }
            );
        }
        _ => panic!("Expected Store command"),
    }

    let cli = Cli::parse_from(["garlic", "store", "clean"]);
    assert!(matches!(
        cli.command,
        Commands::Store { origin: None, action: StoreAction::Clean }
    ));
}

#[test]
fn cli_rejects_missing_document() {
    assert!(Cli::try_parse_from(["garlic", "keys"]).is_err());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn missing_config_file_yields_defaults() {
    let config = load_config(Some("/nonexistent/garlic.yaml"));
    assert_eq!(config.store.dir, ".garlic");
    assert_eq!(config.store.origin, None);
    assert_eq!(config.trace.path, None);
    assert_eq!(config.options, GarlicOptions::default());
}

#[test]
fn config_yaml_parses_options() {
    let yaml = r#"
store:
  dir: /var/lib/garlic
  origin: example.com
trace:
  path: garlic-trace.jsonl
options:
  debug: false
  events: [change, paste]
  destroy: false
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.store.dir, "/var/lib/garlic");
    assert_eq!(config.store.origin.as_deref(), Some("example.com"));
    assert_eq!(config.trace.path.as_deref(), Some("garlic-trace.jsonl"));
    assert_eq!(config.options.debug, Some(false));
    assert_eq!(
        config.options.events,
        Some(vec!["change".to_string(), "paste".to_string()])
    );
    assert_eq!(config.options.inputs, None);
}

#[test]
fn cli_flags_beat_config_file() {
    let config: AppConfig = serde_yaml::from_str("store: { dir: from-config }\ntrace: { path: t.jsonl }").unwrap();

    let cli = Cli::parse_from(["garlic", "store", "list"]);
    assert_eq!(resolve_store_dir(&cli, &config), "from-config");
    assert_eq!(resolve_trace_path(&cli, &config), Some("t.jsonl"));

    let cli = Cli::parse_from(["garlic", "--store-dir", "from-cli", "store", "list"]);
    assert_eq!(resolve_store_dir(&cli, &config), "from-cli");
}

// ============================================================================
// Command helpers
// ============================================================================

#[test]
fn bind_steps_inherit_configured_options() {
    let script = ReplayScript {
        name: "s".into(),
        steps: vec![ReplayStep::Bind {
            selector: None,
            options: GarlicOptions {
                destroy: Some(true),
                ..Default::default()
            },
        }],
    };
    let base = GarlicOptions {
        debug: Some(false),
        destroy: Some(false),
        ..Default::default()
    };

    let script = with_base_options(script, &base);
    match &script.steps[0] {
        ReplayStep::Bind { options, .. } => {
            assert_eq!(options.debug, Some(false), "Inherited from config");
            assert_eq!(options.destroy, Some(true), "Step's own option wins");
        }
        _ => panic!("Expected Bind step"),
    }
}

#[test]
fn collect_keys_lists_eligible_fields_in_document_order() {
    let json = r#"{
      "origin": "example.com",
      "route": "/signup",
      "root": { "tag": "html", "children": [
        { "tag": "form", "attrs": { "id": "f" }, "children": [
          { "tag": "input", "attrs": { "type": "text", "name": "email" } },
          { "tag": "input", "attrs": { "type": "password", "name": "pw" } },
          { "tag": "textarea", "attrs": { "name": "note" } }
        ] }
      ] }
    }"#;
    let doc = DocumentSnapshot::from_json(json).unwrap().to_document().unwrap();

    let keys: Vec<String> = collect_keys(&doc, &GarlicOptions::default())
        .unwrap()
        .into_iter()
        .map(|(_, key)| key.unwrap().to_string())
        .collect();

    assert_eq!(
        keys,
        vec![
            "garlic:example.com/signup>form>input.email:eq(0)",
            "garlic:example.com/signup>form>textarea.note",
        ],
        "Password inputs are not in the default selector"
    );
}

#[test]
fn malformed_snapshot_is_a_parse_error() {
    let err = DocumentSnapshot::from_json("{\"origin\": 1}").unwrap_err();
    assert!(err.to_string().starts_with("JSON parse error (document snapshot)"));
}
