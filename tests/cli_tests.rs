use clap::Parser;
use screen_locator::cli::commands::{
    format_inspect_report, format_parse_rows, format_resolve_rows, inspect_tree, parse_rows,
    resolve_rows, select_types,
};
use screen_locator::cli::config::{AppConfig, Cli, Commands, load_config, resolve_format};
use screen_locator::resolver::targets::DEFAULT_TARGET_TYPES;

use crate::common::utils::fixture;

mod common;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_resolve_minimal() {
    let cli = Cli::parse_from(["screen-locator", "resolve", "--tree", "dump.json", "User"]);
    match cli.command {
        Commands::Resolve {
            tree,
            types,
            purpose,
            format,
            trace,
            locators,
        } => {
            assert_eq!(tree, "dump.json");
            assert!(types.is_empty());
            assert!(purpose.is_none());
            assert!(format.is_none());
            assert!(trace.is_none());
            assert_eq!(locators, vec!["User".to_string()]);
        }
        _ => panic!("Expected Resolve command"),
    }
    assert_eq!(cli.verbose, 0);
}

#[test]
fn cli_parse_resolve_all_args() {
    let cli = Cli::parse_from([
        "screen-locator",
        "resolve",
        "--tree",
        "dump.json",
        "--types",
        "GuiTextField,GuiButton",
        "--purpose",
        "write",
        "--format",
        "json",
        "--trace",
        "trace.jsonl",
        "User",
        "@ Password",
    ]);
    match cli.command {
        Commands::Resolve {
            types,
            purpose,
            format,
            trace,
            locators,
            ..
        } => {
            assert_eq!(types, strings(&["GuiTextField", "GuiButton"]));
            assert_eq!(purpose.as_deref(), Some("write"));
            assert_eq!(format.as_deref(), Some("json"));
            assert_eq!(trace.as_deref(), Some("trace.jsonl"));
            assert_eq!(locators, strings(&["User", "@ Password"]));
        }
        _ => panic!("Expected Resolve command"),
    }
}

#[test]
fn cli_parse_resolve_requires_a_locator() {
    assert!(Cli::try_parse_from(["screen-locator", "resolve", "--tree", "dump.json"]).is_err());
}

#[test]
fn cli_parse_parse_and_inspect() {
    let cli = Cli::parse_from(["screen-locator", "parse", "=Save", "A >> B"]);
    match cli.command {
        Commands::Parse { format, locators } => {
            assert!(format.is_none());
            assert_eq!(locators, strings(&["=Save", "A >> B"]));
        }
        _ => panic!("Expected Parse command"),
    }

    let cli = Cli::parse_from(["screen-locator", "inspect", "--tree", "dump.json", "--format", "json"]);
    match cli.command {
        Commands::Inspect { tree, format } => {
            assert_eq!(tree, "dump.json");
            assert_eq!(format.as_deref(), Some("json"));
        }
        _ => panic!("Expected Inspect command"),
    }
}

#[test]
fn cli_parse_global_flags() {
    let cli = Cli::parse_from(["screen-locator", "-vv", "--config", "custom.yaml", "parse", "User"]);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.config.as_deref(), Some("custom.yaml"));
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn config_load_missing_file() {
    let config = load_config(Some("nonexistent_file_that_does_not_exist.yaml"));
    assert_eq!(config.output.format, "console");
    assert_eq!(config.resolver.tolerances.gap, 25);
    assert_eq!(config.resolver.target_types, strings(DEFAULT_TARGET_TYPES));
}

#[test]
fn config_partial_yaml_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("screen-locator.yaml");
    std::fs::write(
        &path,
        r#"
resolver:
  tolerances:
    gap: 40
  target_types: [GuiButton]
output:
  format: json
"#,
    )
    .unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.resolver.tolerances.gap, 40);
    // Other tolerances keep their defaults
    assert_eq!(config.resolver.tolerances.horizontal, 5);
    assert_eq!(config.resolver.tolerances.vertical, 8);
    assert_eq!(config.resolver.target_types, strings(&["GuiButton"]));
    assert_eq!(config.resolver.label_types, strings(&["GuiLabel", "GuiTextField", "GuiCTextField"]));
    assert_eq!(config.output.format, "json");
    assert!(config.output.trace.is_none());
}

#[test]
fn config_malformed_yaml_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.yaml");
    std::fs::write(&path, "resolver: [not, a, map").unwrap();

    let config = load_config(path.to_str());
    assert_eq!(config.output.format, "console");
    assert_eq!(config.resolver.tolerances.gap, 25);
}

#[test]
fn config_yaml_roundtrip() {
    let config = AppConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let parsed: AppConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.resolver, config.resolver);
    assert_eq!(parsed.output.format, config.output.format);
}

#[test]
fn format_flag_beats_config() {
    let mut config = AppConfig::default();
    config.output.format = "json".into();

    assert_eq!(resolve_format(None, &config), "json");
    assert_eq!(resolve_format(Some("console"), &config), "console");
}

// ============================================================================
// Candidate Type Selection
// ============================================================================

#[test]
fn explicit_types_beat_purpose() {
    let config = AppConfig::default();
    let types = select_types(&strings(&["GuiTab"]), Some("write"), &config).unwrap();
    assert_eq!(types, strings(&["GuiTab"]));
}

#[test]
fn purpose_beats_configured_default() {
    let config = AppConfig::default();
    let types = select_types(&[], Some("Press"), &config).unwrap();
    assert_eq!(types, strings(&["GuiButton", "GuiTab"]));

    let types = select_types(&[], None, &config).unwrap();
    assert_eq!(types, config.resolver.target_types);
}

#[test]
fn selected_purpose_is_accepted() {
    let types = select_types(&[], Some("selected"), &AppConfig::default()).unwrap();
    assert_eq!(types, strings(&["GuiCheckBox", "GuiRadioButton"]));
}

#[test]
fn unknown_purpose_is_an_error() {
    let err = select_types(&[], Some("hover"), &AppConfig::default()).unwrap_err();
    assert!(err.to_string().contains("hover"), "error: {}", err);
}

// ============================================================================
// resolve
// ============================================================================

#[test]
fn resolve_rows_against_fixture() {
    let locators = strings(&["User", "@ Password", "=Help", "=Log On", "Nobody", "3 @ x"]);
    let rows = resolve_rows(
        &fixture("login_window.json"),
        &locators,
        &[],
        None,
        None,
        &AppConfig::default(),
    )
    .unwrap();

    let ids: Vec<Option<&str>> = rows.iter().map(|r| r.element_id.as_deref()).collect();
    assert_eq!(
        ids,
        vec![
            Some("wnd[0]/usr/txtUSER"),
            Some("wnd[0]/usr/pwdPASS"),
            Some("wnd[0]/usr/btnHELP"),
            Some("wnd[0]/usr/btnLOGON"),
            None,
            None,
        ]
    );
    assert_eq!(rows[0].element_type.as_deref(), Some("GuiTextField"));
    assert_eq!(rows[4].reason.as_deref(), Some("label_missing: label 'Nobody' not found"));
    assert!(rows[5].reason.as_deref().unwrap().starts_with("unsupported: "));
}

#[test]
fn resolve_rows_with_purpose() {
    let rows = resolve_rows(
        &fixture("login_window.json"),
        &strings(&["User"]),
        &[],
        Some("press"),
        None,
        &AppConfig::default(),
    )
    .unwrap();

    assert!(rows[0].element_id.is_none());
    assert_eq!(rows[0].reason.as_deref(), Some("no_match: no candidate matches"));
}

#[test]
fn resolve_rows_missing_tree_is_an_error() {
    let result = resolve_rows(
        "does/not/exist.json",
        &strings(&["User"]),
        &[],
        None,
        None,
        &AppConfig::default(),
    );
    assert!(result.is_err());
}

#[test]
fn resolve_output_formats() {
    let rows = resolve_rows(
        &fixture("login_window.json"),
        &strings(&["User", "Nobody"]),
        &[],
        None,
        None,
        &AppConfig::default(),
    )
    .unwrap();

    let console = format_resolve_rows(&rows, "console").unwrap();
    assert_eq!(
        console,
        "\"User\" -> wnd[0]/usr/txtUSER (GuiTextField)\n\
         \"Nobody\" -> not found [label_missing: label 'Nobody' not found]\n"
    );

    let json = format_resolve_rows(&rows, "json").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["element_id"], "wnd[0]/usr/txtUSER");
    assert!(parsed[1]["element_id"].is_null());
}

#[test]
fn resolve_rows_write_trace_lines() {
    let dir = tempfile::tempdir().unwrap();
    let trace = dir.path().join("trace.jsonl");

    resolve_rows(
        &fixture("login_window.json"),
        &strings(&["User", "Nobody", "5 @ 7"]),
        &[],
        None,
        trace.to_str(),
        &AppConfig::default(),
    )
    .unwrap();

    let content = std::fs::read_to_string(&trace).unwrap();
    let outcomes: Vec<String> = content
        .lines()
        .map(|line| {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            v["outcome"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(outcomes, strings(&["found", "not_found", "not_found"]));
}

// ============================================================================
// parse
// ============================================================================

#[test]
fn parse_rows_report_errors_and_unsupported_forms() {
    let rows = parse_rows(&strings(&["User @ Password", "5 @ 7", "3 @ label"]));

    assert!(rows[0].strategy.is_some());
    assert!(rows[0].error.is_none());

    assert!(rows[1].strategy.is_none());
    assert!(!rows[1].unsupported);
    assert!(rows[1].error.is_some());

    assert!(rows[2].strategy.is_none());
    assert!(rows[2].unsupported);
}

#[test]
fn parse_output_formats() {
    let rows = parse_rows(&strings(&["User @ Password", "@"]));

    let console = format_parse_rows(&rows, "console").unwrap();
    let mut lines = console.lines();
    assert_eq!(lines.next(), Some("\"User @ Password\" => HLabelVLabel(\"User\", \"Password\")"));
    assert!(lines.next().unwrap().starts_with("\"@\" => error: "));

    let json = format_parse_rows(&rows, "json").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[0]["strategy"]["kind"], "h_label_v_label");
    assert_eq!(parsed[0]["strategy"]["h_label"], "User");
    assert!(parsed[1]["strategy"].is_null());
}

// ============================================================================
// inspect
// ============================================================================

#[test]
fn inspect_counts_indexed_types() {
    let report = inspect_tree(&fixture("login_window.json")).unwrap();

    assert_eq!(report.window.as_deref(), Some("wnd[0]"));
    assert_eq!(report.elements.len(), 6, "containers without bounds are not indexed");
    assert_eq!(report.counts.get("GuiLabel"), Some(&2));
    assert_eq!(report.counts.get("GuiButton"), Some(&2));
    assert_eq!(report.counts.get("GuiPasswordField"), Some(&1));
    assert_eq!(report.fingerprint.len(), 40);

    let help = report.elements.iter().find(|e| e.id == "wnd[0]/usr/btnHELP").unwrap();
    assert!(help.text.is_none(), "unreadable text is recorded as absent");
    assert_eq!(help.tooltip.as_deref(), Some("Help"));
}

#[test]
fn inspect_console_output() {
    let report = inspect_tree(&fixture("login_window.json")).unwrap();
    let out = format_inspect_report(&report, "console").unwrap();

    assert!(out.starts_with("Window: wnd[0]\n"), "output: {}", out);
    assert!(out.contains("Elements: 6\n"));
    assert!(out.contains("GuiTextField"));
}
