use std::collections::BTreeMap;

use serde::Serialize;

use crate::cli::config::AppConfig;
use crate::locator::parser::parse_locator;
use crate::locator::strategy::LocatorStrategy;
use crate::resolver::resolver::{Resolution, Resolver};
use crate::resolver::targets::TargetPurpose;
use crate::snapshot::cache::Snapshot;
use crate::snapshot::element::ElementInfo;
use crate::snapshot::tree::TreeSource;
use crate::trace::logger::TraceLogger;

// ============================================================================
// resolve subcommand
// ============================================================================

/// One line of `resolve` output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolveRow {
    pub locator: String,
    pub element_id: Option<String>,
    pub element_type: Option<String>,
    pub reason: Option<String>,
}

impl ResolveRow {
    fn new(locator: &str, resolution: &Resolution) -> Self {
        match resolution {
            Resolution::Found(el) => ResolveRow {
                locator: locator.to_string(),
                element_id: Some(el.id.clone()),
                element_type: Some(el.element_type.clone()),
                reason: None,
            },
            Resolution::NotFound(reason) => ResolveRow {
                locator: locator.to_string(),
                element_id: None,
                element_type: None,
                reason: Some(format!("{}: {}", reason.kind(), reason)),
            },
        }
    }
}

/// Resolve every locator and return whether all were found.
pub fn cmd_resolve(
    tree: &str,
    locators: &[String],
    types: &[String],
    purpose: Option<&str>,
    format: &str,
    trace: Option<&str>,
    config: &AppConfig,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let rows = resolve_rows(tree, locators, types, purpose, trace, config)?;

    if verbose > 0 {
        eprintln!("Resolved {} locators against {}", rows.len(), tree);
    }

    print!("{}", format_resolve_rows(&rows, format)?);
    Ok(rows.iter().all(|r| r.element_id.is_some()))
}

pub fn resolve_rows(
    tree: &str,
    locators: &[String],
    types: &[String],
    purpose: Option<&str>,
    trace: Option<&str>,
    config: &AppConfig,
) -> Result<Vec<ResolveRow>, Box<dyn std::error::Error>> {
    let candidate_types = select_types(types, purpose, config)?;
    let source = TreeSource::from_file(tree)?;

    let mut resolver = Resolver::with_config(source, config.resolver.clone());
    if let Some(path) = trace.or(config.output.trace.as_deref()) {
        resolver = resolver.with_trace(TraceLogger::new(path));
    }

    let mut rows = Vec::with_capacity(locators.len());
    for locator in locators {
        let resolution = resolver.resolve_detailed(locator, &candidate_types)?;
        rows.push(ResolveRow::new(locator, &resolution));
    }
    Ok(rows)
}

/// Explicit types beat a purpose; a purpose beats the configured default.
pub fn select_types(
    types: &[String],
    purpose: Option<&str>,
    config: &AppConfig,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    if !types.is_empty() {
        return Ok(types.to_vec());
    }
    match purpose {
        Some(name) => {
            let purpose: TargetPurpose = name.parse()?;
            Ok(purpose.types().iter().map(|t| t.to_string()).collect())
        }
        None => Ok(config.resolver.target_types.clone()),
    }
}

pub fn format_resolve_rows(rows: &[ResolveRow], format: &str) -> Result<String, serde_json::Error> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(rows)? + "\n");
    }

    let mut out = String::new();
    for row in rows {
        match (&row.element_id, &row.reason) {
            (Some(id), _) => out.push_str(&format!(
                "{:?} -> {} ({})\n",
                row.locator,
                id,
                row.element_type.as_deref().unwrap_or("?")
            )),
            (None, reason) => out.push_str(&format!(
                "{:?} -> not found [{}]\n",
                row.locator,
                reason.as_deref().unwrap_or("unknown")
            )),
        }
    }
    Ok(out)
}

// ============================================================================
// parse subcommand
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseRow {
    pub locator: String,
    pub strategy: Option<LocatorStrategy>,
    pub error: Option<String>,
    pub unsupported: bool,
}

/// Parse every locator; returns whether all parsed.
pub fn cmd_parse(locators: &[String], format: &str) -> Result<bool, Box<dyn std::error::Error>> {
    let rows = parse_rows(locators);
    print!("{}", format_parse_rows(&rows, format)?);
    Ok(rows.iter().all(|r| r.strategy.is_some()))
}

pub fn parse_rows(locators: &[String]) -> Vec<ParseRow> {
    locators
        .iter()
        .map(|locator| match parse_locator(locator) {
            Ok(strategy) => ParseRow {
                locator: locator.clone(),
                strategy: Some(strategy),
                error: None,
                unsupported: false,
            },
            Err(e) => ParseRow {
                locator: locator.clone(),
                strategy: None,
                unsupported: e.is_unsupported(),
                error: Some(e.to_string()),
            },
        })
        .collect()
}

pub fn format_parse_rows(rows: &[ParseRow], format: &str) -> Result<String, serde_json::Error> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(rows)? + "\n");
    }

    let mut out = String::new();
    for row in rows {
        match (&row.strategy, &row.error) {
            (Some(strategy), _) => out.push_str(&format!("{:?} => {}\n", row.locator, strategy)),
            (None, error) => out.push_str(&format!(
                "{:?} => error: {}\n",
                row.locator,
                error.as_deref().unwrap_or("unknown")
            )),
        }
    }
    Ok(out)
}

// ============================================================================
// inspect subcommand
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub window: Option<String>,
    pub fingerprint: String,
    pub counts: BTreeMap<String, usize>,
    pub elements: Vec<ElementInfo>,
}

pub fn cmd_inspect(tree: &str, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let report = inspect_tree(tree)?;
    print!("{}", format_inspect_report(&report, format)?);
    Ok(())
}

pub fn inspect_tree(tree: &str) -> Result<InspectReport, Box<dyn std::error::Error>> {
    let source = TreeSource::from_file(tree)?;
    let mut snapshot = Snapshot::new();
    snapshot.refresh(&source)?;

    let counts = snapshot
        .types()
        .map(|t| (t.to_string(), snapshot.of_type(t).count()))
        .collect();

    Ok(InspectReport {
        window: snapshot.generation().map(str::to_string),
        fingerprint: snapshot.fingerprint(),
        counts,
        elements: snapshot.elements().to_vec(),
    })
}

pub fn format_inspect_report(report: &InspectReport, format: &str) -> Result<String, serde_json::Error> {
    if format == "json" {
        return Ok(serde_json::to_string_pretty(report)? + "\n");
    }

    let mut out = format!(
        "Window: {}\nFingerprint: {}\nElements: {}\n",
        report.window.as_deref().unwrap_or("<none>"),
        report.fingerprint,
        report.elements.len()
    );
    for (element_type, count) in &report.counts {
        out.push_str(&format!("  {:<20} {}\n", element_type, count));
    }
    Ok(out)
}
