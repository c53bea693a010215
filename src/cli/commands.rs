use std::path::Path;

use crate::binder::binder::Binder;
use crate::cli::config::StoreAction;
use crate::dom::document::Document;
use crate::dom::node::NodeId;
use crate::dom::source::load_snapshot;
use crate::error::GarlicError;
use crate::field::config::{FieldConfig, GarlicOptions};
use crate::path::resolver::{PathKey, resolve_node, resolve_selector};
use crate::script::report::format_console_report;
use crate::script::runner::ReplayRunner;
use crate::script::script_model::{ReplayScript, ReplayStep};
use crate::storage::file::FileBackend;
use crate::storage::store::Storage;
use crate::trace::logger::TraceLogger;

// ============================================================================
// keys subcommand
// ============================================================================

pub fn cmd_keys(
    document: &str,
    selector: Option<&str>,
    options: &GarlicOptions,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = load_snapshot(document)?.to_document()?;

    if verbose > 0 {
        eprintln!("Resolving keys for {}{}...", doc.origin(), doc.route());
    }

    if let Some(sel) = selector {
        println!("{}", resolve_selector(&doc, sel)?);
        return Ok(());
    }

    for (node, key) in collect_keys(&doc, options)? {
        match key {
            Ok(key) => println!("{}", key),
            Err(e) => {
                if verbose > 0 {
                    eprintln!("  skipped #{} <{}>: {}", node.0, doc.tag(node), e);
                }
            }
        }
    }

    Ok(())
}

/// Key of every field matching the effective `inputs` selector, in
/// document order.
pub fn collect_keys(
    doc: &Document,
    options: &GarlicOptions,
) -> Result<Vec<(NodeId, Result<PathKey, GarlicError>)>, GarlicError> {
    let config = FieldConfig::from_options(options);
    let fields = doc.select(&config.inputs)?;

    Ok(fields
        .into_iter()
        .map(|f| (f, resolve_node(doc, f)))
        .collect())
}

// ============================================================================
// replay subcommand
// ============================================================================

/// Replay a script and return whether it passed.
pub fn cmd_replay(
    document: &str,
    script_path: &str,
    store_dir: &str,
    options: &GarlicOptions,
    trace_path: Option<&str>,
    verbose: u8,
) -> Result<bool, Box<dyn std::error::Error>> {
    let snapshot = load_snapshot(document)?;
    let content = std::fs::read_to_string(script_path)?;
    let script = with_base_options(ReplayScript::from_yaml(&content)?, options);

    let backend = FileBackend::open(Path::new(store_dir), &snapshot.origin)?;
    if verbose > 0 {
        eprintln!(
            "Replaying '{}' ({} steps) with store {}",
            script.name,
            script.steps.len(),
            backend.path().display()
        );
    }

    let tracer = match trace_path {
        Some(path) => TraceLogger::new(path),
        None => TraceLogger::disabled(),
    };
    let binder = Binder::new(Storage::new(Box::new(backend))).with_tracer(tracer);

    let mut runner = ReplayRunner::new(snapshot, binder)?;
    let result = runner.run(&script);
    print!("{}", format_console_report(&result));

    Ok(result.passed)
}

/// Layer each bind step's options over the configured call-site options.
pub fn with_base_options(mut script: ReplayScript, base: &GarlicOptions) -> ReplayScript {
    for step in script.steps.iter_mut() {
        if let ReplayStep::Bind { options, .. } = step {
            *options = base.overlay(options);
        }
    }
    script
}

// ============================================================================
// store subcommand
// ============================================================================

pub fn cmd_store(
    origin: &str,
    action: &StoreAction,
    store_dir: &str,
    verbose: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    let backend = FileBackend::open(Path::new(store_dir), origin)?;
    if verbose > 0 {
        eprintln!("Store for {}: {}", origin, backend.path().display());
    }
    let mut storage = Storage::new(Box::new(backend));

    match action {
        StoreAction::List => {
            for (key, value) in storage.entries() {
                println!("{}\t{}", key, value);
            }
        }
        StoreAction::Get { key } => match storage.get(key) {
            Some(value) => println!("{}", value),
            None => eprintln!("No entry for '{}'", key),
        },
        StoreAction::Set { key, value } => report_outcome("set", storage.set(key, value))?,
        StoreAction::Delete { key } => report_outcome("delete", storage.delete(key))?,
        StoreAction::Clean => report_outcome("clean", storage.clean())?,
        StoreAction::Clear => report_outcome("clear", storage.clear_all())?,
    }

    Ok(())
}

fn report_outcome(op: &str, ok: bool) -> Result<(), GarlicError> {
    if ok {
        Ok(())
    } else {
        Err(GarlicError::Store(op.to_string()))
    }
}
