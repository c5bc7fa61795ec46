//! Subcommand bodies, separated from argument parsing for testing

use crate::settings::{load_config, Overrides};
use crate::store::{DirectoryStore, JsonRecords};
use anyhow::Context;
use chrono::Local;
use infobox_core::{EditOutcome, EditSession, HistoryEntry, HistoryLedger, SessionReport};
use infobox_reference::ReferenceGuard;
use infobox_template::{schema_for, TemplateModel};
use std::fmt::{self, Display, Formatter, Write as _};
use std::path::PathBuf;

/// Inputs of `infobox apply`
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Directory of `<title>.wiki` files
    pub documents: PathBuf,
    /// JSON array of entity records
    pub records: PathBuf,
    /// Optional TOML configuration
    pub config: Option<PathBuf>,
    /// Optional history ledger to prepend an entry to
    pub history: Option<PathBuf>,
    /// Values taking precedence over the configuration file
    pub overrides: Overrides,
}

/// Run a session over a document directory
///
/// # Errors
/// Fails on unreadable inputs or configuration. Per-document failures are
/// reported in the returned [`SessionReport`], not as errors.
pub fn apply(options: &ApplyOptions) -> anyhow::Result<SessionReport> {
    let config = load_config(options.config.as_deref(), options.overrides.clone())?;
    let store = DirectoryStore::open(&options.documents)?;
    let records = JsonRecords::load(&options.records)?;
    tracing::info!(
        records = records.len(),
        documents = %options.documents.display(),
        dry_run = config.dry_run,
        "starting session"
    );

    let summary = config.summary.clone();
    let operator = config.operator.clone().unwrap_or_default();
    let note = config.note.clone().unwrap_or_default();

    let mut session = EditSession::new(config, store, records)?;
    let report = session.run();

    if let Some(path) = &options.history {
        let existing = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("reading history {}", path.display()))
            }
        };
        let mut ledger = HistoryLedger::new(existing);
        let entry = HistoryEntry::from_report(
            ledger.next_id(),
            &report,
            Local::now().fixed_offset(),
            summary,
            operator,
            note,
        );
        ledger.insert(&entry);
        std::fs::write(path, ledger.as_str())
            .with_context(|| format!("writing history {}", path.display()))?;
    }

    Ok(report)
}

/// Human-readable session summary
#[must_use]
pub fn summarize(report: &SessionReport) -> String {
    Summary(report).to_string()
}

/// One line per outcome plus the totals line
struct Summary<'a>(&'a SessionReport);

impl Display for Summary<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let report = self.0;
        for outcome in report.outcomes() {
            match outcome {
                EditOutcome::Success {
                    entity,
                    title,
                    changed,
                    persisted,
                    diagnostics,
                } => {
                    let state = match (changed, persisted) {
                        (false, _) => "unchanged",
                        (true, true) => "saved",
                        (true, false) => "not saved",
                    };
                    writeln!(f, "ok    {entity} -> {title} ({state})")?;
                    for diagnostic in diagnostics.iter().filter(|d| d.is_warning()) {
                        writeln!(f, "      warning: {diagnostic}")?;
                    }
                }
                EditOutcome::Failure {
                    entity,
                    kind,
                    detail,
                } => writeln!(f, "fail  {entity} [{kind}] {detail}")?,
            }
        }
        writeln!(
            f,
            "ordered: {}  done: {} ({}%)  failed: {} ({}%)",
            report.ordered(),
            report.succeeded(),
            report.success_percent(),
            report.failed(),
            report.failure_percent()
        )
    }
}

/// Parsed fields, canonical render and citation classifications of one article
///
/// # Errors
/// Fails for an unknown template or when the block cannot be located.
pub fn inspect(document: &str, template: &str) -> anyhow::Result<String> {
    let schema =
        schema_for(template).with_context(|| format!("unknown template '{template}'"))?;
    let (span, model) = TemplateModel::from_document(schema, document)?;
    let guard = ReferenceGuard::new();

    let mut out = String::new();
    writeln!(out, "span: {}..{}", span.start, span.end)?;
    writeln!(out, "fields:")?;
    for (key, value) in model.fields().iter() {
        let tag = if schema.is_deprecated(key) {
            " (deprecated)"
        } else if !schema.is_known(key) {
            " (unranked)"
        } else {
            ""
        };
        writeln!(out, "  {key} = {value}{tag}")?;
    }
    for diagnostic in model.diagnostics() {
        writeln!(out, "  note: {diagnostic}")?;
    }

    writeln!(out, "citations:")?;
    for (key, value) in model.fields().iter().filter(|(k, v)| k.ends_with("_ref") && !v.is_empty()) {
        let check = guard.inspect_replacement(document, value);
        let name = check.name.as_deref().unwrap_or("-");
        writeln!(
            out,
            "  {key}: {name} ({}, {} occurrences)",
            check.safety, check.occurrences
        )?;
    }

    writeln!(out, "render:")?;
    out.push_str(&model.render());
    out.push('\n');
    Ok(out)
}
