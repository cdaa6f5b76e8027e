// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Command handlers for the testdeck CLI
//!
//! Each handler derives a view from a loaded report and writes it to any
//! `Write`, so the binary prints to stdout and tests capture into a buffer.

use std::fs::File;
use std::io::{self, BufReader, Write};

use thiserror::Error;
use tracing::{debug, info};

use testdeck_report::{
    Clipboard, LinkifyError, Linkifier, ListingView, NO_MATCHES_MESSAGE, Query, ReportError,
    ReportView, RunSummary, StatusCell, TestReport, anchor_slug, clipboard_payload, copy_payload,
    flatten, read_report,
};

use crate::config::{Command, Config, ReportSource};

/// Shown in place of a group key for tests outside any describe block
const TOP_LEVEL_GROUP: &str = "(top level)";

// ============================================================================
// Error Types
// ============================================================================

/// Command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// The report could not be read or parsed
    #[error("Failed to load report: {0}")]
    Report(#[from] ReportError),

    /// The linkifier settings are unusable
    #[error("Invalid source link settings: {0}")]
    Linkify(#[from] LinkifyError),

    /// No test has the requested anchor
    #[error("No test with anchor '{0}'. Run 'testdeck overview' to list anchors.")]
    UnknownAnchor(String),

    /// Writing command output failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),

    /// JSON serialization error
    #[error("Failed to serialize view: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Load and parse the report from its source
///
/// # Errors
///
/// Returns `CommandError::Report` if the source cannot be read or holds a
/// malformed report.
pub fn load_report(source: &ReportSource) -> Result<TestReport, CommandError> {
    let report = match source {
        ReportSource::Stdin => read_report(io::stdin().lock())?,
        ReportSource::File(path) => {
            let file = File::open(path).map_err(ReportError::from)?;
            read_report(BufReader::new(file))?
        }
    };
    debug!(source = %source, suites = report.test_results.len(), "Loaded report");
    Ok(report)
}

// ============================================================================
// Handlers
// ============================================================================

/// Run the subcommand selected by `config`
///
/// # Errors
///
/// Returns an error if the linkifier settings are invalid, the anchor given to
/// `copy` is unknown, or writing the output fails.
pub fn execute<W: Write>(
    config: &Config,
    report: &TestReport,
    clipboard: &mut dyn Clipboard,
    out: &mut W,
) -> Result<(), CommandError> {
    let linkifier = Linkifier::new(config.linkifier_config())?;

    match config.effective_command() {
        Command::Summary => handle_summary(report, out),
        Command::List { query, details } => {
            handle_list(report, &query.to_query(), &linkifier, details, out)
        }
        Command::Overview => handle_overview(report, out),
        Command::Export { query, pretty } => {
            handle_export(report, &query.to_query(), &linkifier, pretty, out)
        }
        Command::Copy { anchor, print_only } => {
            let clipboard = if print_only { None } else { Some(clipboard) };
            handle_copy(report, &anchor, clipboard, out).map(|_| ())
        }
    }
}

/// Print run totals
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn handle_summary<W: Write>(report: &TestReport, out: &mut W) -> Result<(), CommandError> {
    let summary = RunSummary::from_report(report);

    writeln!(
        out,
        "Tests:   {} total, {} passed, {} failed, {} other",
        summary.total, summary.passed, summary.failed, summary.other
    )?;
    if let Some(started_at) = summary.started_at {
        writeln!(out, "Started: {}", started_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    }
    let verdict = if summary.all_passed() { "PASS" } else { "FAIL" };
    writeln!(out, "Result:  {verdict}")?;

    Ok(())
}

/// Print the grouped listing for `query`
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn handle_list<W: Write>(
    report: &TestReport,
    query: &Query,
    linkifier: &Linkifier,
    details: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let view = ReportView::build(report, query, linkifier);

    let groups = match view.listing {
        ListingView::NoMatches => {
            writeln!(out, "{NO_MATCHES_MESSAGE}")?;
            return Ok(());
        }
        ListingView::Groups { groups } => groups,
    };

    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let header = if group.key.is_empty() {
            TOP_LEVEL_GROUP
        } else {
            group.key.as_str()
        };
        writeln!(out, "{header}")?;

        for test in &group.tests {
            let duration = test
                .duration_ms
                .map(|ms| format!(" ({ms}ms)"))
                .unwrap_or_default();
            writeln!(
                out,
                "  {} {}{duration} #{}",
                test.status.label(),
                test.title,
                test.anchor
            )?;

            if details {
                for message in &test.failure_messages {
                    for line in message.lines() {
                        writeln!(out, "      {line}")?;
                    }
                }
            }
        }
    }

    Ok(())
}

/// Print one line per test, ignoring any query
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn handle_overview<W: Write>(report: &TestReport, out: &mut W) -> Result<(), CommandError> {
    for cell in flatten(report).into_iter().map(StatusCell::from_record) {
        let mark = if cell.passed { "PASS" } else { "FAIL" };
        writeln!(out, "{mark} {} {}", cell.anchor, cell.tooltip)?;
    }

    Ok(())
}

/// Print the derived views for `query` as JSON
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn handle_export<W: Write>(
    report: &TestReport,
    query: &Query,
    linkifier: &Linkifier,
    pretty: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let view = ReportView::build(report, query, linkifier);

    if pretty {
        serde_json::to_writer_pretty(&mut *out, &view)?;
    } else {
        serde_json::to_writer(&mut *out, &view)?;
    }
    writeln!(out)?;

    Ok(())
}

/// Print the selector of the first test with `anchor`, copying it when a
/// clipboard is given
///
/// # Errors
///
/// Returns `CommandError::UnknownAnchor` if no test has the anchor, or an
/// error if writing fails. Clipboard failures are only logged.
pub fn handle_copy<W: Write>(
    report: &TestReport,
    anchor: &str,
    clipboard: Option<&mut dyn Clipboard>,
    out: &mut W,
) -> Result<String, CommandError> {
    let record = flatten(report)
        .into_iter()
        .find(|record| anchor_slug(record) == anchor)
        .ok_or_else(|| CommandError::UnknownAnchor(anchor.to_string()))?;

    let payload = match clipboard {
        Some(clipboard) => {
            let payload = copy_payload(record, clipboard);
            info!(anchor, "Copied test selector to clipboard");
            payload
        }
        None => clipboard_payload(record),
    };
    writeln!(out, "{payload}")?;

    Ok(payload)
}
