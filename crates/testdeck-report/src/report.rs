// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Jest report parsing
//!
//! This module reads the JSON document produced by `jest --json` (the
//! "formatted test results" shape) and flattens it into individual test records.
//!
//! # Example
//!
//! ```
//! use testdeck_report::report::{flatten, parse_report};
//!
//! let json = r#"{"testResults": [{"assertionResults": [
//!     {"ancestorTitles": ["math"], "title": "adds", "status": "passed"}
//! ]}]}"#;
//! let report = parse_report(json).unwrap();
//! assert_eq!(flatten(&report).len(), 1);
//! ```

use std::io::Read;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ReportError;
use crate::result::{TestResultRecord, TestStatus};

// ============================================================================
// Report Types (from `jest --json`)
// ============================================================================

/// A complete test run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    /// Total number of tests, as counted by the runner
    pub num_total_tests: Option<usize>,
    /// Number of passed tests, as counted by the runner
    pub num_passed_tests: Option<usize>,
    /// Number of failed tests, as counted by the runner
    pub num_failed_tests: Option<usize>,
    /// Number of pending tests, as counted by the runner
    pub num_pending_tests: Option<usize>,
    /// Number of todo tests, as counted by the runner
    pub num_todo_tests: Option<usize>,
    /// Overall success flag
    pub success: Option<bool>,
    /// Run start, epoch milliseconds
    pub start_time: Option<i64>,
    /// One entry per executed test file
    pub test_results: Vec<SuiteRun>,
}

/// The results of one test file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteRun {
    /// Path of the test file
    pub name: Option<String>,
    /// File-level status ("passed" or "failed")
    pub status: Option<String>,
    /// File-level failure output
    pub message: Option<String>,
    /// Start, epoch milliseconds
    pub start_time: Option<i64>,
    /// End, epoch milliseconds
    pub end_time: Option<i64>,
    /// Tests executed in this file, in declaration order
    pub assertion_results: Vec<TestResultRecord>,
}

impl SuiteRun {
    /// Wall-clock duration of the file, when both timestamps are present
    #[must_use]
    pub fn duration_ms(&self) -> Option<i64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }
}

impl TestReport {
    /// Iterate over every test record, suite order then in-suite order
    pub fn records(&self) -> impl Iterator<Item = &TestResultRecord> {
        self.test_results
            .iter()
            .flat_map(|suite| suite.assertion_results.iter())
    }

    /// When the run started, if the runner recorded it
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.start_time.and_then(DateTime::from_timestamp_millis)
    }

    /// Get failing tests
    #[must_use]
    pub fn failing_tests(&self) -> Vec<&TestResultRecord> {
        self.records().filter(|r| r.failed()).collect()
    }

    /// Check the parts of the shape serde cannot express
    fn validate(&self) -> Result<(), ReportError> {
        for record in self.records() {
            if let Some(duration) = record.duration_ms
                && (!duration.is_finite() || duration < 0.0)
            {
                return Err(ReportError::InvalidFormat {
                    message: format!("test '{}' has invalid duration {duration}", record.title),
                });
            }
        }
        Ok(())
    }
}

/// Aggregated counts over a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Tests in the report
    pub total: usize,
    /// Tests passed
    pub passed: usize,
    /// Tests failed
    pub failed: usize,
    /// Tests neither passed nor failed (skipped, todo, ...)
    pub other: usize,
    /// When the run started
    pub started_at: Option<DateTime<Utc>>,
}

impl RunSummary {
    /// Count the records of a report
    #[must_use]
    pub fn from_report(report: &TestReport) -> Self {
        let mut summary = Self {
            total: 0,
            passed: 0,
            failed: 0,
            other: 0,
            started_at: report.started_at(),
        };

        for record in report.records() {
            summary.total += 1;
            match record.status {
                TestStatus::Passed => summary.passed += 1,
                TestStatus::Failed => summary.failed += 1,
                _ => summary.other += 1,
            }
        }

        summary
    }

    /// Check if no test failed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parse a `jest --json` report
///
/// # Errors
///
/// Returns `ReportError::JsonParse` if the JSON is invalid or a required field
/// (such as a suite's `assertionResults`) is missing, and
/// `ReportError::InvalidFormat` if a record carries an impossible value.
pub fn parse_report(json: &str) -> Result<TestReport, ReportError> {
    let report: TestReport = serde_json::from_str(json)?;
    report.validate()?;
    debug!(
        suites = report.test_results.len(),
        "Parsed test report from string"
    );
    Ok(report)
}

/// Read a `jest --json` report from any reader
///
/// # Errors
///
/// Same as [`parse_report`], plus `ReportError::Io` if reading fails.
pub fn read_report<R: Read>(mut reader: R) -> Result<TestReport, ReportError> {
    let mut json = String::new();
    reader.read_to_string(&mut json)?;
    parse_report(&json)
}

/// Flatten a report into one ordered sequence of test records
///
/// Suites keep their report order and each suite's tests keep theirs. Nothing
/// is filtered or deduplicated.
#[must_use]
pub fn flatten(report: &TestReport) -> Vec<&TestResultRecord> {
    let records: Vec<_> = report.records().collect();
    debug!(records = records.len(), "Flattened test report");
    records
}
