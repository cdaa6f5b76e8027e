// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Everything a presentation layer needs, in one serialisable structure
//!
//! [`ReportView::build`] runs the whole pipeline (flatten, filter, group,
//! identifiers, linkify) for one query. It is recomputed from the report every
//! time and holds no state of its own.

use serde::Serialize;

use crate::filter::{Query, filter};
use crate::group::{Listing, listing};
use crate::identifier::{anchor_slug, clipboard_payload, tooltip};
use crate::linkify::Linkifier;
use crate::report::{RunSummary, TestReport, flatten};
use crate::result::{TestResultRecord, TestStatus};

/// Derived views over a report for one query
#[derive(Debug, Clone, Serialize)]
pub struct ReportView {
    /// Counts over the whole report
    pub summary: RunSummary,
    /// One cell per test in the report, ignoring the query
    pub overview: Vec<StatusCell>,
    /// Grouped listing of the tests matching the query
    pub listing: ListingView,
}

/// A single square of the status overview
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCell {
    /// Anchor of the listing entry this cell jumps to
    pub anchor: String,
    /// Full breadcrumb path
    pub tooltip: String,
    /// Green or red
    pub passed: bool,
}

impl StatusCell {
    /// Build the cell for a record
    #[must_use]
    pub fn from_record(record: &TestResultRecord) -> Self {
        Self {
            anchor: anchor_slug(record),
            tooltip: tooltip(record),
            passed: record.passed(),
        }
    }
}

/// Listing state, serialised with a `state` tag
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListingView {
    /// Nothing matched the query
    NoMatches,
    /// Groups in first-seen order
    Groups {
        /// The groups
        groups: Vec<GroupView>,
    },
}

/// One group of the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupView {
    /// Joined ancestor titles
    pub key: String,
    /// Tests in report order
    pub tests: Vec<TestEntry>,
}

/// One test line of the listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestEntry {
    /// Test title
    pub title: String,
    /// In-page anchor
    pub anchor: String,
    /// Outcome
    pub status: TestStatus,
    /// Duration in milliseconds
    pub duration_ms: Option<f64>,
    /// Shell-safe selector to copy
    pub clipboard: String,
    /// Whether the line can be expanded to show failure detail
    pub expandable: bool,
    /// Linkified failure messages
    pub failure_messages: Vec<String>,
}

impl TestEntry {
    /// Build the listing entry for a record
    #[must_use]
    pub fn from_record(record: &TestResultRecord, linkifier: &Linkifier) -> Self {
        let expandable = record.is_expandable();
        let failure_messages = if expandable {
            record
                .failure_messages()
                .iter()
                .map(|message| linkifier.enhance(message))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            title: record.title.clone(),
            anchor: anchor_slug(record),
            status: record.status.clone(),
            duration_ms: record.duration_ms,
            clipboard: clipboard_payload(record),
            expandable,
            failure_messages,
        }
    }
}

impl ListingView {
    /// Convert a grouped listing into its serialisable form
    #[must_use]
    pub fn from_listing(listing: &Listing<'_>, linkifier: &Linkifier) -> Self {
        match listing {
            Listing::NoMatches => Self::NoMatches,
            Listing::Groups(grouped) => Self::Groups {
                groups: grouped
                    .iter()
                    .map(|(key, records)| GroupView {
                        key: key.to_string(),
                        tests: records
                            .iter()
                            .map(|record| TestEntry::from_record(record, linkifier))
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}

impl ReportView {
    /// Run the pipeline for `query`
    #[must_use]
    pub fn build(report: &TestReport, query: &Query, linkifier: &Linkifier) -> Self {
        let records = flatten(report);
        let overview = records.iter().map(|r| StatusCell::from_record(r)).collect();
        let filtered = filter(records.iter().copied(), query);
        let grouped = listing(filtered);

        Self {
            summary: RunSummary::from_report(report),
            overview,
            listing: ListingView::from_listing(&grouped, linkifier),
        }
    }
}
