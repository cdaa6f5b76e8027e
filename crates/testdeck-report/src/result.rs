// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Test result types

use serde::{Deserialize, Serialize};

use crate::group::group_key;

/// A single executed test, as emitted in a suite's `assertionResults`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultRecord {
    /// Enclosing describe/suite names, root first
    pub ancestor_titles: Vec<String>,
    /// The test's own name
    pub title: String,
    /// Runner-provided full name, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Test outcome
    pub status: TestStatus,
    /// Duration in milliseconds, when the runner measured it
    #[serde(default, rename = "duration")]
    pub duration_ms: Option<f64>,
    /// Raw diagnostics, only populated for non-passing tests
    #[serde(default)]
    pub failure_messages: Option<Vec<String>>,
    /// Source position of the test declaration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Possible test outcomes
///
/// Anything other than `passed` counts as "not passed" when filtering. A status
/// this crate does not know about is kept verbatim in `Other`, so it
/// serializes back to the runner's own string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TestStatus {
    /// Test passed
    Passed,
    /// Test failed
    Failed,
    /// Test was skipped with `.skip`
    Pending,
    /// Test was skipped by the runner
    Skipped,
    /// Test is a `.todo` placeholder
    Todo,
    /// Test was disabled
    Disabled,
    /// Test was focused with `.only`
    Focused,
    /// A status this crate does not know about
    Other(String),
}

impl TestStatus {
    /// The status as the runner writes it
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Pending => "pending",
            Self::Skipped => "skipped",
            Self::Todo => "todo",
            Self::Disabled => "disabled",
            Self::Focused => "focused",
            Self::Other(status) => status,
        }
    }

    /// Short label for terminal output
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Pending | Self::Skipped | Self::Disabled => "SKIP",
            Self::Todo => "TODO",
            Self::Focused | Self::Other(_) => "----",
        }
    }
}

impl From<String> for TestStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "passed" => Self::Passed,
            "failed" => Self::Failed,
            "pending" => Self::Pending,
            "skipped" => Self::Skipped,
            "todo" => Self::Todo,
            "disabled" => Self::Disabled,
            "focused" => Self::Focused,
            _ => Self::Other(status),
        }
    }
}

impl From<TestStatus> for String {
    fn from(status: TestStatus) -> Self {
        match status {
            TestStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

/// Line/column of a test declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// 1-based line
    pub line: u32,
    /// Column
    pub column: u32,
}

impl TestResultRecord {
    /// Create a record with no duration or diagnostics
    #[must_use]
    pub fn new<I, S>(ancestor_titles: I, title: impl Into<String>, status: TestStatus) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ancestor_titles: ancestor_titles.into_iter().map(Into::into).collect(),
            title: title.into(),
            full_name: None,
            status,
            duration_ms: None,
            failure_messages: None,
            location: None,
        }
    }

    /// Set the measured duration
    #[must_use]
    pub fn with_duration(mut self, duration_ms: f64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Attach failure diagnostics
    #[must_use]
    pub fn with_failure_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failure_messages = Some(messages.into_iter().map(Into::into).collect());
        self
    }

    /// Check if the test passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }

    /// Check if the test failed outright
    #[must_use]
    pub fn failed(&self) -> bool {
        self.status == TestStatus::Failed
    }

    /// The joined ancestor path this record is grouped under
    #[must_use]
    pub fn group_key(&self) -> String {
        group_key(self.ancestor_titles.as_slice())
    }

    /// Failure diagnostics, empty when there are none
    #[must_use]
    pub fn failure_messages(&self) -> &[String] {
        self.failure_messages.as_deref().unwrap_or_default()
    }

    /// Whether a listing should offer to expand this test
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        !self.passed()
    }
}
