// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Status and free-text filtering of test records

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::result::TestResultRecord;

/// The user's current view settings
///
/// Passed explicitly to [`filter`]; the report itself is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    /// Keep passing tests in the result
    pub show_passing: bool,
    /// Case-insensitive substring to look for in titles and ancestor titles
    pub search_text: String,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            show_passing: true,
            search_text: String::new(),
        }
    }
}

impl Query {
    /// Create a query
    #[must_use]
    pub fn new(show_passing: bool, search_text: impl Into<String>) -> Self {
        Self {
            show_passing,
            search_text: search_text.into(),
        }
    }

    /// Check a single record against this query
    #[must_use]
    pub fn matches(&self, record: &TestResultRecord) -> bool {
        Matcher::new(self).matches(record)
    }
}

/// A query with its search text folded once up front
struct Matcher {
    show_passing: bool,
    needle: String,
}

impl Matcher {
    fn new(query: &Query) -> Self {
        Self {
            show_passing: query.show_passing,
            needle: query.search_text.to_lowercase(),
        }
    }

    fn matches(&self, record: &TestResultRecord) -> bool {
        let status_ok = self.show_passing || !record.passed();

        let search_ok = self.needle.is_empty()
            || record.title.to_lowercase().contains(&self.needle)
            || record
                .ancestor_titles
                .iter()
                .any(|title| title.to_lowercase().contains(&self.needle));

        status_ok && search_ok
    }
}

/// Keep the records matching `query`, in input order
///
/// An empty result is a normal outcome and means "no matches".
pub fn filter<'a, I>(records: I, query: &Query) -> Vec<&'a TestResultRecord>
where
    I: IntoIterator<Item = &'a TestResultRecord>,
{
    let matcher = Matcher::new(query);
    let kept: Vec<_> = records
        .into_iter()
        .filter(|record| matcher.matches(record))
        .collect();
    debug!(
        kept = kept.len(),
        show_passing = query.show_passing,
        search = %query.search_text,
        "Filtered test records"
    );
    kept
}
