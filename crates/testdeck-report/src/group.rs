// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Grouping of test records by their ancestor path
//!
//! Groups come out in the order their key was first seen and each group keeps
//! its records in input order. This is a stable partition, never a sort.

use indexmap::IndexMap;
use tracing::debug;

use crate::result::TestResultRecord;

/// Separator between ancestor titles in a group key
pub const GROUP_SEPARATOR: &str = " › ";

/// Message shown in place of a listing when nothing matched
pub const NO_MATCHES_MESSAGE: &str = "No tests match your criteria";

/// Join ancestor titles into a group key
#[must_use]
pub fn group_key<S: AsRef<str>>(ancestor_titles: &[S]) -> String {
    let mut key = String::new();
    for (i, title) in ancestor_titles.iter().enumerate() {
        if i > 0 {
            key.push_str(GROUP_SEPARATOR);
        }
        key.push_str(title.as_ref());
    }
    key
}

/// Records partitioned by group key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedResults<'a> {
    groups: IndexMap<String, Vec<&'a TestResultRecord>>,
}

impl<'a> GroupedResults<'a> {
    /// Number of groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if there are no groups
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Group keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Records of one group
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[&'a TestResultRecord]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// Iterate over `(key, records)` in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a TestResultRecord])> {
        self.groups
            .iter()
            .map(|(key, records)| (key.as_str(), records.as_slice()))
    }

    fn push(&mut self, record: &'a TestResultRecord) {
        self.groups
            .entry(record.group_key())
            .or_default()
            .push(record);
    }
}

/// Partition records by group key in a single left-to-right scan
pub fn group<'a, I>(records: I) -> GroupedResults<'a>
where
    I: IntoIterator<Item = &'a TestResultRecord>,
{
    let mut grouped = GroupedResults::default();
    for record in records {
        grouped.push(record);
    }
    debug!(groups = grouped.len(), "Grouped test records");
    grouped
}

/// A grouped listing, or the explicit "nothing matched" state
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<'a> {
    /// The filtered input was empty
    NoMatches,
    /// At least one group
    Groups(GroupedResults<'a>),
}

impl Listing<'_> {
    /// Check for the empty state
    #[must_use]
    pub fn is_no_matches(&self) -> bool {
        matches!(self, Self::NoMatches)
    }
}

/// Group records, reporting an empty input as [`Listing::NoMatches`]
pub fn listing<'a, I>(records: I) -> Listing<'a>
where
    I: IntoIterator<Item = &'a TestResultRecord>,
{
    let grouped = group(records);
    if grouped.is_empty() {
        Listing::NoMatches
    } else {
        Listing::Groups(grouped)
    }
}
