// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Per-test identifiers
//!
//! Every function here depends only on the record's ancestor titles and title.
//! None of them guarantee uniqueness: two tests with the same path, or paths
//! that differ only in punctuation, produce the same identifiers.

use crate::group::{GROUP_SEPARATOR, group_key};
use crate::result::TestResultRecord;

/// Characters a test runner's name filter treats as regex syntax
const REGEX_METACHARACTERS: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// In-page anchor for a test
///
/// Built from `ancestors.join("-") + "-" + title`, lower-cased, with every run
/// of characters outside `[a-z0-9]` collapsed into one `-`. Dashes at either end
/// are dropped, so a path made only of symbols yields an empty anchor.
#[must_use]
pub fn anchor_slug(record: &TestResultRecord) -> String {
    let path = format!("{}-{}", record.ancestor_titles.join("-"), record.title);
    slugify(&path)
}

/// Lower-case `text` and collapse non-alphanumeric runs into single dashes
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Shell argument selecting this test in the runner's name filter
///
/// The full name (`ancestors.join(" ") + " " + title`) has regex
/// metacharacters and single quotes backslash-escaped and is wrapped in single
/// quotes.
#[must_use]
pub fn clipboard_payload(record: &TestResultRecord) -> String {
    let name = format!("{} {}", record.ancestor_titles.join(" "), record.title);

    let mut payload = String::with_capacity(name.len() + 2);
    payload.push('\'');
    for c in name.chars() {
        if c == '\'' || REGEX_METACHARACTERS.contains(&c) {
            payload.push('\\');
        }
        payload.push(c);
    }
    payload.push('\'');
    payload
}

/// Hover text for a status cell: the full breadcrumb path
#[must_use]
pub fn tooltip(record: &TestResultRecord) -> String {
    format!(
        "{}{GROUP_SEPARATOR}{}",
        group_key(record.ancestor_titles.as_slice()),
        record.title
    )
}
