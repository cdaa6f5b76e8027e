// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Failure message rewriting
//!
//! Stack traces in failure messages carry absolute paths from whichever machine
//! ran the tests. [`Linkifier`] rewrites them in two global passes:
//!
//! 1. any `/…/<project_root>/` prefix becomes `/path/to/<project_root>/`;
//! 2. every `/path/to/<project_root>/<source_dir>/…:<line>:<column>` reference
//!    becomes a link to the source browser at that file and line.
//!
//! The second pass is a scanner producing [`Segment`]s, so callers that do not
//! render HTML can still use the references.
//!
//! The output is markup meant to be rendered as trusted. Diagnostics are not
//! escaped unless [`LinkifierConfig::escape_markup`] is set.
//!
//! # Example
//!
//! ```
//! use testdeck_report::linkify::enhance_message;
//!
//! let html = enhance_message("at /home/me/berry/packages/cli/main.ts:3:9");
//! assert!(html.contains(r#"href="https://github.com/yarnpkg/berry/blob/master/packages/cli/main.ts#L3""#));
//! ```

use std::sync::LazyLock;

use regex::{NoExpand, Regex};
use serde::{Deserialize, Serialize};

use crate::error::LinkifyError;

/// Checkout directory name that paths are normalized on
pub const DEFAULT_PROJECT_ROOT: &str = "berry";

/// Top-level directory whose files get linked
pub const DEFAULT_SOURCE_DIR: &str = "packages";

/// Source browser URL, `{path}` and `{line}` are substituted
pub const DEFAULT_SOURCE_URL: &str = "https://github.com/yarnpkg/berry/blob/master/{path}#L{line}";

/// Characters allowed in a path segment
const PATH_CHARS: &str = "[A-Za-z0-9/_.-]";

/// Linkifier built from [`LinkifierConfig::default`]
static DEFAULT_LINKIFIER: LazyLock<Linkifier> = LazyLock::new(|| {
    Linkifier::new(LinkifierConfig::default()).expect("Default linkifier config is valid")
});

/// Rewrite a failure message with the default configuration
#[must_use]
pub fn enhance_message(message: &str) -> String {
    DEFAULT_LINKIFIER.enhance(message)
}

/// Where failure messages point to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkifierConfig {
    /// Name of the checkout directory, e.g. `berry`
    pub project_root: String,
    /// Directory under the root whose files are linked, e.g. `packages`
    pub source_dir: String,
    /// URL template with `{path}` and `{line}` placeholders
    pub source_url: String,
    /// HTML-escape the message before adding links
    pub escape_markup: bool,
}

impl Default for LinkifierConfig {
    fn default() -> Self {
        Self {
            project_root: DEFAULT_PROJECT_ROOT.to_string(),
            source_dir: DEFAULT_SOURCE_DIR.to_string(),
            source_url: DEFAULT_SOURCE_URL.to_string(),
            escape_markup: false,
        }
    }
}

/// A piece of a rewritten message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Text copied through unchanged
    Literal {
        /// The text
        text: String,
    },
    /// A recognised source reference
    Link {
        /// The matched reference, shown as the link text
        text: String,
        /// Source browser URL
        url: String,
        /// Path relative to the project root
        path: String,
        /// Line number, as written in the message
        line: String,
    },
}

impl Segment {
    /// Text shown for this segment
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Literal { text } | Self::Link { text, .. } => text,
        }
    }
}

/// Compiled failure-message rewriter
#[derive(Debug, Clone)]
pub struct Linkifier {
    config: LinkifierConfig,
    placeholder: String,
    checkout_root: Regex,
    source_ref: Regex,
}

impl Linkifier {
    /// Compile the patterns for `config`
    ///
    /// # Errors
    ///
    /// Returns `LinkifyError::EmptyProjectRoot` if no root name is given and
    /// `LinkifyError::MissingPathPlaceholder` if the URL template lacks `{path}`.
    pub fn new(config: LinkifierConfig) -> Result<Self, LinkifyError> {
        if config.project_root.is_empty() {
            return Err(LinkifyError::EmptyProjectRoot);
        }
        if !config.source_url.contains("{path}") {
            return Err(LinkifyError::MissingPathPlaceholder(config.source_url));
        }

        let root = regex::escape(&config.project_root);
        let placeholder = format!("/path/to/{}/", config.project_root);

        let checkout_root = Regex::new(&format!("/{PATH_CHARS}+/{root}/"))?;
        let source_ref = Regex::new(&format!(
            "{}({}/{PATH_CHARS}+):([0-9]+):([0-9]+)",
            regex::escape(&placeholder),
            regex::escape(&config.source_dir),
        ))?;

        Ok(Self {
            config,
            placeholder,
            checkout_root,
            source_ref,
        })
    }

    /// The configuration this linkifier was built from
    #[must_use]
    pub fn config(&self) -> &LinkifierConfig {
        &self.config
    }

    /// Replace machine-specific checkout prefixes with the canonical root
    #[must_use]
    pub fn normalize(&self, message: &str) -> String {
        self.checkout_root
            .replace_all(message, NoExpand(&self.placeholder))
            .into_owned()
    }

    /// Split a message into literal text and source links
    #[must_use]
    pub fn segments(&self, message: &str) -> Vec<Segment> {
        let message = if self.config.escape_markup {
            escape_html(message)
        } else {
            message.to_string()
        };
        let normalized = self.normalize(&message);

        let mut segments = Vec::new();
        let mut last = 0;

        for caps in self.source_ref.captures_iter(&normalized) {
            let (Some(whole), Some(path), Some(line)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };

            if whole.start() > last {
                segments.push(Segment::Literal {
                    text: normalized[last..whole.start()].to_string(),
                });
            }
            segments.push(Segment::Link {
                text: whole.as_str().to_string(),
                url: self.source_url(path.as_str(), line.as_str()),
                path: path.as_str().to_string(),
                line: line.as_str().to_string(),
            });
            last = whole.end();
        }

        if last < normalized.len() {
            segments.push(Segment::Literal {
                text: normalized[last..].to_string(),
            });
        }

        segments
    }

    /// Rewrite a message into markup with source links
    #[must_use]
    pub fn enhance(&self, message: &str) -> String {
        let mut out = String::with_capacity(message.len());
        for segment in self.segments(message) {
            match segment {
                Segment::Literal { text } => out.push_str(&text),
                Segment::Link { text, url, .. } => {
                    out.push_str(&format!(r#"<a href="{url}" target="_blank">{text}</a>"#));
                }
            }
        }
        out
    }

    fn source_url(&self, path: &str, line: &str) -> String {
        self.config
            .source_url
            .replace("{path}", path)
            .replace("{line}", line)
    }
}

/// Escape HTML special characters
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    fn linkifier() -> Linkifier {
        Linkifier::new(LinkifierConfig::default()).expect("valid config")
    }

    #[test]
    fn test_enhance_links_absolute_reference() {
        let out = enhance_message("/home/me/proj/berry/packages/foo/bar.ts:10:4");
        assert_eq!(
            out,
            "<a href=\"https://github.com/yarnpkg/berry/blob/master/packages/foo/bar.ts#L10\" \
             target=\"_blank\">/path/to/berry/packages/foo/bar.ts:10:4</a>"
        );
    }

    #[test]
    fn test_normalize_only() {
        let out = linkifier().normalize("see /Users/ci/work/berry/README.md");
        assert_eq!(out, "see /path/to/berry/README.md");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let l = linkifier();
        let once = l.normalize("/a/b/berry/x");
        assert_eq!(l.normalize(&once), once);
    }

    #[test]
    fn test_references_outside_source_dir_are_not_linked() {
        let out = enhance_message("at /x/berry/scripts/run.mjs:1:2");
        assert_eq!(out, "at /path/to/berry/scripts/run.mjs:1:2");
    }

    #[test]
    fn test_reference_without_column_is_not_linked() {
        let out = enhance_message("at /x/berry/packages/a.ts:7");
        assert_eq!(out, "at /path/to/berry/packages/a.ts:7");
    }

    #[test]
    fn test_multiple_references_keep_surrounding_text() {
        let message = "Error: boom\n    at f (/ci/berry/packages/a/x.ts:1:2)\n    at g (/ci/berry/packages/b/y.ts:30:4)\n    at node:internal";
        let segments = linkifier().segments(message);

        let links: Vec<(&str, &str)> = segments
            .iter()
            .filter_map(|s| match s {
                Segment::Link { path, line, .. } => Some((path.as_str(), line.as_str())),
                Segment::Literal { .. } => None,
            })
            .collect();
        assert_eq!(links, vec![("packages/a/x.ts", "1"), ("packages/b/y.ts", "30")]);

        let text: String = segments.iter().map(Segment::text).collect();
        assert_eq!(
            text,
            "Error: boom\n    at f (/path/to/berry/packages/a/x.ts:1:2)\n    at g (/path/to/berry/packages/b/y.ts:30:4)\n    at node:internal"
        );
    }

    #[test]
    fn test_message_without_references_is_unchanged() {
        let message = "expect(received).toBe(expected)\n\nExpected: 1\nReceived: 2";
        assert_eq!(enhance_message(message), message);
    }

    #[test]
    fn test_empty_message() {
        assert!(linkifier().segments("").is_empty());
        assert_eq!(enhance_message(""), "");
    }

    #[test]
    fn test_markup_is_not_escaped_by_default() {
        let out = enhance_message("<b>bold</b>");
        assert_eq!(out, "<b>bold</b>");
    }

    #[test]
    fn test_escape_markup() {
        let l = Linkifier::new(LinkifierConfig {
            escape_markup: true,
            ..Default::default()
        })
        .expect("valid config");
        let out = l.enhance("<img src=x> at /w/berry/packages/a.ts:1:1");
        assert!(out.starts_with("&lt;img src=x&gt; at <a href="));
        assert!(out.contains(">/path/to/berry/packages/a.ts:1:1</a>"));
    }

    #[test]
    fn test_custom_config() {
        let l = Linkifier::new(LinkifierConfig {
            project_root: "my.repo".to_string(),
            source_dir: "src".to_string(),
            source_url: "https://example.com/{path}?line={line}".to_string(),
            escape_markup: false,
        })
        .expect("valid config");

        let out = l.enhance("/home/u/my.repo/src/lib.rs:42:1");
        assert_eq!(
            out,
            "<a href=\"https://example.com/src/lib.rs?line=42\" target=\"_blank\">/path/to/my.repo/src/lib.rs:42:1</a>"
        );
        // The root name is matched literally
        assert_eq!(l.normalize("/home/u/myXrepo/src"), "/home/u/myXrepo/src");
    }

    #[test]
    fn test_config_requires_path_placeholder() {
        let result = Linkifier::new(LinkifierConfig {
            source_url: "https://example.com".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(LinkifyError::MissingPathPlaceholder(_))));
    }

    #[test]
    fn test_config_requires_project_root() {
        let result = Linkifier::new(LinkifierConfig {
            project_root: String::new(),
            ..Default::default()
        });
        assert!(matches!(result, Err(LinkifyError::EmptyProjectRoot)));
    }
}
