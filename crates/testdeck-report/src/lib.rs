// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! testdeck-report: Test report processing for testdeck
//!
//! This library crate turns a `jest --json` report into the views needed to
//! browse it: a flat status overview, a filtered and grouped listing, per-test
//! anchors and shell-safe selectors, and failure messages whose stack traces
//! link back to the source.
//!
//! All derived views are pure functions of the report and a [`Query`].
//!
//! # Example
//!
//! ```
//! use testdeck_report::{Query, filter, flatten, listing, parse_report};
//!
//! let json = r#"{"testResults": [{"assertionResults": [
//!     {"ancestorTitles": ["X"], "title": "a", "status": "passed"},
//!     {"ancestorTitles": ["X"], "title": "b", "status": "failed"}
//! ]}]}"#;
//! let report = parse_report(json).unwrap();
//! let records = flatten(&report);
//!
//! let failing = filter(records.iter().copied(), &Query::new(false, ""));
//! assert_eq!(failing.len(), 1);
//! assert!(!listing(failing).is_no_matches());
//! ```

pub mod clipboard;
pub mod error;
pub mod filter;
pub mod group;
pub mod identifier;
pub mod linkify;
pub mod report;
pub mod result;
pub mod view;

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard, copy_payload};
pub use error::{ClipboardError, LinkifyError, ReportError};
pub use filter::{Query, filter};
pub use group::{
    GROUP_SEPARATOR, GroupedResults, Listing, NO_MATCHES_MESSAGE, group, group_key, listing,
};
pub use identifier::{anchor_slug, clipboard_payload, tooltip};
pub use linkify::{Linkifier, LinkifierConfig, Segment, enhance_message};
pub use report::{RunSummary, SuiteRun, TestReport, flatten, parse_report, read_report};
pub use result::{Location, TestResultRecord, TestStatus};
pub use view::{GroupView, ListingView, ReportView, StatusCell, TestEntry};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::ReportError;
    pub use crate::filter::{Query, filter};
    pub use crate::group::{Listing, group, listing};
    pub use crate::identifier::{anchor_slug, clipboard_payload};
    pub use crate::linkify::{Linkifier, LinkifierConfig};
    pub use crate::report::{TestReport, flatten, parse_report};
    pub use crate::result::{TestResultRecord, TestStatus};
}
