// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for report parsing
//!
//! Any input that parses must survive the full view pipeline.

#![no_main]

use libfuzzer_sys::fuzz_target;

use testdeck_report::{Linkifier, LinkifierConfig, Query, ReportView, parse_report};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data)
        && let Ok(report) = parse_report(input)
        && let Ok(linkifier) = Linkifier::new(LinkifierConfig::default())
    {
        let _ = ReportView::build(&report, &Query::default(), &linkifier);
        let _ = ReportView::build(&report, &Query::new(false, "a"), &linkifier);
    }
});
