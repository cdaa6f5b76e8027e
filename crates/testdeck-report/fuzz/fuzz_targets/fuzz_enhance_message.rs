// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Fuzz target for failure message linkification

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use testdeck_report::{Linkifier, LinkifierConfig, Segment};

#[derive(Debug, Arbitrary)]
struct Input {
    message: String,
    project_root: String,
    source_dir: String,
    escape_markup: bool,
}

fuzz_target!(|input: Input| {
    let config = LinkifierConfig {
        project_root: input.project_root,
        source_dir: input.source_dir,
        escape_markup: input.escape_markup,
        ..LinkifierConfig::default()
    };
    let Ok(linkifier) = Linkifier::new(config) else {
        return;
    };

    let segments = linkifier.segments(&input.message);

    // Without escaping, segments cover the normalized text exactly
    if !input.escape_markup {
        let joined: String = segments.iter().map(Segment::text).collect();
        assert_eq!(joined, linkifier.normalize(&input.message));
    }

    let _ = linkifier.enhance(&input.message);
});
