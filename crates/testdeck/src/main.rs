// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! testdeck: browse a `jest --json` test report from the terminal
//!
//! This binary reads a report from a file or stdin and prints a summary,
//! a filtered listing, a status overview, or the derived views as JSON.

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use testdeck::commands::{execute, load_report};
use testdeck::config::Config;
use testdeck_report::SystemClipboard;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr, stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(io::stderr)
        .init();

    config.validate()?;

    let source = config.report_source();
    debug!(source = %source, command = ?config.effective_command(), "Starting testdeck");
    let report =
        load_report(&source).with_context(|| format!("Could not read report from {source}"))?;

    let mut clipboard = SystemClipboard::new();
    let mut out = io::stdout().lock();
    execute(&config, &report, &mut clipboard, &mut out)?;
    out.flush()?;

    Ok(())
}
