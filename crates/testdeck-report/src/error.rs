// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Error types for testdeck-report

use thiserror::Error;

/// Errors that can occur while loading a test report
#[derive(Debug, Error)]
pub enum ReportError {
    /// Error parsing JSON, including missing required fields
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Error reading the report
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The report parsed but violates its declared shape
    #[error("Invalid test report: {message}")]
    InvalidFormat {
        /// Description of the format error
        message: String,
    },
}

/// Errors raised by a clipboard backend
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The platform has no clipboard to write to
    #[error("no clipboard backend available")]
    NoBackend,

    /// The clipboard backend rejected the write
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Errors raised while building a linkifier
#[derive(Debug, Error)]
pub enum LinkifyError {
    /// The project root directory name was empty
    #[error("project root name must not be empty")]
    EmptyProjectRoot,

    /// The source URL template has nowhere to put the path
    #[error("source URL template '{0}' has no {{path}} placeholder")]
    MissingPathPlaceholder(String),

    /// A pattern built from the configuration did not compile
    #[error("invalid linkifier pattern: {0}")]
    Pattern(#[from] regex::Error),
}
