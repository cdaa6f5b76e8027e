// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Clipboard output for test selectors
//!
//! Copying is best effort. [`copy_payload`] logs a failed write and still
//! returns the payload, so nothing downstream depends on a clipboard existing.

use std::fmt;

use tracing::{debug, warn};

use crate::error::ClipboardError;
use crate::identifier::clipboard_payload;
use crate::result::TestResultRecord;

/// Something text can be copied to
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    ///
    /// # Errors
    ///
    /// Returns a `ClipboardError` if the backend is missing or the write fails.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The desktop clipboard
///
/// The backend connection is opened on the first write and kept for the
/// lifetime of the handle.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Create a handle to the system clipboard without connecting to it
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a backend connection has been opened
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.inner.is_some()
    }

    fn backend(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new().map_err(backend_error)?;
            debug!("Connected to system clipboard");
            self.inner = Some(clipboard);
        }
        self.inner.as_mut().ok_or(ClipboardError::NoBackend)
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("connected", &self.is_connected())
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.backend()?.set_text(text).map_err(backend_error)?;
        debug!(bytes = text.len(), "Copied to clipboard");
        Ok(())
    }
}

/// Map a backend error, singling out platforms without any clipboard
fn backend_error(error: arboard::Error) -> ClipboardError {
    match error {
        arboard::Error::ClipboardNotSupported => ClipboardError::NoBackend,
        other => ClipboardError::Backend(other),
    }
}

/// An in-process clipboard that remembers what was written
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    /// Create an empty clipboard
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// How many writes happened
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// Copy the shell-safe selector for `record` and return it
///
/// A clipboard failure is logged and otherwise ignored.
pub fn copy_payload<C>(record: &TestResultRecord, clipboard: &mut C) -> String
where
    C: Clipboard + ?Sized,
{
    let payload = clipboard_payload(record);
    if let Err(e) = clipboard.write_text(&payload) {
        warn!(error = %e, test = %record.title, "Failed to copy test name to clipboard");
    }
    payload
}
