// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! testdeck library
//!
//! This module exports the CLI configuration and command handlers for use in
//! integration tests and by the `testdeck` binary.

pub mod commands;
pub mod config;
