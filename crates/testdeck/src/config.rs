// Copyright (c) 2026 - present testdeck contributors
// SPDX-License-Identifier: MIT

//! Configuration for the testdeck command line
//!
//! This module provides the clap parser for global options and subcommands,
//! plus the derived settings (log level, report source, linkifier config).

use std::fmt;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use testdeck_report::linkify::{DEFAULT_PROJECT_ROOT, DEFAULT_SOURCE_DIR, DEFAULT_SOURCE_URL};
use testdeck_report::{LinkifierConfig, Linkifier, LinkifyError, Query};

/// testdeck - browse a `jest --json` test report from the terminal
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "testdeck")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Subcommand to run (defaults to `summary`)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the report produced by `jest --json`
    ///
    /// Use `-` or omit the option to read the report from stdin.
    #[arg(short, long, env = "TESTDECK_REPORT", global = true)]
    pub report: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so command output stays clean.
    #[arg(short, long, default_value = "false", global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false", global = true)]
    pub quiet: bool,

    /// Checkout directory name that stack trace paths are normalized on
    #[arg(long, env = "TESTDECK_PROJECT_ROOT", global = true)]
    pub project_root: Option<String>,

    /// Directory under the project root whose files get source links
    #[arg(long, global = true)]
    pub source_dir: Option<String>,

    /// Source browser URL template with `{path}` and `{line}` placeholders
    #[arg(long, env = "TESTDECK_SOURCE_URL", global = true)]
    pub source_url: Option<String>,

    /// HTML-escape failure messages before adding links
    #[arg(long, default_value = "false", global = true)]
    pub escape_messages: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print run totals and the start time
    Summary,

    /// Print the grouped listing of tests matching a query
    ///
    /// Example:
    ///   npx jest --json | testdeck list --failures-only --details
    List {
        #[command(flatten)]
        query: QueryArgs,

        /// Print linkified failure messages under non-passing tests
        #[arg(long)]
        details: bool,
    },

    /// Print one line per test with its status, anchor and breadcrumb
    Overview,

    /// Print the derived views as JSON
    Export {
        #[command(flatten)]
        query: QueryArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Copy the shell-safe selector of a test to the clipboard
    Copy {
        /// Anchor of the test, as printed by `overview` or `list`
        anchor: String,

        /// Only print the selector, do not touch the clipboard
        #[arg(long)]
        print_only: bool,
    },
}

/// Listing filters shared by `list` and `export`
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Case-insensitive text matched against titles and describe blocks
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Hide passing tests
    #[arg(long)]
    pub failures_only: bool,
}

impl QueryArgs {
    /// Build the filter query these arguments describe
    #[must_use]
    pub fn to_query(&self) -> Query {
        Query::new(!self.failures_only, self.search.as_str())
    }
}

/// Where the report is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => write!(f, "stdin"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Config {
    /// The subcommand to run, `summary` when none was given
    #[must_use]
    pub fn effective_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Summary)
    }

    /// Get the report source, reading stdin for `-` or no path
    #[must_use]
    pub fn report_source(&self) -> ReportSource {
        match &self.report {
            Some(path) if path.as_os_str() != "-" => ReportSource::File(path.clone()),
            _ => ReportSource::Stdin,
        }
    }

    /// Get the linkifier settings, using defaults for anything not given
    #[must_use]
    pub fn linkifier_config(&self) -> LinkifierConfig {
        LinkifierConfig {
            project_root: self
                .project_root
                .clone()
                .unwrap_or_else(|| DEFAULT_PROJECT_ROOT.to_string()),
            source_dir: self
                .source_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_DIR.to_string()),
            source_url: self
                .source_url
                .clone()
                .unwrap_or_else(|| DEFAULT_SOURCE_URL.to_string()),
            escape_markup: self.escape_messages,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The report path is given but doesn't exist or is not a file
    /// - The source link settings are rejected by `Linkifier::new`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let ReportSource::File(path) = self.report_source() {
            if !path.exists() {
                return Err(ConfigError::ReportNotFound(path));
            }
            if !path.is_file() {
                return Err(ConfigError::ReportNotFile(path));
            }
        }

        Linkifier::new(self.linkifier_config())?;

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Report path not found
    #[error("Report file not found: {0}")]
    ReportNotFound(PathBuf),

    /// Report path is not a regular file
    #[error("Report path is not a file: {0}")]
    ReportNotFile(PathBuf),

    /// Source link settings are unusable
    #[error("Invalid source link settings: {0}")]
    Linkify(#[from] LinkifyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.command.is_none());
        assert!(config.report.is_none());
        assert!(!config.verbose);
        assert!(!config.quiet);
        assert!(!config.escape_messages);
        assert_eq!(config.effective_command(), Command::Summary);
    }

    #[test]
    fn test_report_source_default_is_stdin() {
        assert_eq!(Config::default().report_source(), ReportSource::Stdin);
    }

    #[test]
    fn test_report_source_dash_is_stdin() {
        let config = Config {
            report: Some(PathBuf::from("-")),
            ..Default::default()
        };
        assert_eq!(config.report_source(), ReportSource::Stdin);
    }

    #[test]
    fn test_report_source_file() {
        let config = Config {
            report: Some(PathBuf::from("out/report.json")),
            ..Default::default()
        };
        assert_eq!(
            config.report_source(),
            ReportSource::File(PathBuf::from("out/report.json"))
        );
        assert_eq!(config.report_source().to_string(), "out/report.json");
    }

    #[test]
    fn test_linkifier_config_defaults() {
        assert_eq!(
            Config::default().linkifier_config(),
            LinkifierConfig::default()
        );
    }

    #[test]
    fn test_linkifier_config_overrides() {
        let config = Config {
            project_root: Some("app".to_string()),
            source_dir: Some("src".to_string()),
            source_url: Some("https://example.com/{path}?l={line}".to_string()),
            escape_messages: true,
            ..Default::default()
        };
        let linkifier = config.linkifier_config();
        assert_eq!(linkifier.project_root, "app");
        assert_eq!(linkifier.source_dir, "src");
        assert_eq!(linkifier.source_url, "https://example.com/{path}?l={line}");
        assert!(linkifier.escape_markup);
    }

    #[test]
    fn test_query_args_to_query() {
        let args = QueryArgs {
            search: "Install".to_string(),
            failures_only: true,
        };
        assert_eq!(args.to_query(), Query::new(false, "Install"));
        assert_eq!(QueryArgs::default().to_query(), Query::default());
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_nonexistent_report() {
        let config = Config {
            report: Some(PathBuf::from("/nonexistent/path/12345/report.json")),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::ReportNotFound(_))));
    }

    #[test]
    fn test_validate_directory_report() {
        let config = Config {
            report: Some(std::env::temp_dir()),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::ReportNotFile(_))));
    }

    #[test]
    fn test_validate_source_url_without_path() {
        let config = Config {
            source_url: Some("https://example.com/".to_string()),
            ..Default::default()
        };
        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Linkify(LinkifyError::MissingPathPlaceholder(_)))
        ));
    }

    #[test]
    fn test_validate_empty_project_root() {
        let config = Config {
            project_root: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Linkify(LinkifyError::EmptyProjectRoot))
        ));
    }

    #[test]
    fn test_validate_stdin_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
