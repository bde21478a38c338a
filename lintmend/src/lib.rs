//! Core library for the lintmend remediation tool.
//!
//! lintmend reads a static analyzer's text report for one Python file and
//! applies the mechanical fixes it knows: stripping trailing whitespace,
//! adding a missing final newline, and replacing `from pkg.mod import *`
//! with a qualified import. Every other finding is reported as an advisory.

#![allow(clippy::similar_names, clippy::items_after_statements)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the in-memory, line-indexed source buffer.
pub mod buffer;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module for parsing analyzer reports into diagnostics.
pub mod diagnostics;

/// Module defining the entry point logic shared by the binaries.
pub mod entry_point;

/// Module containing the fixers: dispatcher, wildcard-import resolver and
/// the line rewriter they share.
pub mod fix;

/// Module for colored text and table output.
pub mod output;

/// Module containing path helpers.
pub mod utils;
