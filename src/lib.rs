//! tsctl - checker and maintenance tool for Qt Linguist `.ts` catalogs
//!
//! tsctl reads translation sources written by `lupdate`, reports problems
//! such as unfinished or duplicated messages, prints completion statistics,
//! and rewrites catalogs in the canonical `lupdate` layout.
//!
//! ## Module Structure
//!
//! - `catalog`: In-memory model of a `.ts` file, with its reader and writer
//! - `cli`: Command-line interface layer (argument parsing, commands, report)
//! - `config`: Configuration file loading and parsing
//! - `issues`: Issue type definitions and reporting
//! - `rules`: Checks that turn a catalog into issues
//! - `scanner`: Discovery of `.ts` files on disk
//! - `workspace`: Loading of every catalog a command operates on
//! - `utils`: Shared utility functions

pub mod catalog;
pub mod cli;
pub mod config;
pub mod issues;
pub mod rules;
pub mod scanner;
pub mod utils;
pub mod workspace;
