#![forbid(unsafe_code)]

//! `tint` command-line front end.
//!
//! Thin dispatch over `tint-scheme` and `tint-state`: argument parsing,
//! config loading, log setup and report formatting. All palette logic lives
//! in the library crates.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

pub use cli::{Cli, Commands, launch, run, run_to};
pub use error::{Result, TintError};
