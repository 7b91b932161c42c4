//! # CLI Layer
//!
//! One possible UI client for newsdesk. This is the only place that knows
//! about stdout, stderr, prompts and exit codes.
//!
//! - `setup`: argument parsing via clap
//! - `commands`: `run()` plus one handler per command; handlers call the API
//!   and print the `CmdResult`
//! - `print`: colored messages and list formatting

mod commands;
mod print;
pub mod setup;

pub use commands::run;
