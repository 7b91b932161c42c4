//! # Newsdesk Architecture
//!
//! Newsdesk is the engine of a small journalism blog: a public feed with one
//! featured story, an article page and an admin editor, all kept in a local
//! key-value store. It is a **UI-agnostic library** that happens to ship a
//! CLI client; the same core can run in a browser against `localStorage`.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints messages, writes HTML files     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the clock, config and session blobs                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + form, upload, images,      │
//! │  render                                                     │
//! │  - Business logic and HTML rendering                        │
//! │  - Returns `Result<CmdResult>`                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore over a raw StorageBackend                      │
//! │  - FsBackend (CLI), WebBackend (browser), MemBackend (test) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never prints, never exits and never prompts.
//! Delete confirmation is the caller's job: [`api::NewsdeskApi::delete_preview`]
//! returns the target, [`api::NewsdeskApi::delete_post`] removes it.
//!
//! Recoverable trouble is reported, not raised: a corrupt document reads as
//! empty, a rejected image becomes a status message, a failed upload falls
//! back to a session `blob:` reference, an unknown article renders a
//! not-found panel.
//!
//! ## Time
//!
//! Post ids, publish dates, upload names and cache-busting stamps all come
//! from a [`clock::Clock`], so tests run against a [`clock::FixedClock`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: One module per operation
//! - [`form`]: The admin form state machine
//! - [`upload`]: Image validation, data URLs and simulated uploads
//! - [`images`]: Image reference resolution and placeholders
//! - [`render`]: Feed, article and admin list HTML
//! - [`video`]: Embeddable player URLs
//! - [`store`]: Storage abstraction and backends
//! - [`model`]: `Post`, `PostDraft`, `UploadRecord`
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and store wiring for the CLI
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod form;
pub mod images;
pub mod init;
pub mod model;
pub mod render;
pub mod store;
pub mod upload;
pub mod video;
