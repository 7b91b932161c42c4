//! # Storage Layer
//!
//! This module defines the storage abstraction for newsdesk. The [`DataStore`]
//! trait is the repository the command layer talks to; it is injected into
//! [`crate::api::NewsdeskApi`] rather than reached through global state.
//!
//! ## Two Layers
//!
//! 1. [`backend::StorageBackend`]: raw string key-value I/O, the shape of the
//!    browser's `localStorage`.
//! 2. [`local_store::LocalStore`]: the two JSON documents that make up the
//!    blog, read and written whole under fixed keys.
//!
//! ## Documents
//!
//! ```text
//! <posts_key>    → [Post, Post, ...]              (JSON array, insertion order)
//! <uploads_key>  → { "img_<ts>.png": UploadRecord } (JSON object keyed by name)
//! ```
//!
//! Every lifecycle operation is read-modify-write over a whole document.
//! There is no transaction across the read and the write; two writers can
//! lose each other's updates.
//!
//! ## Recovery Policy
//!
//! Reads never fail. An absent key, an unreadable backend or a document
//! that does not parse all yield an empty collection, with a warning logged
//! for the last two.
//!
//! ## Change Notification
//!
//! Views that need to refresh after a save register a listener with
//! [`DataStore::subscribe`]. Writers never know which views exist.
//!
//! ## Implementations
//!
//! - [`mem_backend::MemBackend`]: in-memory, with quota and failure
//!   simulation for tests.
//! - [`fs_backend::FsBackend`]: one JSON file per key, atomic writes, byte
//!   quota.
//! - `web_backend::WebBackend` (feature `web`): `window.localStorage`.

use crate::error::Result;
use crate::model::{Post, UploadRecord};
use std::collections::BTreeMap;

pub mod backend;
pub mod fs_backend;
pub mod local_store;
pub mod mem_backend;
#[cfg(feature = "web")]
pub mod web_backend;

pub use local_store::{InMemoryStore, LocalStore};

/// Upload records keyed by generated file name.
pub type UploadMap = BTreeMap<String, UploadRecord>;

/// Called with the full collection after every successful post save.
pub type PostsListener = Box<dyn Fn(&[Post])>;

/// Abstract interface for the blog's persisted state.
pub trait DataStore {
    /// All posts in insertion order; empty when absent or corrupt.
    fn get_posts(&self) -> Vec<Post>;

    /// Replace the whole post collection, then notify listeners.
    fn save_posts(&mut self, posts: &[Post]) -> Result<()>;

    /// All upload records; empty when absent or corrupt.
    fn get_uploads(&self) -> UploadMap;

    /// Replace the whole upload mapping.
    fn save_uploads(&mut self, uploads: &UploadMap) -> Result<()>;

    /// Register a listener for post saves.
    fn subscribe(&mut self, listener: PostsListener);
}
