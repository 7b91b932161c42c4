use super::backend::StorageBackend;
use super::mem_backend::MemBackend;
use super::{DataStore, PostsListener, UploadMap};
use crate::config::{NewsdeskConfig, DEFAULT_POSTS_KEY, DEFAULT_UPLOADS_KEY};
use crate::error::{NewsdeskError, Result};
use crate::model::Post;
use serde::de::DeserializeOwned;

/// The blog's documents over any [`StorageBackend`].
pub struct LocalStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
    posts_key: String,
    uploads_key: String,
    listeners: Vec<PostsListener>,
}

/// The store used by tests and examples.
pub type InMemoryStore = LocalStore<MemBackend>;

impl LocalStore<MemBackend> {
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }
}

impl Default for LocalStore<MemBackend> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: StorageBackend> LocalStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            posts_key: DEFAULT_POSTS_KEY.to_string(),
            uploads_key: DEFAULT_UPLOADS_KEY.to_string(),
            listeners: Vec::new(),
        }
    }

    pub fn from_config(backend: B, config: &NewsdeskConfig) -> Self {
        Self::with_backend(backend).with_keys(&config.posts_key, &config.uploads_key)
    }

    pub fn with_keys(mut self, posts_key: &str, uploads_key: &str) -> Self {
        self.posts_key = posts_key.to_string();
        self.uploads_key = uploads_key.to_string();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn posts_key(&self) -> &str {
        &self.posts_key
    }

    pub fn uploads_key(&self) -> &str {
        &self.uploads_key
    }

    fn read_document<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let raw = match self.backend.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return T::default(),
            Err(e) => {
                log::warn!("could not read '{}', treating as empty: {}", key, e);
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("discarding corrupt document under '{}': {}", key, e);
                T::default()
            }
        }
    }

    fn write_document<T: serde::Serialize + ?Sized>(&self, key: &str, doc: &T) -> Result<()> {
        let json = serde_json::to_string(doc).map_err(NewsdeskError::Serialization)?;
        self.backend.set_item(key, &json)
    }
}

impl<B: StorageBackend> DataStore for LocalStore<B> {
    fn get_posts(&self) -> Vec<Post> {
        let records: Vec<serde_json::Value> = self.read_document(&self.posts_key);
        let posts: Vec<Post> = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value(record) {
                Ok(post) => Some(post),
                Err(e) => {
                    log::warn!("skipping unreadable post in '{}': {}", self.posts_key, e);
                    None
                }
            })
            .collect();
        log::debug!("loaded {} posts from '{}'", posts.len(), self.posts_key);
        posts
    }

    fn save_posts(&mut self, posts: &[Post]) -> Result<()> {
        self.write_document(&self.posts_key, posts)?;
        log::debug!("saved {} posts to '{}'", posts.len(), self.posts_key);
        for listener in &self.listeners {
            listener(posts);
        }
        Ok(())
    }

    fn get_uploads(&self) -> UploadMap {
        self.read_document(&self.uploads_key)
    }

    fn save_uploads(&mut self, uploads: &UploadMap) -> Result<()> {
        self.write_document(&self.uploads_key, uploads)
    }

    fn subscribe(&mut self, listener: PostsListener) {
        self.listeners.push(listener);
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::PostDraft;
    use chrono::NaiveDate;

    pub fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 5).unwrap()
    }

    pub fn post(id: i64, title: &str, featured: bool) -> Post {
        Post::from_draft(
            id,
            sample_date(),
            PostDraft::new(title)
                .with_summary(format!("Summary of {}", title))
                .with_content(format!("<p>{}</p>", title))
                .featured(featured),
        )
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_posts(mut self, posts: &[Post]) -> Self {
            let mut all = self.store.get_posts();
            all.extend_from_slice(posts);
            self.store.save_posts(&all).unwrap();
            self
        }

        pub fn with_post(self, id: i64, title: &str, featured: bool) -> Self {
            self.with_posts(&[post(id, title, featured)])
        }
    }
}
