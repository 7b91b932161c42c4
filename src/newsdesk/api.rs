//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for all newsdesk operations, whatever the UI.
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns session state**: the clock, the loaded configuration and the
//!   session-scoped `blob:` files
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no terminal I/O and no formatting beyond the
//! HTML the commands produce.
//!
//! ## Generic Over DataStore and Clock
//!
//! `NewsdeskApi<S: DataStore, C: Clock>`:
//! - Production: `NewsdeskApi<LocalStore<FsBackend>>` with the system clock
//! - Browser: `NewsdeskApi<LocalStore<WebBackend>>`
//! - Testing: `NewsdeskApi<InMemoryStore, FixedClock>`

use crate::clock::{Clock, SystemClock};
use crate::commands;
use crate::config::NewsdeskConfig;
use crate::error::{NewsdeskError, Result};
use crate::form::PostForm;
use crate::model::{Post, PostDraft};
use crate::render;
use crate::store::{DataStore, PostsListener};
use crate::upload::{FileBlob, SessionBlobs};

/// The main API facade for newsdesk operations.
pub struct NewsdeskApi<S: DataStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    config: NewsdeskConfig,
    paths: commands::NewsdeskPaths,
    blobs: SessionBlobs,
}

impl<S: DataStore> NewsdeskApi<S, SystemClock> {
    pub fn new(store: S, config: NewsdeskConfig, paths: commands::NewsdeskPaths) -> Self {
        Self::with_clock(store, SystemClock, config, paths)
    }
}

impl<S: DataStore, C: Clock> NewsdeskApi<S, C> {
    pub fn with_clock(
        store: S,
        clock: C,
        config: NewsdeskConfig,
        paths: commands::NewsdeskPaths,
    ) -> Self {
        Self {
            store,
            clock,
            config,
            paths,
            blobs: SessionBlobs::new(),
        }
    }

    pub fn list_posts(&self) -> Result<commands::CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn get_post(&self, id: i64) -> Option<Post> {
        commands::helpers::find_post(&self.store, id)
    }

    /// Submit the admin form: create, or update in place when editing.
    pub fn submit(&mut self, form: &mut PostForm) -> Result<commands::CmdResult> {
        commands::submit::run(
            &mut self.store,
            &self.clock,
            &self.config,
            &mut self.blobs,
            form,
        )
    }

    /// Create a post through a fresh form. A rejected image is reported and
    /// the post is created without it.
    pub fn create_post(
        &mut self,
        draft: PostDraft,
        image: Option<FileBlob>,
    ) -> Result<commands::CmdResult> {
        let mut form = PostForm::new();
        form.fill(draft);
        let rejection = self.select_image(&mut form, image);
        let mut result = self.submit(&mut form)?;
        if let Some(message) = rejection {
            result.messages.insert(0, message);
        }
        Ok(result)
    }

    /// A form pre-filled from post `id`, ready to edit.
    pub fn edit_form(&self, id: i64) -> Result<PostForm> {
        let post = self.get_post(id).ok_or(NewsdeskError::PostNotFound(id))?;
        let mut form = PostForm::new();
        form.load_for_edit(&post);
        Ok(form)
    }

    /// Apply `edit` to the fields of post `id` and submit the update.
    pub fn update_post<F>(
        &mut self,
        id: i64,
        image: Option<FileBlob>,
        edit: F,
    ) -> Result<commands::CmdResult>
    where
        F: FnOnce(&mut PostDraft),
    {
        let mut form = self.edit_form(id)?;
        edit(form.draft_mut());
        let rejection = self.select_image(&mut form, image);
        let mut result = self.submit(&mut form)?;
        if let Some(message) = rejection {
            result.messages.insert(0, message);
        }
        Ok(result)
    }

    fn select_image(
        &self,
        form: &mut PostForm,
        image: Option<FileBlob>,
    ) -> Option<commands::CmdMessage> {
        let blob = image?;
        match form.select_image(blob, self.config.max_image_bytes) {
            Some(pending) => {
                form.apply_preview(pending.complete());
                None
            }
            None => form.status().cloned(),
        }
    }

    pub fn delete_preview(&self, id: i64) -> Option<Post> {
        commands::delete::preview(&self.store, id)
    }

    pub fn delete_post(&mut self, id: i64) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    /// Featured and grid markup, seeding sample posts into an empty store.
    pub fn feed(&mut self) -> Result<commands::CmdResult> {
        commands::feed::run(&mut self.store, &self.clock, &self.config)
    }

    pub fn feed_page(&mut self) -> Result<String> {
        let result = self.feed()?;
        render::render_feed_page(&result.feed.unwrap_or_default())
    }

    pub fn article(&self, query: &str, page: bool) -> Result<commands::CmdResult> {
        commands::article::run(&self.store, &self.clock, &self.config, query, page)
    }

    pub fn resolve_image(&self, path: &str) -> Result<commands::CmdResult> {
        commands::resolve::run(&self.store, &self.clock, &self.config, path)
    }

    pub fn uploads(&self) -> Result<commands::CmdResult> {
        commands::uploads::run(&self.store)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    /// Register a view to refresh after every post save.
    pub fn subscribe(&mut self, listener: PostsListener) {
        self.store.subscribe(listener);
    }

    pub fn session_blobs(&self) -> &SessionBlobs {
        &self.blobs
    }

    pub fn settings(&self) -> &NewsdeskConfig {
        &self.config
    }

    pub fn paths(&self) -> &commands::NewsdeskPaths {
        &self.paths
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

pub use crate::commands::article::ArticleLookup;
pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, NewsdeskPaths};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::InMemoryStore;
    use std::path::PathBuf;

    fn api() -> NewsdeskApi<InMemoryStore, FixedClock> {
        NewsdeskApi::with_clock(
            InMemoryStore::new(),
            FixedClock::at_millis(1_772_668_800_000),
            NewsdeskConfig::default(),
            NewsdeskPaths {
                data_dir: PathBuf::from("/nonexistent"),
            },
        )
    }

    #[test]
    fn create_dispatches_to_submit() {
        let mut api = api();
        let result = api.create_post(PostDraft::new("Hello"), None).unwrap();
        assert_eq!(result.affected_posts.len(), 1);
        assert_eq!(api.list_posts().unwrap().listed_posts.len(), 1);
    }

    #[test]
    fn create_with_rejected_image_reports_it_first() {
        let mut api = api();
        let blob = FileBlob::new("a.txt", "text/plain", vec![1]);
        let result = api.create_post(PostDraft::new("Hello"), Some(blob)).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert_eq!(api.store().get_posts()[0].image, "");
    }

    #[test]
    fn update_edits_in_place() {
        let mut api = api();
        let id = api.create_post(PostDraft::new("Old"), None).unwrap().affected_posts[0].id;
        api.update_post(id, None, |d| d.title = "New".into()).unwrap();

        let posts = api.store().get_posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "New");
    }

    #[test]
    fn update_missing_is_not_found() {
        let mut api = api();
        let err = api.update_post(5, None, |_| {}).unwrap_err();
        assert!(matches!(err, NewsdeskError::PostNotFound(5)));
    }

    #[test]
    fn feed_page_seeds_and_renders() {
        let mut api = api();
        let page = api.feed_page().unwrap();
        assert!(page.contains("id=\"featured-story\""));
        assert_eq!(api.store().get_posts().len(), 2);
    }

    #[test]
    fn subscribers_see_saves() {
        use std::cell::Cell;
        use std::rc::Rc;

        let mut api = api();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        api.subscribe(Box::new(move |posts: &[Post]| sink.set(posts.len())));

        api.create_post(PostDraft::new("One"), None).unwrap();
        assert_eq!(count.get(), 1);
    }
}
