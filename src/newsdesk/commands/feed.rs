use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::NewsdeskConfig;
use crate::error::Result;
use crate::model::{Post, PostDraft};
use crate::render;
use crate::store::DataStore;
use chrono::NaiveDate;

use super::helpers::image_resolver;

/// The two posts a first-time visitor sees. Seeded once, when the store is
/// empty.
pub fn sample_posts(today: NaiveDate) -> Vec<Post> {
    vec![
        Post::from_draft(
            1,
            today,
            PostDraft::new("Investigating Urban Development")
                .with_summary("A deep dive into city planning challenges")
                .with_content(
                    "<p>This article explores the complex issues surrounding urban development in growing cities.</p>",
                )
                .with_image("https://via.placeholder.com/800x400?text=Urban+Development")
                .featured(true),
        ),
        Post::from_draft(
            2,
            today,
            PostDraft::new("Women in Tech: Breaking Barriers")
                .with_summary("How women are transforming the technology sector")
                .with_content(
                    "<p>An examination of the challenges and successes of women in technology fields.</p>",
                )
                .with_image("https://via.placeholder.com/800x400?text=Women+in+Tech"),
        ),
    ]
}

/// The stored posts, seeding the samples first if there are none.
/// Returns the posts and whether seeding happened.
pub fn ensure_seeded<S: DataStore, C: Clock>(store: &mut S, clock: &C) -> Result<(Vec<Post>, bool)> {
    let posts = store.get_posts();
    if !posts.is_empty() {
        return Ok((posts, false));
    }

    let samples = sample_posts(clock.today());
    store.save_posts(&samples)?;
    log::debug!("seeded {} sample posts", samples.len());
    Ok((samples, true))
}

/// Render the public feed: featured slot and grid.
pub fn run<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    config: &NewsdeskConfig,
) -> Result<CmdResult> {
    let (posts, seeded) = ensure_seeded(store, clock)?;
    let view = render::partition(&posts);
    let images = image_resolver(store, clock, config);
    let markup = render::render_feed(&view, &images)?;

    let mut result = CmdResult::default();
    if seeded {
        result.add_message(CmdMessage::info(format!(
            "No posts found; added {} sample posts.",
            posts.len()
        )));
        result.affected_posts = posts.clone();
    }
    result.listed_posts = view.featured.into_iter().chain(view.others).collect();
    result.feed = Some(markup);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::backend::StorageBackend;
    use crate::store::local_store::fixtures::StoreFixture;
    use crate::store::InMemoryStore;

    #[test]
    fn empty_store_seeds_exactly_two_posts_one_featured() {
        let mut store = InMemoryStore::new();
        let clock = FixedClock::at_millis(1_772_668_800_000);
        let result = run(&mut store, &clock, &NewsdeskConfig::default()).unwrap();

        let stored = store.get_posts();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored.iter().filter(|p| p.featured).count(), 1);
        assert!(stored.iter().all(|p| p.published_on() == Some(clock.today())));
        assert_eq!(result.affected_posts.len(), 2);

        let markup = result.feed.unwrap();
        assert!(markup.featured.contains("Investigating Urban Development"));
        assert!(markup.grid.contains("Women in Tech: Breaking Barriers"));
    }

    #[test]
    fn seeding_happens_once() {
        let mut store = InMemoryStore::new();
        let clock = FixedClock::at_millis(0);
        ensure_seeded(&mut store, &clock).unwrap();
        let (_, seeded) = ensure_seeded(&mut store, &clock).unwrap();
        assert!(!seeded);
        assert_eq!(store.get_posts().len(), 2);
    }

    #[test]
    fn existing_posts_are_not_replaced() {
        let mut store = StoreFixture::new().with_post(10, "Mine", false).store;
        let clock = FixedClock::at_millis(0);
        let result = run(&mut store, &clock, &NewsdeskConfig::default()).unwrap();

        assert!(result.affected_posts.is_empty());
        assert_eq!(store.get_posts().len(), 1);
        let markup = result.feed.unwrap();
        assert!(markup.featured.is_empty());
        assert!(markup.grid.contains("Mine"));
    }

    #[test]
    fn sparse_stored_posts_are_not_seeded_over() {
        let mut store = InMemoryStore::new();
        let raw = r#"[
            {"id":1,"title":"Council Budget","summary":"S","content":"C","date":"2026-03-05"},
            {"id":2,"title":"Harbor Report","content":"C","date":"March 6th"}
        ]"#;
        store.backend().set_item(store.posts_key(), raw).unwrap();
        let clock = FixedClock::at_millis(0);

        let result = run(&mut store, &clock, &NewsdeskConfig::default()).unwrap();

        assert!(result.affected_posts.is_empty());
        let titles: Vec<String> = store.get_posts().into_iter().map(|p| p.title).collect();
        assert_eq!(
            titles,
            vec!["Council Budget".to_string(), "Harbor Report".to_string()]
        );
        assert!(result.feed.unwrap().grid.contains("March 6th"));
    }
}
