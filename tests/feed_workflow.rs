use newsdesk::api::{MessageLevel, NewsdeskApi, NewsdeskPaths};
use newsdesk::clock::FixedClock;
use newsdesk::config::{NewsdeskConfig, DEFAULT_UPLOADS_KEY};
use newsdesk::form::{PostForm, UPDATE_LABEL};
use newsdesk::images::{ResolutionKind, BLOB_PREFIX};
use newsdesk::model::PostDraft;
use newsdesk::store::{DataStore, InMemoryStore};
use newsdesk::upload::FileBlob;
use std::path::PathBuf;

const NOW: i64 = 1_772_668_800_000;

fn api() -> NewsdeskApi<InMemoryStore, FixedClock> {
    NewsdeskApi::with_clock(
        InMemoryStore::new(),
        FixedClock::at_millis(NOW),
        NewsdeskConfig::default(),
        NewsdeskPaths {
            data_dir: PathBuf::from("/nonexistent"),
        },
    )
}

fn png(bytes: usize) -> FileBlob {
    FileBlob::new("photo.png", "image/png", vec![0x89; bytes])
}

#[test]
fn featured_post_fills_the_slot_and_the_rest_fill_the_grid() {
    let mut api = api();
    api.create_post(PostDraft::new("Alpha Story").featured(true), None)
        .unwrap();
    api.create_post(PostDraft::new("Beta Story"), None).unwrap();

    let feed = api.feed().unwrap().feed.unwrap();

    assert!(feed.featured.contains("Alpha Story"));
    assert!(feed.featured.contains("Read Full Story"));
    assert!(!feed.featured.contains("Beta Story"));
    assert!(feed.grid.contains("Beta Story"));
    assert!(!feed.grid.contains("Alpha Story"));
    assert_eq!(feed.grid.matches("class=\"story-card\"").count(), 1);
}

#[test]
fn without_a_featured_post_every_post_goes_to_the_grid() {
    let mut api = api();
    api.create_post(PostDraft::new("One"), None).unwrap();
    api.create_post(PostDraft::new("Two"), None).unwrap();

    let feed = api.feed().unwrap().feed.unwrap();

    assert!(feed.featured.trim().is_empty());
    assert_eq!(feed.grid.matches("class=\"story-card\"").count(), 2);
}

#[test]
fn first_visit_seeds_sample_posts_once() {
    let mut api = api();

    let first = api.feed().unwrap();
    assert_eq!(first.affected_posts.len(), 2);
    assert!(first.has_level(MessageLevel::Info));

    let second = api.feed().unwrap();
    assert!(second.affected_posts.is_empty());
    assert_eq!(api.store().get_posts().len(), 2);
}

#[test]
fn deleting_everything_reseeds_on_next_visit() {
    let mut api = api();
    let id = api
        .create_post(PostDraft::new("Only"), None)
        .unwrap()
        .affected_posts[0]
        .id;
    api.delete_post(id).unwrap();
    assert!(api.store().get_posts().is_empty());

    api.feed().unwrap();
    let titles: Vec<String> = api.store().get_posts().into_iter().map(|p| p.title).collect();
    assert_eq!(
        titles,
        vec![
            "Investigating Urban Development".to_string(),
            "Women in Tech: Breaking Barriers".to_string()
        ]
    );
}

#[test]
fn article_lookup_hits_and_misses() {
    let mut api = api();
    let id = api
        .create_post(
            PostDraft::new("Council Votes").with_content("The *vote* passed."),
            None,
        )
        .unwrap()
        .affected_posts[0]
        .id;

    let hit = api.article(&format!("?id={}", id), false).unwrap();
    let html = hit.html.unwrap();
    assert!(html.contains("Council Votes"));
    assert!(html.contains("<em>vote</em>"));
    assert_eq!(hit.listed_posts[0].id, id);

    let miss = api.article("id=999", false).unwrap();
    assert!(miss.html.as_deref().unwrap().contains("Article Not Found"));
    assert!(miss.has_level(MessageLevel::Warning));
    assert!(miss.listed_posts.is_empty());
}

#[test]
fn deleting_a_missing_id_changes_nothing() {
    let mut api = api();
    api.create_post(PostDraft::new("Keep"), None).unwrap();
    let before = api.store().get_posts();

    let result = api.delete_post(42).unwrap();

    assert!(result.affected_posts.is_empty());
    assert_eq!(api.store().get_posts(), before);
}

#[test]
fn editing_replaces_in_place_and_keeps_id_and_date() {
    let mut api = api();
    api.create_post(PostDraft::new("First"), None).unwrap();
    let target = api
        .create_post(PostDraft::new("Second"), None)
        .unwrap()
        .affected_posts[0]
        .clone();

    let mut form = api.edit_form(target.id).unwrap();
    assert_eq!(form.submit_label(), UPDATE_LABEL);
    form.draft_mut().title = "Second, revised".into();
    form.draft_mut().featured = true;
    api.submit(&mut form).unwrap();

    let posts = api.store().get_posts();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[1].id, target.id);
    assert_eq!(posts[1].date, target.date);
    assert_eq!(posts[1].title, "Second, revised");
    assert!(posts[1].featured);
    assert_eq!(form.editing_id(), None);
}

#[test]
fn uploaded_image_resolves_to_its_data_url() {
    let mut api = api();
    let blob = png(16);
    let data_url = blob.to_data_url();

    let result = api
        .create_post(PostDraft::new("With Photo"), Some(blob))
        .unwrap();
    assert_eq!(result.messages[0].content, "Image uploaded successfully!");

    let image = api.store().get_posts()[0].image.clone();
    assert_eq!(image, format!("uploads/img_{}.png", NOW));

    let resolved = api.resolve_image(&image).unwrap().resolution.unwrap();
    assert_eq!(resolved.kind, ResolutionKind::Upload);
    assert_eq!(resolved.url, data_url);

    let uploads = api.uploads().unwrap().uploads;
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].path, image);
}

#[test]
fn failed_upload_falls_back_to_a_session_blob() {
    let mut api = api();
    api.store().backend().fail_writes_for(DEFAULT_UPLOADS_KEY);

    let result = api
        .create_post(PostDraft::new("Offline Photo"), Some(png(16)))
        .unwrap();

    assert!(result.has_level(MessageLevel::Warning));
    let image = api.store().get_posts()[0].image.clone();
    assert!(image.starts_with(BLOB_PREFIX));
    assert_eq!(api.session_blobs().len(), 1);

    let resolved = api.resolve_image(&image).unwrap().resolution.unwrap();
    assert_eq!(resolved.kind, ResolutionKind::SessionBlob);
    assert_eq!(resolved.url, image);
}

#[test]
fn rejected_image_still_publishes_the_post() {
    let mut api = api();
    let too_big = FileBlob::new("huge.jpg", "image/jpeg", vec![0; 3 * 1024 * 1024]);

    let result = api
        .create_post(PostDraft::new("Text Only"), Some(too_big))
        .unwrap();

    assert_eq!(result.messages[0].level, MessageLevel::Error);
    assert_eq!(result.messages[0].content, "Image too large (max 2MB)");
    assert!(api.store().get_uploads().is_empty());
    assert_eq!(api.store().get_posts()[0].image, "");
}

#[test]
fn blank_title_is_refused_and_the_form_keeps_its_fields() {
    let mut api = api();
    let mut form = PostForm::new();
    form.fill(PostDraft::new("   ").with_summary("kept"));

    assert!(api.submit(&mut form).is_err());
    assert_eq!(form.draft().summary, "kept");
    assert!(api.store().get_posts().is_empty());
}

#[test]
fn admin_list_shows_every_post() {
    let mut api = api();
    let empty = api.list_posts().unwrap();
    assert!(empty.html.unwrap().contains("No posts yet"));

    api.create_post(PostDraft::new("Listed").featured(true), None)
        .unwrap();
    let listed = api.list_posts().unwrap();
    let html = listed.html.unwrap();
    assert!(html.contains("Listed"));
    assert!(html.contains("Featured"));
    assert_eq!(listed.listed_posts.len(), 1);
}
