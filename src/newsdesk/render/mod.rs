//! # Rendering
//!
//! Turns posts into HTML. Every function here returns markup as a `String`
//! and leaves mounting it to the caller: a browser host sets `innerHTML`,
//! the CLI writes files.
//!
//! The feed is rendered in two parts, matching the two containers of the
//! public page: the featured slot (`#featured-story`) and the grid
//! (`#story-grid`). Images in cards are lazy: the real URL sits in
//! `data-src` and the page script copies it to `src` once the element nears
//! the viewport. Every image carries its "Image Error" fallback URL in
//! `data-fallback` for the page's `onerror` hook.

use crate::error::Result;
use crate::images::{ImageResolver, Placeholder};
use crate::model::Post;
use crate::video;
use pulldown_cmark::{html, Options, Parser};
use serde::Serialize;

pub mod templates;

pub use templates::format_date;

const FEED_TITLE: &str = "Latest Stories";

/// Posts split into the featured slot and the regular grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedView {
    pub featured: Option<Post>,
    pub others: Vec<Post>,
}

/// Rendered markup for the two feed containers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedMarkup {
    pub featured: String,
    pub grid: String,
}

/// The first featured post takes the featured slot. Everything else,
/// including any later featured post, stays in the grid in stored order.
pub fn partition(posts: &[Post]) -> FeedView {
    let featured_at = posts.iter().position(|p| p.featured);
    let featured = featured_at.map(|i| posts[i].clone());
    let others = posts
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != featured_at)
        .map(|(_, p)| p.clone())
        .collect();
    FeedView { featured, others }
}

#[derive(Serialize)]
struct CardContext<'a> {
    post: &'a Post,
    image_url: String,
    fallback_url: String,
    link_label: &'static str,
}

fn render_card(post: &Post, featured: bool, images: &ImageResolver) -> Result<String> {
    let env = templates::environment()?;
    let ctx = CardContext {
        post,
        image_url: images.resolve_url(&post.image),
        fallback_url: images.placeholder(Placeholder::LoadError),
        link_label: if featured { "Read Full Story" } else { "Read More" },
    };
    Ok(env.get_template("card.html")?.render(&ctx)?)
}

#[derive(Serialize)]
struct GridContext {
    cards: Vec<String>,
}

pub fn render_feed(view: &FeedView, images: &ImageResolver) -> Result<FeedMarkup> {
    let featured = match &view.featured {
        Some(post) => render_card(post, true, images)?,
        None => String::new(),
    };

    let cards = view
        .others
        .iter()
        .map(|post| render_card(post, false, images))
        .collect::<Result<Vec<_>>>()?;
    let env = templates::environment()?;
    let grid = env
        .get_template("grid.html")?
        .render(&GridContext { cards })?;

    Ok(FeedMarkup { featured, grid })
}

#[derive(Serialize)]
struct FeedPageContext<'a> {
    title: &'a str,
    featured: &'a str,
    grid: &'a str,
}

/// A standalone page around the feed containers, with the image scripts.
pub fn render_feed_page(markup: &FeedMarkup) -> Result<String> {
    let env = templates::environment()?;
    let ctx = FeedPageContext {
        title: FEED_TITLE,
        featured: &markup.featured,
        grid: &markup.grid,
    };
    Ok(env.get_template("feed_page.html")?.render(&ctx)?)
}

#[derive(Serialize)]
struct ArticleContext<'a> {
    post: Option<&'a Post>,
    image_url: Option<String>,
    fallback_url: String,
    video_url: Option<String>,
}

/// Markup for the `#full-article` container, or the not-found panel.
pub fn render_article(post: Option<&Post>, images: &ImageResolver) -> Result<String> {
    let env = templates::environment()?;
    let ctx = ArticleContext {
        post,
        image_url: post
            .filter(|p| !p.image.trim().is_empty())
            .map(|p| images.resolve_url(&p.image)),
        fallback_url: images.placeholder(Placeholder::LoadError),
        video_url: post
            .filter(|p| !p.video.trim().is_empty())
            .map(|p| video::embed_url(&p.video)),
    };
    Ok(env.get_template("article.html")?.render(&ctx)?)
}

#[derive(Serialize)]
struct ArticlePageContext<'a> {
    title: &'a str,
    body: &'a str,
}

pub fn render_article_page(post: Option<&Post>, images: &ImageResolver) -> Result<String> {
    let body = render_article(post, images)?;
    let env = templates::environment()?;
    let ctx = ArticlePageContext {
        title: post.map_or("Article Not Found", |p| p.title.as_str()),
        body: &body,
    };
    Ok(env.get_template("article_page.html")?.render(&ctx)?)
}

#[derive(Serialize)]
struct AdminListContext<'a> {
    posts: &'a [Post],
}

/// Items for the admin `#post-list`, each with Edit/Delete buttons keyed by id.
pub fn render_admin_list(posts: &[Post]) -> Result<String> {
    let env = templates::environment()?;
    Ok(env
        .get_template("admin_list.html")?
        .render(&AdminListContext { posts })?)
}

/// Render submitted content to HTML. Markdown is converted; HTML passes
/// through as-is.
pub fn format_content(raw: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(raw, options);
    let mut out = String::with_capacity(raw.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out.trim_end().to_string()
}
