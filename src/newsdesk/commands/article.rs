use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::NewsdeskConfig;
use crate::error::Result;
use crate::model::Post;
use crate::render;
use crate::store::DataStore;

use super::helpers::{find_post, image_resolver};

/// Outcome of looking an article up by its query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArticleLookup {
    Found(Post),
    /// No post matched; `id` is `None` when the query had no usable id.
    NotFound { id: Option<i64> },
}

impl ArticleLookup {
    pub fn post(&self) -> Option<&Post> {
        match self {
            ArticleLookup::Found(post) => Some(post),
            ArticleLookup::NotFound { .. } => None,
        }
    }
}

/// The integer `id` parameter of a query string such as `?id=42&ref=home`.
pub fn parse_article_id(query: &str) -> Option<i64> {
    query
        .trim()
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("id="))
        .and_then(|value| value.trim().parse().ok())
}

pub fn find<S: DataStore>(store: &S, query: &str) -> ArticleLookup {
    match parse_article_id(query) {
        Some(id) => match find_post(store, id) {
            Some(post) => ArticleLookup::Found(post),
            None => ArticleLookup::NotFound { id: Some(id) },
        },
        None => ArticleLookup::NotFound { id: None },
    }
}

/// Look up and render an article. A miss renders the not-found panel and is
/// not an error. `page` wraps the markup in a standalone document.
pub fn run<S: DataStore, C: Clock>(
    store: &S,
    clock: &C,
    config: &NewsdeskConfig,
    query: &str,
    page: bool,
) -> Result<CmdResult> {
    let lookup = find(store, query);
    let images = image_resolver(store, clock, config);
    let html = if page {
        render::render_article_page(lookup.post(), &images)?
    } else {
        render::render_article(lookup.post(), &images)?
    };

    let mut result = CmdResult::default().with_html(html);
    match lookup {
        ArticleLookup::Found(post) => result.listed_posts.push(post),
        ArticleLookup::NotFound { id: Some(id) } => {
            result.add_message(CmdMessage::warning(format!("Article {} not found", id)))
        }
        ArticleLookup::NotFound { id: None } => {
            result.add_message(CmdMessage::warning("No article id given"))
        }
    }
    Ok(result)
}
