use crate::clock::Clock;
use crate::config::NewsdeskConfig;
use crate::images::ImageResolver;
use crate::model::Post;
use crate::store::DataStore;

/// Id for a new post: the creation time in ms, bumped past the current
/// maximum when two posts land in the same millisecond.
pub fn next_id(posts: &[Post], now_millis: i64) -> i64 {
    match posts.iter().map(|p| p.id).max() {
        Some(max) if max >= now_millis => max + 1,
        _ => now_millis,
    }
}

/// A resolver over the current upload mapping.
pub fn image_resolver<S: DataStore, C: Clock>(
    store: &S,
    clock: &C,
    config: &NewsdeskConfig,
) -> ImageResolver {
    let resolver = ImageResolver::new(store.get_uploads(), config);
    if config.cache_bust {
        resolver.with_cache_bust(clock.now_millis())
    } else {
        resolver
    }
}

pub fn find_post<S: DataStore>(store: &S, id: i64) -> Option<Post> {
    store.get_posts().into_iter().find(|p| p.id == id)
}
