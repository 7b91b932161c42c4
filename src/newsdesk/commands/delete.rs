use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Post;
use crate::store::DataStore;

use super::helpers::find_post;

/// The post a delete would remove, for the confirmation prompt.
pub fn preview<S: DataStore>(store: &S, id: i64) -> Option<Post> {
    find_post(store, id)
}

/// Remove post `id`. A missing id leaves the collection untouched.
pub fn run<S: DataStore>(store: &mut S, id: i64) -> Result<CmdResult> {
    let mut posts = store.get_posts();
    let Some(position) = posts.iter().position(|p| p.id == id) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!(
            "No post with id {}. Nothing deleted.",
            id
        )));
        return Ok(result);
    };

    let removed = posts.remove(position);
    store.save_posts(&posts)?;
    log::debug!("deleted post {} ({} left)", id, posts.len());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Post deleted: {}",
        removed.title
    )));
    result.affected_posts.push(removed);
    Ok(result)
}
