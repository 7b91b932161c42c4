use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NewsdeskError, Result};
use crate::model::{Post, PostDraft};
use crate::store::DataStore;

use super::helpers::next_id;

/// Append a new post dated today.
pub fn run<S: DataStore, C: Clock>(store: &mut S, clock: &C, draft: PostDraft) -> Result<CmdResult> {
    if draft.title.trim().is_empty() {
        return Err(NewsdeskError::Api("Title is required".to_string()));
    }

    let mut posts = store.get_posts();
    let id = next_id(&posts, clock.now_millis());
    let post = Post::from_draft(id, clock.today(), draft);
    posts.push(post.clone());
    store.save_posts(&posts)?;
    log::debug!("created post {} ({} total)", id, posts.len());

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Post published successfully! ({}: {})",
        post.id, post.title
    )));
    result.affected_posts.push(post);
    Ok(result)
}
