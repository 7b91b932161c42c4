use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::render;
use crate::store::DataStore;

/// All posts in stored order, plus the admin list markup.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let posts = store.get_posts();
    let html = render::render_admin_list(&posts)?;

    let mut result = CmdResult::default().with_html(html);
    if posts.is_empty() {
        result.add_message(CmdMessage::info("No posts yet. Create your first post!"));
    }
    Ok(result.with_listed_posts(posts))
}
