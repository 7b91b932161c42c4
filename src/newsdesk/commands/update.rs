use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NewsdeskError, Result};
use crate::model::PostDraft;
use crate::store::DataStore;

/// Replace the editable fields of post `id` in place. Position, id and
/// publish date are kept.
pub fn run<S: DataStore>(store: &mut S, id: i64, draft: PostDraft) -> Result<CmdResult> {
    if draft.title.trim().is_empty() {
        return Err(NewsdeskError::Api("Title is required".to_string()));
    }

    let mut posts = store.get_posts();
    let post = posts
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or(NewsdeskError::PostNotFound(id))?;
    post.apply_draft(draft);
    let updated = post.clone();
    store.save_posts(&posts)?;
    log::debug!("updated post {}", id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Post updated successfully! ({}: {})",
        updated.id, updated.title
    )));
    result.affected_posts.push(updated);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::local_store::fixtures::{post, StoreFixture};

    #[test]
    fn replaces_in_place() {
        let mut store = StoreFixture::new()
            .with_post(1, "A", false)
            .with_post(2, "B", false)
            .with_post(3, "C", false)
            .store;

        run(&mut store, 2, PostDraft::new("B2").featured(true)).unwrap();

        let posts = store.get_posts();
        assert_eq!(posts.len(), 3);
        assert_eq!(posts[1].id, 2);
        assert_eq!(posts[1].title, "B2");
        assert!(posts[1].featured);
        assert_eq!(posts[1].date, post(2, "B", false).date);
    }

    #[test]
    fn missing_id_is_an_error() {
        let mut store = StoreFixture::new().with_post(1, "A", false).store;
        let err = run(&mut store, 9, PostDraft::new("X")).unwrap_err();
        assert!(matches!(err, NewsdeskError::PostNotFound(9)));
        assert_eq!(store.get_posts()[0].title, "A");
    }
}
