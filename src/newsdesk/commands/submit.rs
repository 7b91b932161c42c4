use crate::clock::Clock;
use crate::commands::{create, update, CmdMessage, CmdResult};
use crate::config::NewsdeskConfig;
use crate::error::{NewsdeskError, Result};
use crate::form::PostForm;
use crate::render::format_content;
use crate::store::DataStore;
use crate::upload::{self, SessionBlobs};

/// Submit the admin form.
///
/// A selected image is stored first; if that fails the post falls back to a
/// session `blob:` reference and a warning is added. Content is formatted,
/// then the post is either replaced in place (editing) or appended. The
/// form is reset only on success; on error it keeps its fields.
pub fn run<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    config: &NewsdeskConfig,
    blobs: &mut SessionBlobs,
    form: &mut PostForm,
) -> Result<CmdResult> {
    let mut draft = form.draft().clone();
    if draft.title.trim().is_empty() {
        let message = "Title is required";
        form.set_status(CmdMessage::error(message));
        return Err(NewsdeskError::Api(message.to_string()));
    }

    let mut messages = Vec::new();
    if let Some(file) = form.selected_file() {
        match upload::persist(store, clock, config, file) {
            Ok(record) => {
                draft.image = record.path;
                messages.push(CmdMessage::success("Image uploaded successfully!"));
            }
            Err(e) => {
                log::warn!("storing upload {} failed, using session blob: {}", file.name, e);
                draft.image = blobs.register(file.clone());
                messages.push(CmdMessage::warning(format!(
                    "Image could not be stored ({}). It will only show until reload.",
                    e
                )));
            }
        }
    }
    draft.content = format_content(&draft.content);

    let outcome = match form.editing_id() {
        Some(id) => update::run(store, id, draft),
        None => create::run(store, clock, draft),
    };
    let mut result = match outcome {
        Ok(result) => result,
        Err(e) => {
            form.set_status(CmdMessage::error(e.to_string()));
            return Err(e);
        }
    };

    messages.append(&mut result.messages);
    result.messages = messages;
    form.reset();
    Ok(result)
}
