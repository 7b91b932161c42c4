use crate::clock::Clock;
use crate::commands::{CmdMessage, CmdResult};
use crate::config::NewsdeskConfig;
use crate::error::Result;
use crate::images::ResolutionKind;
use crate::store::DataStore;

use super::helpers::image_resolver;

pub fn run<S: DataStore, C: Clock>(
    store: &S,
    clock: &C,
    config: &NewsdeskConfig,
    path: &str,
) -> Result<CmdResult> {
    let resolution = image_resolver(store, clock, config).resolve(path);

    let mut result = CmdResult::default();
    let message = match resolution.kind {
        ResolutionKind::Placeholder(label) => {
            CmdMessage::warning(format!("Placeholder: {}", label))
        }
        ResolutionKind::Upload => CmdMessage::info("Local upload"),
        ResolutionKind::External => CmdMessage::info("External URL"),
        ResolutionKind::SessionBlob => CmdMessage::info("Session blob"),
    };
    result.add_message(message);
    result.resolution = Some(resolution);
    Ok(result)
}
