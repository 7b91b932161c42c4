use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Stored upload records, oldest first.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut uploads: Vec<_> = store.get_uploads().into_values().collect();
    uploads.sort_by(|a, b| a.uploaded_at.cmp(&b.uploaded_at).then(a.name.cmp(&b.name)));

    let mut result = CmdResult::default();
    if uploads.is_empty() {
        result.add_message(CmdMessage::info("No uploads stored."));
    }
    result.uploads = uploads;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use crate::config::NewsdeskConfig;
    use crate::store::InMemoryStore;
    use crate::upload::{persist, FileBlob};
    use chrono::Duration;

    #[test]
    fn lists_oldest_first() {
        let mut store = InMemoryStore::new();
        let clock = FixedClock::at_millis(2_000);
        let config = NewsdeskConfig::default();
        persist(&mut store, &clock, &config, &FileBlob::new("b.png", "image/png", vec![1])).unwrap();
        clock.advance(Duration::milliseconds(-1_000));
        persist(&mut store, &clock, &config, &FileBlob::new("a.png", "image/png", vec![1])).unwrap();

        let result = run(&store).unwrap();
        let names: Vec<&str> = result.uploads.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["img_1000.png", "img_2000.png"]);
        assert_eq!(clock.now_millis(), 1_000);
    }
}
