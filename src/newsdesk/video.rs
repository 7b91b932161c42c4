/// Rewrite a video-sharing watch URL into its embeddable player form.
///
/// `youtube.com/watch?v=ID` and `youtu.be/ID` become
/// `https://www.youtube.com/embed/ID`; other query parameters are dropped.
/// Anything else is embedded as given.
pub fn embed_url(url: &str) -> String {
    let url = url.trim();
    match youtube_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id),
        None => url.to_string(),
    }
}

fn youtube_id(url: &str) -> Option<&str> {
    let id = if url.contains("youtube.com/watch?") {
        let (_, query) = url.split_once('?')?;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix("v="))?
    } else {
        let (_, rest) = url.split_once("youtu.be/")?;
        rest.split(['?', '&', '#', '/']).next()?
    };
    let id = id.split('#').next()?;
    (!id.is_empty()).then_some(id)
}
