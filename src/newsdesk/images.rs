//! # Image Resolution
//!
//! A post's `image` field is a reference, not a URL. [`ImageResolver`] turns
//! it into something an `<img>` element can display:
//!
//! | reference                  | result                                    |
//! |----------------------------|-------------------------------------------|
//! | empty                      | "No Image" placeholder                    |
//! | `blob:...`                 | unchanged (session-scoped handle)         |
//! | `uploads/<name>`           | the upload's `data:` URL, or "Image Not Found" |
//! | `http://` / `https://`     | URL plus a cache-busting timestamp        |
//! | anything else              | "Invalid Image" placeholder               |
//!
//! Resolution reads a snapshot of the upload mapping taken when the resolver
//! is built, so resolving the same reference twice yields the same
//! [`ResolutionKind`]. The cache-busting stamp is also fixed at build time
//! ([`ImageResolver::with_cache_bust`]); a new stamp needs a new resolver.

use crate::config::NewsdeskConfig;
use crate::model::UploadRecord;
use crate::store::UploadMap;
use std::fmt;

pub const BLOB_PREFIX: &str = "blob:";

/// Labels carried by generated placeholder images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    NoImage,
    NotFound,
    Invalid,
    LoadError,
}

impl Placeholder {
    pub fn label(&self) -> &'static str {
        match self {
            Placeholder::NoImage => "No Image",
            Placeholder::NotFound => "Image Not Found",
            Placeholder::Invalid => "Invalid Image",
            Placeholder::LoadError => "Image Error",
        }
    }

    pub fn url(&self, base: &str) -> String {
        format!("{}?text={}", base, self.label().replace(' ', "+"))
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What kind of stored reference an image path is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Empty,
    SessionBlob(&'a str),
    /// File name inside the upload mapping, prefix stripped.
    Upload(&'a str),
    External(&'a str),
    Invalid(&'a str),
}

impl<'a> ImageRef<'a> {
    pub fn classify(path: &'a str, uploads_dir: &str) -> Self {
        let path = path.trim();
        if path.is_empty() {
            ImageRef::Empty
        } else if path.starts_with(BLOB_PREFIX) {
            ImageRef::SessionBlob(path)
        } else if let Some(name) = path.strip_prefix(uploads_dir) {
            ImageRef::Upload(name)
        } else if path.starts_with("http://") || path.starts_with("https://") {
            ImageRef::External(path)
        } else {
            ImageRef::Invalid(path)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    SessionBlob,
    Upload,
    External,
    Placeholder(Placeholder),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub url: String,
    pub kind: ResolutionKind,
}

impl Resolution {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, ResolutionKind::Placeholder(_))
    }
}

pub struct ImageResolver {
    uploads: UploadMap,
    uploads_dir: String,
    placeholder_base: String,
    cache_bust: Option<i64>,
}

impl ImageResolver {
    pub fn new(uploads: UploadMap, config: &NewsdeskConfig) -> Self {
        Self {
            uploads,
            uploads_dir: config.uploads_dir.clone(),
            placeholder_base: config.placeholder_base.clone(),
            cache_bust: None,
        }
    }

    /// Append `stamp` to external URLs, normally the current time in ms.
    pub fn with_cache_bust(mut self, stamp: i64) -> Self {
        self.cache_bust = Some(stamp);
        self
    }

    pub fn placeholder(&self, which: Placeholder) -> String {
        which.url(&self.placeholder_base)
    }

    pub fn upload(&self, name: &str) -> Option<&UploadRecord> {
        self.uploads.get(name)
    }

    pub fn resolve(&self, path: &str) -> Resolution {
        match ImageRef::classify(path, &self.uploads_dir) {
            ImageRef::Empty => self.placeholder_resolution(Placeholder::NoImage),
            ImageRef::SessionBlob(blob) => Resolution {
                url: blob.to_string(),
                kind: ResolutionKind::SessionBlob,
            },
            ImageRef::Upload(name) => match self.uploads.get(name) {
                Some(record) => Resolution {
                    url: record.data.clone(),
                    kind: ResolutionKind::Upload,
                },
                None => self.placeholder_resolution(Placeholder::NotFound),
            },
            ImageRef::External(url) => Resolution {
                url: self.bust(url),
                kind: ResolutionKind::External,
            },
            ImageRef::Invalid(_) => self.placeholder_resolution(Placeholder::Invalid),
        }
    }

    pub fn resolve_url(&self, path: &str) -> String {
        self.resolve(path).url
    }

    /// Fallback for an image that failed to load at display time.
    pub fn load_error(&self, alt: &str) -> String {
        log::warn!("image failed to load: {}", alt);
        self.placeholder(Placeholder::LoadError)
    }

    fn placeholder_resolution(&self, which: Placeholder) -> Resolution {
        Resolution {
            url: self.placeholder(which),
            kind: ResolutionKind::Placeholder(which),
        }
    }

    fn bust(&self, url: &str) -> String {
        match self.cache_bust {
            Some(stamp) if url.contains('?') => format!("{}&{}", url, stamp),
            Some(stamp) => format!("{}?{}", url, stamp),
            None => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn resolver() -> ImageResolver {
        let mut uploads = UploadMap::new();
        uploads.insert(
            "img_1.png".into(),
            UploadRecord {
                name: "img_1.png".into(),
                path: "uploads/img_1.png".into(),
                data: "data:image/png;base64,iVBORw0KGgo=".into(),
                uploaded_at: Utc::now(),
            },
        );
        ImageResolver::new(uploads, &NewsdeskConfig::default()).with_cache_bust(1234)
    }

    #[test]
    fn empty_reference_gets_no_image_placeholder() {
        let r = resolver().resolve("  ");
        assert_eq!(r.kind, ResolutionKind::Placeholder(Placeholder::NoImage));
        assert_eq!(r.url, "https://via.placeholder.com/800x400?text=No+Image");
    }

    #[test]
    fn blob_reference_is_unchanged() {
        let r = resolver().resolve("blob:newsdesk/1234");
        assert_eq!(r.url, "blob:newsdesk/1234");
        assert_eq!(r.kind, ResolutionKind::SessionBlob);
    }

    #[test]
    fn upload_reference_returns_stored_data() {
        let r = resolver().resolve("uploads/img_1.png");
        assert_eq!(r.kind, ResolutionKind::Upload);
        assert!(r.url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn missing_upload_gets_not_found_placeholder() {
        let r = resolver().resolve("uploads/img_2.png");
        assert_eq!(r.kind, ResolutionKind::Placeholder(Placeholder::NotFound));
        assert!(r.url.ends_with("text=Image+Not+Found"));
    }

    #[test]
    fn external_url_is_cache_busted() {
        let r = resolver();
        assert_eq!(
            r.resolve_url("https://example.com/a.jpg"),
            "https://example.com/a.jpg?1234"
        );
        assert_eq!(
            r.resolve_url("http://example.com/a.jpg?w=800"),
            "http://example.com/a.jpg?w=800&1234"
        );
    }

    #[test]
    fn one_resolver_reuses_its_stamp() {
        let r = resolver();
        let first = r.resolve("https://example.com/a.jpg");
        assert_eq!(r.resolve("https://example.com/a.jpg"), first);
    }

    #[test]
    fn external_url_without_cache_bust() {
        let r = ImageResolver::new(UploadMap::new(), &NewsdeskConfig::default());
        assert_eq!(r.resolve_url("https://example.com/a.jpg"), "https://example.com/a.jpg");
    }

    #[test]
    fn anything_else_is_invalid() {
        for path in ["ftp://example.com/a.jpg", "a.jpg", "httpfoo", "/images/a.jpg"] {
            assert_eq!(
                resolver().resolve(path).kind,
                ResolutionKind::Placeholder(Placeholder::Invalid),
                "{path}"
            );
        }
    }

    #[test]
    fn classification_is_stable_across_resolutions() {
        let r = resolver();
        for path in ["", "blob:x", "uploads/img_1.png", "uploads/nope", "https://x.y/z", "?"] {
            assert_eq!(r.resolve(path).kind, r.resolve(path).kind);
        }
    }

    #[test]
    fn custom_uploads_dir() {
        let mut config = NewsdeskConfig::default();
        config.set_uploads_dir("media");
        assert_eq!(
            ImageRef::classify("media/img_1.png", &config.uploads_dir),
            ImageRef::Upload("img_1.png")
        );
        assert_eq!(
            ImageRef::classify("uploads/img_1.png", &config.uploads_dir),
            ImageRef::Invalid("uploads/img_1.png")
        );
    }

    #[test]
    fn load_error_returns_error_placeholder() {
        assert!(resolver().load_error("Some alt").ends_with("text=Image+Error"));
    }
}
