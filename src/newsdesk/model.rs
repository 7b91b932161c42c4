use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single article as persisted in the posts document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Raw markup, rendered verbatim on the detail page.
    #[serde(default)]
    pub content: String,
    /// External URL, `uploads/` reference, `blob:` reference, or empty.
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub video: String,
    /// `YYYY-MM-DD` when written by newsdesk; kept verbatim otherwise.
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub featured: bool,
}

impl Post {
    pub fn from_draft(id: i64, date: NaiveDate, draft: PostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            summary: draft.summary,
            content: draft.content,
            image: draft.image,
            video: draft.video,
            date: date.format(DATE_FORMAT).to_string(),
            featured: draft.featured,
        }
    }

    /// The publish date, if the stored value is an ISO date.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Overwrites the editable fields, keeping `id` and `date`.
    pub fn apply_draft(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.summary = draft.summary;
        self.content = draft.content;
        self.image = draft.image;
        self.video = draft.video;
        self.featured = draft.featured;
    }
}

/// The editable subset of a post, as carried by the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image: String,
    pub video: String,
    pub featured: bool,
}

impl PostDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_video(mut self, video: impl Into<String>) -> Self {
        self.video = video.into();
        self
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.summary.is_empty()
            && self.content.is_empty()
            && self.image.is_empty()
            && self.video.is_empty()
            && !self.featured
    }
}

impl From<&Post> for PostDraft {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            summary: post.summary.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            video: post.video.clone(),
            featured: post.featured,
        }
    }
}

/// A locally persisted copy of an uploaded image, keyed by `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub name: String,
    pub path: String,
    /// Full file contents as a `data:` URL.
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_json_uses_iso_date_and_flat_fields() {
        let post = Post::from_draft(
            7,
            NaiveDate::from_ymd_opt(2026, 3, 5).unwrap(),
            PostDraft::new("Title").featured(true),
        );
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date"], "2026-03-05");
        assert_eq!(json["featured"], true);
        assert_eq!(json["image"], "");
    }

    #[test]
    fn post_tolerates_missing_optional_fields() {
        let json = r#"{"id":1,"title":"T","summary":"S","content":"C","date":"2026-01-02"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.image, "");
        assert!(!post.featured);
    }

    #[test]
    fn post_keeps_records_written_with_fewer_fields() {
        let json = r#"{"id":5,"title":"Only a title","date":"last week"}"#;
        let post: Post = serde_json::from_str(json).unwrap();
        assert_eq!(post.summary, "");
        assert_eq!(post.content, "");
        assert_eq!(post.date, "last week");
        assert_eq!(post.published_on(), None);
    }

    #[test]
    fn upload_record_uses_camel_case() {
        let record = UploadRecord {
            name: "img_1.png".into(),
            path: "uploads/img_1.png".into(),
            data: "data:image/png;base64,AAAA".into(),
            uploaded_at: Utc::now(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("uploadedAt").is_some());
    }

    #[test]
    fn apply_draft_keeps_identity() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let mut post = Post::from_draft(42, date, PostDraft::new("Old"));
        post.apply_draft(PostDraft::new("New").with_summary("S"));
        assert_eq!(post.id, 42);
        assert_eq!(post.published_on(), Some(date));
        assert_eq!(post.title, "New");
    }
}
