//! # Simulated Uploads
//!
//! There is no file server. A selected image is validated, read into a
//! `data:` URL and stored in the upload document under a generated name;
//! posts then refer to it as `uploads/<name>`.
//!
//! When storing fails (typically the storage quota), the file is kept for
//! the current session only and the post gets a `blob:` reference instead.

use crate::clock::Clock;
use crate::config::NewsdeskConfig;
use crate::error::{NewsdeskError, Result};
use crate::model::UploadRecord;
use crate::store::DataStore;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

pub const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

/// A file picked by the user, with its declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBlob {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl FileBlob {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk. Without an explicit media type, it is guessed
    /// from the extension.
    pub fn from_path(path: &Path, media_type: Option<&str>) -> Result<Self> {
        let bytes = fs::read(path).map_err(NewsdeskError::Io)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = match media_type {
            Some(declared) => declared.to_string(),
            None => mime_guess::from_path(path)
                .first_raw()
                .unwrap_or("application/octet-stream")
                .to_string(),
        };
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size in KiB with one decimal, as shown in status messages.
    pub fn size_label(&self) -> String {
        format!("{:.1}KB", self.size() as f64 / 1024.0)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, STANDARD.encode(&self.bytes))
    }

    /// Extension for the stored copy: the file's own, else one for the media type.
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => ext.to_string(),
            _ => extension_for(&self.media_type).to_string(),
        }
    }
}

fn extension_for(media_type: &str) -> &'static str {
    match media_type {
        "image/jpeg" => "jpg",
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "bin",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadRejection {
    #[error("Only JPG, PNG, GIF, or WEBP images are allowed")]
    UnsupportedType(String),

    #[error("Image too large (max {})", limit_label(.max))]
    TooLarge { size: u64, max: u64 },
}

/// `2MB`, `1.5MB` or `500KB`: whole units drop the decimal.
fn limit_label(bytes: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let (value, unit) = if *bytes >= MIB {
        (*bytes as f64 / MIB as f64, "MB")
    } else {
        (*bytes as f64 / 1024.0, "KB")
    };
    let text = format!("{:.1}", value);
    format!("{}{}", text.strip_suffix(".0").unwrap_or(&text), unit)
}

/// Check a selection before anything is read or written.
pub fn validate(blob: &FileBlob, max_bytes: u64) -> std::result::Result<(), UploadRejection> {
    if !ALLOWED_TYPES.contains(&blob.media_type.as_str()) {
        return Err(UploadRejection::UnsupportedType(blob.media_type.clone()));
    }
    let size = blob.size() as u64;
    if size > max_bytes {
        return Err(UploadRejection::TooLarge {
            size,
            max: max_bytes,
        });
    }
    Ok(())
}

/// Store `blob` in the upload document and return the new record.
pub fn persist<S: DataStore, C: Clock>(
    store: &mut S,
    clock: &C,
    config: &NewsdeskConfig,
    blob: &FileBlob,
) -> Result<UploadRecord> {
    let now = clock.now();
    let name = format!("img_{}.{}", now.timestamp_millis(), blob.extension());
    let record = UploadRecord {
        path: format!("{}{}", config.uploads_dir, name),
        name: name.clone(),
        data: blob.to_data_url(),
        uploaded_at: now,
    };

    let mut uploads = store.get_uploads();
    uploads.insert(name, record.clone());
    store.save_uploads(&uploads)?;
    log::debug!("stored upload {} ({} bytes)", record.name, blob.size());
    Ok(record)
}

/// Files held for the current session only, addressed by `blob:` references.
#[derive(Debug, Default)]
pub struct SessionBlobs {
    blobs: HashMap<String, FileBlob>,
}

impl SessionBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, blob: FileBlob) -> String {
        let reference = format!("blob:newsdesk/{}", Uuid::new_v4());
        self.blobs.insert(reference.clone(), blob);
        reference
    }

    pub fn get(&self, reference: &str) -> Option<&FileBlob> {
        self.blobs.get(reference)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

/// A preview read that has started but not completed.
///
/// Every selection gets a new generation; the form only applies the
/// completion whose generation is still current.
#[derive(Debug, Clone)]
pub struct PendingPreview {
    pub generation: u64,
    blob: FileBlob,
}

impl PendingPreview {
    pub(crate) fn new(generation: u64, blob: FileBlob) -> Self {
        Self { generation, blob }
    }

    pub fn complete(self) -> CompletedPreview {
        CompletedPreview {
            generation: self.generation,
            data_url: self.blob.to_data_url(),
            status: format!(
                "Ready to upload: {} ({})",
                self.blob.name,
                self.blob.size_label()
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPreview {
    pub generation: u64,
    pub data_url: String,
    pub status: String,
}
