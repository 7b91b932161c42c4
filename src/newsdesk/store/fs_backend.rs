use super::backend::StorageBackend;
use crate::error::{NewsdeskError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const ITEM_EXT: &str = ".json";

/// Filesystem backend: one `<key>.json` file per key under `root`.
///
/// The whole directory is subject to a byte quota, the way a browser caps
/// `localStorage` per origin.
pub struct FsBackend {
    root: PathBuf,
    quota: Option<usize>,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root, quota: None }
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}{}", sanitize_key(key), ITEM_EXT))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(NewsdeskError::Io)?;
        }
        Ok(())
    }

    fn used_bytes_without(&self, skip: &Path) -> Result<usize> {
        let mut used = 0usize;
        for entry in fs::read_dir(&self.root).map_err(NewsdeskError::Io)? {
            let path = entry.map_err(NewsdeskError::Io)?.path();
            let is_item = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.ends_with(ITEM_EXT) && !n.starts_with('.'));
            if !is_item || path == skip {
                continue;
            }
            used += fs::metadata(&path).map_err(NewsdeskError::Io)?.len() as usize;
        }
        Ok(used)
    }
}

/// Keys become file names; anything outside `[A-Za-z0-9_-]` is replaced.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl StorageBackend for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.item_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(NewsdeskError::Io(e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.ensure_dir()?;
        let path = self.item_path(key);

        if let Some(quota) = self.quota {
            let needed = self.used_bytes_without(&path)? + value.len();
            if needed > quota {
                return Err(NewsdeskError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        // Write to a temp file and rename so readers never see a partial document
        let tmp_file = self.root.join(format!(".item-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, value).map_err(NewsdeskError::Io)?;
        fs::rename(&tmp_file, &path).map_err(NewsdeskError::Io)?;
        log::debug!("wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(NewsdeskError::Io(e)),
        }
    }
}
