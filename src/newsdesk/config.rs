use crate::error::{NewsdeskError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const DEFAULT_POSTS_KEY: &str = "clare_journalism_posts";
pub const DEFAULT_UPLOADS_KEY: &str = "journalism_uploads";
pub const DEFAULT_UPLOADS_DIR: &str = "uploads/";
pub const DEFAULT_PLACEHOLDER_BASE: &str = "https://via.placeholder.com/800x400";
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;
pub const DEFAULT_STORAGE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Configuration for newsdesk, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsdeskConfig {
    /// Storage key of the posts document
    #[serde(default = "default_posts_key")]
    pub posts_key: String,

    /// Storage key of the upload-record document
    #[serde(default = "default_uploads_key")]
    pub uploads_key: String,

    /// Prefix marking an image reference as a local upload
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,

    /// Base URL of the generated placeholder images
    #[serde(default = "default_placeholder_base")]
    pub placeholder_base: String,

    /// Largest accepted image upload, in bytes
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Total size the filesystem store may hold, mirroring the browser quota
    #[serde(default = "default_storage_quota_bytes")]
    pub storage_quota_bytes: usize,

    /// Append a timestamp to external image URLs on every resolution
    #[serde(default = "default_cache_bust")]
    pub cache_bust: bool,

    /// When set, `index.html` in this directory is re-rendered after every save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site_dir: Option<PathBuf>,
}

fn default_posts_key() -> String {
    DEFAULT_POSTS_KEY.to_string()
}

fn default_uploads_key() -> String {
    DEFAULT_UPLOADS_KEY.to_string()
}

fn default_uploads_dir() -> String {
    DEFAULT_UPLOADS_DIR.to_string()
}

fn default_placeholder_base() -> String {
    DEFAULT_PLACEHOLDER_BASE.to_string()
}

fn default_max_image_bytes() -> u64 {
    DEFAULT_MAX_IMAGE_BYTES
}

fn default_storage_quota_bytes() -> usize {
    DEFAULT_STORAGE_QUOTA_BYTES
}

fn default_cache_bust() -> bool {
    true
}

impl Default for NewsdeskConfig {
    fn default() -> Self {
        Self {
            posts_key: default_posts_key(),
            uploads_key: default_uploads_key(),
            uploads_dir: default_uploads_dir(),
            placeholder_base: default_placeholder_base(),
            max_image_bytes: default_max_image_bytes(),
            storage_quota_bytes: default_storage_quota_bytes(),
            cache_bust: default_cache_bust(),
            site_dir: None,
        }
    }
}

pub const CONFIG_KEYS: &[&str] = &[
    "posts-key",
    "uploads-key",
    "uploads-dir",
    "placeholder-base",
    "max-image-bytes",
    "storage-quota-bytes",
    "cache-bust",
    "site-dir",
];

impl NewsdeskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NewsdeskError::Io)?;
        let config: NewsdeskConfig =
            serde_json::from_str(&content).map_err(NewsdeskError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(NewsdeskError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NewsdeskError::Serialization)?;
        fs::write(config_path, content).map_err(NewsdeskError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "posts-key" => self.posts_key.clone(),
            "uploads-key" => self.uploads_key.clone(),
            "uploads-dir" => self.uploads_dir.clone(),
            "placeholder-base" => self.placeholder_base.clone(),
            "max-image-bytes" => self.max_image_bytes.to_string(),
            "storage-quota-bytes" => self.storage_quota_bytes.to_string(),
            "cache-bust" => self.cache_bust.to_string(),
            "site-dir" => self
                .site_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let invalid = |what: &str| NewsdeskError::Api(format!("Invalid {} value: {}", what, value));
        match key {
            "posts-key" => self.posts_key = value.to_string(),
            "uploads-key" => self.uploads_key = value.to_string(),
            "uploads-dir" => self.set_uploads_dir(value),
            "placeholder-base" => self.placeholder_base = value.trim_end_matches('?').to_string(),
            "max-image-bytes" => {
                self.max_image_bytes = value.parse().map_err(|_| invalid(key))?;
            }
            "storage-quota-bytes" => {
                self.storage_quota_bytes = value.parse().map_err(|_| invalid(key))?;
            }
            "cache-bust" => self.cache_bust = value.parse().map_err(|_| invalid(key))?,
            "site-dir" => {
                self.site_dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            other => {
                return Err(NewsdeskError::Api(format!(
                    "Unknown config key: {}",
                    other
                )))
            }
        }
        Ok(())
    }

    /// All known keys with their current values, in display order.
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        CONFIG_KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }

    /// Set the uploads prefix (normalizes to end with a slash)
    pub fn set_uploads_dir(&mut self, dir: &str) {
        if dir.ends_with('/') {
            self.uploads_dir = dir.to_string();
        } else {
            self.uploads_dir = format!("{}/", dir);
        }
    }
}
