use crate::api::{NewsdeskApi, NewsdeskPaths};
use crate::clock::{Clock, SystemClock};
use crate::config::NewsdeskConfig;
use crate::error::{NewsdeskError, Result};
use crate::images::ImageResolver;
use crate::model::Post;
use crate::render;
use crate::store::fs_backend::FsBackend;
use crate::store::{DataStore, LocalStore, PostsListener};
use directories::ProjectDirs;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the platform data directory.
pub const DATA_DIR_ENV: &str = "NEWSDESK_HOME";

pub const SITE_INDEX: &str = "index.html";

/// Documents live here, below the data dir, apart from `config.json`.
pub const STORE_DIR: &str = "store";

pub type FileStore = LocalStore<FsBackend>;

pub struct NewsdeskContext {
    pub api: NewsdeskApi<FileStore>,
    pub config: NewsdeskConfig,
}

/// Pick the data directory: an explicit path, else `$NEWSDESK_HOME`, else
/// the platform data dir.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_data_dir_from(explicit, std::env::var_os(DATA_DIR_ENV))
}

fn resolve_data_dir_from(explicit: Option<&Path>, env: Option<OsString>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env.filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "newsdesk", "newsdesk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| NewsdeskError::Store("Could not determine data dir".to_string()))
}

pub fn initialize(data_dir: Option<&Path>) -> Result<NewsdeskContext> {
    let data_dir = resolve_data_dir(data_dir)?;
    let config = NewsdeskConfig::load(&data_dir)?;
    log::debug!("using data dir {}", data_dir.display());

    let store = open_store(&data_dir, &config);
    let paths = NewsdeskPaths {
        data_dir: data_dir.clone(),
    };
    let mut api = NewsdeskApi::new(store, config.clone(), paths);

    if let Some(site_dir) = &config.site_dir {
        api.subscribe(site_refresher(site_dir.clone(), &data_dir, &config));
    }

    Ok(NewsdeskContext { api, config })
}

pub fn open_store(data_dir: &Path, config: &NewsdeskConfig) -> FileStore {
    let backend = FsBackend::new(data_dir.join(STORE_DIR)).with_quota(config.storage_quota_bytes);
    LocalStore::from_config(backend, config)
}

/// A listener that rewrites `<site_dir>/index.html` after every post save,
/// the file-backed equivalent of a mounted feed view.
pub fn site_refresher(site_dir: PathBuf, data_dir: &Path, config: &NewsdeskConfig) -> PostsListener {
    let uploads = open_store(data_dir, config);
    let config = config.clone();
    Box::new(move |posts: &[Post]| {
        if let Err(e) = write_site_index(&site_dir, posts, &uploads, &config) {
            log::warn!("could not refresh {}: {}", site_dir.display(), e);
        }
    })
}

fn write_site_index(
    site_dir: &Path,
    posts: &[Post],
    uploads: &FileStore,
    config: &NewsdeskConfig,
) -> Result<()> {
    let mut images = ImageResolver::new(uploads.get_uploads(), config);
    if config.cache_bust {
        images = images.with_cache_bust(SystemClock.now_millis());
    }
    let markup = render::render_feed(&render::partition(posts), &images)?;
    let page = render::render_feed_page(&markup)?;

    fs::create_dir_all(site_dir).map_err(NewsdeskError::Io)?;
    let index = site_dir.join(SITE_INDEX);
    fs::write(&index, page).map_err(NewsdeskError::Io)?;
    log::debug!("refreshed {}", index.display());
    Ok(())
}
