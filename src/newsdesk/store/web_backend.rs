use super::backend::StorageBackend;
use crate::error::{NewsdeskError, Result};
use wasm_bindgen::JsValue;
use web_sys::{window, Storage};

/// Browser backend over `window.localStorage`.
///
/// Quota enforcement is left to the browser; a full store surfaces as a
/// `Store` error from `set_item`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebBackend;

impl WebBackend {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage> {
        window()
            .ok_or_else(|| NewsdeskError::Store("No window available".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| NewsdeskError::Store("Local storage not available".to_string()))
    }
}

fn js_error(value: JsValue) -> NewsdeskError {
    NewsdeskError::Store(format!("localStorage error: {:?}", value))
}

impl StorageBackend for WebBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}
