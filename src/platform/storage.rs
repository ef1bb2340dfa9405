//! Key/value JSON storage
//!
//! LocalStorage on web. Natively each key is a `<key>.json` file in
//! `$HEX_ARENA_DATA_DIR` (current directory when unset).

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ArenaResult;

/// Load a value, `Ok(None)` when nothing is stored under `key`
pub fn load_json<T: DeserializeOwned>(key: &str) -> ArenaResult<Option<T>> {
    match backend::read(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Store a value under `key`, replacing any previous value
pub fn save_json<T: Serialize>(key: &str, value: &T) -> ArenaResult<()> {
    let json = serde_json::to_string(value)?;
    backend::write(key, &json)
}

/// Remove a stored value (missing keys are fine)
pub fn remove(key: &str) -> ArenaResult<()> {
    backend::remove(key)
}

#[cfg(target_arch = "wasm32")]
mod backend {
    use crate::error::{ArenaError, ArenaResult};

    fn local_storage() -> ArenaResult<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| ArenaError::Storage("LocalStorage not available".into()))
    }

    pub fn read(key: &str) -> ArenaResult<Option<String>> {
        local_storage()?
            .get_item(key)
            .map_err(|e| ArenaError::Storage(format!("get_item({key}) failed: {e:?}")))
    }

    pub fn write(key: &str, json: &str) -> ArenaResult<()> {
        local_storage()?
            .set_item(key, json)
            .map_err(|e| ArenaError::Storage(format!("set_item({key}) failed: {e:?}")))
    }

    pub fn remove(key: &str) -> ArenaResult<()> {
        local_storage()?
            .remove_item(key)
            .map_err(|e| ArenaError::Storage(format!("remove_item({key}) failed: {e:?}")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod backend {
    use std::io::ErrorKind;
    use std::path::PathBuf;

    use crate::error::ArenaResult;

    const DATA_DIR_VAR: &str = "HEX_ARENA_DATA_DIR";

    fn path_for(key: &str) -> PathBuf {
        let dir = std::env::var_os(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(format!("{key}.json"))
    }

    pub fn read(key: &str) -> ArenaResult<Option<String>> {
        match std::fs::read_to_string(path_for(key)) {
            Ok(json) => Ok(Some(json)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn write(key: &str, json: &str) -> ArenaResult<()> {
        let path = path_for(key);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write to a temp file first so a crash never leaves half a file behind
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        Ok(())
    }

    pub fn remove(key: &str) -> ArenaResult<()> {
        match std::fs::remove_file(path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
