//! Persistence helpers for the app shell.

use crate::core::session::{SessionStore, normalize_token};
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

pub(crate) const API_KEY_KEY: &str = "transcriber.api_key";

/// Session token persisted in `LocalStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct LocalSession;

impl SessionStore for LocalSession {
    fn get(&self) -> Option<String> {
        let value = LocalStorage::get::<String>(API_KEY_KEY).ok()?;
        normalize_token(&value)
    }

    fn set(&self, token: &str) {
        if let Err(err) = LocalStorage::set(API_KEY_KEY, token) {
            log_storage_error("set", API_KEY_KEY, &err.to_string());
        }
    }

    fn clear(&self) {
        LocalStorage::delete(API_KEY_KEY);
    }
}

fn log_storage_error(operation: &'static str, key: &'static str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
