//! # Browser `localStorage` backend for session persistence
//!
//! [`LocalStore`] is the [`KeyValueStore`](crate::storage::KeyValueStore)
//! implementation used on the **web platform**. It holds no state of its own;
//! every operation looks up `window.localStorage` fresh, which keeps the type
//! zero-size and `Clone`-friendly.
//!
//! All failures are swallowed: a missing window (e.g. during prerendering) or
//! a storage quota error degrades to "no stored session" rather than
//! crashing. The authoritative session lives in memory; storage only has to
//! survive a page reload.

use crate::storage::KeyValueStore;

/// `localStorage`-backed KeyValueStore for the web platform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
