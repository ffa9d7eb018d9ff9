//! Capabilities the embedding UI provides to the interaction handler.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{ClipboardError, DownloadError};

use super::DownloadRequest;

/// A host-issued URL for an in-memory payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectUrl(pub String);

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub mime: String,
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Asynchronous clipboard write; may be refused by the host.
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;

    /// Synchronous fallback through a transient off-screen selection.
    fn copy_via_selection(&self, text: &str) -> Result<(), ClipboardError>;
}

pub trait Browser: Send + Sync {
    fn create_object_url(&self, blob: Blob) -> ObjectUrl;
    fn revoke_object_url(&self, url: &ObjectUrl);
    /// Open `url` in a new viewing context (tab or window).
    fn open_in_new_context(&self, url: &ObjectUrl);
    /// Save the payload behind `url` as a file named `file_name`.
    fn save_as(&self, url: &ObjectUrl, file_name: &str);
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &DownloadRequest) -> Result<Blob, DownloadError>;
}

/// Key-value storage persisted by the host, such as browser local storage.
pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> Option<String>;
}

/// In-process [`LocalStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut items) = self.items.write() {
            items.insert(key.into(), value.into());
        }
    }

    pub fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.write() {
            items.remove(key);
        }
    }
}

impl LocalStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.read().ok()?.get(key).cloned()
    }
}
