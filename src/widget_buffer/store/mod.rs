//! # Storage Layer
//!
//! The buffer is a small key-value store holding serialized payloads. The [`BufferStore`]
//! trait keeps the copy/paste logic independent of where those payloads live.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one JSON file per key in a directory (used by the CLI)
//! - [`memory::InMemoryStore`]: a map, for tests and for embedding in a long-lived process
//!
//! ## Slots and Keys
//!
//! Two slots exist, see [`BufferSlot`]. A slot holds at most one payload and a new copy
//! overwrites the previous one. The slots are independent of each other. Keys are
//! namespaced (`tbBufferStore.widget_item` by default, see [`crate::config::BufferConfig`]).
//!
//! ## Corrupt Payloads
//!
//! [`read_payload`] treats a payload that no longer deserializes as absent: the slot is
//! cleared and the caller sees an empty buffer.

use crate::config::BufferConfig;
use crate::error::{BufferError, Result};
use crate::payload::Payload;
use std::fmt;

pub mod fs;
pub mod memory;

/// Abstract interface for buffer storage.
pub trait BufferStore {
    /// Store `value` under `key`, replacing whatever was there
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Read the value under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Whether anything is stored under `key`
    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferSlot {
    /// Copy-by-value slot, holds a [`crate::payload::WidgetItem`]
    WidgetItem,
    /// Copy-by-reference slot, holds a [`crate::payload::WidgetReference`]
    WidgetReference,
}

impl BufferSlot {
    pub const ALL: [BufferSlot; 2] = [BufferSlot::WidgetItem, BufferSlot::WidgetReference];

    /// Un-namespaced storage key
    pub fn key(&self) -> &'static str {
        match self {
            BufferSlot::WidgetItem => "widget_item",
            BufferSlot::WidgetReference => "widget_reference",
        }
    }
}

impl fmt::Display for BufferSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferSlot::WidgetItem => f.write_str("widget"),
            BufferSlot::WidgetReference => f.write_str("widget reference"),
        }
    }
}

pub fn write_payload<S: BufferStore, P: Payload>(
    store: &mut S,
    config: &BufferConfig,
    payload: &P,
) -> Result<()> {
    let key = config.key(P::SLOT);
    let json = serde_json::to_string(payload)?;
    tracing::debug!(key = %key, bytes = json.len(), "Writing buffer payload");
    store.put(&key, &json)
}

/// Reads and deserializes the payload of `P`'s slot.
///
/// Returns `Ok(None)` for an empty slot, and also for a slot whose contents no longer parse
/// or are not text; in those cases the slot is cleared.
pub fn read_payload<S: BufferStore, P: Payload>(
    store: &mut S,
    config: &BufferConfig,
) -> Result<Option<P>> {
    let key = config.key(P::SLOT);
    let json = match store.get(&key) {
        Ok(Some(json)) => json,
        Ok(None) => return Ok(None),
        Err(BufferError::Io(e)) if e.kind() == std::io::ErrorKind::InvalidData => {
            return discard(store, &key, &e);
        }
        Err(e) => return Err(e),
    };
    match serde_json::from_str(&json) {
        Ok(payload) => Ok(Some(payload)),
        Err(e) => discard(store, &key, &e),
    }
}

fn discard<S: BufferStore, P>(
    store: &mut S,
    key: &str,
    error: &dyn std::error::Error,
) -> Result<Option<P>> {
    tracing::warn!(key = %key, error = %error, "Discarding corrupt buffer payload");
    store.remove(key)?;
    Ok(None)
}

pub fn has_payload<S: BufferStore>(
    store: &S,
    config: &BufferConfig,
    slot: BufferSlot,
) -> Result<bool> {
    store.has(&config.key(slot))
}

pub fn clear_payload<S: BufferStore>(
    store: &mut S,
    config: &BufferConfig,
    slot: BufferSlot,
) -> Result<()> {
    let key = config.key(slot);
    tracing::debug!(key = %key, "Clearing buffer slot");
    store.remove(&key)
}
