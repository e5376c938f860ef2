use super::BufferStore;
use crate::error::{BufferError, Result};
use std::collections::HashMap;

/// In-memory storage for tests and embedding.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    entries: HashMap<String, String>,
    simulate_write_error: bool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail, for testing error propagation.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BufferStore for InMemoryStore {
    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error {
            return Err(BufferError::Store("Simulated write error".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn has(&self, key: &str) -> Result<bool> {
        Ok(self.entries.contains_key(key))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
