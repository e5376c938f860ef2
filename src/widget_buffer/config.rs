use crate::error::{BufferError, Result};
use crate::store::BufferSlot;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_NAMESPACE: &str = "tbBufferStore";
const DEFAULT_DELIMITER: &str = ".";

/// Buffer configuration, stored in `config.json` next to the buffer files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BufferConfig {
    /// Prefix of every storage key
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Separator between the namespace and the slot key
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            delimiter: default_delimiter(),
        }
    }
}

impl BufferConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BufferError::Io)?;
        let config: BufferConfig =
            serde_json::from_str(&content).map_err(BufferError::Serialization)?;
        Ok(config)
    }

    /// Like [`BufferConfig::load`], but writes the defaults out when there is no config yet
    pub fn load_or_init<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        if config_dir.join(CONFIG_FILENAME).exists() {
            return Self::load(config_dir);
        }
        let config = Self::default();
        config.save(config_dir)?;
        tracing::debug!(dir = %config_dir.display(), "Wrote default buffer config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BufferError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BufferError::Serialization)?;
        fs::write(config_path, content).map_err(BufferError::Io)?;
        Ok(())
    }

    /// Namespaced storage key of `slot`
    pub fn key(&self, slot: BufferSlot) -> String {
        [self.namespace.as_str(), slot.key()].join(self.delimiter.as_str())
    }
}
