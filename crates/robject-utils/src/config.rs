//! Configuration file handling for RObject projects.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use robject_core::{CollisionPolicy, InitializerRegistry, TypeFactory};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::session::{FileBackend, MemoryBackend, Session};

/// Name of the configuration file looked up by [`Config::find`].
pub const CONFIG_FILE: &str = "robject.toml";

/// Represents the robject.toml configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub factory: FactoryConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// File backing the session store; sessions live in memory when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Config {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a robject.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        toml::from_str(&contents).with_context(|| format!("Failed to parse {CONFIG_FILE}"))
    }

    /// Saves configuration to a robject.toml file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let contents =
            toml::to_string_pretty(self).with_context(|| "Failed to serialize configuration")?;

        fs::write(path.as_ref(), contents)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))
    }

    /// Finds the robject.toml file starting from `start` and walking up.
    ///
    /// # Errors
    /// Returns an error if no robject.toml is found in `start` or its parents.
    pub fn find_from(start: impl Into<PathBuf>) -> Result<(Self, PathBuf)> {
        let mut current_dir = start.into();

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                tracing::debug!(path = %config_path.display(), "loading configuration");
                let config = Self::load(&config_path)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                anyhow::bail!(
                    "Could not find {CONFIG_FILE} in current directory or any parent directory"
                );
            }
        }
    }

    /// Finds the robject.toml file starting from the current directory.
    ///
    /// # Errors
    /// Returns an error if no robject.toml is found in the current or parent directories.
    pub fn find() -> Result<(Self, PathBuf)> {
        let current_dir =
            std::env::current_dir().with_context(|| "Failed to get current directory")?;
        Self::find_from(current_dir)
    }

    /// Builds a factory over `registry` using the configured collision policy.
    pub fn factory<'r>(&self, registry: &'r RwLock<InitializerRegistry>) -> TypeFactory<'r> {
        TypeFactory::new(registry).with_policy(self.factory.collision_policy)
    }

    /// Opens the configured session store.
    ///
    /// Relative session paths are resolved against `root`.
    pub fn open_session(&self, root: impl AsRef<Path>) -> Session {
        match &self.session.path {
            Some(path) => Session::new(FileBackend::new(root.as_ref().join(path))),
            None => Session::new(MemoryBackend::default()),
        }
    }
}
