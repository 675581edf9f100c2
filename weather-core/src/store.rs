//! Small key-value persistence used for search history and theme preference.

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::{fs, marker::PhantomData, path::PathBuf, sync::Mutex};

/// Durable storage for one value.
///
/// `load` never fails: absent, unreadable or malformed state reads as `None`.
pub trait Store<T>: Send {
    fn load(&self) -> Option<T>;
    fn save(&self, value: &T) -> Result<()>;
}

/// Stores a value as a JSON document in its own file.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _value: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), _value: PhantomData }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl<T> Store<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> Option<T> {
        if !self.path.exists() {
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Failed to read stored state");
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "Ignoring malformed stored state");
                None
            }
        }
    }

    fn save(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(value).context("Failed to serialize state to JSON")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        Ok(())
    }
}

/// In-process store for tests and sessions that should not touch disk.
#[derive(Debug, Default)]
pub struct MemoryStore<T> {
    value: Mutex<Option<T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self { value: Mutex::new(None) }
    }

    pub fn with_value(value: T) -> Self {
        Self { value: Mutex::new(Some(value)) }
    }
}

impl<T> Store<T> for MemoryStore<T>
where
    T: Clone + Send,
{
    fn load(&self) -> Option<T> {
        self.value.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, value: &T) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory store lock poisoned"))?;
        *guard = Some(value.clone());
        Ok(())
    }
}

impl<T, S> Store<T> for std::sync::Arc<S>
where
    S: Store<T> + Sync + ?Sized,
{
    fn load(&self) -> Option<T> {
        (**self).load()
    }

    fn save(&self, value: &T) -> Result<()> {
        (**self).save(value)
    }
}
