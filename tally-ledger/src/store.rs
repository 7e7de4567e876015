//! Opaque key-value blob storage for ledger collections.
//!
//! Each collection lives under its own key as a JSON array. A missing key or
//! a blob that is not a JSON array reads back as an empty collection.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const INVESTMENTS_KEY: &str = "investments";

pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let p = self.path(key);
        if !p.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
        Ok(Some(s))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let p = self.path(key);
        fs::write(&p, value).with_context(|| format!("write {}", p.display()))?;
        Ok(())
    }
}

/// In-process store, mostly for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.blobs.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Read a collection and normalize every element.
///
/// Absent keys and blobs that are not JSON arrays give an empty collection;
/// only store I/O errors propagate.
pub fn load_collection<S, T, F>(store: &S, key: &str, normalize: F) -> Result<Vec<T>>
where
    S: KvStore + ?Sized,
    F: Fn(&[Value]) -> Vec<T>,
{
    let Some(blob) = store.get(key)? else {
        return Ok(Vec::new());
    };

    match serde_json::from_str::<Value>(&blob) {
        Ok(Value::Array(items)) => Ok(normalize(&items)),
        Ok(Value::Null) => Ok(Vec::new()),
        Ok(other) => {
            tracing::warn!(key, kind = json_kind(&other), "stored blob is not an array; treating as empty");
            Ok(Vec::new())
        }
        Err(e) => {
            tracing::warn!(key, error = %e, "stored blob is not valid JSON; treating as empty");
            Ok(Vec::new())
        }
    }
}

pub fn save_collection<S, T>(store: &mut S, key: &str, items: &[T]) -> Result<()>
where
    S: KvStore + ?Sized,
    T: Serialize,
{
    let blob = serde_json::to_string(items).with_context(|| format!("serialize {key}"))?;
    store.set(key, &blob)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
