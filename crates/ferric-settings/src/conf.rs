//! Scalar configuration store
//!
//! The main config file is a flat `key=value` store. Readers supply a
//! default for every key, so a missing or damaged file degrades to
//! defaults instead of failing. Values are written back with `set` and
//! hit the disk only on `save`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

/// Flat `key=value` store backed by one file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl ConfigStore {
    /// Open a store at `path`, loading it if the file exists. A missing
    /// or unreadable file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            values: BTreeMap::new(),
        };
        store.load();
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&mut self) {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) => {
                if self.path.exists() {
                    log::warn!("error while reading config {:?}: {}", self.path, e);
                } else {
                    log::info!("no config at {:?}, using defaults", self.path);
                }
                return;
            }
        };
        for line in contents.lines() {
            let Some((key, value)) = line.split_once('=') else {
                if !line.trim().is_empty() {
                    log::warn!("config line invalid: {}", line);
                }
                continue;
            };
            self.values.insert(key.to_string(), value.to_string());
        }
        log::info!("loaded {} config entries from {:?}", self.values.len(), self.path);
    }

    /// Write all entries back to the file, creating parent directories if
    /// needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory: {:?}", parent))?;
        }
        let mut out = String::new();
        for (key, value) in &self.values {
            let _ = writeln!(out, "{}={}", key, value);
        }
        fs::write(&self.path, out)
            .with_context(|| format!("failed to write config: {:?}", self.path))?;
        Ok(())
    }

    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(v) => v.trim().parse().unwrap_or_else(|_| {
                log::warn!("config value for {} is not a number: {}", key, v);
                default
            }),
            None => default,
        }
    }

    pub fn get_float(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(v) => v.trim().parse().unwrap_or_else(|_| {
                log::warn!("config value for {} is not a number: {}", key, v);
                default
            }),
            None => default,
        }
    }

    pub fn get_str(&self, key: &str, default: &str) -> String {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn set(&mut self, key: &str, value: impl Display) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::open(dir.path().join("nope.cfg"));
        assert_eq!(store.get_int("x", 42), 42);
        assert_eq!(store.get_str("y", "hello"), "hello");
        assert_eq!(store.get_float("z", 2.5), 2.5);
    }

    #[test]
    fn test_set_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferric.cfg");

        let mut store = ConfigStore::open(&path);
        store.set("alpha", 7);
        store.set("beta", "two words");
        store.set("gamma", 0.5f32);
        store.save().unwrap();

        let store = ConfigStore::open(&path);
        assert_eq!(store.get_int("alpha", 0), 7);
        assert_eq!(store.get_str("beta", ""), "two words");
        assert_eq!(store.get_float("gamma", 0.0), 0.5);
    }

    #[test]
    fn test_load_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferric.cfg");
        fs::write(&path, "good=1\nthis line has no separator\nalso=fine\n").unwrap();

        let store = ConfigStore::open(&path);
        assert_eq!(store.get_int("good", 0), 1);
        assert_eq!(store.get_str("also", ""), "fine");
    }

    #[test]
    fn test_non_numeric_value_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ferric.cfg");
        fs::write(&path, "n=banana\n").unwrap();
        let store = ConfigStore::open(&path);
        assert_eq!(store.get_int("n", 9), 9);
    }
}
