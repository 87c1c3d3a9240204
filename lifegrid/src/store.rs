//! Key-value persistence for the form inputs
//!
//! The calculator only ever needs two string keys. `JsonFileStore` keeps
//! them in a single JSON object so the desktop shell and the CLI can share
//! one file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::StoreError;
use crate::params::{FormInput, LifeParameters};

/// Key holding the birth date as `YYYY-MM-DD`.
pub const DOB_KEY: &str = "dob";
/// Key holding the life expectancy as decimal text.
pub const LIFE_EXPECTANCY_KEY: &str = "lifeExpectancy";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Write every entry in one step: either all of them land or none do.
    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.set_all(&[(key, value)])
    }
}

/// Volatile store, used in tests and when no store path is configured.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        for (key, value) in entries {
            self.entries.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// All keys in one JSON object file, rewritten on every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store; so is a
    /// file that does not parse. Non-string values are dropped.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse_entries(&path, &text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file with `entries`: write a sibling temp file, then
    /// rename it over the store so a partial write never becomes the store.
    fn write_file(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(entries)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn parse_entries(path: &Path, text: &str) -> BTreeMap<String, String> {
    if text.trim().is_empty() {
        return BTreeMap::new();
    }
    let raw: BTreeMap<String, serde_json::Value> = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Store {} is unreadable, starting empty: {}", path.display(), e);
            return BTreeMap::new();
        }
    };
    raw.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            other => {
                warn!("Dropping non-string store value {} = {}", key, other);
                None
            }
        })
        .collect()
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        for (key, value) in entries {
            next.insert(key.to_string(), value.to_string());
        }
        self.write_file(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// Read the persisted form inputs.
///
/// Both keys must be present, and together they must validate; anything
/// else is treated as "nothing stored".
pub fn load_form<S: KeyValueStore + ?Sized>(store: &S) -> Option<FormInput> {
    let dob = store.get(DOB_KEY)?;
    let life_expectancy = store.get(LIFE_EXPECTANCY_KEY)?;
    let form = FormInput::new(dob, life_expectancy);

    match form.validate() {
        Ok(params) => Some(params.into()),
        Err(e) => {
            warn!("Ignoring stored life parameters: {}", e);
            None
        }
    }
}

/// Overwrite both keys with `params` in a single write.
pub fn save_parameters<S: KeyValueStore + ?Sized>(
    store: &mut S,
    params: &LifeParameters,
) -> Result<(), StoreError> {
    let form = FormInput::from(*params);
    store.set_all(&[
        (DOB_KEY, form.dob.as_str()),
        (LIFE_EXPECTANCY_KEY, form.life_expectancy.as_str()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(DOB_KEY), None);
        store.set(DOB_KEY, "1990-01-01").unwrap();
        store.set(DOB_KEY, "1991-02-03").unwrap();
        assert_eq!(store.get(DOB_KEY).as_deref(), Some("1991-02-03"));
    }

    #[test]
    fn test_load_requires_both_keys() {
        let mut store = MemoryStore::new();
        store.set(DOB_KEY, "1990-01-01").unwrap();
        assert_eq!(load_form(&store), None);

        store.set(LIFE_EXPECTANCY_KEY, "75").unwrap();
        assert_eq!(load_form(&store), Some(FormInput::new("1990-01-01", "75")));
    }

    #[test]
    fn test_load_ignores_malformed_values() {
        let mut store = MemoryStore::new();
        store.set(DOB_KEY, "1990-01-01").unwrap();
        store.set(LIFE_EXPECTANCY_KEY, "NaN").unwrap();
        assert_eq!(load_form(&store), None);

        store.set(LIFE_EXPECTANCY_KEY, "80").unwrap();
        store.set(DOB_KEY, "not a date").unwrap();
        assert_eq!(load_form(&store), None);
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = MemoryStore::new();
        let first = FormInput::new("1990-01-01", "80").validate().unwrap();
        let second = FormInput::new("1985-07-04", "95").validate().unwrap();

        save_parameters(&mut store, &first).unwrap();
        save_parameters(&mut store, &second).unwrap();

        assert_eq!(store.get(DOB_KEY).as_deref(), Some("1985-07-04"));
        assert_eq!(store.get(LIFE_EXPECTANCY_KEY).as_deref(), Some("95"));
    }

    #[test]
    fn test_json_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("life-in-weeks.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(DOB_KEY), None);
        let params = FormInput::new("1990-01-01", "80").validate().unwrap();
        save_parameters(&mut store, &params).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(load_form(&reopened), Some(FormInput::new("1990-01-01", "80")));
    }

    #[test]
    fn test_json_file_store_recovers_from_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        fs::write(&path, r#"{"dob":"1990-01-"#).unwrap();
        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(DOB_KEY), None);

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert_eq!(JsonFileStore::open(&path).unwrap().get(DOB_KEY), None);
    }

    #[test]
    fn test_json_file_store_drops_non_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, r#"{"dob":"1990-01-01","lifeExpectancy":80}"#).unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get(DOB_KEY).as_deref(), Some("1990-01-01"));
        assert_eq!(store.get(LIFE_EXPECTANCY_KEY), None);
        assert_eq!(load_form(&store), None);

        // The next save rewrites the file cleanly.
        let params = FormInput::new("1990-01-01", "80").validate().unwrap();
        save_parameters(&mut store, &params).unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(load_form(&reopened), Some(FormInput::new("1990-01-01", "80")));
    }

    #[test]
    fn test_json_file_store_failed_write_keeps_old_pair() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let path = data_dir.join("store.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        let first = FormInput::new("1990-01-01", "80").validate().unwrap();
        save_parameters(&mut store, &first).unwrap();

        // Replace the data directory with a plain file so writes fail.
        fs::remove_dir_all(&data_dir).unwrap();
        fs::write(&data_dir, "").unwrap();

        let second = FormInput::new("1985-07-04", "95").validate().unwrap();
        let err = save_parameters(&mut store, &second).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
        assert_eq!(store.get(DOB_KEY).as_deref(), Some("1990-01-01"));
        assert_eq!(store.get(LIFE_EXPECTANCY_KEY).as_deref(), Some("80"));
    }
}
