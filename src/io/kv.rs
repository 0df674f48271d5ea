use std::fs;
use std::path::{Path, PathBuf};

use crate::io::journal::{self, JournalCategory, JournalEntry};
use crate::model::item::TodoItem;

/// Storage key for the active list.
pub const TODOS_KEY: &str = "todos";
/// Storage key for the completed list.
pub const COMPLETED_KEY: &str = "completedTodos";

/// Error type for store writes. Reads never error; see `load_items`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not serialize value for key {key}: {source}")]
    SerializeError {
        key: String,
        source: serde_json::Error,
    },
}

/// Key-value gateway to durable storage: one JSON file per key under the
/// store directory. The whole value is rewritten on every save; there is
/// no diffing and no append log.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    pub fn new(dir: PathBuf) -> Self {
        KvStore { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Load the sequence stored under `key`.
    ///
    /// A missing value loads as empty. An unreadable or unparseable value
    /// is journaled and loads as empty: corrupt data must not crash the
    /// caller, and the raw content is kept in the journal rather than
    /// dropped.
    pub fn load_items(&self, key: &str) -> Vec<TodoItem> {
        let path = self.key_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                journal::log_journal(
                    &self.dir,
                    JournalEntry {
                        timestamp: chrono::Utc::now(),
                        category: JournalCategory::Read,
                        description: "unreadable stored value".to_string(),
                        fields: vec![
                            ("Key".to_string(), key.to_string()),
                            ("Error".to_string(), e.to_string()),
                        ],
                        body: String::new(),
                    },
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&content) {
            Ok(items) => items,
            Err(e) => {
                journal::log_journal(
                    &self.dir,
                    JournalEntry {
                        timestamp: chrono::Utc::now(),
                        category: JournalCategory::Read,
                        description: "unparseable stored value".to_string(),
                        fields: vec![
                            ("Key".to_string(), key.to_string()),
                            ("Error".to_string(), e.to_string()),
                        ],
                        body: content,
                    },
                );
                Vec::new()
            }
        }
    }

    /// Serialize the full sequence and atomically replace the value under
    /// `key`. The result goes back to the caller so the failure can be
    /// surfaced; the caller journals the unsaved snapshot.
    pub fn save_items(&self, key: &str, items: &[TodoItem]) -> Result<(), StoreError> {
        let content =
            serde_json::to_string_pretty(items).map_err(|e| StoreError::SerializeError {
                key: key.to_string(),
                source: e,
            })?;
        let path = self.key_path(key);
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteError {
            path: path.clone(),
            source: e,
        })?;
        journal::atomic_write(&path, content.as_bytes())
            .map_err(|e| StoreError::WriteError { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn item(text: &str) -> TodoItem {
        TodoItem {
            id: 1,
            text: text.into(),
            done: false,
            added: None,
        }
    }

    #[test]
    fn missing_key_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let kv = KvStore::new(tmp.path().to_path_buf());
        assert!(kv.load_items(TODOS_KEY).is_empty());
        // no journal entry for a merely-absent value
        assert_eq!(journal::entry_count(tmp.path()), 0);
    }

    #[test]
    fn save_load_round_trip() {
        let tmp = TempDir::new().unwrap();
        let kv = KvStore::new(tmp.path().to_path_buf());
        let items = vec![item("buy milk"), item("walk dog")];
        kv.save_items(TODOS_KEY, &items).unwrap();
        assert_eq!(kv.load_items(TODOS_KEY), items);
    }

    #[test]
    fn save_replaces_prior_value() {
        let tmp = TempDir::new().unwrap();
        let kv = KvStore::new(tmp.path().to_path_buf());
        kv.save_items(TODOS_KEY, &[item("a"), item("b")]).unwrap();
        kv.save_items(TODOS_KEY, &[item("c")]).unwrap();
        let loaded = kv.load_items(TODOS_KEY);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text, "c");
    }

    #[test]
    fn corrupt_value_loads_empty_and_journals() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("todos.json"), "not json {{{").unwrap();
        let kv = KvStore::new(tmp.path().to_path_buf());
        assert!(kv.load_items(TODOS_KEY).is_empty());
        assert_eq!(journal::entry_count(tmp.path()), 1);
        let log = journal::read_journal(tmp.path()).unwrap();
        assert!(log.contains("not json {{{"));
    }

    #[test]
    fn legacy_records_tolerated() {
        // Older values carried only text (and sometimes done)
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("todos.json"),
            r#"[{"text":"a"},{"text":"b","done":true}]"#,
        )
        .unwrap();
        let kv = KvStore::new(tmp.path().to_path_buf());
        let items = kv.load_items(TODOS_KEY);
        assert_eq!(items.len(), 2);
        assert!(!items[0].done);
        assert!(items[1].done);
    }

    #[test]
    fn keys_are_independent() {
        let tmp = TempDir::new().unwrap();
        let kv = KvStore::new(tmp.path().to_path_buf());
        kv.save_items(TODOS_KEY, &[item("active")]).unwrap();
        kv.save_items(COMPLETED_KEY, &[item("finished")]).unwrap();
        assert_eq!(kv.load_items(TODOS_KEY)[0].text, "active");
        assert_eq!(kv.load_items(COMPLETED_KEY)[0].text, "finished");
    }
}
