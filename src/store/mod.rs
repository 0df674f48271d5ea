pub mod edit;
pub mod selection;

pub use edit::EditState;
pub use selection::Selection;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::io::config_io::{self, ConfigError};
use crate::io::journal::{self, JournalCategory, JournalEntry};
use crate::io::kv::{COMPLETED_KEY, KvStore, TODOS_KEY};
use crate::model::config::StoreConfig;
use crate::model::item::{ItemId, TodoItem};
use crate::model::list::TodoList;
use crate::ops::list_ops::{self, OpError};

/// Outcome of the most recent persistence attempt. The rendering layer
/// shows `Failed` as a banner/warning rather than an exception; in-memory
/// state stays authoritative until the next successful save.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    /// Nothing written yet this session.
    #[default]
    Clean,
    Saved,
    Failed { key: String, message: String },
}

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The done flag was flipped in place.
    Toggled(bool),
    /// The item was marked done and moved to the completed list.
    MovedToCompleted,
}

/// The to-do list store: owns the collections, the persistence gateway,
/// and the transient selection/edit state.
///
/// Every mutating method applies the in-memory change and immediately
/// persists the affected key(s), recording the outcome in `save_status`.
pub struct TodoStore {
    dir: PathBuf,
    config: StoreConfig,
    kv: KvStore,
    pub list: TodoList,
    pub selection: Selection,
    pub edit: EditState,
    save_status: SaveStatus,
}

impl TodoStore {
    /// Open the store at `dir`: load config, then both collections.
    /// Corrupt item data degrades to empty (and is journaled by the
    /// gateway); a corrupt config is a startup error.
    pub fn open(dir: &Path) -> Result<Self, ConfigError> {
        let config = config_io::read_config(dir)?;
        let kv = KvStore::new(dir.to_path_buf());
        let items = kv.load_items(TODOS_KEY);
        let completed = kv.load_items(COMPLETED_KEY);
        Ok(TodoStore {
            dir: dir.to_path_buf(),
            config,
            kv,
            list: TodoList::from_loaded(items, completed),
            selection: Selection::default(),
            edit: EditState::default(),
            save_status: SaveStatus::default(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn save_status(&self) -> &SaveStatus {
        &self.save_status
    }

    // -----------------------------------------------------------------
    // Collection mutations (write-through)
    // -----------------------------------------------------------------

    /// Add an item. No-op (returns None) for blank text.
    pub fn add(&mut self, text: &str) -> Option<ItemId> {
        let id = list_ops::add_item(&mut self.list, text)?;
        self.persist(TODOS_KEY);
        Some(id)
    }

    /// Toggle the done flag at `index`. With separate completed tracking
    /// on, toggling to done moves the item to the completed list as a
    /// single transition and persists both keys.
    pub fn toggle_done(&mut self, index: usize) -> Result<ToggleOutcome, OpError> {
        let now_done = list_ops::toggle_done(&mut self.list, index)?;
        if now_done && self.config.store.track_completed_separately {
            let id = self.list.items[index].id;
            list_ops::move_to_completed(&mut self.list, id);
            self.prune_transient();
            self.persist(TODOS_KEY);
            self.persist(COMPLETED_KEY);
            Ok(ToggleOutcome::MovedToCompleted)
        } else {
            self.persist(TODOS_KEY);
            Ok(ToggleOutcome::Toggled(now_done))
        }
    }

    /// Replace the text at `index`.
    pub fn edit_text(&mut self, index: usize, new_text: &str) -> Result<(), OpError> {
        list_ops::edit_text(&mut self.list, index, new_text)?;
        self.persist(TODOS_KEY);
        Ok(())
    }

    /// Remove the active item at `index`.
    pub fn remove_at(&mut self, index: usize) -> Result<TodoItem, OpError> {
        let removed = list_ops::remove_at(&mut self.list, index)?;
        self.prune_transient();
        self.persist(TODOS_KEY);
        Ok(removed)
    }

    /// Remove the completed item at `index`.
    pub fn remove_from_completed(&mut self, index: usize) -> Result<TodoItem, OpError> {
        let removed = list_ops::remove_from_completed(&mut self.list, index)?;
        self.persist(COMPLETED_KEY);
        Ok(removed)
    }

    // -----------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------

    /// Toggle selection of the item at `index`. An out-of-range index is a
    /// valid no-op, since absence is not an error for selection.
    pub fn toggle_select(&mut self, index: usize) {
        if let Some(item) = self.list.get(index) {
            self.selection
                .toggle(item.id, self.config.store.multi_select);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Remove every selected item, then clear the selection. Ids are
    /// resolved against the collection at call time, so a selection made
    /// stale by intervening mutations just shrinks; a stale id is never
    /// dereferenced as a position.
    pub fn remove_selected(&mut self) -> usize {
        let indices: HashSet<usize> = self
            .selection
            .ids()
            .filter_map(|id| self.list.position_of(id))
            .collect();
        self.selection.clear();
        self.remove_at_indices(&indices)
    }

    /// Remove the active items at the given positions, resolved against the
    /// current snapshot. Out-of-range indices are ignored.
    pub fn remove_at_indices(&mut self, indices: &HashSet<usize>) -> usize {
        if indices.is_empty() {
            return 0;
        }
        let removed = list_ops::remove_indices(&mut self.list, indices);
        if removed > 0 {
            self.prune_transient();
            self.persist(TODOS_KEY);
        }
        removed
    }

    // -----------------------------------------------------------------
    // Edit controller
    // -----------------------------------------------------------------

    /// Begin editing the item at `index`, seeding the scratch from its
    /// current text. An edit already in progress on another item is
    /// committed first, never silently discarded.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), OpError> {
        let len = self.list.len();
        let Some(item) = self.list.get(index) else {
            return Err(OpError::IndexOutOfRange { index, len });
        };
        let (id, text) = (item.id, item.text.clone());
        if self.edit.is_editing() && self.edit.editing_id() != Some(id) {
            self.commit_edit();
        }
        self.edit.begin(id, &text);
        Ok(())
    }

    /// Commit the in-progress edit, if any. A no-op when idle, and when
    /// the edited item no longer exists.
    pub fn commit_edit(&mut self) {
        let Some((id, scratch)) = self.edit.take() else {
            return;
        };
        if let Some(index) = self.list.position_of(id) {
            // position was just resolved, so this cannot be out of range
            let _ = self.edit_text(index, &scratch);
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    // -----------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------

    /// Write one key's snapshot through the gateway. On failure the
    /// snapshot goes to the journal, so the data is preserved even when the
    /// store isn't, and `save_status` carries the signal for the UI.
    fn persist(&mut self, key: &str) {
        let items: &[TodoItem] = match key {
            COMPLETED_KEY => &self.list.completed,
            _ => &self.list.items,
        };
        match self.kv.save_items(key, items) {
            Ok(()) => {
                self.save_status = SaveStatus::Saved;
            }
            Err(e) => {
                journal::log_journal(
                    &self.dir,
                    JournalEntry {
                        timestamp: chrono::Utc::now(),
                        category: JournalCategory::Write,
                        description: "snapshot write failed".to_string(),
                        fields: vec![
                            ("Key".to_string(), key.to_string()),
                            ("Error".to_string(), e.to_string()),
                        ],
                        body: serde_json::to_string_pretty(items).unwrap_or_default(),
                    },
                );
                self.save_status = SaveStatus::Failed {
                    key: key.to_string(),
                    message: e.to_string(),
                };
            }
        }
    }

    /// Drop transient state that points at items no longer in the active
    /// list. Called after any removal or move.
    fn prune_transient(&mut self) {
        let alive: HashSet<ItemId> = self.list.items.iter().map(|i| i.id).collect();
        self.selection.retain(|id| alive.contains(&id));
        if let Some(id) = self.edit.editing_id()
            && !alive.contains(&id)
        {
            self.edit.cancel();
        }
    }
}
