use crate::model::item::{ItemId, TodoItem};

/// The in-memory to-do list: the active collection, the completed
/// collection, and the id counter.
///
/// Invariants: both collections are dense (removals compact), the two are
/// disjoint by id, and `next_id` is greater than every id in either.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    /// Active items, insertion order = display order.
    pub items: Vec<TodoItem>,
    /// Items moved out of the active list when completed tracking is on.
    pub completed: Vec<TodoItem>,
    next_id: ItemId,
}

impl TodoList {
    /// Build a list from loaded collections. Records without an id (legacy
    /// form) get fresh ones, and the counter is set past the maximum seen.
    pub fn from_loaded(items: Vec<TodoItem>, completed: Vec<TodoItem>) -> Self {
        let mut list = TodoList {
            items,
            completed,
            next_id: 0,
        };
        let max_id = list
            .items
            .iter()
            .chain(list.completed.iter())
            .map(|i| i.id)
            .max()
            .unwrap_or(0);
        list.next_id = max_id + 1;
        for item in list.items.iter_mut().chain(list.completed.iter_mut()) {
            if item.id == 0 {
                item.id = list.next_id;
                list.next_id += 1;
            }
        }
        list
    }

    /// Allocate the next stable id.
    pub fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current position of an active item by id.
    pub fn position_of(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    /// Active item at a position.
    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// Active item by id.
    pub fn find(&self, id: ItemId) -> Option<&TodoItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn find_mut(&mut self, id: ItemId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|i| i.id == id)
    }
}
