use std::collections::HashSet;

use crate::model::item::{ItemId, TodoItem};
use crate::model::list::TodoList;

/// Error type for list operations
#[derive(Debug, thiserror::Error)]
pub enum OpError {
    #[error("index {index} out of range (list has {len} items)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Append a new item. Returns None (and leaves the list untouched) when the
/// trimmed text is empty.
pub fn add_item(list: &mut TodoList, text: &str) -> Option<ItemId> {
    if text.trim().is_empty() {
        return None;
    }
    let id = list.allocate_id();
    list.items.push(TodoItem::new(id, text.to_string()));
    Some(id)
}

/// Flip an item's done flag. Returns the new value.
///
/// This is a pure flag flip; moving the item to the completed list is the
/// separate `move_to_completed` transition.
pub fn toggle_done(list: &mut TodoList, index: usize) -> Result<bool, OpError> {
    let len = list.len();
    let item = list
        .items
        .get_mut(index)
        .ok_or(OpError::IndexOutOfRange { index, len })?;
    item.done = !item.done;
    Ok(item.done)
}

/// Replace an item's text in place. The done flag is untouched.
pub fn edit_text(list: &mut TodoList, index: usize, new_text: &str) -> Result<(), OpError> {
    let len = list.len();
    let item = list
        .items
        .get_mut(index)
        .ok_or(OpError::IndexOutOfRange { index, len })?;
    item.text = new_text.to_string();
    Ok(())
}

/// Remove the active item at `index`, returning it.
pub fn remove_at(list: &mut TodoList, index: usize) -> Result<TodoItem, OpError> {
    let len = list.len();
    if index >= len {
        return Err(OpError::IndexOutOfRange { index, len });
    }
    Ok(list.items.remove(index))
}

/// Remove every active item whose index is in `indices`. Returns the number
/// removed.
///
/// The kept set is computed against the current snapshot in one pass, so the
/// supplied indices never shift mid-removal. Out-of-range indices are
/// ignored.
pub fn remove_indices(list: &mut TodoList, indices: &HashSet<usize>) -> usize {
    let before = list.len();
    let mut idx = 0;
    list.items.retain(|_| {
        let keep = !indices.contains(&idx);
        idx += 1;
        keep
    });
    before - list.len()
}

/// Remove the completed item at `index`, returning it.
pub fn remove_from_completed(list: &mut TodoList, index: usize) -> Result<TodoItem, OpError> {
    let len = list.completed.len();
    if index >= len {
        return Err(OpError::IndexOutOfRange { index, len });
    }
    Ok(list.completed.remove(index))
}

/// Move an active item to the completed list as one transition: mark done,
/// remove from the active collection, append to the completed collection.
/// Returns false (no mutation) for an id not in the active list.
pub fn move_to_completed(list: &mut TodoList, id: ItemId) -> bool {
    let Some(pos) = list.position_of(id) else {
        return false;
    };
    let mut item = list.items.remove(pos);
    item.done = true;
    list.completed.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn list_of(texts: &[&str]) -> TodoList {
        let mut list = TodoList::default();
        for t in texts {
            add_item(&mut list, t).unwrap();
        }
        list
    }

    fn texts(list: &TodoList) -> Vec<&str> {
        list.items.iter().map(|i| i.text.as_str()).collect()
    }

    #[test]
    fn add_appends_in_order() {
        let list = list_of(&["buy milk", "walk dog"]);
        assert_eq!(texts(&list), vec!["buy milk", "walk dog"]);
        assert!(list.items.iter().all(|i| !i.done));
        assert!(list.items.iter().all(|i| i.added.is_some()));
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut list = list_of(&["a"]);
        assert!(add_item(&mut list, "").is_none());
        assert!(add_item(&mut list, "   ").is_none());
        assert!(add_item(&mut list, "\t\n").is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn add_assigns_distinct_ids() {
        let list = list_of(&["a", "b", "c"]);
        let mut ids: Vec<ItemId> = list.items.iter().map(|i| i.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn toggle_twice_restores_flag() {
        let mut list = list_of(&["a"]);
        assert!(toggle_done(&mut list, 0).unwrap());
        assert!(!toggle_done(&mut list, 0).unwrap());
        assert!(!list.items[0].done);
    }

    #[test]
    fn toggle_out_of_range_is_error() {
        let mut list = list_of(&["a"]);
        assert!(matches!(
            toggle_done(&mut list, 1),
            Err(OpError::IndexOutOfRange { index: 1, len: 1 })
        ));
        assert!(!list.items[0].done);
    }

    #[test]
    fn edit_replaces_text_keeps_done() {
        let mut list = list_of(&["a"]);
        toggle_done(&mut list, 0).unwrap();
        edit_text(&mut list, 0, "b").unwrap();
        assert_eq!(list.items[0].text, "b");
        assert!(list.items[0].done);
    }

    #[test]
    fn edit_out_of_range_is_noop() {
        let mut list = list_of(&["a"]);
        assert!(edit_text(&mut list, 5, "b").is_err());
        assert_eq!(list.items[0].text, "a");
    }

    #[test]
    fn remove_at_compacts() {
        let mut list = list_of(&["a", "b", "c"]);
        let removed = remove_at(&mut list, 1).unwrap();
        assert_eq!(removed.text, "b");
        assert_eq!(texts(&list), vec!["a", "c"]);
    }

    #[test]
    fn remove_indices_is_order_independent() {
        // Removing {0, 2} must not shift index 2 when 0 goes first.
        let mut list = list_of(&["a", "b", "c", "d"]);
        let removed = remove_indices(&mut list, &HashSet::from([2, 0]));
        assert_eq!(removed, 2);
        assert_eq!(texts(&list), vec!["b", "d"]);
    }

    #[test]
    fn remove_indices_length_law() {
        let mut list = list_of(&["a", "b", "c", "d", "e"]);
        // Two valid indices plus two out-of-range ones
        let removed = remove_indices(&mut list, &HashSet::from([1, 3, 10, 99]));
        assert_eq!(removed, 2);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn remove_indices_empty_set_is_noop() {
        let mut list = list_of(&["a", "b"]);
        assert_eq!(remove_indices(&mut list, &HashSet::new()), 0);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn move_to_completed_is_single_transition() {
        let mut list = list_of(&["a", "b"]);
        let id = list.items[0].id;
        assert!(move_to_completed(&mut list, id));
        assert_eq!(texts(&list), vec!["b"]);
        assert_eq!(list.completed.len(), 1);
        assert_eq!(list.completed[0].text, "a");
        assert!(list.completed[0].done);
    }

    #[test]
    fn move_to_completed_unknown_id_is_noop() {
        let mut list = list_of(&["a"]);
        assert!(!move_to_completed(&mut list, 999));
        assert_eq!(list.len(), 1);
        assert!(list.completed.is_empty());
    }

    #[test]
    fn second_toggle_after_move_addresses_different_element() {
        // With the separate completed list, toggling index 0 to done moves
        // the item out, so index 0 now addresses the next element (or is
        // out of range on a one-item list).
        let mut list = list_of(&["a", "b"]);
        toggle_done(&mut list, 0).unwrap();
        let id = list.items[0].id;
        move_to_completed(&mut list, id);
        assert_eq!(list.items[0].text, "b");

        let mut single = list_of(&["only"]);
        toggle_done(&mut single, 0).unwrap();
        let id = single.items[0].id;
        move_to_completed(&mut single, id);
        assert!(matches!(
            toggle_done(&mut single, 0),
            Err(OpError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn remove_from_completed_compacts() {
        let mut list = list_of(&["a", "b"]);
        let id_a = list.items[0].id;
        let id_b = list.items[1].id;
        move_to_completed(&mut list, id_a);
        move_to_completed(&mut list, id_b);
        remove_from_completed(&mut list, 0).unwrap();
        assert_eq!(list.completed.len(), 1);
        assert_eq!(list.completed[0].text, "b");
        assert!(remove_from_completed(&mut list, 5).is_err());
    }
}
