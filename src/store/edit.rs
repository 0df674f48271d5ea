use crate::model::item::ItemId;
use crate::util::unicode;

/// Transient in-progress edit buffer, keyed to one item at a time.
///
/// Two states: Idle, and Editing with a scratch string separate from the
/// committed text until the edit is committed. The scratch is what the UI
/// renders for that item while the edit is in progress. Never persisted.
#[derive(Debug, Clone, Default)]
pub enum EditState {
    #[default]
    Idle,
    Editing {
        id: ItemId,
        scratch: String,
        /// Byte offset of the edit cursor, always on a grapheme boundary.
        cursor: usize,
    },
}

impl EditState {
    /// Begin editing an item, seeding the scratch from its current text.
    pub fn begin(&mut self, id: ItemId, text: &str) {
        *self = EditState::Editing {
            id,
            scratch: text.to_string(),
            cursor: text.len(),
        };
    }

    /// Take the finished edit, returning to Idle. None when not editing.
    pub fn take(&mut self) -> Option<(ItemId, String)> {
        match std::mem::take(self) {
            EditState::Idle => None,
            EditState::Editing { id, scratch, .. } => Some((id, scratch)),
        }
    }

    /// Discard any in-progress edit.
    pub fn cancel(&mut self) {
        *self = EditState::Idle;
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditState::Editing { .. })
    }

    /// Id of the item being edited, if any.
    pub fn editing_id(&self) -> Option<ItemId> {
        match self {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(*id),
        }
    }

    /// Scratch text, if editing.
    pub fn scratch(&self) -> Option<&str> {
        match self {
            EditState::Idle => None,
            EditState::Editing { scratch, .. } => Some(scratch),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let EditState::Editing {
            scratch, cursor, ..
        } = self
        {
            scratch.insert(*cursor, c);
            *cursor += c.len_utf8();
        }
    }

    pub fn backspace(&mut self) {
        if let EditState::Editing {
            scratch, cursor, ..
        } = self
            && let Some(prev) = unicode::prev_grapheme_boundary(scratch, *cursor)
        {
            scratch.replace_range(prev..*cursor, "");
            *cursor = prev;
        }
    }

    pub fn cursor_left(&mut self) {
        if let EditState::Editing {
            scratch, cursor, ..
        } = self
            && let Some(prev) = unicode::prev_grapheme_boundary(scratch, *cursor)
        {
            *cursor = prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if let EditState::Editing {
            scratch, cursor, ..
        } = self
            && let Some(next) = unicode::next_grapheme_boundary(scratch, *cursor)
        {
            *cursor = next;
        }
    }

    pub fn cursor_home(&mut self) {
        if let EditState::Editing { cursor, .. } = self {
            *cursor = 0;
        }
    }

    pub fn cursor_end(&mut self) {
        if let EditState::Editing {
            scratch, cursor, ..
        } = self
        {
            *cursor = scratch.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_seeds_scratch_from_text() {
        let mut edit = EditState::default();
        edit.begin(3, "walk dog");
        assert!(edit.is_editing());
        assert_eq!(edit.editing_id(), Some(3));
        assert_eq!(edit.scratch(), Some("walk dog"));
    }

    #[test]
    fn take_returns_edit_and_resets() {
        let mut edit = EditState::default();
        edit.begin(3, "a");
        edit.insert_char('b');
        assert_eq!(edit.take(), Some((3, "ab".to_string())));
        assert!(!edit.is_editing());
        assert_eq!(edit.take(), None);
    }

    #[test]
    fn cancel_discards() {
        let mut edit = EditState::default();
        edit.begin(1, "a");
        edit.cancel();
        assert!(!edit.is_editing());
    }

    #[test]
    fn typing_and_backspace() {
        let mut edit = EditState::default();
        edit.begin(1, "");
        edit.insert_char('h');
        edit.insert_char('i');
        edit.backspace();
        assert_eq!(edit.scratch(), Some("h"));
    }

    #[test]
    fn cursor_moves_by_grapheme() {
        let mut edit = EditState::default();
        edit.begin(1, "e\u{301}x");
        edit.cursor_home();
        edit.cursor_right();
        // cursor skipped the full combined grapheme
        edit.insert_char('-');
        assert_eq!(edit.scratch(), Some("e\u{301}-x"));
    }

    #[test]
    fn mid_string_insert() {
        let mut edit = EditState::default();
        edit.begin(1, "ad");
        edit.cursor_left();
        edit.insert_char('b');
        edit.insert_char('c');
        assert_eq!(edit.scratch(), Some("abcd"));
    }

    #[test]
    fn idle_ops_are_noops() {
        let mut edit = EditState::default();
        edit.insert_char('x');
        edit.backspace();
        edit.cursor_left();
        assert!(!edit.is_editing());
        assert_eq!(edit.scratch(), None);
    }
}
