use serde::{Deserialize, Serialize};

/// Stable item identifier, assigned from a monotonic counter.
///
/// Display position and identity are deliberately separate: selection and
/// edit state key off ids, so an insertion or removal elsewhere in the list
/// never redirects them to a different item.
pub type ItemId = u64;

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Stable id. Stored records from older versions may lack it; those
    /// are assigned fresh ids on load.
    #[serde(default)]
    pub id: ItemId,
    /// User-supplied text. Never blank once stored (the add guard rejects
    /// whitespace-only input).
    pub text: String,
    /// Completion flag. Absent in stored data reads as false.
    #[serde(default)]
    pub done: bool,
    /// `YYYY-MM-DD` creation stamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl TodoItem {
    /// Create a new not-done item stamped with today's date.
    pub fn new(id: ItemId, text: String) -> Self {
        TodoItem {
            id,
            text,
            done: false,
            added: Some(today_str()),
        }
    }
}

/// Today's date as `YYYY-MM-DD`.
pub fn today_str() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
