use serde::Serialize;

use crate::model::item::TodoItem;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct ItemJson {
    /// 1-based list number, as accepted by `tk done` / `tk rm`
    pub number: usize,
    pub id: u64,
    pub text: String,
    pub done: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub items: Vec<ItemJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<Vec<ItemJson>>,
}

pub fn items_to_json(items: &[TodoItem]) -> Vec<ItemJson> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| ItemJson {
            number: i + 1,
            id: item.id,
            text: item.text.clone(),
            done: item.done,
            added: item.added.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// Print items the way the TUI draws them: number, checkbox, text.
pub fn print_items(items: &[TodoItem]) {
    if items.is_empty() {
        println!("  (empty)");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        let mark = if item.done { 'x' } else { ' ' };
        println!("  {:>2}  [{}] {}", i + 1, mark, item.text);
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("error: could not serialize output: {}", e),
    }
}
