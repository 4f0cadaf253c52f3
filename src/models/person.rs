//! Person (weighted consumer) model.

use serde::{Deserialize, Serialize};

use super::ItemId;

/// A person who contributes `importance` only when every required item is selected.
///
/// Required items are kept sorted and duplicate-free; a person listing the
/// same flavor twice still needs it (and pays for it) once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Weight added to the objective when fully satisfied.
    pub importance: u64,
    /// Items that must all be selected.
    pub items: Vec<ItemId>,
}

impl Person {
    /// Creates a person with the given importance and required items.
    pub fn new(importance: u64, items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut items: Vec<ItemId> = items.into_iter().collect();
        items.sort_unstable();
        items.dedup();
        Self { importance, items }
    }

    /// Number of distinct required items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Whether the person requires the given item.
    pub fn requires(&self, item: ItemId) -> bool {
        self.items.binary_search(&item).is_ok()
    }
}
