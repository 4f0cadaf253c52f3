//! Selection (candidate solution) model.
//!
//! A selection is a duplicate-free set of item ids with O(1) membership
//! tests. Members are kept in insertion order so that random draws over
//! the selection depend only on the seeded random stream, never on hashing.

use super::ItemId;

/// The current candidate subset of items.
///
/// Backed by a membership bitmap (indexed by 1-based item id) plus the
/// member list in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    members: Vec<ItemId>,
    present: Vec<bool>,
}

impl Selection {
    /// Creates an empty selection able to hold items `1..=item_count`.
    pub fn new(item_count: usize) -> Self {
        Self {
            members: Vec::new(),
            present: vec![false; item_count + 1],
        }
    }

    /// Creates a selection holding the given items.
    pub fn with_items(item_count: usize, items: impl IntoIterator<Item = ItemId>) -> Self {
        let mut selection = Self::new(item_count);
        for item in items {
            selection.insert(item);
        }
        selection
    }

    /// Whether `item` is selected.
    #[inline]
    pub fn contains(&self, item: ItemId) -> bool {
        self.present.get(item).copied().unwrap_or(false)
    }

    /// Whether every item in `items` is selected.
    pub fn contains_all(&self, items: &[ItemId]) -> bool {
        items.iter().all(|&i| self.contains(i))
    }

    /// Adds an item. Returns `false` if it was already selected.
    pub fn insert(&mut self, item: ItemId) -> bool {
        if self.contains(item) {
            return false;
        }
        if item >= self.present.len() {
            self.present.resize(item + 1, false);
        }
        self.present[item] = true;
        self.members.push(item);
        true
    }

    /// Removes an item. Returns `false` if it was not selected.
    pub fn remove(&mut self, item: ItemId) -> bool {
        if !self.contains(item) {
            return false;
        }
        self.present[item] = false;
        if let Some(pos) = self.members.iter().position(|&m| m == item) {
            self.members.remove(pos);
        }
        true
    }

    /// Removes every item in `items`.
    pub fn remove_all(&mut self, items: &[ItemId]) {
        for &item in items {
            if let Some(flag) = self.present.get_mut(item) {
                *flag = false;
            }
        }
        let present = &self.present;
        self.members.retain(|&m| present[m]);
    }

    /// Number of selected items.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether nothing is selected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Selected items in insertion order.
    pub fn items(&self) -> &[ItemId] {
        &self.members
    }

    /// Iterates selected items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.members.iter().copied()
    }

    /// Selected items in ascending id order.
    pub fn sorted_items(&self) -> Vec<ItemId> {
        let mut items = self.members.clone();
        items.sort_unstable();
        items
    }
}
