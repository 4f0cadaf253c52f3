//! Random destruction step.
//!
//! Removes `max(1, floor(rate * |selection|))` distinct items, drawn
//! uniformly without replacement from the current selection.

use rand::seq::index;
use rand::Rng;

use crate::models::{ItemId, Selection};

/// Number of items removed from a selection of `len` items.
///
/// Never less than 1 and never more than `len` (for `len > 0` and a rate in (0, 1]).
pub fn removal_count(len: usize, rate: f64) -> usize {
    let raw = (rate * len as f64).floor() as usize;
    raw.max(1).min(len.max(1))
}

/// Removes a random subset from `selection` and returns the removed items.
///
/// An empty selection is left untouched and yields no victims.
pub fn destroy<R: Rng + ?Sized>(selection: &mut Selection, rate: f64, rng: &mut R) -> Vec<ItemId> {
    if selection.is_empty() {
        return Vec::new();
    }

    let count = removal_count(selection.len(), rate);
    let members = selection.items();
    let victims: Vec<ItemId> = index::sample(rng, members.len(), count)
        .into_iter()
        .map(|i| members[i])
        .collect();

    selection.remove_all(&victims);
    victims
}
