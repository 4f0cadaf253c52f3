//! Problem instance model.
//!
//! An instance is the immutable problem data: item costs, a budget,
//! precedence edges between items and the weighted people to satisfy.
//! All queries are pure and may be asked of any candidate selection.

use serde::{Deserialize, Serialize};

use super::{ItemId, Person, Selection};

/// A flavor-selection problem instance.
///
/// # Dependencies
/// An edge `i -> j` means "selecting `j` requires `i`". Edges may chain
/// (`a` requires `b` requires `c`); the validity check covers chains because
/// every member of a selection is checked. Cycles are not detected here: an
/// item on a cycle is only valid in a set that also holds the whole cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    /// Number of selectable items, numbered `1..=item_count`.
    pub item_count: usize,
    /// Cap on total selected cost.
    pub budget: f64,
    /// Cost per item; `costs[i - 1]` is the cost of item `i`.
    pub costs: Vec<u64>,
    /// People, in input order.
    pub people: Vec<Person>,
    /// `requires[j]` lists the items `j` depends on. Slot 0 is unused.
    requires: Vec<Vec<ItemId>>,
}

impl Instance {
    /// Creates an instance without dependencies or people.
    pub fn new(item_count: usize, budget: f64, costs: Vec<u64>) -> Self {
        Self {
            item_count,
            budget,
            costs,
            people: Vec::new(),
            requires: vec![Vec::new(); item_count + 1],
        }
    }

    /// Adds the edge "`item` requires `prerequisite`".
    pub fn with_dependency(mut self, prerequisite: ItemId, item: ItemId) -> Self {
        self.add_dependency(prerequisite, item);
        self
    }

    /// Adds a person.
    pub fn with_person(mut self, person: Person) -> Self {
        self.people.push(person);
        self
    }

    /// Adds the edge "`item` requires `prerequisite`". Repeated edges are kept once.
    pub fn add_dependency(&mut self, prerequisite: ItemId, item: ItemId) {
        if item >= self.requires.len() {
            self.requires.resize(item + 1, Vec::new());
        }
        let reqs = &mut self.requires[item];
        if !reqs.contains(&prerequisite) {
            reqs.push(prerequisite);
        }
    }

    /// Items that `item` directly requires.
    pub fn requirements(&self, item: ItemId) -> &[ItemId] {
        self.requires.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All dependency edges as `(prerequisite, item)` pairs.
    pub fn dependency_edges(&self) -> impl Iterator<Item = (ItemId, ItemId)> + '_ {
        self.requires
            .iter()
            .enumerate()
            .flat_map(|(item, reqs)| reqs.iter().map(move |&pre| (pre, item)))
    }

    /// Number of dependency edges.
    pub fn dependency_count(&self) -> usize {
        self.requires.iter().map(Vec::len).sum()
    }

    /// Cost of a single item.
    ///
    /// # Panics
    /// If `item` is outside `1..=costs.len()`.
    #[inline]
    pub fn cost(&self, item: ItemId) -> u64 {
        self.costs[item - 1]
    }

    /// Whether a total cost stays within the budget.
    #[inline]
    pub fn fits_budget(&self, cost: u64) -> bool {
        cost as f64 <= self.budget
    }

    /// Checks that every selected item has all of its prerequisites selected.
    pub fn is_valid(&self, selection: &Selection) -> bool {
        selection.iter().all(|item| {
            self.requirements(item)
                .iter()
                .all(|&pre| selection.contains(pre))
        })
    }

    /// Checks validity of `selection ∪ extra` without materializing the union.
    ///
    /// Every member of the union is checked, not only the new ones.
    pub fn is_valid_with(&self, selection: &Selection, extra: &[ItemId]) -> bool {
        let member = |i: ItemId| selection.contains(i) || extra.contains(&i);
        selection.iter().chain(extra.iter().copied()).all(|item| {
            self.requirements(item).iter().all(|&pre| member(pre))
        })
    }

    /// Sum of costs over the selection, saturating at `u64::MAX`.
    pub fn total_cost(&self, selection: &Selection) -> u64 {
        selection
            .iter()
            .map(|i| self.cost(i))
            .fold(0, u64::saturating_add)
    }

    /// Sum of importance over people whose required items are all selected.
    pub fn total_importance(&self, selection: &Selection) -> u64 {
        self.people
            .iter()
            .filter(|p| selection.contains_all(&p.items))
            .map(|p| p.importance)
            .sum()
    }

    /// Items from `items` that are not yet selected, in the given order.
    pub fn missing_items(&self, selection: &Selection, items: &[ItemId]) -> Vec<ItemId> {
        items
            .iter()
            .copied()
            .filter(|&i| !selection.contains(i))
            .collect()
    }

    /// Cost of adding `items` to the selection (already-selected items are free).
    ///
    /// Saturates at `u64::MAX`.
    pub fn marginal_cost(&self, selection: &Selection, items: &[ItemId]) -> u64 {
        items
            .iter()
            .filter(|&&i| !selection.contains(i))
            .map(|&i| self.cost(i))
            .fold(0, u64::saturating_add)
    }

    /// Person indices sorted by importance, descending.
    ///
    /// The sort is stable: ties keep their input order.
    pub fn importance_order(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.people.len()).collect();
        indices.sort_by(|&a, &b| self.people[b].importance.cmp(&self.people[a].importance));
        indices
    }

    /// An empty selection sized for this instance.
    pub fn empty_selection(&self) -> Selection {
        Selection::new(self.item_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn chain_instance() -> Instance {
        // 3 requires 2 requires 1
        Instance::new(3, 10.0, vec![1, 1, 1])
            .with_dependency(1, 2)
            .with_dependency(2, 3)
    }

    #[test]
    fn test_instance_builder() {
        let inst = Instance::new(3, 2.0, vec![1, 2, 3])
            .with_dependency(1, 2)
            .with_dependency(1, 2)
            .with_person(Person::new(5, vec![1, 2]));

        assert_eq!(inst.item_count, 3);
        assert_eq!(inst.cost(3), 3);
        assert_eq!(inst.requirements(2), &[1]);
        assert!(inst.requirements(1).is_empty());
        assert_eq!(inst.dependency_count(), 1);
        assert_eq!(inst.dependency_edges().collect::<Vec<_>>(), vec![(1, 2)]);
        assert_eq!(inst.people.len(), 1);
    }

    #[test]
    fn test_is_valid_chain() {
        let inst = chain_instance();
        let n = inst.item_count;
        assert!(inst.is_valid(&Selection::new(n)));
        assert!(inst.is_valid(&Selection::with_items(n, vec![1])));
        assert!(inst.is_valid(&Selection::with_items(n, vec![1, 2])));
        assert!(inst.is_valid(&Selection::with_items(n, vec![1, 2, 3])));
        assert!(!inst.is_valid(&Selection::with_items(n, vec![2])));
        assert!(!inst.is_valid(&Selection::with_items(n, vec![2, 3])));
        assert!(!inst.is_valid(&Selection::with_items(n, vec![1, 3])));
    }

    #[test]
    fn test_is_valid_with_checks_whole_union() {
        let inst = chain_instance();
        let sel = Selection::with_items(3, vec![1]);
        assert!(inst.is_valid_with(&sel, &[2]));
        assert!(!inst.is_valid_with(&sel, &[3]));
        assert!(inst.is_valid_with(&sel, &[3, 2]));

        // An existing member that is already invalid poisons every union.
        let broken = Selection::with_items(3, vec![3]);
        assert!(!inst.is_valid_with(&broken, &[1]));
    }

    #[test]
    fn test_cycle_needs_whole_cycle() {
        let inst = Instance::new(2, 10.0, vec![1, 1])
            .with_dependency(1, 2)
            .with_dependency(2, 1);
        let empty = inst.empty_selection();
        assert!(!inst.is_valid_with(&empty, &[1]));
        assert!(!inst.is_valid_with(&empty, &[2]));
        assert!(inst.is_valid_with(&empty, &[1, 2]));
    }

    #[test]
    fn test_total_cost() {
        let inst = Instance::new(3, 10.0, vec![4, 5, 6]);
        assert_eq!(inst.total_cost(&Selection::new(3)), 0);
        assert_eq!(inst.total_cost(&Selection::with_items(3, vec![1, 3])), 10);
    }

    #[test]
    fn test_cost_sums_saturate() {
        let half = 1u64 << 63;
        let inst = Instance::new(2, 10.0, vec![half, half]);
        let both = Selection::with_items(2, vec![1, 2]);
        assert_eq!(inst.total_cost(&both), u64::MAX);
        assert_eq!(inst.marginal_cost(&Selection::new(2), &[1, 2]), u64::MAX);
        assert!(!inst.fits_budget(inst.total_cost(&both)));
    }

    #[test]
    fn test_marginal_cost_and_missing() {
        let inst = Instance::new(3, 10.0, vec![4, 5, 6]);
        let sel = Selection::with_items(3, vec![2]);
        assert_eq!(inst.marginal_cost(&sel, &[1, 2, 3]), 10);
        assert_eq!(inst.missing_items(&sel, &[3, 2, 1]), vec![3, 1]);
    }

    #[test]
    fn test_total_importance_requires_full_set() {
        let inst = Instance::new(3, 10.0, vec![1, 1, 1])
            .with_person(Person::new(5, vec![1, 2]))
            .with_person(Person::new(3, vec![3]))
            .with_person(Person::new(2, vec![]));

        assert_eq!(inst.total_importance(&Selection::new(3)), 2);
        assert_eq!(inst.total_importance(&Selection::with_items(3, vec![1])), 2);
        assert_eq!(inst.total_importance(&Selection::with_items(3, vec![1, 2])), 7);
        assert_eq!(inst.total_importance(&Selection::with_items(3, vec![1, 2, 3])), 10);
    }

    #[test]
    fn test_importance_order_is_stable() {
        let inst = Instance::new(1, 1.0, vec![1])
            .with_person(Person::new(3, vec![1]))
            .with_person(Person::new(9, vec![1]))
            .with_person(Person::new(3, vec![1]))
            .with_person(Person::new(9, vec![1]));
        assert_eq!(inst.importance_order(), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_fits_budget() {
        let inst = Instance::new(1, 2.5, vec![1]);
        assert!(inst.fits_budget(2));
        assert!(!inst.fits_budget(3));
    }

    #[test]
    fn test_total_importance_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let n = rng.random_range(1..=6);
            let mut inst = Instance::new(n, 100.0, vec![1; n]);
            for _ in 0..rng.random_range(0..6) {
                let k = rng.random_range(0..=n);
                let items: Vec<ItemId> = (0..k).map(|_| rng.random_range(1..=n)).collect();
                inst = inst.with_person(Person::new(rng.random_range(0..10), items));
            }

            for mask in 0u32..(1 << n) {
                let chosen: Vec<ItemId> = (1..=n).filter(|i| mask & (1 << (i - 1)) != 0).collect();
                let sel = Selection::with_items(n, chosen.clone());
                let expected: u64 = inst
                    .people
                    .iter()
                    .filter(|p| p.items.iter().all(|i| chosen.contains(i)))
                    .map(|p| p.importance)
                    .sum();
                assert_eq!(inst.total_importance(&sel), expected);
            }
        }
    }
}
