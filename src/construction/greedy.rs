//! Importance-descending greedy constructor.
//!
//! # Algorithm
//!
//! 1. Sort people by importance, descending (stable: ties keep input order).
//! 2. For each person:
//!    - skip if every required item is already selected;
//!    - compute the marginal cost of the missing items;
//!    - admit the person if `cost + marginal <= budget` and the union of the
//!      selection with the missing items is dependency-valid;
//!    - otherwise skip the person for the rest of this pass.
//!
//! # Complexity
//! O(p * (k + s * d)) where p=people, k=items per person, s=selection size,
//! d=prerequisites per item (the validity check rescans the whole union).

use tracing::trace;

use crate::models::{Instance, Selection};

/// Result of a greedy pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// The feasible selection produced.
    pub selection: Selection,
    /// Running total cost of `selection`.
    pub cost: u64,
}

/// Single-pass greedy constructor.
///
/// The importance order is computed once and reused by every pass, so the
/// repair step of the iterated search costs one scan over the people.
///
/// # Example
///
/// ```
/// use u_festival::construction::GreedyConstructor;
/// use u_festival::models::{Instance, Person};
///
/// let instance = Instance::new(3, 2.0, vec![1, 1, 1])
///     .with_person(Person::new(5, vec![1, 2]))
///     .with_person(Person::new(3, vec![3]));
///
/// let built = GreedyConstructor::new(&instance).construct();
/// assert_eq!(built.selection.sorted_items(), vec![1, 2]);
/// assert_eq!(built.cost, 2);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyConstructor<'a> {
    instance: &'a Instance,
    order: Vec<usize>,
}

impl<'a> GreedyConstructor<'a> {
    /// Creates a constructor for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            order: instance.importance_order(),
        }
    }

    /// Person indices in the order they are considered.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Builds a selection from scratch.
    pub fn construct(&self) -> Construction {
        self.extend(self.instance.empty_selection(), 0)
    }

    /// Runs a greedy pass starting from `selection`, whose total cost is `cost`.
    ///
    /// Items already in `selection` are never removed. If `selection` is
    /// feasible, the result is feasible too.
    pub fn extend(&self, mut selection: Selection, mut cost: u64) -> Construction {
        let instance = self.instance;

        for &idx in &self.order {
            let person = &instance.people[idx];
            if selection.contains_all(&person.items) {
                continue;
            }

            let missing = instance.missing_items(&selection, &person.items);
            // Overflow can never fit the budget.
            let Some(total) = missing
                .iter()
                .try_fold(cost, |acc, &i| acc.checked_add(instance.cost(i)))
            else {
                continue;
            };

            if instance.fits_budget(total) && instance.is_valid_with(&selection, &missing) {
                trace!(person = idx, marginal = total - cost, "person admitted");
                for item in missing {
                    selection.insert(item);
                }
                cost = total;
            }
        }

        Construction { selection, cost }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, Person};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_instance(rng: &mut StdRng) -> Instance {
        let n = rng.random_range(1..=8);
        let costs: Vec<u64> = (0..n).map(|_| rng.random_range(0..5)).collect();
        let budget = rng.random_range(0..15) as f64;
        let mut inst = Instance::new(n, budget, costs);
        for _ in 0..rng.random_range(0..6) {
            let i = rng.random_range(1..=n);
            let j = rng.random_range(1..=n);
            inst.add_dependency(i, j);
        }
        for _ in 0..rng.random_range(0..8) {
            let k = rng.random_range(0..=n.min(3));
            let items: Vec<ItemId> = (0..k).map(|_| rng.random_range(1..=n)).collect();
            inst.people.push(Person::new(rng.random_range(0..20), items));
        }
        inst
    }

    #[test]
    fn test_prefers_higher_importance() {
        let inst = Instance::new(3, 2.0, vec![1, 1, 1])
            .with_person(Person::new(5, vec![1, 2]))
            .with_person(Person::new(3, vec![3]));

        let built = GreedyConstructor::new(&inst).construct();
        assert_eq!(built.selection.sorted_items(), vec![1, 2]);
        assert_eq!(built.cost, 2);
        assert_eq!(inst.total_importance(&built.selection), 5);
    }

    #[test]
    fn test_dependency_blocks_person() {
        // item 2 requires item 1; item 1 is too expensive to pull in.
        let inst = Instance::new(2, 1.0, vec![5, 1])
            .with_dependency(1, 2)
            .with_person(Person::new(9, vec![2]));

        let built = GreedyConstructor::new(&inst).construct();
        assert!(built.selection.is_empty());
        assert_eq!(built.cost, 0);
        assert_eq!(inst.total_importance(&built.selection), 0);
    }

    #[test]
    fn test_cost_overflow_never_fits() {
        let half = 1u64 << 63;
        for budget in [10.0, 1e30] {
            let inst = Instance::new(3, budget, vec![half, half, 1])
                .with_person(Person::new(9, vec![1, 2]))
                .with_person(Person::new(2, vec![3]));

            let built = GreedyConstructor::new(&inst).construct();
            assert_eq!(built.selection.sorted_items(), vec![3]);
            assert_eq!(built.cost, 1);
        }
    }

    #[test]
    fn test_dependency_not_added_implicitly() {
        // Budget allows item 1, but the person only lists item 2.
        let inst = Instance::new(2, 10.0, vec![1, 1])
            .with_dependency(1, 2)
            .with_person(Person::new(9, vec![2]))
            .with_person(Person::new(1, vec![1]));

        let built = GreedyConstructor::new(&inst).construct();
        // The importance-9 person is rejected; the later one only adds item 1.
        assert_eq!(built.selection.sorted_items(), vec![1]);
    }

    #[test]
    fn test_shared_items_are_paid_once() {
        let inst = Instance::new(3, 3.0, vec![1, 1, 1])
            .with_person(Person::new(4, vec![1, 2]))
            .with_person(Person::new(3, vec![2, 3]))
            .with_person(Person::new(2, vec![1, 3]));

        let built = GreedyConstructor::new(&inst).construct();
        assert_eq!(built.cost, 3);
        assert_eq!(inst.total_importance(&built.selection), 9);
    }

    #[test]
    fn test_satisfied_person_is_skipped() {
        let inst = Instance::new(2, 0.0, vec![3, 3]).with_person(Person::new(2, vec![1]));
        let start = Selection::with_items(2, vec![1]);
        let built = GreedyConstructor::new(&inst).extend(start, 3);
        assert_eq!(built.selection.sorted_items(), vec![1]);
        assert_eq!(built.cost, 3);
    }

    #[test]
    fn test_extend_keeps_starting_items() {
        let inst = Instance::new(4, 3.0, vec![1, 1, 1, 1])
            .with_person(Person::new(10, vec![1, 2, 3]))
            .with_person(Person::new(1, vec![4]));

        let start = Selection::with_items(4, vec![4]);
        let built = GreedyConstructor::new(&inst).extend(start, 1);
        // Only two units of budget left: the importance-10 person no longer fits.
        assert_eq!(built.selection.sorted_items(), vec![4]);
        assert_eq!(built.cost, 1);
    }

    #[test]
    fn test_ties_follow_input_order() {
        let inst = Instance::new(2, 1.0, vec![1, 1])
            .with_person(Person::new(5, vec![2]))
            .with_person(Person::new(5, vec![1]));

        let constructor = GreedyConstructor::new(&inst);
        assert_eq!(constructor.order(), &[0, 1]);
        assert_eq!(constructor.construct().selection.sorted_items(), vec![2]);
    }

    #[test]
    fn test_empty_person_is_free() {
        let inst = Instance::new(1, 0.0, vec![1]).with_person(Person::new(4, vec![]));
        let built = GreedyConstructor::new(&inst).construct();
        assert!(built.selection.is_empty());
        assert_eq!(inst.total_importance(&built.selection), 4);
    }

    #[test]
    fn test_dependency_chain_closure() {
        // a=3 requires b=2 requires c=1
        let inst = Instance::new(3, 10.0, vec![1, 1, 1])
            .with_dependency(2, 3)
            .with_dependency(1, 2)
            .with_person(Person::new(8, vec![3]))
            .with_person(Person::new(5, vec![2, 3]))
            .with_person(Person::new(2, vec![1, 2, 3]));

        let built = GreedyConstructor::new(&inst).construct();
        let sel = &built.selection;
        if sel.contains(3) {
            assert!(sel.contains(2) && sel.contains(1));
        }
        assert_eq!(sel.sorted_items(), vec![1, 2, 3]);
        assert_eq!(inst.total_importance(sel), 15);
    }

    #[test]
    fn test_construction_is_always_feasible() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let inst = random_instance(&mut rng);
            let built = GreedyConstructor::new(&inst).construct();
            assert!(inst.is_valid(&built.selection));
            assert!(inst.fits_budget(built.cost));
            assert_eq!(inst.total_cost(&built.selection), built.cost);
        }
    }
}
