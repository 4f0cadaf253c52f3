//! Structural diagnostics for flavor-selection instances.
//!
//! Checks an [`Instance`] built in code (the loader already rejects
//! out-of-range ids). Detects:
//! - Cost table length not matching the item count
//! - Dependency edges or person requirements naming unknown items
//! - Items that require themselves
//! - Circular dependencies (DFS over the dependency graph)
//!
//! Findings are reports only. The optimization engine does not reject an
//! instance with cycles: items on a cycle simply fail the validity check
//! unless the whole cycle is added at once.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use crate::models::{Instance, ItemId};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Finding category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `costs.len()` differs from `item_count`.
    CostCountMismatch,
    /// An edge or a person references an item outside `1..=item_count`.
    UnknownItem,
    /// An item lists itself as a prerequisite.
    SelfDependency,
    /// Dependency graph contains a cycle.
    CyclicDependency,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the structure of an instance.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_instance(instance: &Instance) -> ValidationResult {
    let mut errors = Vec::new();
    let n = instance.item_count;
    let in_range = |i: ItemId| (1..=n).contains(&i);

    if instance.costs.len() != n {
        errors.push(ValidationError::new(
            ValidationErrorKind::CostCountMismatch,
            format!("{} costs given for {} items", instance.costs.len(), n),
        ));
    }

    for (pre, item) in instance.dependency_edges() {
        if !in_range(pre) || !in_range(item) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownItem,
                format!("Dependency {pre} -> {item} references an unknown item"),
            ));
        } else if pre == item {
            errors.push(ValidationError::new(
                ValidationErrorKind::SelfDependency,
                format!("Item {item} requires itself"),
            ));
        }
    }

    for (idx, person) in instance.people.iter().enumerate() {
        for &item in person.items.iter().filter(|&&i| !in_range(i)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownItem,
                format!("Person {idx} requires unknown item {item}"),
            ));
        }
    }

    if let Some(cycle_err) = detect_cycles(instance) {
        errors.push(cycle_err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Detects cycles of length two or more in the dependency graph.
///
/// Self-loops are reported separately as [`ValidationErrorKind::SelfDependency`].
fn detect_cycles(instance: &Instance) -> Option<ValidationError> {
    let size = instance
        .dependency_edges()
        .map(|(pre, item)| pre.max(item))
        .max()
        .unwrap_or(0)
        .max(instance.item_count);

    // prerequisite → dependents
    let mut adj: Vec<Vec<ItemId>> = vec![Vec::new(); size + 1];
    for (pre, item) in instance.dependency_edges() {
        if pre != item {
            adj[pre].push(item);
        }
    }

    let mut search = CycleSearch::new(size);
    (1..=size)
        .find_map(|root| search.back_edge_from(root, &adj))
        .map(|item| {
            ValidationError::new(
                ValidationErrorKind::CyclicDependency,
                format!("Circular dependency detected involving item {item}"),
            )
        })
}

/// Iterative depth-first search state, indexed by item id.
///
/// The explicit stack holds `(item, next child index)` so arbitrarily long
/// dependency chains never grow the call stack.
struct CycleSearch {
    visited: Vec<bool>,
    on_path: Vec<bool>,
    stack: Vec<(ItemId, usize)>,
}

impl CycleSearch {
    fn new(size: usize) -> Self {
        Self {
            visited: vec![false; size + 1],
            on_path: vec![false; size + 1],
            stack: Vec::new(),
        }
    }

    /// Explores from `root` and returns the item closing a cycle, if any.
    fn back_edge_from(&mut self, root: ItemId, adj: &[Vec<ItemId>]) -> Option<ItemId> {
        if self.visited[root] {
            return None;
        }
        self.enter(root);

        while let Some(top) = self.stack.last_mut() {
            let node = top.0;
            let Some(&next) = adj[node].get(top.1) else {
                self.on_path[node] = false;
                self.stack.pop();
                continue;
            };
            top.1 += 1;

            if self.on_path[next] {
                self.stack.clear();
                return Some(next);
            }
            if !self.visited[next] {
                self.enter(next);
            }
        }
        None
    }

    fn enter(&mut self, item: ItemId) {
        self.visited[item] = true;
        self.on_path[item] = true;
        self.stack.push((item, 0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;

    #[test]
    fn test_valid_instance() {
        let inst = Instance::new(3, 5.0, vec![1, 2, 3])
            .with_dependency(1, 2)
            .with_dependency(2, 3)
            .with_person(Person::new(4, vec![3]));
        assert!(validate_instance(&inst).is_ok());
    }

    #[test]
    fn test_cost_count_mismatch() {
        let inst = Instance::new(3, 5.0, vec![1, 2]);
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CostCountMismatch));
    }

    #[test]
    fn test_unknown_items() {
        let inst = Instance::new(2, 5.0, vec![1, 1])
            .with_dependency(1, 4)
            .with_person(Person::new(1, vec![0, 2]));
        let errors = validate_instance(&inst).unwrap_err();
        let unknown = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::UnknownItem)
            .count();
        assert_eq!(unknown, 2);
    }

    #[test]
    fn test_self_dependency() {
        let inst = Instance::new(2, 5.0, vec![1, 1]).with_dependency(2, 2);
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::SelfDependency);
    }

    #[test]
    fn test_cyclic_dependency() {
        // 1 → 2 → 3 → 1
        let inst = Instance::new(3, 5.0, vec![1, 1, 1])
            .with_dependency(1, 2)
            .with_dependency(2, 3)
            .with_dependency(3, 1);
        let errors = validate_instance(&inst).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::CyclicDependency));
    }

    #[test]
    fn test_long_chain_has_no_cycle() {
        let n = 100_000;
        let mut inst = Instance::new(n, 1.0, vec![1; n]);
        for i in 1..n {
            inst.add_dependency(i, i + 1);
        }
        assert!(validate_instance(&inst).is_ok());
    }

    #[test]
    fn test_long_cycle_detected() {
        let n = 100_000;
        let mut inst = Instance::new(n, 1.0, vec![1; n]);
        for i in 1..n {
            inst.add_dependency(i, i + 1);
        }
        inst.add_dependency(n, 1);
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::CyclicDependency);
    }

    #[test]
    fn test_cycle_reached_after_finished_branch() {
        // 1 → 2 (dead end), 1 → 3 → 4 → 3
        let inst = Instance::new(4, 5.0, vec![1; 4])
            .with_dependency(1, 2)
            .with_dependency(1, 3)
            .with_dependency(3, 4)
            .with_dependency(4, 3);
        let errors = validate_instance(&inst).unwrap_err();
        assert_eq!(errors[0].kind, ValidationErrorKind::CyclicDependency);
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // 4 requires 2 and 3, both require 1
        let inst = Instance::new(4, 5.0, vec![1; 4])
            .with_dependency(1, 2)
            .with_dependency(1, 3)
            .with_dependency(2, 4)
            .with_dependency(3, 4);
        assert!(validate_instance(&inst).is_ok());
    }
}
