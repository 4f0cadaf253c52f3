//! Iterated destroy/repair engine.
//!
//! # State machine
//!
//! - **Init**: greedy construction from an empty selection; this is `best`.
//! - **Iterate** (`max_iterations` times):
//!   1. destroy a random fraction of the current selection;
//!   2. repair with a full greedy pass over all people, starting from the
//!      shrunken selection and its recomputed cost;
//!   3. replace `best` only on a strict importance improvement.
//!
//!   The walk always continues from the repaired selection, never from `best`.
//! - **Terminal**: `best`, its importance and its cost.
//!
//! An empty current selection skips destroy and repair for that iteration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::config::SearchConfig;
use super::destroy::destroy;
use crate::construction::GreedyConstructor;
use crate::models::{Instance, ItemId, Selection};

/// Trace of one destroy/repair iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterationStat {
    /// Iteration index (0-based).
    pub iteration: usize,
    /// Number of items removed by the destroy step.
    pub removed: usize,
    /// Importance of the repaired selection.
    pub importance: u64,
    /// Best importance after this iteration.
    pub best_importance: u64,
    /// Whether this iteration replaced the best selection.
    pub improved: bool,
}

/// Outcome of a search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Best selection found.
    pub best: Selection,
    /// Importance of `best`.
    pub best_importance: u64,
    /// Total cost of `best`.
    pub best_cost: u64,
    /// Importance of the initial greedy selection.
    pub initial_importance: u64,
    /// Iterations performed.
    pub iterations: usize,
    /// Number of strict improvements over the initial selection.
    pub improvements: usize,
    /// Per-iteration trace.
    pub history: Vec<IterationStat>,
}

impl SearchResult {
    /// Best selection as ascending item ids.
    pub fn items(&self) -> Vec<ItemId> {
        self.best.sorted_items()
    }
}

/// Iterated greedy (ruin-and-recreate) search over one instance.
///
/// The random stream is owned by the engine and handed in at construction;
/// nothing else influences the search path, so a fixed seed reproduces the
/// exact sequence of selections.
///
/// # Example
/// ```
/// use u_festival::models::{Instance, Person};
/// use u_festival::search::{IteratedGreedy, SearchConfig};
///
/// let instance = Instance::new(3, 2.0, vec![1, 1, 1])
///     .with_person(Person::new(5, vec![1, 2]))
///     .with_person(Person::new(3, vec![3]));
/// let config = SearchConfig::default().with_max_iterations(20).with_seed(1);
///
/// let result = IteratedGreedy::seeded(&instance, &config).run();
/// assert_eq!(result.best_importance, 5);
/// assert_eq!(result.best_cost, 2);
/// ```
pub struct IteratedGreedy<'a, R: Rng> {
    instance: &'a Instance,
    constructor: GreedyConstructor<'a>,
    max_iterations: usize,
    destruction_rate: f64,
    rng: R,
    current: Selection,
    best: Selection,
    best_importance: u64,
    initial_importance: u64,
    iteration: usize,
    improvements: usize,
    history: Vec<IterationStat>,
}

impl<'a> IteratedGreedy<'a, StdRng> {
    /// Creates an engine whose random stream is seeded from `config.seed`.
    pub fn seeded(instance: &'a Instance, config: &SearchConfig) -> Self {
        Self::new(instance, config, StdRng::seed_from_u64(config.seed))
    }
}

impl<'a, R: Rng> IteratedGreedy<'a, R> {
    /// Builds the initial greedy solution and records it as the best.
    ///
    /// `config` is expected to pass [`SearchConfig::validate`]; its `seed`
    /// is ignored here since the random stream is supplied directly.
    pub fn new(instance: &'a Instance, config: &SearchConfig, rng: R) -> Self {
        let constructor = GreedyConstructor::new(instance);
        let initial = constructor.construct();
        let importance = instance.total_importance(&initial.selection);

        Self {
            instance,
            constructor,
            max_iterations: config.max_iterations,
            destruction_rate: config.destruction_rate,
            rng,
            best: initial.selection.clone(),
            current: initial.selection,
            best_importance: importance,
            initial_importance: importance,
            iteration: 0,
            improvements: 0,
            history: Vec::with_capacity(config.max_iterations),
        }
    }

    /// The selection the walk is currently at.
    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Best selection seen so far.
    pub fn best(&self) -> &Selection {
        &self.best
    }

    /// Importance of the best selection.
    pub fn best_importance(&self) -> u64 {
        self.best_importance
    }

    /// Iterations performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether the iteration budget is exhausted.
    pub fn is_finished(&self) -> bool {
        self.iteration >= self.max_iterations
    }

    /// Performs one destroy/repair iteration.
    ///
    /// May be called past the iteration budget; [`run`](Self::run) stops at it.
    pub fn step(&mut self) -> IterationStat {
        let removed = if self.current.is_empty() {
            0
        } else {
            let victims = destroy(&mut self.current, self.destruction_rate, &mut self.rng);
            let cost = self.instance.total_cost(&self.current);
            let shrunk = std::mem::take(&mut self.current);
            self.current = self.constructor.extend(shrunk, cost).selection;
            victims.len()
        };

        let importance = self.instance.total_importance(&self.current);
        let improved = importance > self.best_importance;
        if improved {
            debug!(
                iteration = self.iteration,
                from = self.best_importance,
                to = importance,
                "best improved"
            );
            self.best = self.current.clone();
            self.best_importance = importance;
            self.improvements += 1;
        }

        let stat = IterationStat {
            iteration: self.iteration,
            removed,
            importance,
            best_importance: self.best_importance,
            improved,
        };
        self.history.push(stat);
        self.iteration += 1;
        stat
    }

    /// Runs the remaining iterations and returns the best selection.
    pub fn run(mut self) -> SearchResult {
        while !self.is_finished() {
            self.step();
        }
        self.into_result()
    }

    /// Stops the search and returns the best selection found so far.
    pub fn into_result(self) -> SearchResult {
        let best_cost = self.instance.total_cost(&self.best);
        SearchResult {
            best: self.best,
            best_importance: self.best_importance,
            best_cost,
            initial_importance: self.initial_importance,
            iterations: self.iteration,
            improvements: self.improvements,
            history: self.history,
        }
    }
}
