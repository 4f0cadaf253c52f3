//! Greedy construction.
//!
//! Builds a feasible selection in a single importance-descending pass over
//! the people, admitting a person only when their missing items fit the
//! remaining budget and keep every dependency satisfied.
//!
//! # Algorithm
//!
//! `GreedyConstructor` is a one-pass, no-backtracking heuristic. It is not
//! optimal, but it is the fill step used both for the initial solution and
//! for every repair inside the iterated destroy/repair search.
//!
//! # References
//!
//! - Ruiz & Stützle (2007), "A simple and effective iterated greedy algorithm
//!   for the permutation flowshop scheduling problem"

mod greedy;

pub use greedy::{Construction, GreedyConstructor};
