//! Budget-constrained flavor selection for the U-Engine ecosystem.
//!
//! Chooses a subset of items (flavors), each with a cost, to maximize the
//! total importance of the people whose required items are all selected,
//! subject to a cost budget and "item j requires item i" dependencies.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instance`, `Person`, `Selection`
//! - **`loader`**: Instance text-format parser
//! - **`validation`**: Structural diagnostics (unknown items, dependency cycles)
//! - **`construction`**: Importance-descending greedy constructor
//! - **`search`**: Iterated destroy/repair (ruin-and-recreate) search
//! - **`batch`**: Parallel instance × run evaluation sweep
//! - **`tuning`**: Seeded single-scalar entry point for parameter tuners
//! - **`report`**: Run records and the CSV result log
//! - **`timing`**: Scoped wall-clock timers
//!
//! # Architecture
//!
//! The instance is immutable and answers every feasibility, cost and
//! importance query; the search engine owns the only mutable state (the
//! current and best selections plus its random stream). Independent runs
//! share nothing mutable, so sweeps parallelize without locking.
//!
//! This is a heuristic: it never proves optimality.
//!
//! # References
//!
//! - Ruiz & Stützle (2007), "A simple and effective iterated greedy algorithm
//!   for the permutation flowshop scheduling problem"
//! - Schrimpf et al. (2000), "Record breaking optimization results using the
//!   ruin and recreate principle"

pub mod batch;
pub mod construction;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod search;
pub mod timing;
pub mod tuning;
pub mod validation;

pub use error::{FestivalError, LoadError, ParamError};
