//! Tunable entry point for external parameter-optimization harnesses.
//!
//! A harness such as irace calls the binary with four parameters and reads
//! back one scalar: the best importance reached. Parameters are validated
//! before the instance is even opened, and the run is fully determined by
//! the seed.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{FestivalError, ParamError};
use crate::loader::load_instance;
use crate::search::{solve, SearchConfig};

/// Raw parameters as received from a tuning harness.
///
/// `max_iterations` is signed so that a non-positive budget can be reported
/// as a [`ParamError`] instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuningParams {
    /// Iteration budget (must be positive).
    pub max_iterations: i64,
    /// Destruction rate (must lie in (0, 1]).
    pub destruction_rate: f64,
    /// Path of the instance file.
    pub instance: PathBuf,
    /// Random seed.
    pub seed: u64,
}

impl TuningParams {
    /// Converts to a validated [`SearchConfig`].
    pub fn to_config(&self) -> Result<SearchConfig, ParamError> {
        let max_iterations = usize::try_from(self.max_iterations)
            .ok()
            .filter(|&n| n > 0)
            .ok_or(ParamError::IterationBudget(self.max_iterations))?;

        let config = SearchConfig {
            max_iterations,
            destruction_rate: self.destruction_rate,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Validates the parameters, loads the instance and returns the best importance.
#[instrument(skip_all, fields(instance = %params.instance.display(), seed = params.seed))]
pub fn evaluate(params: &TuningParams) -> Result<u64, FestivalError> {
    let config = params.to_config()?;
    let instance = load_instance(&params.instance)?;
    let result = solve(&instance, &config)?;
    Ok(result.best_importance)
}
