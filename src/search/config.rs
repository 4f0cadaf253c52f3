//! Search configuration.

use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Parameters of the iterated destroy/repair search.
///
/// # Example
/// ```
/// use u_festival::search::SearchConfig;
///
/// let config = SearchConfig::tuned().with_seed(42).with_max_iterations(500);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.destruction_rate, 0.1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Number of destroy/repair iterations after the initial construction.
    pub max_iterations: usize,
    /// Fraction of the current selection removed per iteration, in (0, 1].
    pub destruction_rate: f64,
    /// Seed of the per-run random stream.
    pub seed: u64,
}

impl SearchConfig {
    /// Exploratory setting used for batch sweeps: 199 iterations, rate 0.745.
    pub fn exploratory() -> Self {
        Self {
            max_iterations: 199,
            destruction_rate: 0.745,
            seed: 0,
        }
    }

    /// Tuned setting used by the tuning entry point: 1000 iterations, rate 0.1, seed 9999.
    pub fn tuned() -> Self {
        Self {
            max_iterations: 1000,
            destruction_rate: 0.1,
            seed: 9999,
        }
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the destruction rate.
    pub fn with_destruction_rate(mut self, rate: f64) -> Self {
        self.destruction_rate = rate;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Rejects a zero iteration budget or a rate outside (0, 1].
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.max_iterations == 0 {
            return Err(ParamError::IterationBudget(0));
        }
        check_rate(self.destruction_rate)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::exploratory()
    }
}

fn check_rate(rate: f64) -> Result<(), ParamError> {
    // NaN fails both comparisons.
    if rate > 0.0 && rate <= 1.0 {
        Ok(())
    } else {
        Err(ParamError::DestructionRate(rate))
    }
}
