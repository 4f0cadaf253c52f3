//! Batch evaluation sweep.
//!
//! Runs the search several times on every instance file of a directory.
//! Each (instance, run) pair is independent: instances are loaded once and
//! shared read-only, and each run owns a random stream seeded from
//! `seed + pair_index`. Pairs are executed in parallel with rayon; results
//! come back in (instance, run) order regardless of scheduling.
//!
//! An instance that fails to load is reported in [`BatchOutcome::failures`]
//! and produces no runs; the other instances are still evaluated.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::{FestivalError, LoadError};
use crate::loader::load_instance;
use crate::models::{Instance, ItemId};
use crate::report::RunRecord;
use crate::search::{IteratedGreedy, SearchConfig};
use crate::timing::timed;

/// Batch sweep parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Runs per instance (default: 10).
    pub runs_per_instance: usize,
    /// Search parameters; `seed` is the base seed of the sweep.
    pub search: SearchConfig,
    /// Worker threads. `None` = rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            runs_per_instance: 10,
            search: SearchConfig::exploratory(),
            threads: None,
        }
    }
}

impl BatchConfig {
    /// Sets the number of runs per instance.
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs_per_instance = runs;
        self
    }

    /// Sets the search parameters.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Sets the worker thread count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// One completed run.
#[derive(Debug, Clone)]
pub struct BatchRun {
    /// Tabular record for the CSV log.
    pub record: RunRecord,
    /// Best selection, ascending item ids.
    pub items: Vec<ItemId>,
}

/// Result of a batch sweep.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Completed runs in (instance, run) order.
    pub runs: Vec<BatchRun>,
    /// Instances that failed to load.
    pub failures: Vec<(String, LoadError)>,
}

impl BatchOutcome {
    /// Records of all completed runs.
    pub fn records(&self) -> Vec<RunRecord> {
        self.runs.iter().map(|r| r.record.clone()).collect()
    }
}

/// Lists `*.txt` files in `dir`, sorted by file name.
pub fn discover_instances(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, FestivalError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Runs the sweep over every instance file in `dir`.
#[instrument(skip_all, fields(dir = %dir.as_ref().display()))]
pub fn run_batch(dir: impl AsRef<Path>, config: &BatchConfig) -> Result<BatchOutcome, FestivalError> {
    config.search.validate()?;
    let paths = discover_instances(&dir)?;

    let mut loaded: Vec<(String, Instance)> = Vec::with_capacity(paths.len());
    let mut failures = Vec::new();
    for path in &paths {
        let name = instance_name(path);
        match load_instance(path) {
            Ok(instance) => loaded.push((name, instance)),
            Err(e) => {
                error!(instance = %name, error = %e, "instance skipped");
                failures.push((name, e));
            }
        }
    }

    let runs = match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(|| run_pairs(&loaded, config)),
        None => run_pairs(&loaded, config),
    };

    info!(
        instances = loaded.len(),
        failed = failures.len(),
        runs = runs.len(),
        "batch finished"
    );
    Ok(BatchOutcome { runs, failures })
}

/// Evaluates every (instance, run) pair of already-loaded instances.
pub fn run_pairs(instances: &[(String, Instance)], config: &BatchConfig) -> Vec<BatchRun> {
    let runs = config.runs_per_instance;
    let pairs: Vec<(usize, usize)> = (0..instances.len())
        .flat_map(|i| (1..=runs).map(move |r| (i, r)))
        .collect();

    pairs
        .par_iter()
        .enumerate()
        .map(|(pair_index, &(idx, run))| {
            let (name, instance) = &instances[idx];
            let search = config
                .search
                .clone()
                .with_seed(config.search.seed.wrapping_add(pair_index as u64));
            run_once(name, instance, run, &search)
        })
        .collect()
}

fn run_once(name: &str, instance: &Instance, run: usize, search: &SearchConfig) -> BatchRun {
    let (result, elapsed) = timed("run", || IteratedGreedy::seeded(instance, search).run());

    BatchRun {
        record: RunRecord {
            instance: name.to_string(),
            run,
            elapsed_secs: elapsed.as_secs_f64(),
            importance: result.best_importance,
            cost: result.best_cost,
        },
        items: result.items(),
    }
}

fn instance_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
