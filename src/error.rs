//! Error types.
//!
//! Load failures and parameter rejections are distinct so that callers
//! (batch sweeps, tuning harnesses) can tell a bad input file from a bad
//! search configuration. An infeasible instance is never an error: the
//! engine simply returns a low-importance (possibly empty) selection.

use std::io;

use thiserror::Error;

/// Failure to read or parse an instance file.
///
/// Line numbers are 1-based and count every physical line, blank ones included.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read instance: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: missing {expected}")]
    MissingLine { line: usize, expected: &'static str },
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: expected {expected} {what}, found {found}")]
    CountMismatch {
        line: usize,
        what: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: item {item} is outside 1..={item_count}")]
    ItemOutOfRange {
        line: usize,
        item: usize,
        item_count: usize,
    },
    #[error("line {line}: total cost exceeds the representable range")]
    CostOverflow { line: usize },
    #[error("line {line}: {message}")]
    InvalidHeader { line: usize, message: String },
}

/// A search parameter rejected before any search work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("iteration budget must be positive (got {0})")]
    IterationBudget(i64),
    #[error("destruction rate must lie in (0, 1] (got {0})")]
    DestructionRate(f64),
}

/// Any failure surfaced by the crate's entry points.
#[derive(Debug, Error)]
pub enum FestivalError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Param(#[from] ParamError),
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
