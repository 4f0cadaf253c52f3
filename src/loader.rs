//! Instance file loader.
//!
//! # Format
//!
//! Plain text, one record per line, values separated by whitespace:
//!
//! ```text
//! <item_count> <budget>              header (both may be written as floats)
//! <cost_1> ... <cost_n>              one non-negative integer per item
//! <D>                                number of dependency edges
//! <i> <j>                            D lines: item j requires item i
//! <m>                                number of people
//! <importance> <k> <f_1> ... <f_k>   m lines
//! ```
//!
//! Blank lines are skipped; anything after the last person is ignored.
//! The sum of all costs must fit in a `u64`.
//! Every malformed or missing record is a [`LoadError`]; nothing is truncated.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::models::{Instance, ItemId, Person};
use crate::validation::{validate_instance, ValidationErrorKind};

/// Reads and parses an instance file.
pub fn load_instance(path: impl AsRef<Path>) -> Result<Instance, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let instance = parse_instance(&text)?;
    debug!(
        path = %path.display(),
        items = instance.item_count,
        people = instance.people.len(),
        dependencies = instance.dependency_count(),
        "instance loaded"
    );
    Ok(instance)
}

/// Parses an instance from its text form.
///
/// Structural diagnostics that are not load errors (dependency cycles,
/// self-dependencies) are logged as warnings and left in place.
pub fn parse_instance(text: &str) -> Result<Instance, LoadError> {
    let mut reader = RecordReader::new(text);

    // Header
    let (line, tokens) = reader.next_record("header line")?;
    expect_count(line, "header values", 2, tokens.len())?;
    let item_count = parse_item_count(line, tokens[0])?;
    let budget: f64 = parse_token(line, tokens[1])?;
    if !budget.is_finite() || budget < 0.0 {
        return Err(LoadError::InvalidHeader {
            line,
            message: format!("budget must be a non-negative number (got {})", tokens[1]),
        });
    }

    // Costs
    let (line, tokens) = reader.next_record("cost line")?;
    expect_count(line, "costs", item_count, tokens.len())?;
    let costs = tokens
        .iter()
        .map(|t| parse_token::<u64>(line, t))
        .collect::<Result<Vec<_>, _>>()?;
    if costs.iter().try_fold(0u64, |acc, &c| acc.checked_add(c)).is_none() {
        return Err(LoadError::CostOverflow { line });
    }

    let mut instance = Instance::new(item_count, budget, costs);

    // Dependencies
    let edge_count = reader.next_count("dependency count")?;
    for _ in 0..edge_count {
        let (line, tokens) = reader.next_record("dependency edge")?;
        expect_count(line, "edge endpoints", 2, tokens.len())?;
        let prerequisite = parse_item(line, tokens[0], item_count)?;
        let item = parse_item(line, tokens[1], item_count)?;
        instance.add_dependency(prerequisite, item);
    }

    // People
    let person_count = reader.next_count("person count")?;
    for _ in 0..person_count {
        let (line, tokens) = reader.next_record("person line")?;
        if tokens.len() < 2 {
            return Err(LoadError::CountMismatch {
                line,
                what: "leading values (importance, flavor count)",
                expected: 2,
                found: tokens.len(),
            });
        }
        let importance: u64 = parse_token(line, tokens[0])?;
        let declared: usize = parse_token(line, tokens[1])?;
        let flavors = &tokens[2..];
        expect_count(line, "flavors", declared, flavors.len())?;
        let items = flavors
            .iter()
            .map(|t| parse_item(line, t, item_count))
            .collect::<Result<Vec<_>, _>>()?;
        instance.people.push(Person::new(importance, items));
    }

    if let Err(errors) = validate_instance(&instance) {
        for e in errors {
            match e.kind {
                ValidationErrorKind::CyclicDependency | ValidationErrorKind::SelfDependency => {
                    warn!("{}", e.message)
                }
                _ => debug!("{}", e.message),
            }
        }
    }

    Ok(instance)
}

/// Yields non-blank lines split into tokens, tagged with their 1-based line number.
struct RecordReader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last_line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last_line: 0,
        }
    }

    fn next_record(&mut self, expected: &'static str) -> Result<(usize, Vec<&'a str>), LoadError> {
        for (idx, raw) in self.lines.by_ref() {
            self.last_line = idx + 1;
            let tokens: Vec<&str> = raw.split_whitespace().collect();
            if !tokens.is_empty() {
                return Ok((idx + 1, tokens));
            }
        }
        Err(LoadError::MissingLine {
            line: self.last_line + 1,
            expected,
        })
    }

    fn next_count(&mut self, expected: &'static str) -> Result<usize, LoadError> {
        let (line, tokens) = self.next_record(expected)?;
        expect_count(line, "values", 1, tokens.len())?;
        parse_token(line, tokens[0])
    }
}

fn expect_count(
    line: usize,
    what: &'static str,
    expected: usize,
    found: usize,
) -> Result<(), LoadError> {
    if expected == found {
        Ok(())
    } else {
        Err(LoadError::CountMismatch {
            line,
            what,
            expected,
            found,
        })
    }
}

fn parse_token<T: FromStr>(line: usize, token: &str) -> Result<T, LoadError> {
    token.parse().map_err(|_| LoadError::InvalidNumber {
        line,
        token: token.to_string(),
    })
}

fn parse_item_count(line: usize, token: &str) -> Result<usize, LoadError> {
    let value: f64 = parse_token(line, token)?;
    if !value.is_finite() || value < 1.0 || value.fract() != 0.0 {
        return Err(LoadError::InvalidHeader {
            line,
            message: format!("item count must be a positive integer (got {token})"),
        });
    }
    Ok(value as usize)
}

fn parse_item(line: usize, token: &str, item_count: usize) -> Result<ItemId, LoadError> {
    let item: ItemId = parse_token(line, token)?;
    if item == 0 || item > item_count {
        return Err(LoadError::ItemOutOfRange {
            line,
            item,
            item_count,
        });
    }
    Ok(item)
}
