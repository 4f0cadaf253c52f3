//! Flavor-selection domain models.
//!
//! Provides the immutable problem data ([`Instance`], [`Person`]) and the
//! mutable working state ([`Selection`]) that the optimization engine grows
//! and shrinks. The instance answers every pure query (validity, cost,
//! satisfied importance); it never stores a solution.
//!
//! # Domain Mappings
//!
//! | u-festival | Festival | Software Release | Procurement |
//! |------------|----------|------------------|-------------|
//! | Item | Flavor | Feature | Part |
//! | Dependency | Base flavor | Prerequisite feature | Sub-assembly |
//! | Person | Guest | Customer | Order |
//! | Selection | Menu | Release scope | Purchase list |

mod instance;
mod person;
mod selection;

pub use instance::Instance;
pub use person::Person;
pub use selection::Selection;

/// Item (flavor) identifier. Items are numbered `1..=item_count`.
pub type ItemId = usize;
