//! Plan sources for devplan.
//!
//! A trait-based interface for loading development plans, with the built-in
//! seed plan and a JSON document implementation.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;

pub use trait_::{PlanSource, SeedPlan, StorageError, Result};
pub use json_storage::JsonPlanFile;
