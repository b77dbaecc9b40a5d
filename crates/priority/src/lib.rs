//! Feature prioritisation for the development plan.
//!
//! Scores candidate features by value over cost and turns the ranking into
//! recommendations.

#![warn(missing_docs)]

pub mod matrix;
pub mod recommend;

pub use matrix::{PriorityMatrix, RankedFeature};
pub use recommend::{STRATEGY_BULLETS, STRATEGY_HEADER};
