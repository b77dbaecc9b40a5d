//! Plan source abstraction.

use async_trait::async_trait;
use devplan_core::{CoreError, Plan};

/// Error type for plan loading and saving.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur while reading or writing a plan.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Plan file missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Plan contents failed validation
    #[error("Invalid plan: {0}")]
    Invalid(#[from] CoreError),
}

/// Where a development plan comes from.
///
/// The tracker and the priority matrix only ever see the loaded [`Plan`],
/// so a different backend can be plugged in without touching them.
#[async_trait]
pub trait PlanSource: Send + Sync {
    /// Load the plan.
    async fn load(&self) -> Result<Plan>;

    /// Human-readable description of the source, for logs.
    fn describe(&self) -> String;
}

/// The built-in platform plan.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedPlan;

#[async_trait]
impl PlanSource for SeedPlan {
    async fn load(&self) -> Result<Plan> {
        Ok(Plan::seed())
    }

    fn describe(&self) -> String {
        "built-in seed plan".to_string()
    }
}
