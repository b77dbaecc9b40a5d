//! JSON file plan source.
//!
//! A plan is a single pretty-printed JSON document holding tasks, milestones
//! and features. Saving rewrites the whole document.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use devplan_core::Plan;
use tokio::fs;

use super::{PlanSource, Result, StorageError};

/// File-based JSON plan.
#[derive(Debug, Clone)]
pub struct JsonPlanFile {
    path: PathBuf,
}

impl JsonPlanFile {
    /// Point at a plan file. Nothing is read until [`PlanSource::load`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the plan document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `plan` to the file, creating parent directories as needed.
    pub async fn save(&self, plan: &Plan) -> Result<()> {
        plan.validate()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(plan)?;
        fs::write(&self.path, json.as_bytes()).await?;

        tracing::info!(
            "Saved plan to {} ({} tasks, {} milestones, {} features)",
            self.path.display(),
            plan.tasks.len(),
            plan.milestones.len(),
            plan.features.len()
        );
        Ok(())
    }
}

#[async_trait]
impl PlanSource for JsonPlanFile {
    async fn load(&self) -> Result<Plan> {
        let Some(plan) = read_json::<Plan>(&self.path).await? else {
            return Err(StorageError::NotFound(self.path.display().to_string()));
        };
        plan.validate()?;

        tracing::info!(
            "Loaded plan from {} ({} tasks, {} milestones, {} features)",
            self.path.display(),
            plan.tasks.len(),
            plan.milestones.len(),
            plan.features.len()
        );
        Ok(plan)
    }

    fn describe(&self) -> String {
        format!("plan file {}", self.path.display())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
