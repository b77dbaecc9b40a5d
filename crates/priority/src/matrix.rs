//! Value/cost scoring of candidate features.

use devplan_core::{fixtures, CoreError, FeatureImpact};
use serde::{Deserialize, Serialize};

/// A feature with its computed priority score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedFeature {
    /// The rated feature
    #[serde(flatten)]
    pub impact: FeatureImpact,

    /// Value/cost score, higher is more attractive
    pub priority_score: f64,
}

/// Ranks candidate features by value over cost.
#[derive(Debug, Clone)]
pub struct PriorityMatrix {
    features: Vec<FeatureImpact>,
}

impl PriorityMatrix {
    /// Create a matrix over `features`, rejecting ratings outside `[1, 10]`.
    pub fn new(features: Vec<FeatureImpact>) -> Result<Self, CoreError> {
        features.iter().try_for_each(FeatureImpact::validate)?;
        Ok(Self { features })
    }

    /// Create a matrix over the built-in phase 1 features.
    pub fn seeded() -> Self {
        Self {
            features: fixtures::phase1_features(),
        }
    }

    /// Features in their original order.
    pub fn features(&self) -> &[FeatureImpact] {
        &self.features
    }

    /// `(mean of value ratings) / (mean of cost ratings) * 10`.
    pub fn score(impact: &FeatureImpact) -> f64 {
        let value = (f64::from(impact.user_value) + f64::from(impact.business_value)) / 2.0;
        let cost = (f64::from(impact.technical_complexity)
            + f64::from(impact.resource_required)
            + f64::from(impact.risk_level))
            / 3.0;

        (value / cost) * 10.0
    }

    /// All features scored and sorted by descending score. Equal scores keep
    /// their original order.
    pub fn ranked_features(&self) -> Vec<RankedFeature> {
        let mut ranked: Vec<_> = self
            .features
            .iter()
            .map(|impact| RankedFeature {
                impact: impact.clone(),
                priority_score: Self::score(impact),
            })
            .collect();

        ranked.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
        tracing::debug!("Ranked {} features", ranked.len());
        ranked
    }
}

impl Default for PriorityMatrix {
    fn default() -> Self {
        Self::seeded()
    }
}
