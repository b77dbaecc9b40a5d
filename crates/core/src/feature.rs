//! Feature impact ratings used for prioritisation.

use serde::{Deserialize, Serialize};
use crate::error::{CoreError, Result};

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;
/// Highest accepted rating.
pub const MAX_RATING: u8 = 10;

/// A candidate feature with its five 1-10 impact ratings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureImpact {
    /// Feature name
    pub feature: String,

    /// Value to end users
    pub user_value: u8,

    /// Value to the business
    pub business_value: u8,

    /// Implementation difficulty
    pub technical_complexity: u8,

    /// People/time needed
    pub resource_required: u8,

    /// Delivery risk
    pub risk_level: u8,
}

impl FeatureImpact {
    /// Build a feature, rejecting ratings outside `[1, 10]`.
    pub fn new(
        feature: impl Into<String>,
        user_value: u8,
        business_value: u8,
        technical_complexity: u8,
        resource_required: u8,
        risk_level: u8,
    ) -> Result<Self> {
        let impact = Self {
            feature: feature.into(),
            user_value,
            business_value,
            technical_complexity,
            resource_required,
            risk_level,
        };
        impact.validate()?;
        Ok(impact)
    }

    /// Check that every rating is within `[1, 10]`.
    pub fn validate(&self) -> Result<()> {
        let ratings = [
            ("userValue", self.user_value),
            ("businessValue", self.business_value),
            ("technicalComplexity", self.technical_complexity),
            ("resourceRequired", self.resource_required),
            ("riskLevel", self.risk_level),
        ];

        for (field, value) in ratings {
            if !(MIN_RATING..=MAX_RATING).contains(&value) {
                return Err(CoreError::RatingOutOfRange {
                    feature: self.feature.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_bounds() {
        assert!(FeatureImpact::new("edge", 1, 10, 1, 10, 1).is_ok());
    }

    #[test]
    fn test_new_rejects_zero_cost_rating() {
        let err = FeatureImpact::new("free lunch", 9, 9, 0, 3, 2).unwrap_err();
        assert_eq!(
            err,
            CoreError::RatingOutOfRange {
                feature: "free lunch".to_string(),
                field: "technicalComplexity",
                value: 0,
            }
        );
    }

    #[test]
    fn test_validate_rejects_deserialized_overflow() {
        let impact: FeatureImpact = serde_json::from_str(
            r#"{"feature":"x","userValue":11,"businessValue":5,"technicalComplexity":5,"resourceRequired":5,"riskLevel":5}"#,
        )
        .unwrap();
        assert!(matches!(
            impact.validate(),
            Err(CoreError::RatingOutOfRange { field: "userValue", value: 11, .. })
        ));
    }
}
