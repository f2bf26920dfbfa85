use crate::components::{VelocityDecisionEngine, VisualPrecedenceEngine};
use crate::config::{Config, CriteriaConfig};
use crate::inputs::Inputs;
use crate::result::StenosisResult;

/// Stateless stenosis grader. Immutable after construction, so one instance
/// can serve any number of threads.
pub struct StenosisGrader {
    criteria: CriteriaConfig,
    visual: VisualPrecedenceEngine,
    velocity: VelocityDecisionEngine,
}

impl Default for StenosisGrader {
    fn default() -> Self {
        Self::new(CriteriaConfig::default())
    }
}

impl StenosisGrader {
    /// Build from criteria the caller has already validated
    pub fn new(criteria: CriteriaConfig) -> Self {
        Self {
            visual: VisualPrecedenceEngine::new(),
            velocity: VelocityDecisionEngine::from_config(&criteria),
            criteria,
        }
    }

    pub fn try_new(criteria: CriteriaConfig) -> anyhow::Result<Self> {
        criteria.validate()?;
        Ok(Self::new(criteria))
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Self::try_new(config.criteria.clone())
    }

    pub fn criteria(&self) -> &CriteriaConfig {
        &self.criteria
    }

    /// Grade one set of observations. Never fails: missing or conflicting
    /// data come back as `IncompleteData` / `Indeterminate`.
    pub fn grade(&self, inputs: &Inputs) -> StenosisResult {
        let result = match self.visual.settle(inputs) {
            Some(result) => result,
            None => self.velocity.decide(inputs),
        };

        log::debug!(
            "Graded {:?} as {:?}: {}",
            inputs.visual_finding,
            result.category,
            result.primary_reason
        );
        result
    }
}

/// Grade with the default criteria
pub fn classify(inputs: &Inputs) -> StenosisResult {
    StenosisGrader::default().grade(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{StenosisCategory, VisualFinding};

    #[test]
    fn test_grader_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StenosisGrader>();
    }

    #[test]
    fn test_invalid_criteria_rejected() {
        let criteria = CriteriaConfig {
            psv_severe: 100.0,
            ..CriteriaConfig::default()
        };
        assert!(StenosisGrader::try_new(criteria).is_err());
    }

    #[test]
    fn test_custom_thresholds_move_the_band() {
        let grader = StenosisGrader::try_new(CriteriaConfig {
            psv_moderate: 140.0,
            ..CriteriaConfig::default()
        })
        .unwrap();

        let inputs = Inputs::with_finding(VisualFinding::PlaqueVisible).psv(130.0);
        assert_eq!(grader.grade(&inputs).category, StenosisCategory::Lt50);
        assert_eq!(classify(&inputs).category, StenosisCategory::Gte50Lte69);
    }

    #[test]
    fn test_repeated_grading_is_identical() {
        let grader = StenosisGrader::default();
        let inputs = Inputs::with_finding(VisualFinding::PlaqueVisible)
            .psv(150.0)
            .edv(20.0)
            .cca_psv(30.0);
        assert_eq!(grader.grade(&inputs), grader.grade(&inputs));
    }
}
