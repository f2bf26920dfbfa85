use crate::config::CriteriaConfig;
use crate::criteria::{cm_s, CriterionOutcome, CriterionReading, VelocityBand, VelocityCriterion};
use crate::inputs::{measured, Inputs};

/// ICA end-diastolic velocity, a corroborating and escalating criterion
pub struct EdvCriterion {
    moderate: f64,
    severe: f64,
}

impl Default for EdvCriterion {
    fn default() -> Self {
        Self::from_config(&CriteriaConfig::default())
    }
}

impl EdvCriterion {
    pub fn from_config(config: &CriteriaConfig) -> Self {
        Self {
            moderate: config.edv_moderate,
            severe: config.edv_severe,
        }
    }
}

impl VelocityCriterion for EdvCriterion {
    fn evaluate(&self, inputs: &Inputs) -> CriterionOutcome {
        let Some(edv) = measured(inputs.edv) else {
            return CriterionOutcome::NotMeasured;
        };

        let band = VelocityBand::from_thresholds(edv, self.moderate, self.severe);
        let escalates = edv >= self.severe;
        let evidence = if escalates {
            format!("ICA EDV {} is at or above {}", cm_s(edv), cm_s(self.severe))
        } else {
            format!("ICA EDV {} suggests {} stenosis", cm_s(edv), band)
        };

        CriterionOutcome::Measured(CriterionReading {
            criterion_name: self.name().to_string(),
            value: edv,
            value_label: cm_s(edv),
            band,
            escalates,
            evidence,
        })
    }

    fn name(&self) -> &str {
        "ICA EDV"
    }
}
