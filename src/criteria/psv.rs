use crate::config::CriteriaConfig;
use crate::criteria::{cm_s, CriterionOutcome, CriterionReading, VelocityBand, VelocityCriterion};
use crate::inputs::{measured, Inputs};

/// ICA peak systolic velocity, the primary grading criterion
pub struct PsvCriterion {
    moderate: f64,
    severe: f64,
}

impl Default for PsvCriterion {
    fn default() -> Self {
        Self::from_config(&CriteriaConfig::default())
    }
}

impl PsvCriterion {
    pub fn from_config(config: &CriteriaConfig) -> Self {
        Self {
            moderate: config.psv_moderate,
            severe: config.psv_severe,
        }
    }
}

impl VelocityCriterion for PsvCriterion {
    fn evaluate(&self, inputs: &Inputs) -> CriterionOutcome {
        let Some(psv) = measured(inputs.psv) else {
            return CriterionOutcome::NotMeasured;
        };

        let band = VelocityBand::from_thresholds(psv, self.moderate, self.severe);
        let evidence = match band {
            VelocityBand::Below50 => format!(
                "ICA PSV {} is below {} ({} stenosis)",
                cm_s(psv),
                cm_s(self.moderate),
                band
            ),
            VelocityBand::Moderate => format!(
                "ICA PSV {} is between {} and {} ({} stenosis)",
                cm_s(psv),
                self.moderate,
                cm_s(self.severe),
                band
            ),
            VelocityBand::Severe => format!(
                "ICA PSV {} is at or above {} ({} stenosis)",
                cm_s(psv),
                cm_s(self.severe),
                band
            ),
        };

        CriterionOutcome::Measured(CriterionReading {
            criterion_name: self.name().to_string(),
            value: psv,
            value_label: cm_s(psv),
            band,
            escalates: false,
            evidence,
        })
    }

    fn name(&self) -> &str {
        "ICA PSV"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VisualFinding;

    fn plaque() -> Inputs {
        Inputs::with_finding(VisualFinding::PlaqueVisible)
    }

    #[test]
    fn test_psv_bands() {
        let criterion = PsvCriterion::default();
        let cases = [
            (100.0, VelocityBand::Below50),
            (125.0, VelocityBand::Moderate),
            (229.0, VelocityBand::Moderate),
            (230.0, VelocityBand::Severe),
            (400.0, VelocityBand::Severe),
        ];
        for (psv, expected) in cases {
            let outcome = criterion.evaluate(&plaque().psv(psv));
            assert_eq!(outcome.reading().unwrap().band, expected, "psv {psv}");
        }
    }

    #[test]
    fn test_evidence_names_the_threshold() {
        let outcome = PsvCriterion::default().evaluate(&plaque().psv(150.0));
        let reading = outcome.reading().unwrap();
        assert_eq!(
            reading.evidence,
            "ICA PSV 150 cm/s is between 125 and 230 cm/s (50-69% stenosis)"
        );
        assert!(!reading.escalates);
    }

    #[test]
    fn test_missing_or_nan_psv_not_measured() {
        let criterion = PsvCriterion::default();
        assert_eq!(criterion.evaluate(&plaque()), CriterionOutcome::NotMeasured);
        assert_eq!(
            criterion.evaluate(&plaque().psv(f64::NAN)),
            CriterionOutcome::NotMeasured
        );
    }
}
