use crate::config::CriteriaConfig;
use crate::criteria::{cm_s, CriterionOutcome, CriterionReading, VelocityBand, VelocityCriterion};
use crate::inputs::{measured, Inputs};

/// ICA PSV divided by CCA PSV
pub struct PsvRatioCriterion {
    moderate: f64,
    severe: f64,
}

impl Default for PsvRatioCriterion {
    fn default() -> Self {
        Self::from_config(&CriteriaConfig::default())
    }
}

impl PsvRatioCriterion {
    pub fn from_config(config: &CriteriaConfig) -> Self {
        Self {
            moderate: config.ratio_moderate,
            severe: config.ratio_severe,
        }
    }
}

impl VelocityCriterion for PsvRatioCriterion {
    fn evaluate(&self, inputs: &Inputs) -> CriterionOutcome {
        let (Some(psv), Some(cca_psv)) = (measured(inputs.psv), measured(inputs.cca_psv)) else {
            return CriterionOutcome::NotMeasured;
        };

        if cca_psv == 0.0 {
            return CriterionOutcome::Excluded(format!(
                "CCA PSV is {}; ICA/CCA PSV ratio not computed",
                cm_s(cca_psv)
            ));
        }

        let ratio = psv / cca_psv;
        let band = VelocityBand::from_thresholds(ratio, self.moderate, self.severe);
        let escalates = ratio >= self.severe;
        let evidence = if escalates {
            format!(
                "ICA/CCA PSV ratio {:.2} ({} / {}) is at or above {:.1}",
                ratio,
                psv,
                cm_s(cca_psv),
                self.severe
            )
        } else {
            format!(
                "ICA/CCA PSV ratio {:.2} ({} / {}) suggests {} stenosis",
                ratio,
                psv,
                cm_s(cca_psv),
                band
            )
        };

        CriterionOutcome::Measured(CriterionReading {
            criterion_name: self.name().to_string(),
            value: ratio,
            value_label: format!("{:.2}", ratio),
            band,
            escalates,
            evidence,
        })
    }

    fn name(&self) -> &str {
        "ICA/CCA PSV ratio"
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
    fn test_ratio_computed_from_both_psvs() {
        let outcome = PsvRatioCriterion::default().evaluate(&plaque().psv(150.0).cca_psv(30.0));
        let reading = outcome.reading().unwrap();
        assert_eq!(reading.value, 5.0);
        assert!(reading.escalates);
        assert_eq!(
            reading.evidence,
            "ICA/CCA PSV ratio 5.00 (150 / 30 cm/s) is at or above 4.0"
        );
    }

    #[test]
    fn test_zero_denominator_excluded() {
        let outcome = PsvRatioCriterion::default().evaluate(&plaque().psv(150.0).cca_psv(0.0));
        assert!(matches!(outcome, CriterionOutcome::Excluded(_)));
        assert!(outcome.reading().is_none());
    }

    #[test]
    fn test_missing_either_side_not_measured() {
        let criterion = PsvRatioCriterion::default();
        assert_eq!(
            criterion.evaluate(&plaque().cca_psv(60.0)),
            CriterionOutcome::NotMeasured
        );
        assert_eq!(
            criterion.evaluate(&plaque().psv(150.0)),
            CriterionOutcome::NotMeasured
        );
    }

    #[test]
    fn test_moderate_ratio_band() {
        let outcome = PsvRatioCriterion::default().evaluate(&plaque().psv(200.0).cca_psv(60.0));
        let reading = outcome.reading().unwrap();
        assert_eq!(reading.band, VelocityBand::Moderate);
        assert!(!reading.escalates);
    }
}
