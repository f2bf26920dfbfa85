//! Velocity Decision Engine Component
//!
//! Grades a plaque-visible case from Doppler velocities. PSV sets the band;
//! EDV and the ICA/CCA ratio can escalate it to >=70% or, when either points
//! `discordance_tiers` or more below it, make the case indeterminate. A
//! secondary reading never moves the PSV band except through escalation.

use crate::category::StenosisCategory;
use crate::config::CriteriaConfig;
use crate::criteria::edv::EdvCriterion;
use crate::criteria::psv::PsvCriterion;
use crate::criteria::ratio::PsvRatioCriterion;
use crate::criteria::{cm_s, CriterionOutcome, CriterionReading, VelocityCriterion};
use crate::inputs::{measured, Inputs};
use crate::result::StenosisResult;

pub struct VelocityDecisionEngine {
    psv: PsvCriterion,
    secondary: Vec<Box<dyn VelocityCriterion>>,
    discordance_tiers: u8,
}

impl Default for VelocityDecisionEngine {
    fn default() -> Self {
        Self::from_config(&CriteriaConfig::default())
    }
}

impl VelocityDecisionEngine {
    pub fn from_config(config: &CriteriaConfig) -> Self {
        Self {
            psv: PsvCriterion::from_config(config),
            // Evaluation order here is the order notes appear in
            secondary: vec![
                Box::new(EdvCriterion::from_config(config)),
                Box::new(PsvRatioCriterion::from_config(config)),
            ],
            discordance_tiers: config.discordance_tiers,
        }
    }

    pub fn decide(&self, inputs: &Inputs) -> StenosisResult {
        let psv = match self.psv.evaluate(inputs) {
            CriterionOutcome::Measured(reading) => reading,
            _ => return self.missing_psv(inputs),
        };
        log::debug!("PSV criterion: {}", psv.evidence);

        let outcomes: Vec<CriterionOutcome> =
            self.secondary.iter().map(|c| c.evaluate(inputs)).collect();
        let readings: Vec<&CriterionReading> =
            outcomes.iter().filter_map(|o| o.reading()).collect();

        // Escalation only changes anything when PSV alone is below the severe band
        let escalation = readings
            .iter()
            .copied()
            .find(|r| r.escalates && r.band > psv.band);
        let major_discordance = readings
            .iter()
            .copied()
            .find(|r| self.is_major_discordance(&psv, r));

        let mut notes = Vec::new();
        for outcome in &outcomes {
            match outcome {
                CriterionOutcome::NotMeasured => {}
                CriterionOutcome::Excluded(reason) => notes.push(reason.clone()),
                CriterionOutcome::Measured(reading) => {
                    notes.push(self.describe_secondary(&psv, reading, escalation.is_some()))
                }
            }
        }

        if let Some(conflict) = major_discordance {
            log::debug!(
                "Indeterminate: PSV band {} vs {} band {}",
                psv.band,
                conflict.criterion_name,
                conflict.band
            );
            notes.insert(0, psv.evidence.clone());
            return StenosisResult::new(
                StenosisCategory::Indeterminate,
                format!(
                    "{} ({} stenosis) and {} ({} stenosis) disagree by {} severity tiers",
                    reading_label(&psv),
                    psv.band,
                    reading_label(conflict),
                    conflict.band,
                    psv.band.tier() - conflict.band.tier()
                ),
                notes,
            );
        }

        match escalation {
            Some(trigger) => {
                log::debug!("Escalated to >=70% by {}", trigger.criterion_name);
                notes.insert(
                    0,
                    format!("{} alone indicates {} stenosis", reading_label(&psv), psv.band),
                );
                StenosisResult::new(
                    StenosisCategory::Gte70,
                    format!("{} (≥70% stenosis criterion)", trigger.evidence),
                    notes,
                )
            }
            None => StenosisResult::new(psv.band.category(), psv.evidence, notes),
        }
    }

    fn is_major_discordance(&self, psv: &CriterionReading, other: &CriterionReading) -> bool {
        other.band < psv.band && psv.band.tier() - other.band.tier() >= self.discordance_tiers
    }

    fn describe_secondary(
        &self,
        psv: &CriterionReading,
        reading: &CriterionReading,
        escalated: bool,
    ) -> String {
        if reading.band > psv.band {
            if reading.escalates {
                return format!(
                    "Escalated to ≥70% stenosis by {}: {}",
                    reading.criterion_name, reading.evidence
                );
            }
            return format!(
                "{}, above the PSV band ({}); PSV band retained",
                reading.evidence, psv.band
            );
        }

        if reading.band == psv.band {
            if escalated {
                return format!(
                    "{}; agrees with the PSV band ({}) but did not drive the escalation",
                    reading.evidence, psv.band
                );
            }
            return format!("{}; agrees with PSV", reading.evidence);
        }

        let gap = psv.band.tier() - reading.band.tier();
        if gap >= self.discordance_tiers {
            format!(
                "Major discordance: {}, {} tier(s) below the PSV band ({})",
                reading.evidence, gap, psv.band
            )
        } else if escalated {
            format!(
                "Minor discordance: {}; does not offset the escalation",
                reading.evidence
            )
        } else {
            format!(
                "Minor discordance: {}; not downgraded below the PSV band ({})",
                reading.evidence, psv.band
            )
        }
    }

    fn missing_psv(&self, inputs: &Inputs) -> StenosisResult {
        let mut notes = Vec::new();
        if let Some(edv) = measured(inputs.edv) {
            notes.push(format!(
                "ICA EDV {} recorded but is insufficient alone to grade stenosis",
                cm_s(edv)
            ));
        }
        if let Some(cca_psv) = measured(inputs.cca_psv) {
            notes.push(format!(
                "CCA PSV {} recorded but the ICA/CCA ratio cannot be formed without ICA PSV",
                cm_s(cca_psv)
            ));
        }

        StenosisResult::new(
            StenosisCategory::IncompleteData,
            "ICA peak systolic velocity (PSV) is required once plaque is visible",
            notes,
        )
    }
}

fn reading_label(reading: &CriterionReading) -> String {
    format!("{} {}", reading.criterion_name, reading.value_label)
}
