pub mod edv;
pub mod psv;
pub mod ratio;

use crate::category::StenosisCategory;
use crate::Inputs;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity band a single velocity criterion places the case in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VelocityBand {
    Below50,
    Moderate,
    Severe,
}

impl VelocityBand {
    pub fn tier(&self) -> u8 {
        match self {
            VelocityBand::Below50 => 1,
            VelocityBand::Moderate => 2,
            VelocityBand::Severe => 3,
        }
    }

    pub fn category(&self) -> StenosisCategory {
        match self {
            VelocityBand::Below50 => StenosisCategory::Lt50,
            VelocityBand::Moderate => StenosisCategory::Gte50Lte69,
            VelocityBand::Severe => StenosisCategory::Gte70,
        }
    }

    /// Place `value` against a two-threshold scale
    pub fn from_thresholds(value: f64, moderate: f64, severe: f64) -> Self {
        if value >= severe {
            VelocityBand::Severe
        } else if value >= moderate {
            VelocityBand::Moderate
        } else {
            VelocityBand::Below50
        }
    }
}

impl fmt::Display for VelocityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VelocityBand::Below50 => "<50%",
            VelocityBand::Moderate => "50-69%",
            VelocityBand::Severe => "≥70%",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CriterionReading {
    pub criterion_name: String,
    pub value: f64,
    /// `value` as shown to the reader, with its unit
    pub value_label: String,
    pub band: VelocityBand,
    /// Meets the threshold that escalates any PSV band to >=70%
    pub escalates: bool,
    pub evidence: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CriterionOutcome {
    NotMeasured,
    /// Present but unusable; the string explains why
    Excluded(String),
    Measured(CriterionReading),
}

impl CriterionOutcome {
    pub fn reading(&self) -> Option<&CriterionReading> {
        match self {
            CriterionOutcome::Measured(reading) => Some(reading),
            _ => None,
        }
    }
}

pub trait VelocityCriterion: Send + Sync {
    fn evaluate(&self, inputs: &Inputs) -> CriterionOutcome;
    fn name(&self) -> &str;
}

/// Render a velocity the way a sonographer would read it off the screen
pub(crate) fn cm_s(value: f64) -> String {
    format!("{} cm/s", value)
}
