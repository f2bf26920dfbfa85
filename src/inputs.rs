//! Observation record handed to the grader
//!
//! Holds the visual assessment plus the three Doppler velocities. Every field
//! may be absent; the grader decides what an absent field means.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grayscale / color-flow impression of the internal carotid artery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualFinding {
    Normal,
    PlaqueVisible,
    NearOcclusion,
    TotalOcclusion,
}

impl VisualFinding {
    pub const ALL: [VisualFinding; 4] = [
        VisualFinding::Normal,
        VisualFinding::PlaqueVisible,
        VisualFinding::NearOcclusion,
        VisualFinding::TotalOcclusion,
    ];

    /// Option label shown by an input form
    pub fn label(&self) -> &'static str {
        match self {
            VisualFinding::Normal => "Normal (No Plaque Visible)",
            VisualFinding::PlaqueVisible => "Plaque Visible",
            VisualFinding::NearOcclusion => "Suggests Near Occlusion (Markedly Narrowed Lumen)",
            VisualFinding::TotalOcclusion => "Suggests Total Occlusion (No Flow Detected)",
        }
    }

    /// Short command-line spelling
    pub fn cli_name(&self) -> &'static str {
        match self {
            VisualFinding::Normal => "normal",
            VisualFinding::PlaqueVisible => "plaque",
            VisualFinding::NearOcclusion => "near-occlusion",
            VisualFinding::TotalOcclusion => "total-occlusion",
        }
    }

    /// Velocities only carry meaning when plaque is visible
    pub fn uses_velocities(&self) -> bool {
        matches!(self, VisualFinding::PlaqueVisible)
    }
}

impl fmt::Display for VisualFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for VisualFinding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        match normalized.as_str() {
            "normal" => Ok(VisualFinding::Normal),
            "plaque" | "plaque-visible" => Ok(VisualFinding::PlaqueVisible),
            "near-occlusion" | "near" => Ok(VisualFinding::NearOcclusion),
            "total-occlusion" | "occlusion" | "total" => Ok(VisualFinding::TotalOcclusion),
            _ => anyhow::bail!(
                "Unknown visual finding '{}' (expected one of: normal, plaque, near-occlusion, total-occlusion)",
                s
            ),
        }
    }
}

/// One evaluation's worth of observations. Velocities are in cm/s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Inputs {
    #[serde(alias = "visualFinding")]
    pub visual_finding: Option<VisualFinding>,
    /// ICA peak systolic velocity
    pub psv: Option<f64>,
    /// ICA end-diastolic velocity
    pub edv: Option<f64>,
    /// CCA peak systolic velocity, only used for the ICA/CCA ratio
    #[serde(alias = "ccaPsv")]
    pub cca_psv: Option<f64>,
}

impl Inputs {
    /// The all-absent record a form resets to
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_finding(finding: VisualFinding) -> Self {
        Self {
            visual_finding: Some(finding),
            ..Self::default()
        }
    }

    pub fn psv(mut self, value: f64) -> Self {
        self.psv = Some(value);
        self
    }

    pub fn edv(mut self, value: f64) -> Self {
        self.edv = Some(value);
        self
    }

    pub fn cca_psv(mut self, value: f64) -> Self {
        self.cca_psv = Some(value);
        self
    }

    /// True when any of the three velocity fields holds a value
    pub fn has_any_velocity(&self) -> bool {
        self.psv.is_some() || self.edv.is_some() || self.cca_psv.is_some()
    }
}

/// Velocity value usable for grading; NaN and infinities count as absent.
pub(crate) fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
