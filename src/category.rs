use serde::{Deserialize, Serialize};
use std::fmt;

/// Stenosis grade, plus the two states that carry no grade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StenosisCategory {
    Normal,
    #[serde(rename = "LT_50")]
    Lt50,
    #[serde(rename = "GTE_50_LTE_69")]
    Gte50Lte69,
    #[serde(rename = "GTE_70")]
    Gte70,
    NearOcclusion,
    TotalOcclusion,
    IncompleteData,
    Indeterminate,
}

impl StenosisCategory {
    pub const ALL: [StenosisCategory; 8] = [
        StenosisCategory::Normal,
        StenosisCategory::Lt50,
        StenosisCategory::Gte50Lte69,
        StenosisCategory::Gte70,
        StenosisCategory::NearOcclusion,
        StenosisCategory::TotalOcclusion,
        StenosisCategory::IncompleteData,
        StenosisCategory::Indeterminate,
    ];

    /// Position on the severity scale; `None` for incomplete/indeterminate
    pub fn severity_rank(&self) -> Option<u8> {
        match self {
            StenosisCategory::Normal => Some(0),
            StenosisCategory::Lt50 => Some(1),
            StenosisCategory::Gte50Lte69 => Some(2),
            StenosisCategory::Gte70 => Some(3),
            StenosisCategory::NearOcclusion => Some(4),
            StenosisCategory::TotalOcclusion => Some(5),
            StenosisCategory::IncompleteData | StenosisCategory::Indeterminate => None,
        }
    }

    pub fn is_graded(&self) -> bool {
        self.severity_rank().is_some()
    }

    pub fn label(&self) -> &'static str {
        match self {
            StenosisCategory::Normal => "Normal",
            StenosisCategory::Lt50 => "<50% Stenosis",
            StenosisCategory::Gte50Lte69 => "50-69% Stenosis",
            StenosisCategory::Gte70 => "≥70% Stenosis to Near Occlusion",
            StenosisCategory::NearOcclusion => "Near Occlusion",
            StenosisCategory::TotalOcclusion => "Total Occlusion",
            StenosisCategory::IncompleteData => "Incomplete Data",
            StenosisCategory::Indeterminate => "Indeterminate",
        }
    }

    /// Display hint for the severity tier
    pub fn color(&self) -> &'static str {
        match self {
            StenosisCategory::Normal => "green",
            StenosisCategory::Lt50 => "lime",
            StenosisCategory::Gte50Lte69 => "amber",
            StenosisCategory::Gte70 => "orange",
            StenosisCategory::NearOcclusion => "red",
            StenosisCategory::TotalOcclusion => "darkred",
            StenosisCategory::IncompleteData => "gray",
            StenosisCategory::Indeterminate => "purple",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            StenosisCategory::Normal => {
                "No hemodynamically significant stenosis. Continue routine cardiovascular risk factor management."
            }
            StenosisCategory::Lt50 => {
                "Mild stenosis. Focus on risk factor modification; follow-up duplex surveillance at clinical discretion."
            }
            StenosisCategory::Gte50Lte69 => {
                "Moderate stenosis. Optimize medical therapy and arrange follow-up duplex imaging; refer for specialist review if symptomatic."
            }
            StenosisCategory::Gte70 => {
                "Severe stenosis. Refer for vascular specialist evaluation and consider confirmatory CTA/MRA before revascularization planning."
            }
            StenosisCategory::NearOcclusion => {
                "Near occlusion suspected. Confirm with CTA/MRA and obtain prompt vascular specialist consultation."
            }
            StenosisCategory::TotalOcclusion => {
                "Total occlusion suspected. Confirm with CTA/MRA; management is generally medical, guided by specialist input."
            }
            StenosisCategory::IncompleteData => {
                "Complete the visual assessment and, if plaque is visible, enter the ICA peak systolic velocity to obtain a grade."
            }
            StenosisCategory::Indeterminate => {
                "Velocity criteria disagree. Re-check angle correction and sample volume placement, and consider confirmatory CTA/MRA."
            }
        }
    }
}

impl fmt::Display for StenosisCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
