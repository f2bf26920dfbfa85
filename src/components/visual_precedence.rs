//! Visual Precedence Component
//!
//! Settles every case the grayscale / color-flow assessment decides on its own,
//! before any velocity is looked at. Order: missing assessment → no plaque →
//! total occlusion → near occlusion → velocity grading.

use crate::category::StenosisCategory;
use crate::inputs::{Inputs, VisualFinding};
use crate::result::StenosisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualDecision {
    AssessmentMissing,
    NoPlaque,
    TotalOcclusion,
    NearOcclusion,
    GradeByVelocity,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct VisualPrecedenceEngine;

impl VisualPrecedenceEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, finding: Option<VisualFinding>) -> VisualDecision {
        match finding {
            None => VisualDecision::AssessmentMissing,
            Some(VisualFinding::Normal) => VisualDecision::NoPlaque,
            Some(VisualFinding::TotalOcclusion) => VisualDecision::TotalOcclusion,
            Some(VisualFinding::NearOcclusion) => VisualDecision::NearOcclusion,
            Some(VisualFinding::PlaqueVisible) => VisualDecision::GradeByVelocity,
        }
    }

    /// Final result for a visually settled case, `None` when velocities must decide
    pub fn settle(&self, inputs: &Inputs) -> Option<StenosisResult> {
        let decision = self.decide(inputs.visual_finding);
        log::debug!("Visual precedence decision: {:?}", decision);

        let (category, reason) = match decision {
            VisualDecision::AssessmentMissing => {
                // Velocities are not inspected at all without a visual finding
                return Some(StenosisResult::new(
                    StenosisCategory::IncompleteData,
                    "A visual assessment (grayscale / color-flow finding) is required before grading",
                    Vec::new(),
                ));
            }
            VisualDecision::NoPlaque => (
                StenosisCategory::Normal,
                "No plaque visible on grayscale / color-flow imaging",
            ),
            VisualDecision::TotalOcclusion => (
                StenosisCategory::TotalOcclusion,
                "No detectable flow signal in the ICA, diagnostic of total occlusion",
            ),
            VisualDecision::NearOcclusion => (
                StenosisCategory::NearOcclusion,
                "Markedly narrowed lumen with damped flow; visual assessment of near occlusion takes precedence over velocity thresholds",
            ),
            VisualDecision::GradeByVelocity => return None,
        };

        let mut notes = Vec::new();
        if inputs.has_any_velocity() {
            notes.push(disregarded_velocities_note(inputs));
        }

        Some(StenosisResult::new(category, reason, notes))
    }
}

fn disregarded_velocities_note(inputs: &Inputs) -> String {
    let fields: Vec<&str> = [
        (inputs.psv, "ICA PSV"),
        (inputs.edv, "ICA EDV"),
        (inputs.cca_psv, "CCA PSV"),
    ]
    .iter()
    .filter(|(value, _)| value.is_some())
    .map(|(_, name)| *name)
    .collect();

    format!(
        "Entered velocities disregarded ({}): they only apply when plaque is visible",
        fields.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let engine = VisualPrecedenceEngine::new();
        assert_eq!(engine.decide(None), VisualDecision::AssessmentMissing);
        assert_eq!(
            engine.decide(Some(VisualFinding::Normal)),
            VisualDecision::NoPlaque
        );
        assert_eq!(
            engine.decide(Some(VisualFinding::TotalOcclusion)),
            VisualDecision::TotalOcclusion
        );
        assert_eq!(
            engine.decide(Some(VisualFinding::NearOcclusion)),
            VisualDecision::NearOcclusion
        );
        assert_eq!(
            engine.decide(Some(VisualFinding::PlaqueVisible)),
            VisualDecision::GradeByVelocity
        );
    }

    #[test]
    fn test_missing_assessment_has_no_notes_even_with_velocities() {
        let inputs = Inputs::empty().psv(300.0).edv(150.0);
        let result = VisualPrecedenceEngine::new().settle(&inputs).unwrap();
        assert_eq!(result.category, StenosisCategory::IncompleteData);
        assert!(result.additional_notes.is_empty());
    }

    #[test]
    fn test_stale_velocities_are_noted_not_used() {
        let inputs = Inputs::with_finding(VisualFinding::Normal).psv(300.0).cca_psv(50.0);
        let result = VisualPrecedenceEngine::new().settle(&inputs).unwrap();
        assert_eq!(result.category, StenosisCategory::Normal);
        assert_eq!(
            result.additional_notes,
            vec!["Entered velocities disregarded (ICA PSV, CCA PSV): they only apply when plaque is visible"]
        );
    }

    #[test]
    fn test_plaque_defers_to_velocities() {
        let inputs = Inputs::with_finding(VisualFinding::PlaqueVisible).psv(150.0);
        assert!(VisualPrecedenceEngine::new().settle(&inputs).is_none());
    }
}
