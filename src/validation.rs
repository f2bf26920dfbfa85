//! Advisory checks for whoever collects the inputs
//!
//! The grader accepts any value; these checks only tell the collector what
//! looks wrong so it can flag the field. Nothing here blocks grading.

use crate::inputs::Inputs;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputIssue {
    pub field: String,
    pub message: String,
}

impl fmt::Display for InputIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_inputs(inputs: &Inputs) -> Vec<InputIssue> {
    let mut issues = Vec::new();
    let velocities_apply = inputs
        .visual_finding
        .map(|f| f.uses_velocities())
        .unwrap_or(false);

    for (field, value) in [
        ("psv", inputs.psv),
        ("edv", inputs.edv),
        ("cca_psv", inputs.cca_psv),
    ] {
        let Some(value) = value else {
            continue;
        };

        if !value.is_finite() {
            issues.push(InputIssue {
                field: field.to_string(),
                message: "value is not a finite number and will be treated as missing".to_string(),
            });
            continue;
        }

        if value < 0.0 {
            issues.push(InputIssue {
                field: field.to_string(),
                message: format!("velocity {} cm/s is negative", value),
            });
        }

        if !velocities_apply {
            issues.push(InputIssue {
                field: field.to_string(),
                message: "velocity entered but the visual finding is not plaque visible; it will be disregarded".to_string(),
            });
        }
    }

    if velocities_apply && inputs.cca_psv == Some(0.0) {
        issues.push(InputIssue {
            field: "cca_psv".to_string(),
            message: "CCA PSV of 0 cm/s cannot form an ICA/CCA ratio".to_string(),
        });
    }

    issues
}
