use crate::category::StenosisCategory;
use serde::{Deserialize, Serialize};

/// Verdict for one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StenosisResult {
    pub category: StenosisCategory,
    pub primary_reason: String,
    pub additional_notes: Vec<String>,
    pub color: String,
    pub recommendation: String,
}

impl StenosisResult {
    /// Color and recommendation always come from the category
    pub fn new(
        category: StenosisCategory,
        primary_reason: impl Into<String>,
        additional_notes: Vec<String>,
    ) -> Self {
        Self {
            category,
            primary_reason: primary_reason.into(),
            additional_notes,
            color: category.color().to_string(),
            recommendation: category.recommendation().to_string(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}
