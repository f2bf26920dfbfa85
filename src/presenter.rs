use crate::category::StenosisCategory;
use crate::result::StenosisResult;
use anyhow::Context;
use std::fmt::Write;

/// Plain-text rendering; every field is printed as the grader produced it
pub fn render_text(result: &StenosisResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🩺 Result: {}", result.label());
    let _ = writeln!(out, "   Color: {}", result.color);
    let _ = writeln!(out);
    let _ = writeln!(out, "Primary reason:");
    let _ = writeln!(out, "  {}", result.primary_reason);

    if !result.additional_notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Additional notes:");
        for (i, note) in result.additional_notes.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, note);
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "💡 Recommendation:");
    let _ = writeln!(out, "  {}", result.recommendation);
    out
}

pub fn render_json(result: &StenosisResult) -> anyhow::Result<String> {
    serde_json::to_string_pretty(result).context("Failed to serialize result")
}

/// Every category with its color hint and recommendation
pub fn render_category_table() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "📋 Stenosis categories");
    let _ = writeln!(out, "═══════════════════════════════════════");
    for category in StenosisCategory::ALL {
        let _ = writeln!(out, "  • {} [{}]", category.label(), category.color());
        let _ = writeln!(out, "    {}", category.recommendation());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{classify, Inputs, VisualFinding};

    #[test]
    fn test_text_lists_notes_in_order() {
        let result = classify(
            &Inputs::with_finding(VisualFinding::PlaqueVisible)
                .psv(150.0)
                .edv(20.0)
                .cca_psv(30.0),
        );
        let text = render_text(&result);

        assert!(text.contains("Result: ≥70% Stenosis to Near Occlusion"));
        assert!(text.contains(&result.recommendation));
        let first = text.find("  1. ").unwrap();
        let second = text.find("  2. ").unwrap();
        let third = text.find("  3. ").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_text_omits_empty_notes_section() {
        let text = render_text(&classify(&Inputs::empty()));
        assert!(!text.contains("Additional notes"));
    }

    #[test]
    fn test_json_uses_category_identifiers() {
        let json = render_json(&classify(&Inputs::with_finding(VisualFinding::NearOcclusion))).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["category"], "NEAR_OCCLUSION");
        assert_eq!(value["color"], "red");
        assert!(value["additional_notes"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_category_table_covers_all() {
        let table = render_category_table();
        for category in StenosisCategory::ALL {
            assert!(table.contains(category.label()));
        }
    }
}
