use carotid_grader::presenter::render_text;
use carotid_grader::{classify, Inputs, StenosisCategory, VisualFinding};

fn main() {
    println!("🧪 Grading reference cases");
    println!();

    let cases = [
        (
            "Normal finding with stale velocities",
            Inputs::with_finding(VisualFinding::Normal)
                .psv(300.0)
                .edv(200.0)
                .cca_psv(50.0),
            StenosisCategory::Normal,
        ),
        ("No visual finding", Inputs::empty(), StenosisCategory::IncompleteData),
        (
            "Plaque, low velocities",
            Inputs::with_finding(VisualFinding::PlaqueVisible)
                .psv(100.0)
                .edv(20.0)
                .cca_psv(60.0),
            StenosisCategory::Lt50,
        ),
        (
            "Plaque, ratio escalation",
            Inputs::with_finding(VisualFinding::PlaqueVisible)
                .psv(150.0)
                .edv(20.0)
                .cca_psv(30.0),
            StenosisCategory::Gte70,
        ),
        (
            "Plaque, EDV escalation",
            Inputs::with_finding(VisualFinding::PlaqueVisible)
                .psv(200.0)
                .edv(110.0)
                .cca_psv(60.0),
            StenosisCategory::Gte70,
        ),
        (
            "Total occlusion with stale PSV",
            Inputs::with_finding(VisualFinding::TotalOcclusion).psv(50.0),
            StenosisCategory::TotalOcclusion,
        ),
    ];

    let mut failures = 0;
    for (name, inputs, expected) in cases {
        let result = classify(&inputs);
        let status = if result.category == expected {
            "✅"
        } else {
            failures += 1;
            "❌"
        };

        println!("{} {} (expected {}, got {})", status, name, expected, result.category);
        println!("{}", render_text(&result));
        println!("───────────────────────────────────────");
    }

    if failures > 0 {
        println!("❌ {} reference case(s) graded unexpectedly", failures);
        std::process::exit(1);
    }
    println!("✅ All reference cases graded as expected");
}
