//! Report layout tests: header placement, field flow, and the page
//! break past y=250.

use chrono::{TimeZone, Utc};

use fracture_common::report::{analysis_report, history_report, report_file_name};
use fracture_common::state::{RecentAnalysis, Session, UserType};
use fracture_common::types::{BoneType, ClassificationResult};

fn session() -> Session {
    Session {
        name: "Dr. Smith".to_string(),
        email: "doctor@example.com".to_string(),
        user_type: UserType::Doctor,
    }
}

fn result_with_recommendations(count: usize) -> ClassificationResult {
    ClassificationResult {
        bone_type: BoneType::Wrist,
        fracture_detected: true,
        confidence: 95.5,
        location: BoneType::Wrist.location().to_string(),
        recommendations: (0..count).map(|i| format!("Recommendation {}", i)).collect(),
    }
}

#[test]
fn analysis_report_places_header_and_fields() {
    let generated_at = Utc.with_ymd_and_hms(2026, 8, 23, 10, 30, 0).unwrap();
    let document = analysis_report(&session(), &result_with_recommendations(3), generated_at);

    assert_eq!(document.pages.len(), 1);
    let lines = &document.pages[0].lines;

    let title = &lines[0];
    assert_eq!(title.text, "FractureAI Medical Report");
    assert_eq!(title.y, 30);
    assert_eq!(title.size, 20);

    let rendered = document.render_text();
    assert!(rendered.contains("Patient: Dr. Smith"));
    assert!(rendered.contains("User Type: doctor"));
    assert!(rendered.contains("Date: 2026-08-23"));
    assert!(rendered.contains("Fracture Detected: YES"));
    assert!(rendered.contains("Bone Type: Wrist"));
    assert!(rendered.contains("Confidence: 95.5%"));
    assert!(rendered.contains("Location: Distal Radius / Ulna"));
    assert!(rendered.contains("1. Recommendation 0"));
    assert!(rendered.contains("Generated by FractureAI"));
}

#[test]
fn long_recommendation_lists_break_to_a_new_page() {
    let generated_at = Utc::now();
    let document = analysis_report(&session(), &result_with_recommendations(30), generated_at);

    assert!(document.pages.len() > 1, "expected a page break");
    // Every flowed line stays within the break limit plus one step.
    for page in &document.pages {
        for line in &page.lines {
            assert!(line.y <= 280, "line at y={} escaped the page", line.y);
        }
    }
    // The second page starts at the top margin.
    assert_eq!(document.pages[1].lines[0].y, 20);
}

#[test]
fn history_report_is_condensed() {
    let generated_at = Utc::now();
    let entry = RecentAnalysis::from_result(&result_with_recommendations(3));
    let document = history_report(&session(), &entry, generated_at);

    let rendered = document.render_text();
    assert!(rendered.contains("FractureAI Historical Report"));
    assert!(rendered.contains("Analysis Type: Wrist Fracture"));
    assert!(rendered.contains("Status: Fracture Detected"));
    assert!(!rendered.contains("Medical Recommendations"));
}

#[test]
fn report_file_name_carries_the_date() {
    let generated_at = Utc.with_ymd_and_hms(2026, 8, 23, 10, 30, 0).unwrap();
    assert_eq!(report_file_name(generated_at), "fracture-analysis-2026-08-23.txt");
}
