//! Remote-first / fallback orchestration tests.
//!
//! The resolve step is pure: a successful remote response maps onto the
//! result model, any failure substitutes the local classifier.

use std::fs;

use fractctl::analyze::{load_upload, resolve};
use fracture_common::api::{AnalysisResponse, ReportData};
use fracture_common::classifier;
use fracture_common::error::FractureError;
use fracture_common::types::{BoneType, EngineKind, ReferenceCase};

fn remote_response() -> AnalysisResponse {
    AnalysisResponse {
        bone_type: "Shoulder".to_string(),
        fracture_detected: true,
        confidence: 96.5,
        accuracy: 92.0,
        location: "Clavicle / Humerus Head".to_string(),
        recommendations: vec!["Consult".to_string()],
        report_data: ReportData {
            experimental_features: vec!["Keyword pattern boost".to_string()],
        },
        reference_case: Some(ReferenceCase {
            id: "KAG_S_01".to_string(),
            desc: "Clavicle fracture alignment".to_string(),
            source: "Kaggle Dataset #211".to_string(),
        }),
        image_hash: Some("abc".to_string()),
    }
}

#[test]
fn remote_success_uses_the_ai_engine() {
    let outcome = resolve(Ok(remote_response()), "scan.png", 1024);

    assert_eq!(outcome.engine, EngineKind::Remote);
    assert_eq!(outcome.engine.label(), "AI Engine");
    assert_eq!(outcome.result.bone_type, BoneType::Shoulder);
    assert!(outcome.result.fracture_detected);
    assert_eq!(outcome.accuracy, Some(92.0));
    assert!(outcome.reference_case.is_some());
}

#[test]
fn remote_failure_falls_back_to_the_edge_engine() {
    let outcome = resolve(
        Err(FractureError::Timeout(15)),
        "wrist_scan.png",
        204800,
    );

    assert_eq!(outcome.engine, EngineKind::Fallback);
    assert_eq!(outcome.engine.label(), "Edge Engine");
    // Matches the local classifier for the same input.
    let local = classifier::classify(Some("wrist_scan.png"), 204800);
    assert_eq!(outcome.result.bone_type, local.bone_type);
    assert_eq!(outcome.result.bone_type, BoneType::Wrist);
    assert_eq!(outcome.result.location, local.location);
    assert_eq!(outcome.result.fracture_detected, local.fracture_detected);
    assert!(outcome.accuracy.is_none());
    assert!(outcome.reference_case.is_none());
}

#[test]
fn sparse_remote_responses_are_tolerated() {
    // Everything defaulted: unknown bone label, no location, no
    // recommendations. The client still gets a fully populated result.
    let outcome = resolve(Ok(AnalysisResponse::default()), "scan.png", 1024);

    assert_eq!(outcome.engine, EngineKind::Remote);
    assert_eq!(outcome.result.bone_type, BoneType::Wrist);
    assert_eq!(outcome.result.location, "Bone Structure");
    assert_eq!(outcome.result.recommendations.len(), 3);
}

#[test]
fn named_remote_bone_without_location_uses_the_static_table() {
    let response = AnalysisResponse {
        bone_type: "Ankle".to_string(),
        ..AnalysisResponse::default()
    };
    let outcome = resolve(Ok(response), "scan.png", 1024);
    assert_eq!(outcome.result.bone_type, BoneType::Ankle);
    assert_eq!(outcome.result.location, "Tibia / Fibula");
}

#[test]
fn load_upload_validates_before_reading() {
    let dir = tempfile::tempdir().unwrap();

    let image = dir.path().join("scan.png");
    fs::write(&image, b"png-bytes").unwrap();
    let upload = load_upload(&image).unwrap();
    assert_eq!(upload.name, "scan.png");
    assert_eq!(upload.mime, "image/png");
    assert_eq!(upload.bytes, b"png-bytes");

    let other = dir.path().join("notes.txt");
    fs::write(&other, b"text").unwrap();
    let err = load_upload(&other).unwrap_err();
    assert_eq!(err.to_string(), "Please upload a valid image file");
}
