//! Daemon state tests: history ordering, lookup precedence, capacity.

use chrono::Utc;
use uuid::Uuid;

use fractd::config::DaemonConfig;
use fractd::state::DaemonState;
use fracture_common::types::{AnalysisRecord, BoneType};

fn record(image_name: &str, image_hash: Option<&str>, confidence: f64) -> AnalysisRecord {
    AnalysisRecord {
        id: Uuid::new_v4().to_string(),
        image_name: image_name.to_string(),
        image_hash: image_hash.map(|h| h.to_string()),
        uploaded_at: Utc::now(),
        user_name: None,
        user_type: None,
        bone_type: BoneType::Hand,
        fracture_detected: false,
        confidence,
        location: BoneType::Hand.location().to_string(),
        recommendations: Vec::new(),
        reference_case: None,
    }
}

#[test]
fn latest_by_name_returns_the_newest_record() {
    let mut state = DaemonState::new(&DaemonConfig::default());
    state.record_analysis(record("scan.png", Some("hash-1"), 80.0));
    state.record_analysis(record("scan.png", Some("hash-2"), 90.0));

    let found = state.latest_by_name("scan.png").unwrap();
    assert_eq!(found.confidence, 90.0);
    assert_eq!(found.image_hash.as_deref(), Some("hash-2"));

    assert!(state.latest_by_name("other.png").is_none());
}

#[test]
fn latest_by_hash_returns_the_newest_record() {
    let mut state = DaemonState::new(&DaemonConfig::default());
    state.record_analysis(record("a.png", Some("same-hash"), 80.0));
    state.record_analysis(record("b.png", Some("same-hash"), 90.0));

    let found = state.latest_by_hash("same-hash").unwrap();
    assert_eq!(found.confidence, 90.0);
    assert_eq!(found.image_name, "b.png");

    assert!(state.latest_by_hash("other").is_none());
}

#[test]
fn recent_returns_newest_first_up_to_the_limit() {
    let mut state = DaemonState::new(&DaemonConfig::default());
    for i in 0..5 {
        state.record_analysis(record(&format!("scan{}.png", i), None, f64::from(i)));
    }

    let page = state.recent(3);
    assert_eq!(page.len(), 3);
    assert_eq!(page[0].image_name, "scan4.png");
    assert_eq!(page[2].image_name, "scan2.png");

    // A limit beyond the stored count returns everything.
    assert_eq!(state.recent(100).len(), 5);
}

#[test]
fn history_is_bounded_by_the_configured_capacity() {
    let config = DaemonConfig {
        history_capacity: 3,
        ..DaemonConfig::default()
    };
    let mut state = DaemonState::new(&config);
    for i in 0..6 {
        state.record_analysis(record(&format!("scan{}.png", i), None, f64::from(i)));
    }

    assert_eq!(state.recent(100).len(), 3);
    assert_eq!(state.recent(100)[0].image_name, "scan5.png");
}
