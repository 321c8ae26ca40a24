//! Core data model: bone types, classification results, history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anatomical regions the engine can label. Order matters: the
/// hash-derived base type indexes into this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoneType {
    Elbow,
    Hand,
    Shoulder,
    Wrist,
    Ankle,
}

/// Fixed index order used by the hash-derived base classification.
pub const BONE_ORDER: [BoneType; 5] = [
    BoneType::Elbow,
    BoneType::Hand,
    BoneType::Shoulder,
    BoneType::Wrist,
    BoneType::Ankle,
];

impl BoneType {
    pub fn from_index(index: usize) -> BoneType {
        BONE_ORDER[index % BONE_ORDER.len()]
    }

    /// Wire-name lookup, tolerant of case. None for unrecognized labels.
    pub fn parse(name: &str) -> Option<BoneType> {
        match name.to_lowercase().as_str() {
            "elbow" => Some(BoneType::Elbow),
            "hand" => Some(BoneType::Hand),
            "shoulder" => Some(BoneType::Shoulder),
            "wrist" => Some(BoneType::Wrist),
            "ankle" => Some(BoneType::Ankle),
            _ => None,
        }
    }

    /// Static anatomical location map.
    pub fn location(&self) -> &'static str {
        match self {
            BoneType::Elbow => "Humerus / Olecranon",
            BoneType::Hand => "Metacarpals / Phalanx",
            BoneType::Shoulder => "Clavicle / Humerus Head",
            BoneType::Wrist => "Distal Radius / Ulna",
            BoneType::Ankle => "Tibia / Fibula",
        }
    }
}

/// Location label for bone parts outside the static map.
pub const UNKNOWN_LOCATION: &str = "Bone Structure";

impl fmt::Display for BoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoneType::Elbow => "Elbow",
            BoneType::Hand => "Hand",
            BoneType::Shoulder => "Shoulder",
            BoneType::Wrist => "Wrist",
            BoneType::Ankle => "Ankle",
        };
        write!(f, "{}", name)
    }
}

/// One fully populated analysis result, local or remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub bone_type: BoneType,
    pub fracture_detected: bool,
    /// Percent in [0, 100], one fraction digit.
    pub confidence: f64,
    pub location: String,
    pub recommendations: Vec<String>,
}

/// Which engine produced a result. The user only sees this through the
/// completion notification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    Remote,
    Fallback,
}

impl EngineKind {
    pub fn label(&self) -> &'static str {
        match self {
            EngineKind::Remote => "AI Engine",
            EngineKind::Fallback => "Edge Engine",
        }
    }
}

/// Dataset reference case matched to a prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCase {
    pub id: String,
    pub desc: String,
    pub source: String,
}

/// A stored analysis, as kept by the daemon and returned from history
/// queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    pub image_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_hash: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    pub bone_type: BoneType,
    pub fracture_detected: bool,
    pub confidence: f64,
    pub location: String,
    pub recommendations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_case: Option<ReferenceCase>,
}
