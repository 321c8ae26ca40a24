//! HTTP API types for `/api/analysis`.
//!
//! The client tolerates absent fields with defaults; the daemon fills
//! everything in.

use serde::{Deserialize, Serialize};

use crate::classifier;
use crate::types::{BoneType, ClassificationResult, ReferenceCase, UNKNOWN_LOCATION};

/// Extra report payload attached to a remote analysis.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportData {
    #[serde(rename = "experimentalFeatures", default)]
    pub experimental_features: Vec<String>,
}

/// `POST /api/analysis` response body. Every field is optional on the
/// wire; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub bone_type: String,
    #[serde(default)]
    pub fracture_detected: bool,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub report_data: ReportData,
    #[serde(default)]
    pub reference_case: Option<ReferenceCase>,
    #[serde(default)]
    pub image_hash: Option<String>,
}

impl AnalysisResponse {
    /// Collapse the wire shape into a fully populated result. Unrecognized
    /// bone labels fall back to Wrist, the engine's default part; an empty
    /// location falls back to the static map.
    pub fn to_classification(&self) -> ClassificationResult {
        let bone_type = BoneType::parse(&self.bone_type).unwrap_or(BoneType::Wrist);
        let location = if self.location.is_empty() {
            if BoneType::parse(&self.bone_type).is_some() {
                bone_type.location().to_string()
            } else {
                UNKNOWN_LOCATION.to_string()
            }
        } else {
            self.location.clone()
        };
        let recommendations = if self.recommendations.is_empty() {
            classifier::recommendations_for(self.fracture_detected)
        } else {
            self.recommendations.clone()
        };
        ClassificationResult {
            bone_type,
            fracture_detected: self.fracture_detected,
            confidence: self.confidence,
            location,
            recommendations,
        }
    }
}

/// `GET /api/analysis` query parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisQuery {
    #[serde(default)]
    pub image_name: Option<String>,
    #[serde(default)]
    pub image_hash: Option<String>,
}

/// `GET /health` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
