//! Remote-first analysis orchestration.
//!
//! One attempt against the daemon, bounded by the client timeout; any
//! network failure, non-2xx status, or timeout substitutes the local
//! fallback classifier transparently. The user only learns which path
//! answered through the completion notification text.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use fracture_common::api::AnalysisResponse;
use fracture_common::classifier;
use fracture_common::error::FractureError;
use fracture_common::state::{NotificationFeed, NotificationKind, RecentAnalyses, RecentAnalysis, Session};
use fracture_common::types::{ClassificationResult, EngineKind, ReferenceCase};
use fracture_common::validate;

use crate::client::{DaemonClient, Upload};

/// A finished analysis, whichever engine produced it.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub result: ClassificationResult,
    pub engine: EngineKind,
    pub accuracy: Option<f64>,
    pub reference_case: Option<ReferenceCase>,
    pub experimental_features: Vec<String>,
}

/// Read and validate an upload from disk.
pub fn load_upload(path: &Path) -> Result<Upload, FractureError> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let metadata = fs::metadata(path)?;
    let mime = validate::validate_upload(&name, metadata.len())?;
    let bytes = fs::read(path)?;
    Ok(Upload { name, mime, bytes })
}

/// Collapse a remote attempt into an outcome. Pure: the fallback path is
/// fully determined by the upload's name and size (modulo the random
/// fracture-branch confidence).
pub fn resolve(
    remote: Result<AnalysisResponse, FractureError>,
    file_name: &str,
    file_size: u64,
) -> AnalysisOutcome {
    match remote {
        Ok(response) => AnalysisOutcome {
            result: response.to_classification(),
            engine: EngineKind::Remote,
            accuracy: Some(response.accuracy),
            reference_case: response.reference_case.clone(),
            experimental_features: response.report_data.experimental_features.clone(),
        },
        Err(e) => {
            warn!("Remote analysis unavailable ({}), using fallback", e);
            AnalysisOutcome {
                result: classifier::classify(Some(file_name), file_size),
                engine: EngineKind::Fallback,
                accuracy: None,
                reference_case: None,
                experimental_features: Vec::new(),
            }
        }
    }
}

/// Run one analysis end to end, updating the notification feed and the
/// recent-analyses list.
pub async fn run_analysis(
    client: &DaemonClient,
    upload: &Upload,
    session: &Session,
    feed: &mut NotificationFeed,
    recent: &mut RecentAnalyses,
) -> AnalysisOutcome {
    feed.push("Starting AI analysis...", NotificationKind::Info);

    let remote = client.analyze(upload, session).await;
    let outcome = resolve(remote, &upload.name, upload.bytes.len() as u64);

    info!(
        "Analysis complete via {}: {} ({}%)",
        outcome.engine.label(),
        outcome.result.bone_type,
        outcome.result.confidence
    );

    feed.push(
        format!("Analysis complete ({})", outcome.engine.label()),
        NotificationKind::Success,
    );
    recent.push(RecentAnalysis::from_result(&outcome.result));

    outcome
}
