//! View state owned by the client layer.
//!
//! Notifications, the recent-analyses list, and the session are explicit
//! state objects updated through pure reducer-style transitions. No
//! ambient globals.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::FractureError;
use crate::types::ClassificationResult;

/// Both feeds keep the newest entry plus at most four prior ones.
const FEED_CAPACITY: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub message: String,
    pub kind: NotificationKind,
    pub time: DateTime<Utc>,
}

/// Transient notification feed, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationFeed {
    items: Vec<Notification>,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a notification, dropping the oldest beyond capacity.
    pub fn push(&mut self, message: impl Into<String>, kind: NotificationKind) -> &Notification {
        self.items.truncate(FEED_CAPACITY - 1);
        self.items.insert(
            0,
            Notification {
                id: Uuid::new_v4(),
                message: message.into(),
                kind,
                time: Utc::now(),
            },
        );
        &self.items[0]
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

/// Status shown for a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Severe,
    Normal,
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisStatus::Severe => write!(f, "Fracture Detected"),
            AnalysisStatus::Normal => write!(f, "Normal"),
        }
    }
}

/// A condensed entry in the recent-analyses list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentAnalysis {
    pub id: Uuid,
    pub label: String,
    pub status: AnalysisStatus,
    pub confidence: f64,
    pub recorded_at: DateTime<Utc>,
}

impl RecentAnalysis {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let suffix = if result.fracture_detected {
            "Fracture"
        } else {
            "X-Ray"
        };
        Self {
            id: Uuid::new_v4(),
            label: format!("{} {}", result.bone_type, suffix),
            status: if result.fracture_detected {
                AnalysisStatus::Severe
            } else {
                AnalysisStatus::Normal
            },
            confidence: result.confidence,
            recorded_at: Utc::now(),
        }
    }
}

/// Recent analyses, newest first, same capacity discipline as the
/// notification feed.
#[derive(Debug, Clone, Default)]
pub struct RecentAnalyses {
    entries: Vec<RecentAnalysis>,
}

impl RecentAnalyses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: RecentAnalysis) {
        self.entries.truncate(FEED_CAPACITY - 1);
        self.entries.insert(0, entry);
    }

    pub fn entries(&self) -> &[RecentAnalysis] {
        &self.entries
    }
}

/// Who is using the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Doctor,
    Radiologist,
    Patient,
    Admin,
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserType::Doctor => "doctor",
            UserType::Radiologist => "radiologist",
            UserType::Patient => "patient",
            UserType::Admin => "admin",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for UserType {
    type Err = FractureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "doctor" => Ok(UserType::Doctor),
            "radiologist" => Ok(UserType::Radiologist),
            "patient" => Ok(UserType::Patient),
            "admin" => Ok(UserType::Admin),
            other => Err(FractureError::Validation(format!(
                "Unknown user type: {}",
                other
            ))),
        }
    }
}

/// Signed-in user. Sign-in is mocked: all fields present is the only
/// check, no credential validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

impl Session {
    pub fn sign_in(
        name: &str,
        email: &str,
        password: &str,
        user_type: UserType,
    ) -> Result<Session, FractureError> {
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(FractureError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }
        Ok(Session {
            name: name.to_string(),
            email: email.to_string(),
            user_type,
        })
    }
}
