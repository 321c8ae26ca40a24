//! Daemon state: analysis history, prediction cache, chat log.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use fracture_common::chat::ChatTurn;
use fracture_common::types::AnalysisRecord;

use crate::config::DaemonConfig;
use crate::engine::PredictionCache;

/// Shared daemon state
pub type SharedState = Arc<RwLock<DaemonState>>;

pub struct DaemonState {
    pub history: Vec<AnalysisRecord>,
    pub cache: PredictionCache,
    pub chat_log: Vec<ChatTurn>,
    history_capacity: usize,
}

impl DaemonState {
    pub fn new(config: &DaemonConfig) -> Self {
        Self {
            history: Vec::new(),
            cache: PredictionCache::new(),
            chat_log: Vec::new(),
            history_capacity: config.history_capacity,
        }
    }

    pub fn shared(config: &DaemonConfig) -> SharedState {
        Arc::new(RwLock::new(Self::new(config)))
    }

    /// Record an analysis, newest first, bounded by the configured
    /// capacity.
    pub fn record_analysis(&mut self, record: AnalysisRecord) {
        self.history.insert(0, record);
        self.history.truncate(self.history_capacity);
    }

    /// Latest record with the given content hash.
    pub fn latest_by_hash(&self, image_hash: &str) -> Option<&AnalysisRecord> {
        self.history
            .iter()
            .find(|r| r.image_hash.as_deref() == Some(image_hash))
    }

    /// Latest record with the given image name.
    pub fn latest_by_name(&self, image_name: &str) -> Option<&AnalysisRecord> {
        self.history.iter().find(|r| r.image_name == image_name)
    }

    /// The `limit` most recent records.
    pub fn recent(&self, limit: usize) -> &[AnalysisRecord] {
        &self.history[..limit.min(self.history.len())]
    }

    pub fn record_chat(&mut self, turn: ChatTurn) {
        self.chat_log.push(turn);
    }
}

/// Application state shared across handlers
pub struct AppState {
    pub state: SharedState,
    pub config: DaemonConfig,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: DaemonConfig) -> Self {
        Self {
            state: DaemonState::shared(&config),
            config,
            start_time: Instant::now(),
        }
    }
}
