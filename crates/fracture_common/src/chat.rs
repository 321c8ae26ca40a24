//! Chat wire types and history entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `POST /api/chatbot/` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// `POST /api/chatbot/` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

/// One stored exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_message: String,
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    pub fn new(user_message: impl Into<String>, bot_response: impl Into<String>) -> Self {
        Self {
            user_message: user_message.into(),
            bot_response: bot_response.into(),
            timestamp: Utc::now(),
        }
    }
}
