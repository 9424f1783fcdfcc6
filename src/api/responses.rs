//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{state::TimerSnapshot, timer::RejectReason};

/// Request body for POST /timer/duration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationRequest {
    /// Raw text from the duration input field
    pub input: String,
}

/// Response for the set-duration intent
#[derive(Debug, Clone, Serialize)]
pub struct DurationResponse {
    /// "accepted" or "rejected"
    pub outcome: String,
    pub reason: Option<RejectReason>,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl DurationResponse {
    /// Create an accepted response
    pub fn accepted(duration: u64, timer: TimerSnapshot) -> Self {
        Self {
            outcome: "accepted".to_string(),
            reason: None,
            message: format!("Duration set to {}s", duration),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Create a rejected response
    pub fn rejected(reason: RejectReason, timer: TimerSnapshot) -> Self {
        Self {
            outcome: "rejected".to_string(),
            reason: Some(reason),
            message: reason.to_string(),
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Response for start, pause and reset intents
#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub action: String,
    /// Whether the intent changed anything. Absent for reset, which always applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<bool>,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ActionResponse {
    /// Response for an intent that may be a no-op
    pub fn new(action: &str, applied: bool, timer: TimerSnapshot) -> Self {
        Self {
            action: action.to_string(),
            applied: Some(applied),
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Response for an intent that always applies
    pub fn unconditional(action: &str, timer: TimerSnapshot) -> Self {
        Self {
            action: action.to_string(),
            applied: None,
            timestamp: Utc::now(),
            timer,
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
