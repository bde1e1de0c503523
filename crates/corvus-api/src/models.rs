//! Response payloads.

use corvus_commons::SessionId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ContextCountResponse {
    pub count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TerminateAllResponse {
    /// Number of contexts the sweep signalled
    pub signalled: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionOpenedResponse {
    pub session_id: SessionId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}
