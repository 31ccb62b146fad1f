//! Data transfer objects for API responses.

use serde::Serialize;

use crate::domain::Status;
use crate::poller::StatusSnapshot;

/// Response body for `GET /api/voice`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoiceResponse {
    /// Plain sentence for speech synthesis
    pub text: String,

    /// Same content with pauses, wrapped in `<speak>`
    pub ssml: String,

    /// Status the text describes
    pub status: Status,

    /// Whether the cached data was too old to trust
    pub stale: bool,
}

impl VoiceResponse {
    /// Build from a status snapshot.
    pub fn from_snapshot(snapshot: StatusSnapshot) -> Self {
        Self {
            text: snapshot.voice.text,
            ssml: snapshot.voice.ssml,
            status: snapshot.status,
            stale: snapshot.stale,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
