use serde::{Deserialize, Serialize};

/// Response body returned by the Twilio Messages API.
///
/// Only the fields the server cares about are modeled; the API returns more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub sid: String,
    pub status: String,
    pub to: String,
    pub from: Option<String>,
    pub body: Option<String>,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}
