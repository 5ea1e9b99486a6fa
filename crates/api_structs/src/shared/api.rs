use serde::{Deserialize, Serialize};

/// Body of every error response
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self {
            success: false,
            error,
        }
    }
}

/// Body of a rejected cron trigger
#[derive(Debug, Deserialize, Serialize)]
pub struct UnauthorizedResponse {
    pub error: String,
}
