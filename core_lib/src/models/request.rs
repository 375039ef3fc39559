//! Response envelopes shared by the HTTP handlers

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Bare acknowledgement, serialized as `{"success":true}`.
    pub fn ok() -> Self {
        Self {
            success: true,
            data: None,
        }
    }
}
