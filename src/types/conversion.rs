//! Conversion review request and response types

use serde::{Deserialize, Serialize};

use super::status::Status;

/// One conversion call, as carried inside a `ConversionReview`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionRequest {
    #[serde(default)]
    pub uid: String,
    /// API version the caller wants the objects converted to.
    #[serde(rename = "desiredAPIVersion", default)]
    pub desired_api_version: String,
}

/// Outcome of a conversion call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionResponse {
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub result: Status,
}
