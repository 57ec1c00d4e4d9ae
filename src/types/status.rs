//! Operation result carried by webhook responses

use serde::{Deserialize, Serialize};

/// Kubernetes-style result of a webhook operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// "Success" or "Failure".
    #[serde(default)]
    pub status: String,
    /// Human-readable description of the outcome.
    #[serde(default)]
    pub message: String,
    /// Machine-readable reason; empty when none applies.
    #[serde(default)]
    pub reason: String,
    /// Suggested HTTP status code; 0 when unset.
    #[serde(default)]
    pub code: i32,
}

impl Status {
    /// Successful result.
    pub fn success() -> Self {
        Self {
            status: "Success".to_owned(),
            ..Self::default()
        }
    }

    /// Failed result with the given reason and suggested HTTP code.
    pub fn failure(reason: impl Into<String>, code: i32) -> Self {
        Self {
            status: "Failure".to_owned(),
            reason: reason.into(),
            code,
            ..Self::default()
        }
    }
}
