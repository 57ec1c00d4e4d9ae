//! Webhook boundary types consumed by the reporter.
//!
//! Shapes mirror the Kubernetes admission and conversion review payloads
//! closely enough to deserialize real review JSON. Fields the reporter does
//! not dimension on (raw objects, patches, user info) are omitted and
//! ignored on decode.

mod admission;
mod conversion;
mod status;

pub use admission::{
    AdmissionRequest, AdmissionResponse, GroupVersionKind, GroupVersionResource, Operation,
};
pub use conversion::{ConversionRequest, ConversionResponse};
pub use status::Status;
