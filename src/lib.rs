//! Hookstats - Request metrics for Kubernetes admission and conversion webhooks
//!
//! This crate reports a count and a latency observation for every request a
//! webhook server answers, tagged with the request's dimensions (operation,
//! kind, resource, outcome). Instruments are process-wide: a
//! [`MetricsRegistry`] registers them once, and every [`StatsReporter`]
//! sharing that registry accumulates into the same series.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use hookstats::{
//!     AdmissionRequest, AdmissionResponse, GroupVersionKind, GroupVersionResource,
//!     MetricsRegistry, Operation, ReporterConfig, StatsReporter,
//! };
//!
//! fn main() -> hookstats::Result<()> {
//!     let registry = MetricsRegistry::new();
//!     let config = ReporterConfig::builder()
//!         .without_tags([hookstats::tags::RESOURCE_NAMESPACE])
//!         .build();
//!     let reporter = StatsReporter::new(&registry, config)?;
//!
//!     let request = AdmissionRequest {
//!         kind: GroupVersionKind::new("apps", "v1", "Deployment"),
//!         resource: GroupVersionResource::new("apps", "v1", "deployments"),
//!         namespace: "default".into(),
//!         operation: Operation::Create,
//!         ..AdmissionRequest::default()
//!     };
//!     let response = AdmissionResponse {
//!         allowed: true,
//!         ..AdmissionResponse::default()
//!     };
//!     reporter.report_admission_request(&request, &response, Duration::from_millis(12))?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod network;
pub mod reporter;
pub mod tags;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use config::{ReporterConfig, ReporterConfigBuilder};
pub use error::{HookstatsError, Result};
pub use metrics::MetricsRegistry;
pub use reporter::StatsReporter;

// Re-export the boundary types
pub use types::{
    AdmissionRequest, AdmissionResponse, ConversionRequest, ConversionResponse, GroupVersionKind,
    GroupVersionResource, Operation, Status,
};
