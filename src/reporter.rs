//! Per-request measurement reporting.

use std::time::Duration;

use crate::config::ReporterConfig;
use crate::error::Result;
use crate::metrics::MetricsRegistry;
use crate::tags::{self, TagKey, TagSet};
use crate::types::{AdmissionRequest, AdmissionResponse, ConversionRequest, ConversionResponse};

/// Reports one measurement pair (count plus latency) per completed webhook
/// call.
///
/// A reporter is constructed once against the shared [`MetricsRegistry`] and
/// then used freely from concurrent request handlers; it keeps no per-call
/// state beyond its frozen configuration.
#[derive(Debug, Clone)]
pub struct StatsReporter {
    registry: MetricsRegistry,
    config: ReporterConfig,
}

impl StatsReporter {
    /// Create a reporter, registering the process-wide instruments if they do
    /// not exist yet.
    ///
    /// Fails only when instrument registration fails; a webhook must not
    /// start serving without its instruments, so construction errors are
    /// fatal to startup.
    pub fn new(registry: &MetricsRegistry, config: ReporterConfig) -> Result<Self> {
        registry.register_metrics(&config)?;
        Ok(Self {
            registry: registry.clone(),
            config,
        })
    }

    /// Report one completed admission call.
    ///
    /// Records a count increment and a latency observation tagged with the
    /// admission dimensions, minus the configured exclusions. A recording
    /// error is non-fatal: the response has already been sent, so callers
    /// log it and carry on.
    pub fn report_admission_request(
        &self,
        request: &AdmissionRequest,
        response: &AdmissionResponse,
        duration: Duration,
    ) -> Result<()> {
        let tag_set = self.admission_tags(request, response);
        self.record(&tag_set, duration)
    }

    /// Report one completed conversion call.
    ///
    /// Same measurement pair as admission, tagged with the conversion
    /// dimensions.
    pub fn report_conversion_request(
        &self,
        request: &ConversionRequest,
        response: &ConversionResponse,
        duration: Duration,
    ) -> Result<()> {
        let tag_set = self.conversion_tags(request, response);
        self.record(&tag_set, duration)
    }

    fn record(&self, tag_set: &TagSet, duration: Duration) -> Result<()> {
        self.registry.record_count(tag_set)?;
        self.registry
            .record_latency(tag_set, duration_to_millis(duration))
    }

    fn admission_tags(&self, request: &AdmissionRequest, response: &AdmissionResponse) -> TagSet {
        let mut tag_set = TagSet::new();
        self.insert(
            &mut tag_set,
            tags::REQUEST_OPERATION,
            request.operation.as_str().to_owned(),
        );
        self.insert(&mut tag_set, tags::KIND_GROUP, request.kind.group.clone());
        self.insert(
            &mut tag_set,
            tags::KIND_VERSION,
            request.kind.version.clone(),
        );
        self.insert(&mut tag_set, tags::KIND_KIND, request.kind.kind.clone());
        self.insert(
            &mut tag_set,
            tags::RESOURCE_GROUP,
            request.resource.group.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::RESOURCE_VERSION,
            request.resource.version.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::RESOURCE_RESOURCE,
            request.resource.resource.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::RESOURCE_NAMESPACE,
            request.namespace.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::ADMISSION_ALLOWED,
            response.allowed.to_string(),
        );
        tag_set
    }

    fn conversion_tags(
        &self,
        request: &ConversionRequest,
        response: &ConversionResponse,
    ) -> TagSet {
        let mut tag_set = TagSet::new();
        self.insert(
            &mut tag_set,
            tags::DESIRED_API_VERSION,
            request.desired_api_version.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::RESULT_STATUS,
            response.result.status.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::RESULT_REASON,
            response.result.reason.clone(),
        );
        self.insert(
            &mut tag_set,
            tags::RESULT_CODE,
            response.result.code.to_string(),
        );
        tag_set
    }

    fn insert(&self, tag_set: &mut TagSet, key: TagKey, value: String) {
        if !self.config.is_excluded(key) {
            tag_set.insert(key, value);
        }
    }
}

/// Milliseconds as a float, exact for whole-millisecond durations.
fn duration_to_millis(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1e6
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::tags::{ADMISSION_TAG_KEYS, CONVERSION_TAG_KEYS};
    use crate::types::{GroupVersionKind, GroupVersionResource, Operation, Status};

    fn reporter(config: ReporterConfig) -> StatsReporter {
        StatsReporter::new(&MetricsRegistry::new(), config).unwrap()
    }

    fn admission_request() -> AdmissionRequest {
        AdmissionRequest {
            uid: "705ab4f5-6393-11e8-b7cc-42010a800002".into(),
            kind: GroupVersionKind::new("autoscaling", "v1", "Scale"),
            resource: GroupVersionResource::new("apps", "v1", "deployments"),
            name: "my-deployment".into(),
            namespace: "my-namespace".into(),
            operation: Operation::Update,
        }
    }

    #[test]
    fn admission_tags_cover_exactly_the_admission_vocabulary() {
        let reporter = reporter(ReporterConfig::default());
        let response = AdmissionResponse {
            allowed: true,
            ..AdmissionResponse::default()
        };

        let tag_set = reporter.admission_tags(&admission_request(), &response);

        let keys: BTreeSet<_> = tag_set.keys().copied().collect();
        let expected: BTreeSet<_> = ADMISSION_TAG_KEYS.into_iter().collect();
        assert_eq!(keys, expected);
        assert_eq!(tag_set[&tags::REQUEST_OPERATION], "UPDATE");
        assert_eq!(tag_set[&tags::KIND_GROUP], "autoscaling");
        assert_eq!(tag_set[&tags::KIND_VERSION], "v1");
        assert_eq!(tag_set[&tags::KIND_KIND], "Scale");
        assert_eq!(tag_set[&tags::RESOURCE_GROUP], "apps");
        assert_eq!(tag_set[&tags::RESOURCE_VERSION], "v1");
        assert_eq!(tag_set[&tags::RESOURCE_RESOURCE], "deployments");
        assert_eq!(tag_set[&tags::RESOURCE_NAMESPACE], "my-namespace");
        assert_eq!(tag_set[&tags::ADMISSION_ALLOWED], "true");
    }

    #[test]
    fn admission_tags_render_empty_optional_fields_as_empty_strings() {
        let reporter = reporter(ReporterConfig::default());
        let request = AdmissionRequest {
            kind: GroupVersionKind::new("", "v1", "Pod"),
            resource: GroupVersionResource::new("", "v1", "pods"),
            operation: Operation::Create,
            ..AdmissionRequest::default()
        };
        let response = AdmissionResponse::default();

        let tag_set = reporter.admission_tags(&request, &response);

        assert_eq!(tag_set.len(), ADMISSION_TAG_KEYS.len());
        assert_eq!(tag_set[&tags::KIND_GROUP], "");
        assert_eq!(tag_set[&tags::RESOURCE_NAMESPACE], "");
        assert_eq!(tag_set[&tags::ADMISSION_ALLOWED], "false");
    }

    #[test]
    fn excluded_keys_never_enter_the_tag_set() {
        let config = ReporterConfig::builder()
            .without_tags([tags::RESOURCE_NAMESPACE])
            .build();
        let reporter = reporter(config);
        let response = AdmissionResponse {
            allowed: true,
            ..AdmissionResponse::default()
        };

        let tag_set = reporter.admission_tags(&admission_request(), &response);

        assert!(!tag_set.contains_key(&tags::RESOURCE_NAMESPACE));
        assert_eq!(tag_set.len(), ADMISSION_TAG_KEYS.len() - 1);
    }

    #[test]
    fn conversion_tags_cover_exactly_the_conversion_vocabulary() {
        let reporter = reporter(ReporterConfig::default());
        let request = ConversionRequest {
            uid: "2402e167-13c2-43ee-956d-424ebeee6a92".into(),
            desired_api_version: "example.com/v2".into(),
        };
        let response = ConversionResponse {
            uid: request.uid.clone(),
            result: Status::failure("NotFound", 404),
        };

        let tag_set = reporter.conversion_tags(&request, &response);

        let keys: BTreeSet<_> = tag_set.keys().copied().collect();
        let expected: BTreeSet<_> = CONVERSION_TAG_KEYS.into_iter().collect();
        assert_eq!(keys, expected);
        assert_eq!(tag_set[&tags::DESIRED_API_VERSION], "example.com/v2");
        assert_eq!(tag_set[&tags::RESULT_STATUS], "Failure");
        assert_eq!(tag_set[&tags::RESULT_REASON], "NotFound");
        assert_eq!(tag_set[&tags::RESULT_CODE], "404");
    }

    #[test]
    fn duration_conversion_is_exact_for_whole_milliseconds() {
        assert_eq!(duration_to_millis(Duration::from_millis(1100)), 1100.0);
        assert_eq!(duration_to_millis(Duration::from_millis(9100)), 9100.0);
        assert_eq!(duration_to_millis(Duration::ZERO), 0.0);
        assert_eq!(duration_to_millis(Duration::from_micros(1500)), 1.5);
    }
}
