//! Instrument name constants.
//!
//! The two instruments are process-wide and their names are fixed. A
//! [`MetricsRegistry`](crate::metrics::MetricsRegistry) registers them once,
//! and every reporter sharing that registry accumulates into the same
//! series.

/// Count of requests routed through the webhook.
///
/// Labels: the admission and conversion vocabularies from [`crate::tags`],
/// minus any exclusions configured at registration.
pub const REQUEST_COUNT: &str = "request_count";

pub(crate) const REQUEST_COUNT_HELP: &str = "The number of requests that are routed to webhook";

/// Webhook response-time distribution, in milliseconds.
///
/// Labels: same schema as [`REQUEST_COUNT`].
pub const REQUEST_LATENCIES: &str = "request_latencies";

pub(crate) const REQUEST_LATENCIES_HELP: &str = "The response time in milliseconds";

/// Bucket upper bounds for [`REQUEST_LATENCIES`], in milliseconds.
pub(crate) const LATENCY_BUCKETS_MS: &[f64] = &[
    1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0,
];
