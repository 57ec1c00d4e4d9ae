//! Health-probe request classification.
//!
//! Webhook servers sit behind kubelet liveness and readiness probes. Callers
//! use this predicate to keep probe traffic out of request metrics before
//! invoking the reporter.

use http::Request;
use http::header::USER_AGENT;

/// User-Agent prefix the kubelet sends on probe requests.
pub const KUBE_PROBE_UA_PREFIX: &str = "kube-probe/";

/// Older probe-marker header. No longer consulted by [`is_kubelet_probe`];
/// exported for callers that still strip it from forwarded requests.
pub const KUBELET_PROBE_HEADER_NAME: &str = "K-Kubelet-Probe";

/// Whether the request originates from a kubelet health probe.
///
/// Matches on the `User-Agent` prefix only; the [`KUBELET_PROBE_HEADER_NAME`]
/// header is ignored.
pub fn is_kubelet_probe<B>(request: &Request<B>) -> bool {
    request
        .headers()
        .get(USER_AGENT)
        .and_then(|agent| agent.to_str().ok())
        .is_some_and(|agent| agent.starts_with(KUBE_PROBE_UA_PREFIX))
}
