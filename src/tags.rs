//! Dimension keys attached to webhook request measurements.
//!
//! Keys form two closed vocabularies, one per webhook flavour; admission and
//! conversion requests share no keys. The union (admission first, then
//! conversion) is the label schema the instruments register with, so
//! [`ALL_TAG_KEYS`] order is also the registered label order.

use std::collections::BTreeMap;
use std::fmt;

/// A single dimension key.
///
/// Only the constants in this module produce values, which keeps the
/// vocabulary closed. The inner name doubles as the backend label name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagKey(&'static str);

impl TagKey {
    /// Backend label name for this key.
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

impl From<TagKey> for String {
    fn from(key: TagKey) -> Self {
        key.0.to_owned()
    }
}

/// Dimensions attached to one reported measurement.
///
/// Built fresh per event and ordered by key name, so iteration is
/// deterministic across calls.
pub type TagSet = BTreeMap<TagKey, String>;

// Admission dimensions.

/// Operation requested: "CREATE" | "UPDATE" | "DELETE" | "CONNECT".
pub const REQUEST_OPERATION: TagKey = TagKey("request_operation");
/// API group of the object kind under admission.
pub const KIND_GROUP: TagKey = TagKey("kind_group");
/// API version of the object kind under admission.
pub const KIND_VERSION: TagKey = TagKey("kind_version");
/// Kind of the object under admission.
pub const KIND_KIND: TagKey = TagKey("kind_kind");
/// API group of the resource being operated on.
pub const RESOURCE_GROUP: TagKey = TagKey("resource_group");
/// API version of the resource being operated on.
pub const RESOURCE_VERSION: TagKey = TagKey("resource_version");
/// Resource (plural name) being operated on.
pub const RESOURCE_RESOURCE: TagKey = TagKey("resource_resource");
/// Namespace the operation targets; empty for cluster-scoped resources.
pub const RESOURCE_NAMESPACE: TagKey = TagKey("resource_namespace");
/// Whether the request was allowed: "true" | "false".
pub const ADMISSION_ALLOWED: TagKey = TagKey("admission_allowed");

// Conversion dimensions.

/// API version the caller asked to convert to.
pub const DESIRED_API_VERSION: TagKey = TagKey("desired_api_version");
/// Result status of the conversion: "Success" | "Failure".
pub const RESULT_STATUS: TagKey = TagKey("result_status");
/// Machine-readable reason for the result; empty on success.
pub const RESULT_REASON: TagKey = TagKey("result_reason");
/// HTTP-style status code of the result, rendered base-10.
pub const RESULT_CODE: TagKey = TagKey("result_code");

/// Keys attached to every admission measurement.
pub const ADMISSION_TAG_KEYS: [TagKey; 9] = [
    REQUEST_OPERATION,
    KIND_GROUP,
    KIND_VERSION,
    KIND_KIND,
    RESOURCE_GROUP,
    RESOURCE_VERSION,
    RESOURCE_RESOURCE,
    RESOURCE_NAMESPACE,
    ADMISSION_ALLOWED,
];

/// Keys attached to every conversion measurement.
pub const CONVERSION_TAG_KEYS: [TagKey; 4] = [
    DESIRED_API_VERSION,
    RESULT_STATUS,
    RESULT_REASON,
    RESULT_CODE,
];

/// Union of both vocabularies in registration order (admission first).
pub const ALL_TAG_KEYS: [TagKey; 13] = [
    REQUEST_OPERATION,
    KIND_GROUP,
    KIND_VERSION,
    KIND_KIND,
    RESOURCE_GROUP,
    RESOURCE_VERSION,
    RESOURCE_RESOURCE,
    RESOURCE_NAMESPACE,
    ADMISSION_ALLOWED,
    DESIRED_API_VERSION,
    RESULT_STATUS,
    RESULT_REASON,
    RESULT_CODE,
];
