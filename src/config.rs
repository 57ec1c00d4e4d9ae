//! Reporter construction options.

use std::collections::BTreeSet;

use crate::tags::TagKey;

/// Immutable reporter configuration, frozen at construction.
///
/// One knob so far: a set of tag keys excluded from every measurement the
/// reporter produces. Exclusion exists to keep high-cardinality dimensions
/// (most often the namespace) out of the metrics backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReporterConfig {
    excluded_tags: BTreeSet<String>,
}

impl ReporterConfig {
    /// Start building a configuration.
    pub fn builder() -> ReporterConfigBuilder {
        ReporterConfigBuilder::default()
    }

    /// Whether measurements must omit this key.
    pub fn is_excluded(&self, key: TagKey) -> bool {
        self.excluded_tags.contains(key.name())
    }

    /// Excluded key names, in sorted order.
    pub fn excluded_tags(&self) -> impl Iterator<Item = &str> {
        self.excluded_tags.iter().map(String::as_str)
    }
}

/// Builder for [`ReporterConfig`].
///
/// Options accumulate in call order and `build` cannot fail. Names that
/// match no known tag key are kept but never take effect.
#[derive(Debug, Default)]
pub struct ReporterConfigBuilder {
    excluded_tags: BTreeSet<String>,
}

impl ReporterConfigBuilder {
    /// Exclude the given tag keys from every reported measurement.
    ///
    /// Accepts key names or [`TagKey`] constants; repeated calls union.
    pub fn without_tags<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_tags.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> ReporterConfig {
        ReporterConfig {
            excluded_tags: self.excluded_tags,
        }
    }
}
