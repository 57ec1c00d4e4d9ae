//! Process-wide instruments and the registry handle that owns them.

use std::sync::Arc;

use parking_lot::RwLock;
use prometheus::proto::MetricFamily;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use tracing::debug;

use crate::config::ReporterConfig;
use crate::error::{HookstatsError, Result};
use crate::tags::{ALL_TAG_KEYS, TagKey, TagSet};
use crate::telemetry;

/// Handle to the process-wide webhook instruments.
///
/// Cloning is cheap and every clone addresses the same underlying backend
/// registry. A server creates one per process (or wraps the registry it
/// already exposes); tests create one per case so aggregation state stays
/// isolated.
#[derive(Debug, Clone)]
pub struct MetricsRegistry {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Whether this handle created its own backend registry. Grafted
    /// registries (`from_registry`) are shared with the caller and are
    /// never replaced on reset.
    owned: bool,
    state: RwLock<State>,
}

#[derive(Debug)]
struct State {
    registry: Registry,
    instruments: Option<Instruments>,
}

/// The two instruments plus the label schema they were registered with.
#[derive(Debug)]
struct Instruments {
    request_count: IntCounterVec,
    request_latencies: HistogramVec,
    tag_keys: Vec<TagKey>,
}

impl Instruments {
    /// Label values in schema order. Keys the set does not carry render as
    /// empty strings; keys outside the schema are dropped.
    fn label_values<'a>(&self, tags: &'a TagSet) -> Vec<&'a str> {
        self.tag_keys
            .iter()
            .map(|key| tags.get(key).map(String::as_str).unwrap_or(""))
            .collect()
    }
}

impl MetricsRegistry {
    /// New handle backed by an empty registry it owns.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                owned: true,
                state: RwLock::new(State {
                    registry: Registry::new(),
                    instruments: None,
                }),
            }),
        }
    }

    /// Wrap an existing backend registry.
    ///
    /// Lets a server that already gathers its own collectors expose the
    /// webhook instruments through the same endpoint. The registry stays
    /// shared: [`unregister_metrics`] detaches the two instruments but
    /// leaves sibling collectors alone, and the backend keeps its
    /// name-to-label-schema bookkeeping for the registry's lifetime, so a
    /// later [`register_metrics`] against a grafted registry must use the
    /// same tag schema.
    ///
    /// [`register_metrics`]: MetricsRegistry::register_metrics
    /// [`unregister_metrics`]: MetricsRegistry::unregister_metrics
    pub fn from_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(Inner {
                owned: false,
                state: RwLock::new(State {
                    registry,
                    instruments: None,
                }),
            }),
        }
    }

    /// Ensure the webhook instruments exist, labelled with the full tag
    /// vocabulary minus the exclusions in `config`.
    ///
    /// Idempotent when the instruments already carry the same schema. A
    /// differing schema is a [`TagSchemaConflict`]; any backend rejection is
    /// a registration error, and a failed call leaves no instruments behind.
    /// Reporter construction calls this; tests call it directly, paired with
    /// [`unregister_metrics`].
    ///
    /// [`TagSchemaConflict`]: HookstatsError::TagSchemaConflict
    /// [`unregister_metrics`]: MetricsRegistry::unregister_metrics
    pub fn register_metrics(&self, config: &ReporterConfig) -> Result<()> {
        let tag_keys: Vec<TagKey> = ALL_TAG_KEYS
            .into_iter()
            .filter(|key| !config.is_excluded(*key))
            .collect();

        let mut state = self.inner.state.write();
        if let Some(existing) = state.instruments.as_ref() {
            if existing.tag_keys == tag_keys {
                return Ok(());
            }
            return Err(HookstatsError::TagSchemaConflict {
                existing: join_names(&existing.tag_keys),
                requested: join_names(&tag_keys),
            });
        }

        let label_names: Vec<&str> = tag_keys.iter().map(|key| key.name()).collect();

        let request_count = IntCounterVec::new(
            Opts::new(telemetry::REQUEST_COUNT, telemetry::REQUEST_COUNT_HELP),
            &label_names,
        )
        .map_err(HookstatsError::Registration)?;
        let request_latencies = HistogramVec::new(
            HistogramOpts::new(
                telemetry::REQUEST_LATENCIES,
                telemetry::REQUEST_LATENCIES_HELP,
            )
            .buckets(telemetry::LATENCY_BUCKETS_MS.to_vec()),
            &label_names,
        )
        .map_err(HookstatsError::Registration)?;

        state
            .registry
            .register(Box::new(request_count.clone()))
            .map_err(HookstatsError::Registration)?;
        if let Err(err) = state.registry.register(Box::new(request_latencies.clone())) {
            // Roll back the first instrument so the registry stays clean.
            let _ = state.registry.unregister(Box::new(request_count));
            return Err(HookstatsError::Registration(err));
        }

        debug!(tags = ?label_names, "registered webhook instruments");
        state.instruments = Some(Instruments {
            request_count,
            request_latencies,
            tag_keys,
        });
        Ok(())
    }

    /// Remove the webhook instruments and drop their aggregation state.
    ///
    /// The next [`register_metrics`] starts from zero. A handle that owns
    /// its registry replaces the backend wholesale, so re-registration may
    /// use a different tag schema; a grafted registry only has the two
    /// instruments detached, and the backend refuses a later registration
    /// under a different schema (instrument names keep their label schema
    /// for a registry's lifetime). No-op when nothing is registered. Meant
    /// for test isolation, not for normal serving.
    ///
    /// [`register_metrics`]: MetricsRegistry::register_metrics
    pub fn unregister_metrics(&self) -> Result<()> {
        let mut state = self.inner.state.write();
        let Some(instruments) = state.instruments.take() else {
            return Ok(());
        };
        if self.inner.owned {
            // The backend pins a name to one label schema per registry
            // lifetime; a clean reset swaps in a fresh registry.
            state.registry = Registry::new();
        } else {
            state
                .registry
                .unregister(Box::new(instruments.request_count))
                .map_err(HookstatsError::Registration)?;
            state
                .registry
                .unregister(Box::new(instruments.request_latencies))
                .map_err(HookstatsError::Registration)?;
        }
        debug!("unregistered webhook instruments");
        Ok(())
    }

    /// Add one request to the count instrument.
    pub fn record_count(&self, tags: &TagSet) -> Result<()> {
        let state = self.inner.state.read();
        let instruments = state
            .instruments
            .as_ref()
            .ok_or(HookstatsError::NotRegistered)?;
        instruments
            .request_count
            .get_metric_with_label_values(&instruments.label_values(tags))
            .map_err(HookstatsError::Recording)?
            .inc();
        Ok(())
    }

    /// Add one latency observation, in milliseconds.
    pub fn record_latency(&self, tags: &TagSet, millis: f64) -> Result<()> {
        let state = self.inner.state.read();
        let instruments = state
            .instruments
            .as_ref()
            .ok_or(HookstatsError::NotRegistered)?;
        instruments
            .request_latencies
            .get_metric_with_label_values(&instruments.label_values(tags))
            .map_err(HookstatsError::Recording)?
            .observe(millis);
        Ok(())
    }

    /// Snapshot of every metric family the backend registry holds.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.inner.state.read().registry.gather()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn join_names(keys: &[TagKey]) -> String {
    keys.iter()
        .map(|key| key.name())
        .collect::<Vec<_>>()
        .join(", ")
}
