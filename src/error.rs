//! Hookstats error types

/// Hookstats error types
#[derive(Debug, thiserror::Error)]
pub enum HookstatsError {
    // Registration errors
    #[error("instrument registration failed: {0}")]
    Registration(#[source] prometheus::Error),

    /// The instruments already exist with a different label schema.
    ///
    /// Raised when two reporters with different tag exclusions target the
    /// same registry without an unregister in between.
    #[error("instruments already registered with tags [{existing}], requested [{requested}]")]
    TagSchemaConflict { existing: String, requested: String },

    // Recording errors
    #[error("measurement recording failed: {0}")]
    Recording(#[source] prometheus::Error),

    #[error("instruments are not registered")]
    NotRegistered,
}

impl HookstatsError {
    /// Whether this failure belongs to instrument registration.
    ///
    /// Registration failures are fatal to reporter construction; a webhook
    /// must not start serving without its instruments.
    pub fn is_registration(&self) -> bool {
        matches!(self, Self::Registration(_) | Self::TagSchemaConflict { .. })
    }

    /// Whether this failure concerns a single recorded measurement.
    ///
    /// Recording failures are non-fatal: the request they describe has
    /// already been answered, so callers log the error and carry on.
    pub fn is_recording(&self) -> bool {
        matches!(self, Self::Recording(_) | Self::NotRegistered)
    }
}

/// Result type alias for hookstats operations
pub type Result<T> = std::result::Result<T, HookstatsError>;
