/// Convenience result type used across stripbooth.
pub type BoothResult<T> = Result<T, BoothError>;

/// Top-level error taxonomy used by the booth pipeline.
///
/// Every variant is scoped to the screen it happens on; none of them is fatal to the
/// application as a whole.
#[derive(thiserror::Error, Debug)]
pub enum BoothError {
    /// Invalid user-provided or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The frame source (camera) could not be opened or read.
    #[error("camera unavailable: {0}")]
    Camera(String),

    /// An encoded image could not be decoded or encoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Baking a filter into one shot failed; the whole bake run is aborted.
    #[error("bake failed for shot {index}: {source}")]
    Bake {
        /// Zero-based position of the failing shot.
        index: usize,
        /// Underlying failure.
        #[source]
        source: Box<BoothError>,
    },

    /// Rasterizing or delivering the strip failed.
    #[error("export error: {0}")]
    Export(String),

    /// Session state is missing, unreadable or of an unknown version.
    #[error("session error: {0}")]
    Session(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoothError {
    /// Build a [`BoothError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BoothError::Camera`] value.
    pub fn camera(msg: impl Into<String>) -> Self {
        Self::Camera(msg.into())
    }

    /// Build a [`BoothError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Wrap `source` as the failure of the shot at `index`.
    pub fn bake(index: usize, source: BoothError) -> Self {
        Self::Bake {
            index,
            source: Box::new(source),
        }
    }

    /// Build a [`BoothError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`BoothError::Session`] value.
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// Build a [`BoothError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
