use crate::assets::decode::DecodeError;

/// Convenience result type used across flashbang.
pub type FlashResult<T> = Result<T, FlashError>;

/// Top-level error taxonomy.
///
/// None of these are fatal to the host: the effect controller logs them and degrades (disabled,
/// flash-only, or a silent no-op) instead of propagating.
#[derive(thiserror::Error, Debug)]
pub enum FlashError {
    /// A required graphics capability is missing; the effect stays disabled.
    #[error("configuration unavailable: {0}")]
    ConfigurationUnavailable(String),

    /// The image could not be decoded; the effect runs flash-only.
    #[error("image load failure: {0}")]
    ImageLoad(#[from] DecodeError),

    /// Another exclusive effect owns the output right now.
    #[error("activation denied for '{0}'")]
    ActivationDenied(String),

    /// A GPU resource operation failed.
    #[error("gpu error: {0}")]
    Gpu(String),

    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FlashError {
    /// Build a [`FlashError::ConfigurationUnavailable`] value.
    pub fn configuration_unavailable(msg: impl Into<String>) -> Self {
        Self::ConfigurationUnavailable(msg.into())
    }

    /// Build a [`FlashError::ActivationDenied`] value.
    pub fn activation_denied(name: impl Into<String>) -> Self {
        Self::ActivationDenied(name.into())
    }

    /// Build a [`FlashError::Gpu`] value.
    pub fn gpu(msg: impl Into<String>) -> Self {
        Self::Gpu(msg.into())
    }

    /// Build a [`FlashError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`FlashError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
