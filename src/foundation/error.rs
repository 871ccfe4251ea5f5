use crate::overlay::Zone;

/// Convenience result type used across reelframe.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy for the layout model, the edit session and the backend boundary.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Frame id outside the registry.
    #[error("unknown frame variant '{0}'")]
    UnknownFrameVariant(String),

    /// A second overlay was added to a zone that already holds one.
    #[error("zone '{0}' already has a text overlay")]
    ZoneOccupied(Zone),

    /// A text update targeted a zone without an overlay.
    #[error("zone '{0}' has no text overlay")]
    ZoneEmpty(Zone),

    /// Overlay text above the character limit.
    #[error("overlay text is {len} characters, limit is {max}")]
    TextTooLong {
        /// Character count of the rejected text.
        len: usize,
        /// Limit in effect.
        max: usize,
    },

    /// Invalid user-provided or backend-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Session operation not allowed from the current state.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// `render` called while a render request from the same session is in flight.
    #[error("a render is already in progress for this session")]
    RenderAlreadyInProgress,

    /// The backend has no record of the reel.
    #[error("reel {0} not found")]
    ReelNotFound(u64),

    /// Backend answered with a non-success status.
    #[error("backend error ({status}): {detail}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// `detail` field of the error body, or the raw body.
        detail: String,
    },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// Errors when serializing or deserializing payloads.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// How a failure should be handled by the layer above the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// Rejected synchronously, never sent to the backend.
    Validation,
    /// Network/backend failure; the user may retry.
    Transient,
    /// Ends the editing session.
    Fatal,
}

impl ReelError {
    /// Build a [`ReelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::InvalidTransition`] value.
    pub fn transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    /// Build a [`ReelError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Classifies the error for retry and session handling.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownFrameVariant(_)
            | Self::ZoneOccupied(_)
            | Self::ZoneEmpty(_)
            | Self::TextTooLong { .. }
            | Self::Validation(_)
            | Self::InvalidTransition(_)
            | Self::RenderAlreadyInProgress => ErrorClass::Validation,
            Self::ReelNotFound(_) => ErrorClass::Fatal,
            Self::Backend { .. } | Self::Transport(_) | Self::Serde(_) | Self::Other(_) => {
                ErrorClass::Transient
            }
        }
    }

    /// True for [`ErrorClass::Transient`] failures.
    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Transient
    }
}

impl From<reqwest::Error> for ReelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serde(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ReelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
