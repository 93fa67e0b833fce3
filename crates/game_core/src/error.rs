//! Position adapter failures.

use thiserror::Error;

/// Errors reported by a position adapter. A position with no legal moves is
/// NOT an error (it is a terminal state); these cover genuinely malformed
/// inputs and illegal move applications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    /// The canonical key could not be parsed into a valid position.
    #[error("invalid position key `{key}`: {reason}")]
    InvalidKey { key: String, reason: String },

    /// A move was applied to a position where it is not legal. During
    /// search this aborts the whole search rather than producing a score.
    #[error("illegal move {mv} in position `{key}`")]
    IllegalMove { mv: String, key: String },
}

impl PositionError {
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn illegal_move(mv: impl Into<String>, key: impl Into<String>) -> Self {
        Self::IllegalMove {
            mv: mv.into(),
            key: key.into(),
        }
    }
}
