/// Convenience result type used across Placard.
pub type PlacardResult<T> = Result<T, PlacardError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum PlacardError {
    /// A color string that is not of the `#RRGGBB` form.
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// A branding or panel image file that is absent or undecodable.
    #[error("missing asset '{path}': {reason}")]
    MissingAsset {
        /// Store-relative path of the asset.
        path: String,
        /// Underlying read or decode failure.
        reason: String,
    },

    /// A panel whose `text` field is absent.
    #[error("conference panel {0} has no text")]
    MissingPanelText(usize),

    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PlacardError {
    /// Build a [`PlacardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`PlacardError::MissingAsset`] value.
    pub fn missing_asset(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::MissingAsset {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
