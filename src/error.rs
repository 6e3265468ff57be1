use thiserror::Error;

/// Error shape used at every collaborator seam, matching the store and
/// handler signatures this crate grew out of.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Faults raised while turning a snapshot into bytes. These never carry a
/// partial payload; the orchestrator discards the export on sight.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),

    // Charting a poll with no options at all has no defined geometry.
    #[error("poll has no options to chart")]
    NoOptions,

    // A zero-vote poll is rejected rather than rendered as an empty pie.
    #[error("poll has no votes to chart")]
    NoVotes,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("poll not found")]
    NotFound,

    #[error("poll store error: {0}")]
    Store(#[source] BoxError),

    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    #[error("encoder worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("delivery failed: {0}")]
    Delivery(#[source] BoxError),
}

impl ExportError {
    /// The one line shown to the caller. Root causes stay in the error
    /// chain for the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExportError::NotFound => "Unable to export the requested poll!",
            _ => "Something went wrong exporting that poll, try again later.",
        }
    }
}
