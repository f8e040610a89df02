// Errors surfaced by the sample service
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SampleServiceError {
    /// The abundance table has no column with this name
    #[error("Error! Sample: {sample} Not Found!")]
    SampleColumnNotFound { sample: String },

    /// No metadata row matches the sample
    #[error("Error! Sample: {sample} Not Found!")]
    SampleNotFound { sample: String },

    /// The metadata row exists but carries no wash frequency
    #[error("Error! Sample: {sample} has no weekly wash frequency!")]
    WashFrequencyUnavailable { sample: String },

    #[error(transparent)]
    Repository(#[from] anyhow::Error),
}
