use thiserror::Error;

#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Evaluator received invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Exchange request failed: {0}")]
    Exchange(#[from] api_client::error::ApiError),
}
