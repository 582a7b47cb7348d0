use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("API client error: {0}")]
    ApiClient(#[from] api_client::error::ApiError),

    #[error("Signal evaluation error: {0}")]
    Signal(#[from] signals::SignalError),
}
