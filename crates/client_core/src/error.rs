use thiserror::Error;

pub const GENERIC_DENIAL: &str = "Access denied. Contact the administrator.";
pub const GENERIC_ANALYSIS_FAILURE: &str = "Material analysis failed. Try again.";
pub const GENERIC_CHAIN_FAILURE: &str = "Calculation could not be completed.";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Access check resolved to a denial, with the server's explanation when
    /// one was provided.
    #[error("{0}")]
    Denied(String),

    /// Analyze or calc endpoint answered non-2xx with a user-facing message.
    #[error("{0}")]
    Service(String),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Resolve to the text shown inline in the wizard. Transport failures are
    /// never exposed verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Denied(message) | ApiError::Service(message) => message.clone(),
            ApiError::Transport(err) => {
                tracing::warn!("transport failure: {err}");
                GENERIC_CHAIN_FAILURE.to_string()
            }
        }
    }
}
