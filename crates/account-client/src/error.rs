use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to reach the account data service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Authentication with the account data service failed: {0}")]
    Auth(String),

    #[error("The account data service returned an error: HTTP {0}: {1}")]
    Api(u16, String),

    #[error("Failed to deserialize the service response: {0}")]
    Deserialization(String),
}
