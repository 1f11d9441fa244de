use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Token request failed: {0}")]
    TokenRequest(#[source] reqwest::Error),

    #[error("Token exchange failed ({status}): {body}")]
    TokenExchange { status: u16, body: String },

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// The catalog rejected the bearer token (HTTP 401).
    #[error("Unauthorized: access token rejected by catalog")]
    Unauthorized,

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// True for failures caused by the credential exchange itself
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            CatalogError::TokenRequest(_)
                | CatalogError::TokenExchange { .. }
                | CatalogError::MissingCredentials(_)
        )
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, CatalogError::Unauthorized)
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
