use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScopeError {
    #[error("unknown page '{0}'")]
    UnknownPage(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("nothing to export: the collection is empty")]
    NothingToExport,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited by backend, retry after {0}s")]
    RateLimited(u64),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Other(String),
}

impl ScopeError {
    pub fn invalid_input(value: impl Into<String>) -> Self {
        ScopeError::InvalidInput(value.into())
    }

    pub fn invalid_platform(value: String) -> Self {
        ScopeError::InvalidInput(format!("unknown platform '{value}', expected ios or android"))
    }

    pub fn invalid_role(value: String) -> Self {
        ScopeError::InvalidInput(format!("unknown role '{value}', expected driver, rider or unknown"))
    }

    pub fn invalid_sentiment(value: String) -> Self {
        ScopeError::InvalidInput(format!(
            "unknown sentiment '{value}', expected positive, neutral or negative"
        ))
    }

    pub fn invalid_vocabulary(value: String) -> Self {
        ScopeError::InvalidInput(format!("unrecognized value '{value}'"))
    }

    pub fn invalid_collection_status(value: String) -> Self {
        ScopeError::InvalidInput(format!(
            "unknown collection status '{value}', expected success, partial, warning, failed or never"
        ))
    }
}

pub type Result<T> = std::result::Result<T, ScopeError>;
