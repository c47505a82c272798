/// Error type for corpus construction, fitting and queries
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested card name has no repository entry
    #[error("card not found: {0}")]
    NotFound(String),

    /// Fitting was attempted on a corpus with zero documents
    #[error("cannot fit a vector model on an empty corpus")]
    EmptyCorpus,

    /// A caller supplied an out-of-range argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Card data failed validation at the repository boundary
    #[error("invalid card data: {0}")]
    InvalidCard(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn invalid_card(msg: impl Into<String>) -> Self {
        Self::InvalidCard(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
