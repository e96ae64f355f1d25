use std::time::Duration;

/// Coarse classification of a failed reset, decides which message the operator sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The database could not be reached or logged into with the given configuration.
    Connection,
    /// Anything that went wrong once connected.
    Operation,
}

#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] envconfig::Error),

    #[error(transparent)]
    Connect(sqlx::Error),

    #[error("gave up connecting to the database after {0:?}")]
    ConnectTimeout(Duration),

    #[error(transparent)]
    Transaction(#[from] sqlx::Error),

    #[error(transparent)]
    Storage(#[from] storage::Error),

    #[error(transparent)]
    Credentials(#[from] credentials::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Which message block the operator gets for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Connect(_) | Self::ConnectTimeout(_) => ErrorKind::Connection,
            Self::Transaction(_) | Self::Storage(_) | Self::Credentials(_) | Self::Io(_) => {
                ErrorKind::Operation
            }
        }
    }
}

/// The crate result type.
pub type Result<T> = std::result::Result<T, Error>;
