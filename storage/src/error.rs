#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("failed to {action}: {source}")]
    Query {
        action: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl Error {
    pub(crate) fn query(action: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Query { action, source }
    }

    /// The underlying database driver error.
    pub fn pg_error(&self) -> &sqlx::Error {
        match self {
            Self::Query { source, .. } => source,
        }
    }
}

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;
