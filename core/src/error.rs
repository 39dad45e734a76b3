use sqlx::error::BoxDynError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Opening the connection or the liveness check failed.
    #[error("failed to connect to database: {0}")]
    ConnectionError(#[source] sqlx::Error),

    #[error(transparent)]
    SqlxError(#[from] sqlx::Error),

    /// The query references `:name`, but no parameter called `name` was bound.
    #[error("query references :{0}, but no parameter with that name was bound")]
    UnknownPlaceholder(String),

    /// Only raised when the binder rejects unused parameters.
    #[error("parameter `{0}` was bound, but the query never references :{0}")]
    UnusedParameter(String),

    #[error("failed to encode bound argument: {0}")]
    EncodeError(#[source] BoxDynError),

    #[error("{0}")]
    ConfigError(String),
}
