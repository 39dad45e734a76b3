/// Everything needed from sqlx to open connections and read rows.
/// Using this module, it is optional to directly depend on the `sqlx` crate.
pub use sqlx::{raw_sql, Connection, Database, Executor, Row};

#[cfg(feature = "postgres")]
pub use sqlx::postgres::{PgConnectOptions, PgConnection, PgQueryResult, PgRow};
#[cfg(feature = "sqlite")]
pub use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteQueryResult, SqliteRow};
