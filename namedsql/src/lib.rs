//! Named `:param` placeholders for sqlx.
//!
//! ```no_run
//! # #[cfg(feature = "postgres")]
//! # async fn example() -> namedsql::Result<()> {
//! use namedsql::{PgClient, SqlParams};
//! use sqlx::Row;
//!
//! let mut client = PgClient::connect("postgres://localhost:5432/films").await?;
//! let params = SqlParams::new()
//!     .bind("name", "Vanilla Sky".to_string())
//!     .bind("genre", "Drama".to_string());
//! let row = client
//!     .one("select name, genre from films where name = :name and genre = :genre", params)
//!     .await?;
//! let genre: String = row.try_get("genre")?;
//! # Ok(())
//! # }
//! ```
pub use namedsql_core::{
    prepare, Argument, Binder, Config, Error, Params, Placeholder, Prepared, Result, SqlParams, Substitutions,
    Syntax, Template, TemplateCache, UnusedParameters,
};
pub use sqlx::FromRow;

pub use client::{redact_password, Client};

pub mod client;
pub mod export;

pub mod query_builder {
    pub use namedsql_core::query_builder::*;
}

pub mod config {
    pub use namedsql_core::config::*;
}

#[cfg(feature = "postgres")]
pub type PgClient = Client<sqlx::Postgres>;

#[cfg(feature = "sqlite")]
pub type SqliteClient = Client<sqlx::Sqlite>;
