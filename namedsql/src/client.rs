use namedsql_core::{Binder, Config, Error, Result, SqlParams, TemplateCache};
use sqlx::{Connection, Database, Executor, FromRow, IntoArguments};
use std::fmt;
use tracing::debug;

/// A single database connection that accepts `:name` queries.
///
/// Each call binds its parameters, rewrites the query to positional placeholders and hands both
/// to sqlx. Compiled templates are cached per client.
pub struct Client<DB: Database> {
    conn: DB::Connection,
    binder: Binder,
    cache: TemplateCache,
}

impl<DB: Database> fmt::Debug for Client<DB> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("binder", &self.binder)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<DB> Client<DB>
where
    DB: Database,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    for<'q> <DB as Database>::Arguments<'q>: IntoArguments<'q, DB>,
{
    /// Open a connection to `url` and check that it is alive.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with(url, &Config::default()).await
    }

    pub async fn connect_with(url: &str, config: &Config) -> Result<Self> {
        debug!(url = %redact_password(url), "connecting");
        let mut conn = <DB::Connection as Connection>::connect(url).await.map_err(Error::ConnectionError)?;
        conn.ping().await.map_err(Error::ConnectionError)?;
        Ok(Self::from_connection_with(conn, config))
    }

    pub fn from_connection(conn: DB::Connection) -> Self {
        Self::from_connection_with(conn, &Config::default())
    }

    pub fn from_connection_with(conn: DB::Connection, config: &Config) -> Self {
        Self {
            conn,
            binder: config.binder(),
            cache: TemplateCache::new(config.template_cache_size),
        }
    }

    pub fn binder(&self) -> &Binder {
        &self.binder
    }

    pub fn connection(&mut self) -> &mut DB::Connection {
        &mut self.conn
    }

    pub fn into_connection(self) -> DB::Connection {
        self.conn
    }

    pub async fn ping(&mut self) -> Result<()> {
        self.conn.ping().await.map_err(Error::ConnectionError)
    }

    pub async fn close(self) -> Result<()> {
        self.conn.close().await.map_err(Error::ConnectionError)
    }

    fn prepare<'q>(&self, template: &str, params: SqlParams<DB>) -> Result<(String, <DB as Database>::Arguments<'q>)> {
        let template = self.cache.get_or_compile(template, self.binder.get_syntax());
        self.binder.prepare_compiled(&template, params)?.into_arguments()
    }

    /// Fetch every row the query returns.
    pub async fn all(&mut self, template: &str, params: SqlParams<DB>) -> Result<Vec<DB::Row>> {
        let (sql, arguments) = self.prepare(template, params)?;
        let rows = sqlx::query_with(&sql, arguments).fetch_all(&mut self.conn).await?;
        Ok(rows)
    }

    pub async fn all_as<T>(&mut self, template: &str, params: SqlParams<DB>) -> Result<Vec<T>>
    where
        T: Send + Unpin + for<'r> FromRow<'r, DB::Row>,
    {
        let (sql, arguments) = self.prepare(template, params)?;
        let rows = sqlx::query_as_with::<_, T, _>(&sql, arguments).fetch_all(&mut self.conn).await?;
        Ok(rows)
    }

    /// Fetch exactly one row. No rows is [`sqlx::Error::RowNotFound`].
    pub async fn one(&mut self, template: &str, params: SqlParams<DB>) -> Result<DB::Row> {
        let (sql, arguments) = self.prepare(template, params)?;
        let row = sqlx::query_with(&sql, arguments).fetch_one(&mut self.conn).await?;
        Ok(row)
    }

    pub async fn one_as<T>(&mut self, template: &str, params: SqlParams<DB>) -> Result<T>
    where
        T: Send + Unpin + for<'r> FromRow<'r, DB::Row>,
    {
        let (sql, arguments) = self.prepare(template, params)?;
        let row = sqlx::query_as_with::<_, T, _>(&sql, arguments).fetch_one(&mut self.conn).await?;
        Ok(row)
    }

    pub async fn optional(&mut self, template: &str, params: SqlParams<DB>) -> Result<Option<DB::Row>> {
        let (sql, arguments) = self.prepare(template, params)?;
        let row = sqlx::query_with(&sql, arguments).fetch_optional(&mut self.conn).await?;
        Ok(row)
    }

    pub async fn optional_as<T>(&mut self, template: &str, params: SqlParams<DB>) -> Result<Option<T>>
    where
        T: Send + Unpin + for<'r> FromRow<'r, DB::Row>,
    {
        let (sql, arguments) = self.prepare(template, params)?;
        let row = sqlx::query_as_with::<_, T, _>(&sql, arguments)
            .fetch_optional(&mut self.conn)
            .await?;
        Ok(row)
    }

    /// Run a statement that returns no rows, e.g. an `insert` or `update`.
    pub async fn execute(&mut self, template: &str, params: SqlParams<DB>) -> Result<DB::QueryResult> {
        let (sql, arguments) = self.prepare(template, params)?;
        let result = sqlx::query_with(&sql, arguments).execute(&mut self.conn).await?;
        Ok(result)
    }

    /// Run unparameterized SQL as-is and collect the rows. Multiple statements are allowed.
    pub async fn raw(&mut self, sql: &str) -> Result<Vec<DB::Row>> {
        let rows = sqlx::raw_sql(sql).fetch_all(&mut self.conn).await?;
        Ok(rows)
    }

    pub async fn raw_execute(&mut self, sql: &str) -> Result<DB::QueryResult> {
        let result = sqlx::raw_sql(sql).execute(&mut self.conn).await?;
        Ok(result)
    }
}

/// Mask the password of a connection URL, for logging.
pub fn redact_password(url: &str) -> String {
    match url::Url::parse(url) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                // only fails for URLs that cannot carry credentials
                let _ = parsed.set_password(Some("***"));
            }
            parsed.to_string()
        }
        Err(_) => "<unparseable url>".to_string(),
    }
}
