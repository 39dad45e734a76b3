use anyhow::{Context, Result};
use namedsql::{Config, PgClient};
use tokio::runtime::Runtime;

pub(crate) fn create_runtime() -> Result<Runtime> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .enable_time()
        .build()?;
    Ok(runtime)
}

/// `--url` wins over the config file and `DATABASE_URL`.
pub fn database_url(url: Option<String>, config: &Config) -> Result<String> {
    match url {
        Some(url) => Ok(url),
        None => Ok(config.database_url()?.to_string()),
    }
}

pub fn create_client(url: &str, config: &Config, runtime: &Runtime) -> Result<PgClient> {
    let client = runtime
        .block_on(PgClient::connect_with(url, config))
        .with_context(|| format!("could not connect to {}", namedsql::redact_password(url)))?;
    Ok(client)
}

/// Parse a `name=value` pair given on the command line.
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got `{s}`"))?;
    let name = name.trim_start_matches(':');
    if name.is_empty() {
        return Err(format!("missing parameter name in `{s}`"));
    }
    Ok((name.to_string(), value.to_string()))
}
