use crate::error::{Error, Result};
use crate::query_builder::{Binder, Placeholder, Syntax, UnusedParameters};
use serde::Deserialize;
use std::env::var;

pub const DEFAULT_TEMPLATE_CACHE_SIZE: usize = 256;

/// Binding and connection settings.
///
/// Deserializes from a config file (every key optional). Environment variables `DATABASE_URL`
/// and `NAMEDSQL_TEMPLATE_CACHE_SIZE` take precedence when applied with [`Config::with_env`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub syntax: Syntax,
    pub unused_parameters: UnusedParameters,
    pub placeholder: Placeholder,
    pub template_cache_size: usize,
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            syntax: Syntax::default(),
            unused_parameters: UnusedParameters::default(),
            placeholder: Placeholder::default(),
            template_cache_size: DEFAULT_TEMPLATE_CACHE_SIZE,
            database_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(url) = var("DATABASE_URL") {
            self.database_url = Some(url);
        }
        if let Ok(size) = var("NAMEDSQL_TEMPLATE_CACHE_SIZE") {
            self.template_cache_size = size.parse().map_err(|_| {
                Error::ConfigError(format!("NAMEDSQL_TEMPLATE_CACHE_SIZE must be a number, got `{size}`"))
            })?;
        }
        Ok(self)
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database_url
            .as_deref()
            .ok_or_else(|| Error::ConfigError("DATABASE_URL must be set".to_string()))
    }

    pub fn binder(&self) -> Binder {
        Binder::from_config(self)
    }
}
