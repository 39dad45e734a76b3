use crate::config::Config;
use crate::error::{Error, Result};
use crate::query_builder::{Params, Placeholder, Syntax, Template};
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, warn};

/// What to do with a bound parameter the query never references.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnusedParameters {
    /// Keep the value in its positional slot and log a warning.
    #[default]
    Bind,
    /// Fail with [`Error::UnusedParameter`].
    Reject,
    /// Leave the value out and number the remaining parameters without gaps.
    Drop,
}

impl FromStr for UnusedParameters {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bind" => Ok(UnusedParameters::Bind),
            "reject" => Ok(UnusedParameters::Reject),
            "drop" => Ok(UnusedParameters::Drop),
            _ => Err(Error::ConfigError(format!(
                "unknown unused parameter policy `{s}`, expected `bind`, `reject` or `drop`"
            ))),
        }
    }
}

/// A query rewritten to positional placeholders, with its arguments in position order.
///
/// `args[i]` is the value for placeholder `$(i + 1)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared<V> {
    pub sql: String,
    pub args: Vec<V>,
}

impl<V> Prepared<V> {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn args(&self) -> &[V] {
        &self.args
    }

    pub fn into_parts(self) -> (String, Vec<V>) {
        (self.sql, self.args)
    }
}

/// Assigns positions to named parameters and rewrites the query to match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Binder {
    syntax: Syntax,
    unused: UnusedParameters,
    placeholder: Placeholder,
}

impl Binder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            syntax: config.syntax,
            unused: config.unused_parameters,
            placeholder: config.placeholder,
        }
    }

    pub fn syntax(mut self, syntax: Syntax) -> Self {
        self.syntax = syntax;
        self
    }

    pub fn unused_parameters(mut self, unused: UnusedParameters) -> Self {
        self.unused = unused;
        self
    }

    pub fn placeholder(mut self, placeholder: Placeholder) -> Self {
        self.placeholder = placeholder;
        self
    }

    pub fn get_syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn prepare<V>(&self, template: &str, params: Params<V>) -> Result<Prepared<V>> {
        let template = Template::compile_with(template, self.syntax);
        self.prepare_compiled(&template, params)
    }

    /// Bind `params` against an already compiled template.
    ///
    /// Positions are handed out in the iteration order of `params`. Every placeholder in the
    /// template must have a parameter, otherwise this fails with [`Error::UnknownPlaceholder`].
    pub fn prepare_compiled<V>(&self, template: &Template, params: Params<V>) -> Result<Prepared<V>> {
        let referenced = template.names();
        let mut positions = HashMap::with_capacity(params.len());
        let mut args = Vec::with_capacity(params.len());
        for (name, value) in params {
            if !referenced.contains(name.as_str()) {
                match self.unused {
                    UnusedParameters::Bind => {
                        warn!(parameter = %name, "parameter is not referenced by the query, binding it anyway")
                    }
                    UnusedParameters::Reject => return Err(Error::UnusedParameter(name)),
                    UnusedParameters::Drop => {
                        debug!(parameter = %name, "dropping parameter not referenced by the query");
                        continue;
                    }
                }
            }
            args.push(value);
            positions.insert(name, args.len());
        }
        let placeholder = self.placeholder;
        let sql = template.render_with(|name| positions.get(name).map(|&i| placeholder.token(i)))?;
        debug!(query = %sql, args = args.len(), "prepared query");
        Ok(Prepared { sql, args })
    }
}

/// Rewrite `:name` placeholders in `template` to `$1`, `$2`, ... using the default [`Binder`].
///
/// ```
/// use namedsql_core::{prepare, Params};
///
/// let params = Params::new().with("name", "Vanilla Sky");
/// let prepared = prepare("select name, genre from films where name = :name", params)?;
/// assert_eq!(prepared.sql, "select name, genre from films where name = $1");
/// assert_eq!(prepared.args, vec!["Vanilla Sky"]);
/// # Ok::<(), namedsql_core::Error>(())
/// ```
pub fn prepare<V>(template: &str, params: Params<V>) -> Result<Prepared<V>> {
    Binder::default().prepare(template, params)
}
