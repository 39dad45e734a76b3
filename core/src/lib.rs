pub use self::cache::TemplateCache;
pub use self::config::Config;
pub use self::error::{Error, Result};
pub use self::query_builder::{
    prepare, Argument, Binder, Params, Placeholder, Prepared, SqlParams, Substitutions, Syntax, Template,
    UnusedParameters,
};

mod error;
pub mod cache;
pub mod config;
pub mod query_builder;
