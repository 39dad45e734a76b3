mod ping;
mod query;
mod raw;
mod render;

pub use ping::*;
pub use query::*;
pub use raw::*;
pub use render::*;

use crate::util::parse_param;
use clap::Args;
use namedsql::{Config, Params, Syntax, UnusedParameters};

/// Parameter flags shared by `render` and `query`.
#[derive(Args, Debug)]
pub struct BindArgs {
    /// Bind a parameter, as name=value. Repeat for each parameter.
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,

    /// Treat every :name as a placeholder, even inside string literals and comments.
    #[arg(long)]
    plain: bool,

    /// What to do with parameters the query never references: bind, reject or drop.
    #[arg(long)]
    unused: Option<UnusedParameters>,
}

impl BindArgs {
    /// The config with command line overrides applied.
    pub fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if self.plain {
            config.syntax = Syntax::Plain;
        }
        if let Some(unused) = self.unused {
            config.unused_parameters = unused;
        }
        config
    }

    pub fn params(&self) -> Params<String> {
        self.params.iter().cloned().collect()
    }
}
