use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use namedsql::{Config, Placeholder};

use crate::command::BindArgs;

/// Print the rewritten query and its positional arguments, without touching a database.
#[derive(Parser, Debug)]
pub struct Render {
    /// The query, with :name placeholders.
    template: String,

    #[command(flatten)]
    bind: BindArgs,
}

impl Render {
    pub fn run(self, config: &Config) -> Result<()> {
        let config = self.bind.apply(config);
        let prepared = config.binder().prepare(&self.template, self.bind.params())?;
        println!("{}", prepared.sql);
        for line in legend(config.placeholder, &prepared.args) {
            println!("{}", line.dimmed());
        }
        Ok(())
    }
}

/// One `-- <token> = <value>` comment line per positional argument.
fn legend(placeholder: Placeholder, args: &[String]) -> Vec<String> {
    args.iter()
        .enumerate()
        .map(|(i, arg)| format!("-- {} = {:?}", placeholder.token(i + 1), arg))
        .collect()
}
