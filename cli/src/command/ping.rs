use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use namedsql::Config;

use crate::util::{create_client, create_runtime, database_url};

/// Check that the database is reachable.
#[derive(Parser, Debug)]
pub struct Ping {
    /// Connection URL. Defaults to DATABASE_URL, then `database_url` from the config file.
    #[arg(long)]
    url: Option<String>,
}

impl Ping {
    pub fn run(self, config: &Config) -> Result<()> {
        let url = database_url(self.url, config)?;
        let runtime = create_runtime()?;
        let client = create_client(&url, config, &runtime)?;
        runtime.block_on(client.close())?;
        eprintln!("{} {}", "ok".green(), namedsql::redact_password(&url));
        Ok(())
    }
}
