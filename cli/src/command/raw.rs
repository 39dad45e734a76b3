use anyhow::Result;
use clap::Parser;
use namedsql::Config;

use crate::util::{create_client, create_runtime, database_url};

/// Run SQL as-is, without placeholder rewriting. Multiple statements are allowed.
#[derive(Parser, Debug)]
pub struct Raw {
    sql: String,

    /// Connection URL. Defaults to DATABASE_URL, then `database_url` from the config file.
    #[arg(long)]
    url: Option<String>,
}

impl Raw {
    pub fn run(self, config: &Config) -> Result<()> {
        let url = database_url(self.url, config)?;
        let runtime = create_runtime()?;
        let mut client = create_client(&url, config, &runtime)?;
        let result = runtime.block_on(client.raw_execute(&self.sql))?;
        eprintln!("{} rows affected", result.rows_affected());
        runtime.block_on(client.close())?;
        Ok(())
    }
}
