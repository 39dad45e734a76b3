use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use namedsql::{Config, SqlParams};
use sqlx::postgres::PgRow;
use sqlx::{Column, Postgres, Row, TypeInfo};

use crate::command::BindArgs;
use crate::util::{create_client, create_runtime, database_url};

/// Run a query and print the rows. Values are bound as text; cast in SQL where needed (`:n::int`).
#[derive(Parser, Debug)]
pub struct Query {
    /// The query, with :name placeholders.
    template: String,

    #[command(flatten)]
    bind: BindArgs,

    /// Connection URL. Defaults to DATABASE_URL, then `database_url` from the config file.
    #[arg(long)]
    url: Option<String>,
}

impl Query {
    pub fn run(self, config: &Config) -> Result<()> {
        let config = self.bind.apply(config);
        let url = database_url(self.url, &config)?;
        let params = self
            .bind
            .params()
            .into_iter()
            .fold(SqlParams::<Postgres>::new(), |params, (name, value)| params.bind(name, value));

        let runtime = create_runtime()?;
        let mut client = create_client(&url, &config, &runtime)?;
        let rows = runtime.block_on(client.all(&self.template, params))?;
        runtime.block_on(client.close())?;

        print_table(&rows);
        eprintln!("({} rows)", rows.len());
        Ok(())
    }
}

fn cell(row: &PgRow, i: usize) -> Option<String> {
    macro_rules! decode_as {
        ($($ty:ty),*) => {
            $(
                if let Ok(value) = row.try_get::<Option<$ty>, _>(i) {
                    return value.map(|v| v.to_string());
                }
            )*
        };
    }
    decode_as!(String, i64, i32, i16, f64, f32, bool);
    Some(format!("<{}>", row.column(i).type_info().name()))
}

fn print_table(rows: &[PgRow]) {
    let Some(first) = rows.first() else {
        return;
    };
    let header = first.columns().iter().map(|c| c.name().to_string()).collect::<Vec<_>>();
    let body = rows
        .iter()
        .map(|row| (0..header.len()).map(|i| cell(row, i)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let widths = header
        .iter()
        .enumerate()
        .map(|(i, name)| {
            body.iter()
                .map(|r| r[i].as_deref().map_or(4, str::len))
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let line = header
        .iter()
        .zip(&widths)
        .map(|(name, w)| format!("{:w$}", name, w = *w).bold().to_string())
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{line}");
    for row in body {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(value, w)| match value {
                Some(v) => format!("{:w$}", v, w = *w),
                None => format!("{:w$}", "NULL", w = *w).dimmed().to_string(),
            })
            .collect::<Vec<_>>()
            .join(" | ");
        println!("{line}");
    }
}
