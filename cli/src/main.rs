use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod command;
pub(crate) mod config;
mod util;

use command::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Increase log verbosity. Repeat for more (-vv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Render(Render),
    Query(Query),
    Raw(Raw),
    Ping(Ping),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "namedsql=debug,namedsql_core=debug,info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn main() -> Result<()> {
    use Command::*;
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = config::load_config()?;
    match cli.command {
        Render(r) => r.run(&config),
        Query(q) => q.run(&config),
        Raw(r) => r.run(&config),
        Ping(p) => p.run(&config),
    }
}
