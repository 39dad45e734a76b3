use anyhow::{Context, Result as AnyResult};
use std::{fs::File, io::Read, path::Path, path::PathBuf};
pub use namedsql_core::config::Config;

static CONFIG_REL_PATHS: [&str; 2] = [".namedsql/config.toml", ".namedsql.toml"];

fn search_dirs() -> Vec<PathBuf> {
    let mut search = vec![PathBuf::from("."), PathBuf::from("..")];
    search.extend(dirs::config_dir());
    search.extend(dirs::home_dir());
    search
}

/// The first config file found, with environment overrides applied on top.
pub fn load_config() -> AnyResult<Config> {
    for dir in search_dirs() {
        for rel_path in &CONFIG_REL_PATHS {
            let path = dir.join(rel_path);
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Ok(read(&path)?.with_env()?);
            }
        }
    }
    Ok(Config::from_env()?)
}

pub fn read(path: impl AsRef<Path>) -> AnyResult<Config> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut buf = String::new();
    file.read_to_string(&mut buf)?;
    parse(&buf).with_context(|| format!("invalid config file {}", path.display()))
}

fn parse(buf: &str) -> AnyResult<Config> {
    let config: Config = toml::from_str(buf)?;
    Ok(config)
}
