use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::info;

use crate::error::StartupError;

const DEFAULT_MAPPING_FILES: &str =
    "data/mapping_1sem.xlsx,data/mapping_3sem.xlsx,data/mapping_5sem.xlsx";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Loaded in this order; later files overwrite earlier ones.
    pub mapping_files: Vec<PathBuf>,
    pub manifest_path: PathBuf,
    pub counter_path: PathBuf,
    /// `*` or a comma-separated list of origins.
    pub cors_origins: String,
}

impl Config {
    pub fn load() -> Result<Self, StartupError> {
        Ok(Self {
            port: try_load("RUST_PORT", "8000")?,
            mapping_files: split_list(&try_load::<String>("MAPPING_FILES", DEFAULT_MAPPING_FILES)?)
                .map(PathBuf::from)
                .collect(),
            manifest_path: try_load("MANIFEST_PATH", "data/drive_manifest.csv")?,
            counter_path: try_load("COUNTER_PATH", "data/visitors.txt")?,
            cors_origins: try_load("CORS_ORIGINS", "*")?,
        })
    }
}

pub fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, StartupError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| StartupError::Config {
            key,
            reason: e.to_string(),
        })
}
