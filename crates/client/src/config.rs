//! Runner configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings that select content and override the loaded game config.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `config.toml` and `templates.ron`.
    pub data_dir: Option<PathBuf>,
    /// World seed overriding the one in `config.toml`.
    pub seed: Option<u64>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CAVERN_DATA_DIR` - Load content from this directory (default: built-in data)
    /// - `CAVERN_SEED` - World seed (default: from config, else random)
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var_os("CAVERN_DATA_DIR").map(PathBuf::from),
            seed: read_env::<u64>("CAVERN_SEED"),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
