mod conversion;
mod error;
mod loader;

use std::path::Path;

use serde::Deserialize;

pub use conversion::{CacheControlConfig, ConversionConfig, ModelAliases, ToolCallPairing};
pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
        loader::load(path)
    }
}

impl std::str::FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        loader::parse(s)
    }
}
