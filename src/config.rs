use crate::error::{Error, Result};
use confique::Config as _;
use std::sync::OnceLock;

#[derive(confique::Config)]
pub struct Config {
    /// Fail the command line run when any warning was reported.
    #[config(env = "QSCHEMA_DENY_WARNINGS", default = false)]
    pub deny_warnings: bool,
    /// Pretty-print the JSON document written to stdout.
    #[config(env = "QSCHEMA_PRETTY", default = true)]
    pub pretty: bool,
}

pub fn config() -> Result<&'static Config> {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = Config::builder()
        .env()
        .load()
        .map_err(|e| Error::Config(e.to_string()))?;
    Ok(CONFIG.get_or_init(|| loaded))
}
