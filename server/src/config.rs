use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    /// Directory holding `index.html` and the built `pkg/`.
    pub static_dir: PathBuf,
}

impl Config {
    /// Reads `CAPACITACIONES_*` variables, loading a `.env` file first if present.
    pub fn from_env() -> Result<Config, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "could not read .env file");
            }
        }
        Config::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let setting = |name: &str, default: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = setting("CAPACITACIONES_PORT", "8080");
        let port = port.trim().parse().map_err(|_| ConfigError::Invalid {
            name: "CAPACITACIONES_PORT",
            value: port.clone(),
        })?;

        Ok(Config {
            host: setting("CAPACITACIONES_HOST", "127.0.0.1"),
            port,
            data_dir: setting("CAPACITACIONES_DATA_DIR", "data").into(),
            static_dir: setting("CAPACITACIONES_STATIC_DIR", "./client").into(),
        })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
