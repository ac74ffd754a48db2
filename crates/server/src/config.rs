use config::ConfigError;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Comma-separated origin substrings, or "*" for any.
    pub cors_origins: String,
    /// Directory the static site is served from.
    pub public_dir: String,
}

#[derive(Deserialize, Clone)]
pub struct DatabaseSettings {
    /// `sqlite://...` for the durable backend, `memory` for the
    /// process-local one.
    pub url: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());
        let env_map = collect_env_vars();

        let s = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.cors_origins", "*")?
            .set_default("server.public_dir", "public")?
            .set_default("database.url", "sqlite://data/church.db")?
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::File::with_name(&format!("config.{}", run_mode)).required(false))
            .add_source(config::File::from_str(
                &serde_json::to_string(&env_map)
                    .expect("Environment variables should serialize to JSON"),
                config::FileFormat::Json,
            ))
            .build()?;

        s.try_deserialize()
    }
}

fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("CHURCH_"))
        .map(|(k, v)| {
            let new_key = k
                .trim_start_matches("CHURCH_")
                .replace("__", ".")
                .to_lowercase();
            (new_key, v)
        })
        .collect()
}
