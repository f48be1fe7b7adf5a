use config::{Config, ConfigError, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Deserialize)]
pub struct DatabaseSettings {
    pub url: SecretString,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_connections: u32,
}

/// Defaults, then `configuration.toml` if present, then `TRIVIA_*` variables
/// (`TRIVIA_DATABASE__URL`, `TRIVIA_APPLICATION__PORT`, ...).
pub fn get_configuration() -> Result<Settings, ConfigError> {
    dotenv::dotenv().ok();

    Config::builder()
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.port", 5000)?
        .set_default("database.url", "sqlite:trivia.db")?
        .set_default("database.max_connections", 5)?
        .add_source(File::with_name("configuration").required(false))
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
}
