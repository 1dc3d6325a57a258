use config::{Config, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::ConnectOptions;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub application: ApplicationSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    pub client: ClientSettings,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    /// Name of the resolved environment, reported by `/health`.
    pub environment: String,
}

#[derive(Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: SecretString,
    pub host: String,

    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,

    pub database_name: String,
    pub require_ssl: bool,
}

#[derive(Deserialize, Clone, Default)]
pub struct TelemetrySettings {
    /// OTLP/gRPC collector, e.g. `http://localhost:4317`. Spans stay local when unset.
    pub otlp_endpoint: Option<String>,
}

#[derive(Deserialize, Clone)]
pub struct ClientSettings {
    pub api_base_url: String,
}

impl DatabaseSettings {
    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db()
            .database(&self.database_name)
            .log_statements(tracing_log::log::LevelFilter::Trace)
    }

    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        [Environment::Local, Environment::Production]
            .into_iter()
            .find(|env| env.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| format!("unknown environment `{name}`, expected `local` or `production`"))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to determine the current directory: {0}")]
    CurrentDir(#[from] std::io::Error),

    #[error("failed to parse APP_ENVIRONMENT: {0}")]
    Environment(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}

pub fn get_configuration() -> Result<Settings, ConfigurationError> {
    let base_path = std::env::current_dir()?;
    let configuration_directory = base_path.join("configurations");
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .as_deref()
        .unwrap_or("local")
        .parse()
        .map_err(ConfigurationError::Environment)?;
    let settings = Config::builder()
        .add_source(File::from(configuration_directory.join("base")))
        .add_source(File::from(
            configuration_directory.join(environment.as_str()),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"), // APP_DATABASE__USERNAME -> database.username
        )
        .set_override("application.environment", environment.as_str())?;

    Ok(settings.build()?.try_deserialize()?)
}
