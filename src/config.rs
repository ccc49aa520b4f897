use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Default, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub assets: StaticConfig,

    #[command(flatten)]
    pub health: HealthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[arg(long = "database-url", env = "EXERCISE_DATABASE_URL", default_value = "postgres://localhost/exercise-track")]
    pub url: String,

    /// Maximum number of pooled database connections
    #[arg(long = "db-max-connections", env = "EXERCISE_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub max_connections: u32,

    /// How long to wait for a free connection before failing a request
    #[arg(long = "db-acquire-timeout-secs", env = "EXERCISE_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 5)]
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/exercise-track".to_string(),
            max_connections: 10,
            acquire_timeout_secs: 5,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "EXERCISE_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "EXERCISE_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (health probes)
    #[arg(long, env = "EXERCISE_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight work after a shutdown signal
    #[arg(long, env = "EXERCISE_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000, mgmt_port: 9090, shutdown_timeout_secs: 5 }
    }
}

#[derive(Clone, Debug, Args)]
pub struct StaticConfig {
    /// Directory of static assets served under `/`
    #[arg(long, env = "EXERCISE_PUBLIC_DIR", default_value = "public")]
    pub public_dir: String,

    /// Directory holding the landing page (`index.html`)
    #[arg(long, env = "EXERCISE_VIEWS_DIR", default_value = "views")]
    pub views_dir: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { public_dir: "public".to_string(), views_dir: "views".to_string() }
    }
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the database readiness check
    #[arg(long = "health-db-timeout-ms", env = "EXERCISE_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { db_timeout_ms: 2000 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "EXERCISE_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; telemetry export is disabled when unset
    #[arg(long, env = "EXERCISE_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}
