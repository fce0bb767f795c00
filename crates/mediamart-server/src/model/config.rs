//! Configuration management for the MediaMart server
//!
//! Settings are merged from `conf/application.yml`, `MEDIAMART_*` environment
//! variables and command line flags, in ascending precedence.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use mediamart_common::SERVICE_NAME;

use crate::startup::logging::LoggingConfig;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_CONTEXT_PATH: &str = "/api";
const DEFAULT_TOKEN_TTL_SECONDS: i64 = 18000;

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
    #[arg(long = "log-dir")]
    log_dir: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix(SERVICE_NAME)
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/application.yml").required(false));

        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override("server.port", v)
                .expect("Failed to set server port override");
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder
                .set_override("db.url", v)
                .expect("Failed to set database URL override");
        }
        if let Some(v) = args.log_dir {
            config_builder = config_builder
                .set_override("logging.dir", v)
                .expect("Failed to set log directory override");
        }

        let app_config = config_builder
            .build()
            .expect("Failed to build configuration - check conf/application.yml");

        Configuration { config: app_config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string("server.address")
            .unwrap_or("0.0.0.0".to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int("server.port")
            .unwrap_or(DEFAULT_SERVER_PORT.into()) as u16
    }

    pub fn server_context_path(&self) -> String {
        self.config
            .get_string("server.contextPath")
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string())
    }

    // ========================================================================
    // Authentication Configuration
    // ========================================================================

    pub fn token_secret_key(&self) -> String {
        self.config
            .get_string("auth.token.secret.key")
            .unwrap_or_default()
    }

    pub fn token_ttl_seconds(&self) -> i64 {
        self.config
            .get_int("auth.token.ttl.seconds")
            .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS)
    }

    pub fn admin_seed_name(&self) -> String {
        self.config
            .get_string("auth.admin.name")
            .unwrap_or("Administrator".to_string())
    }

    pub fn admin_seed_email(&self) -> String {
        self.config
            .get_string("auth.admin.email")
            .unwrap_or("admin@mediamart.kz".to_string())
    }

    pub fn admin_seed_password(&self) -> String {
        self.config
            .get_string("auth.admin.password")
            .unwrap_or_default()
    }

    // ========================================================================
    // File Storage Configuration
    // ========================================================================

    pub fn files_base_url(&self) -> String {
        self.config
            .get_string("files.baseUrl")
            .unwrap_or("https://storage.mediamart.kz/files".to_string())
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string("logging.dir").ok(),
            self.config.get_bool("logging.console").unwrap_or(true),
            self.config.get_bool("logging.file").unwrap_or(false),
            self.config
                .get_string("logging.level")
                .unwrap_or("info".to_string()),
        )
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub async fn database_connection(
        &self,
    ) -> std::result::Result<DatabaseConnection, Box<dyn std::error::Error>> {
        let max_connections = self
            .config
            .get_int("db.pool.maxConnections")
            .unwrap_or(20) as u32;
        let min_connections = self.config.get_int("db.pool.minConnections").unwrap_or(1) as u32;
        let connect_timeout = self
            .config
            .get_int("db.pool.connectTimeoutSeconds")
            .unwrap_or(30) as u64;
        let idle_timeout = self
            .config
            .get_int("db.pool.idleTimeoutSeconds")
            .unwrap_or(600) as u64;
        let sqlx_logging = self.config.get_bool("db.sqlxLogging").unwrap_or(false);

        let url = self.config.get_string("db.url")?;

        let mut opt = ConnectOptions::new(url);

        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .sqlx_logging(sqlx_logging);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        let database_connection: DatabaseConnection = Database::connect(opt).await?;

        Ok(database_connection)
    }
}
