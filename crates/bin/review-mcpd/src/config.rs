use clap::{Parser, builder::BoolishValueParser};
use review_core::control::{ControlOptions, ReferentialPolicy};
use review_core::services::{Credentials, StoreConfig};
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_DB_NAMESPACE: &str = "reviews";
const DEFAULT_DB_NAME: &str = "reviews";
const DEFAULT_MCP_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_OPERATION_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "review-mcpd", version, about = "Restaurant reviews MCP daemon.")]
#[allow(clippy::struct_excessive_bools)]
struct CliArgs {
    #[arg(long, env = "REVIEWS_DB_NAMESPACE", default_value = DEFAULT_DB_NAMESPACE)]
    db_namespace: String,

    #[arg(long, env = "REVIEWS_DB_NAME", default_value = DEFAULT_DB_NAME)]
    db_name: String,

    #[arg(
        long,
        env = "REVIEWS_DB_IN_MEMORY",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    db_in_memory: bool,

    #[arg(long, env = "REVIEWS_DB_URI")]
    db_uri: Option<String>,

    #[arg(long, env = "REVIEWS_DB_USERNAME")]
    db_username: Option<String>,

    #[arg(long, env = "REVIEWS_DB_PASSWORD")]
    db_password: Option<String>,

    #[arg(
        long = "stdio",
        env = "REVIEWS_ENABLE_STDIO",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "REVIEWS_MCP_SERVE",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_serve: bool,

    #[arg(long, env = "REVIEWS_MCP_HTTP_ADDR", default_value = DEFAULT_MCP_HTTP_ADDR)]
    mcp_http_addr: SocketAddr,

    #[arg(
        long,
        env = "REVIEWS_MCP_STATELESS",
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    mcp_stateless: bool,

    #[arg(
        long,
        env = "REVIEWS_OPERATION_TIMEOUT_SECS",
        default_value_t = DEFAULT_OPERATION_TIMEOUT_SECS
    )]
    operation_timeout_secs: u64,

    #[arg(
        long,
        env = "REVIEWS_ALLOW_ORPHAN_REVIEWS",
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    allow_orphan_reviews: bool,

    #[arg(long, env = "REVIEWS_LOG_LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    log_level: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReviewsConfig {
    pub db_namespace: String,
    pub db_name: String,
    pub db_in_memory: bool,
    pub db_uri: Option<String>,
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    pub enable_stdio: bool,
    pub mcp_serve: bool,
    pub mcp_http_addr: SocketAddr,
    pub mcp_stateless: bool,
    pub operation_timeout: Option<Duration>,
    pub allow_orphan_reviews: bool,
    pub log_level: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    MissingSetting(&'static str),
    #[error("invalid {name} value: {value}")]
    InvalidSetting { name: &'static str, value: String },
    #[error("no transport enabled (set REVIEWS_ENABLE_STDIO or REVIEWS_MCP_SERVE)")]
    NoTransport,
}

impl ReviewsConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Connection settings for the shared store handle.
    pub fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::in_memory(self.db_namespace.clone(), self.db_name.clone());
        if self.db_in_memory {
            return config;
        }
        let mut config = match self.db_uri.as_ref() {
            Some(uri) => config.with_endpoint(uri.clone()),
            None => config,
        };
        if let (Some(username), Some(password)) =
            (self.db_username.as_ref(), self.db_password.as_ref())
        {
            config = config.with_credentials(Credentials {
                username: username.clone(),
                password: password.clone(),
            });
        }
        config
    }

    pub fn control_options(&self) -> ControlOptions {
        let policy = if self.allow_orphan_reviews {
            ReferentialPolicy::Permissive
        } else {
            ReferentialPolicy::Enforce
        };
        ControlOptions::default()
            .with_referential_policy(policy)
            .with_operation_timeout(self.operation_timeout)
    }
}

impl TryFrom<CliArgs> for ReviewsConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let db_uri = args.db_uri.filter(|value| !value.trim().is_empty());
        let db_username = args.db_username.filter(|value| !value.trim().is_empty());
        let db_password = args.db_password.filter(|value| !value.trim().is_empty());

        let db_in_memory = args.db_in_memory || db_uri.is_none();

        if !db_in_memory {
            if db_username.is_none() {
                return Err(ConfigError::MissingSetting("REVIEWS_DB_USERNAME"));
            }
            if db_password.is_none() {
                return Err(ConfigError::MissingSetting("REVIEWS_DB_PASSWORD"));
            }
        }

        if args.db_namespace.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "REVIEWS_DB_NAMESPACE",
                value: args.db_namespace,
            });
        }
        if args.db_name.trim().is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "REVIEWS_DB_NAME",
                value: args.db_name,
            });
        }

        if !args.enable_stdio && !args.mcp_serve {
            return Err(ConfigError::NoTransport);
        }

        let operation_timeout = if args.operation_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(args.operation_timeout_secs))
        };

        Ok(Self {
            db_namespace: args.db_namespace,
            db_name: args.db_name,
            db_in_memory,
            db_uri,
            db_username,
            db_password,
            enable_stdio: args.enable_stdio,
            mcp_serve: args.mcp_serve,
            mcp_http_addr: args.mcp_http_addr,
            mcp_stateless: args.mcp_stateless,
            operation_timeout,
            allow_orphan_reviews: args.allow_orphan_reviews,
            log_level: args.log_level,
        })
    }
}
