use crate::domain::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::phone_number::{DEFAULT_COUNTRY_CODE, PhoneNormalizer};
use clap::builder::RangedU64ValueParser;
use clap::{Args, Parser, ValueEnum};

pub const DEFAULT_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Operator user id that owns phone numbers and conversations
    #[arg(long, env = "RELAYDESK_USER_ID", default_value = DEFAULT_USER_ID)]
    pub user_id: String,

    /// Load the demo phone numbers and conversations at startup
    #[arg(long, env = "RELAYDESK_SEED_DEMO_DATA", default_value_t = false)]
    pub seed_demo_data: bool,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub messaging: MessagingConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "RELAYDESK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "RELAYDESK_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Seconds to wait for in-flight requests during shutdown
    #[arg(long, env = "RELAYDESK_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct MessagingConfig {
    /// Number of messages returned per page
    #[arg(
        long,
        env = "RELAYDESK_PAGE_SIZE",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_PAGE_SIZE as u64)
    )]
    pub page_size: usize,

    /// Calling code applied to phone numbers entered without a leading +
    #[arg(
        long,
        env = "RELAYDESK_DEFAULT_COUNTRY_CODE",
        default_value = DEFAULT_COUNTRY_CODE,
        value_parser = parse_country_code
    )]
    pub default_country_code: String,
}

impl MessagingConfig {
    #[must_use]
    pub fn phone_normalizer(&self) -> PhoneNormalizer {
        PhoneNormalizer::new(&self.default_country_code).unwrap_or_default()
    }
}

fn parse_country_code(value: &str) -> Result<String, String> {
    PhoneNormalizer::new(value).map(|n| n.country_code().to_string()).map_err(|e| e.to_string())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "RELAYDESK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_id: DEFAULT_USER_ID.to_string(),
            seed_demo_data: false,
            server: ServerConfig { host: "0.0.0.0".to_string(), port: 3000, shutdown_timeout_secs: 5 },
            messaging: MessagingConfig {
                page_size: DEFAULT_PAGE_SIZE,
                default_country_code: DEFAULT_COUNTRY_CODE.to_string(),
            },
            telemetry: TelemetryConfig { log_format: LogFormat::Text },
        }
    }
}
