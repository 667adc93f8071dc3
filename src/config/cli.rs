use crate::config::toml_config::TomlConfig;
use crate::config::RawSettings;
use crate::utils::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "shippo-manifest-repro")]
#[command(about = "Creates two Shippo transactions 9 hours apart and tries to manifest them together")]
pub struct CliConfig {
    /// Shippo API token.
    #[arg(long, env = "SHIPPO_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Carrier account object id used for both transactions and the manifest.
    #[arg(long, env = "CARRIER_ACCOUNT_ID")]
    pub carrier_account_id: Option<String>,

    /// Stored origin address object id.
    #[arg(long, env = "FROM_ADDRESS_ID")]
    pub from_address_id: Option<String>,

    #[arg(long, env = "SHIPPO_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[arg(long)]
    pub servicelevel_token: Option<String>,

    /// IANA zone the timestamps are also shown in.
    #[arg(long)]
    pub reference_timezone: Option<String>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// TOML file with fallback values for any setting above.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Flags and environment first, then the config file if one was given.
    pub fn into_raw(self) -> Result<RawSettings> {
        let flags = RawSettings {
            api_key: self.api_key,
            carrier_account_id: self.carrier_account_id,
            from_address_id: self.from_address_id,
            api_base_url: self.api_base_url,
            servicelevel_token: self.servicelevel_token,
            reference_timezone: self.reference_timezone,
            timeout_seconds: self.timeout_seconds,
        };

        match self.config {
            Some(path) => Ok(flags.or(TomlConfig::from_file(path)?.into_raw())),
            None => Ok(flags),
        }
    }
}
