#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_required_field,
    validate_timezone, validate_url,
};
use chrono_tz::Tz;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.goshippo.com";
pub const DEFAULT_SERVICELEVEL_TOKEN: &str = "dhl_ecommerce_parcel_plus_expedited";
pub const DEFAULT_REFERENCE_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

pub const API_KEY_ENV: &str = "SHIPPO_API_KEY";
pub const CARRIER_ACCOUNT_ENV: &str = "CARRIER_ACCOUNT_ID";
pub const FROM_ADDRESS_ENV: &str = "FROM_ADDRESS_ID";

/// Settings as gathered from one source, before defaults and validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSettings {
    pub api_key: Option<String>,
    pub carrier_account_id: Option<String>,
    pub from_address_id: Option<String>,
    pub api_base_url: Option<String>,
    pub servicelevel_token: Option<String>,
    pub reference_timezone: Option<String>,
    pub timeout_seconds: Option<u64>,
}

impl RawSettings {
    /// Fills every unset value from `fallback`.
    pub fn or(self, fallback: RawSettings) -> RawSettings {
        RawSettings {
            api_key: self.api_key.or(fallback.api_key),
            carrier_account_id: self.carrier_account_id.or(fallback.carrier_account_id),
            from_address_id: self.from_address_id.or(fallback.from_address_id),
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            servicelevel_token: self.servicelevel_token.or(fallback.servicelevel_token),
            reference_timezone: self.reference_timezone.or(fallback.reference_timezone),
            timeout_seconds: self.timeout_seconds.or(fallback.timeout_seconds),
        }
    }
}

/// Validated settings. Built once at startup and passed down explicitly.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub carrier_account_id: String,
    pub from_address_id: String,
    pub api_base_url: Url,
    pub servicelevel_token: String,
    pub reference_timezone: Tz,
    pub timeout: Duration,
}

// The API key stays out of debug output.
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("carrier_account_id", &self.carrier_account_id)
            .field("from_address_id", &self.from_address_id)
            .field("api_base_url", &self.api_base_url.as_str())
            .field("servicelevel_token", &self.servicelevel_token)
            .field("reference_timezone", &self.reference_timezone)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl TryFrom<RawSettings> for Settings {
    type Error = crate::utils::error::ReproError;

    fn try_from(raw: RawSettings) -> Result<Self> {
        // Required values first, in the order the error message lists them.
        let api_key = validate_required_field(API_KEY_ENV, raw.api_key.as_deref())?;
        let carrier_account_id =
            validate_required_field(CARRIER_ACCOUNT_ENV, raw.carrier_account_id.as_deref())?;
        let from_address_id =
            validate_required_field(FROM_ADDRESS_ENV, raw.from_address_id.as_deref())?;

        let api_base_url = validate_url(
            "api_base_url",
            raw.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        )?;

        let servicelevel_token = raw
            .servicelevel_token
            .unwrap_or_else(|| DEFAULT_SERVICELEVEL_TOKEN.to_string());
        validate_non_empty_string("servicelevel_token", &servicelevel_token)?;

        let reference_timezone = validate_timezone(
            "reference_timezone",
            raw.reference_timezone
                .as_deref()
                .unwrap_or(DEFAULT_REFERENCE_TIMEZONE),
        )?;

        let timeout_seconds = raw.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS);
        validate_positive_number("timeout_seconds", timeout_seconds, 1)?;

        Ok(Settings {
            api_key,
            carrier_account_id,
            from_address_id,
            api_base_url,
            servicelevel_token,
            reference_timezone,
            timeout: Duration::from_secs(timeout_seconds),
        })
    }
}
