use crate::config::RawSettings;
use crate::utils::error::{ReproError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Optional settings file.
///
/// ```toml
/// [shippo]
/// api_key = "${SHIPPO_API_KEY}"
/// carrier_account_id = "ca_..."
/// from_address_id = "addr_..."
///
/// [repro]
/// reference_timezone = "America/Los_Angeles"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub shippo: ShippoSection,
    #[serde(default)]
    pub repro: ReproSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippoSection {
    pub api_key: Option<String>,
    pub carrier_account_id: Option<String>,
    pub from_address_id: Option<String>,
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReproSection {
    pub servicelevel_token: Option<String>,
    pub reference_timezone: Option<String>,
}

impl TomlConfig {
    /// Loads and validates a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loaded config file {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        let config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| ReproError::ConfigParse {
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
        let re = PLACEHOLDER.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern is valid")
        });

        re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn into_raw(self) -> RawSettings {
        RawSettings {
            api_key: self.shippo.api_key,
            carrier_account_id: self.shippo.carrier_account_id,
            from_address_id: self.shippo.from_address_id,
            api_base_url: self.shippo.api_base_url,
            servicelevel_token: self.repro.servicelevel_token,
            reference_timezone: self.repro.reference_timezone,
            timeout_seconds: self.shippo.timeout_seconds,
        }
    }
}

impl Validate for TomlConfig {
    // A placeholder that survived substitution means the variable was never exported.
    fn validate(&self) -> Result<()> {
        let fields = [
            ("shippo.api_key", &self.shippo.api_key),
            ("shippo.carrier_account_id", &self.shippo.carrier_account_id),
            ("shippo.from_address_id", &self.shippo.from_address_id),
            ("shippo.api_base_url", &self.shippo.api_base_url),
            ("repro.servicelevel_token", &self.repro.servicelevel_token),
            ("repro.reference_timezone", &self.repro.reference_timezone),
        ];

        for (name, value) in fields {
            if let Some(value) = value {
                validate_non_empty_string(name, value)?;
                if value.contains("${") {
                    return Err(ReproError::InvalidConfigValue {
                        field: name.to_string(),
                        value: value.clone(),
                        reason: "Environment variable placeholder was not resolved".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
