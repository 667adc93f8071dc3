use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Serializes timestamps as RFC 3339 with millisecond precision and a `Z` suffix.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub name: String,
    pub street1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String,
    pub phone: String,
    pub email: String,
}

impl Address {
    /// Synthetic Brooklyn destination used for every repro shipment.
    pub fn test_recipient() -> Self {
        Self {
            name: "Billy Bob".to_string(),
            street1: "206 1ST ST".to_string(),
            street2: Some("SUITE 202".to_string()),
            city: "Brooklyn".to_string(),
            state: "NY".to_string(),
            country: "US".to_string(),
            zip: "11232".to_string(),
            phone: "4151234567".to_string(),
            email: "mrhippo@goshippo.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Cm,
    In,
    Ft,
    Mm,
    M,
    Yd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    G,
    Oz,
    Lb,
    Kg,
}

/// Dimensions travel as strings, which is what the API accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    pub weight: String,
    pub length: String,
    pub width: String,
    pub height: String,
    pub distance_unit: DistanceUnit,
    pub mass_unit: MassUnit,
}

impl Parcel {
    pub fn test_parcel() -> Self {
        Self {
            weight: "1".to_string(),
            length: "1".to_string(),
            width: "2".to_string(),
            height: "3".to_string(),
            distance_unit: DistanceUnit::In,
            mass_unit: MassUnit::Lb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRequest {
    #[serde(with = "iso_millis")]
    pub shipment_date: DateTime<Utc>,
    /// Object id of a stored origin address.
    pub address_from: String,
    pub address_to: Address,
    pub parcels: Vec<Parcel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub shipment: ShipmentRequest,
    pub carrier_account: String,
    pub servicelevel_token: String,
    #[serde(rename = "async")]
    pub asynchronous: bool,
}

/// Accepts `null` where a list is expected.
fn nullable_list<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Vec<Value>, D::Error> {
    Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    pub object_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub messages: Vec<Value>,
    /// The body exactly as received; this is what gets printed.
    #[serde(skip)]
    pub raw: Value,
}

impl Transaction {
    pub fn from_body(raw: Value) -> serde_json::Result<Self> {
        let mut transaction: Self = serde_json::from_value(raw.clone())?;
        transaction.raw = raw;
        Ok(transaction)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestRequest {
    pub address_from: String,
    pub carrier_account: String,
    #[serde(with = "iso_millis")]
    pub shipment_date: DateTime<Utc>,
    pub transactions: Vec<String>,
    #[serde(rename = "async")]
    pub asynchronous: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub shipment_date: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub transactions: Vec<Value>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub errors: Vec<Value>,
    #[serde(skip)]
    pub raw: Value,
}

impl Manifest {
    pub fn from_body(raw: Value) -> serde_json::Result<Self> {
        let mut manifest: Self = serde_json::from_value(raw.clone())?;
        manifest.raw = raw;
        Ok(manifest)
    }

    /// A manifest can come back with HTTP 2xx and still carry `status: "ERROR"`.
    pub fn reports_error(&self) -> bool {
        self.status.as_deref() == Some("ERROR") || !self.errors.is_empty()
    }
}
