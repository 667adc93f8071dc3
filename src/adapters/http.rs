//! reqwest-backed client for the Shippo REST API.

use crate::config::Settings;
use crate::domain::model::{Manifest, ManifestRequest, Transaction, TransactionRequest};
use crate::domain::ports::ShippingApi;
use crate::utils::error::{ReproError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

pub struct ShippoClient {
    client: Client,
    base_url: String,
}

impl ShippoClient {
    /// Builds the one authenticated client shared by every call in a run.
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut token = HeaderValue::from_str(&format!("ShippoToken {}", settings.api_key))
            .map_err(|_| ReproError::InvalidConfigValue {
                field: crate::config::API_KEY_ENV.to_string(),
                value: "<redacted>".to_string(),
                reason: "API key contains characters not allowed in a header".to_string(),
            })?;
        token.set_sensitive(true);
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, resource: &str) -> String {
        format!("{}/{}/", self.base_url, resource)
    }

    /// Returns the decoded body as sent, so callers can print it unaltered.
    async fn post<B>(&self, operation: &'static str, resource: &str, body: &B) -> Result<Value>
    where
        B: Serialize + Sync,
    {
        let url = self.endpoint(resource);
        tracing::debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        tracing::debug!("{} response status: {}", operation, status);

        let text = response.text().await?;
        if !status.is_success() {
            return Err(ReproError::Api {
                operation,
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl ShippingApi for ShippoClient {
    async fn create_transaction(&self, request: &TransactionRequest) -> Result<Transaction> {
        let body = self.post("transaction", "transactions", request).await?;
        Ok(Transaction::from_body(body)?)
    }

    async fn create_manifest(&self, request: &ManifestRequest) -> Result<Manifest> {
        let body = self.post("manifest", "manifests", request).await?;
        Ok(Manifest::from_body(body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RawSettings;
    use crate::domain::model::{Address, Parcel, ShipmentRequest};
    use chrono::{TimeZone, Utc};
    use httpmock::prelude::*;

    fn settings_for(server: &MockServer) -> Settings {
        Settings::try_from(RawSettings {
            api_key: Some("shippo_test_key".to_string()),
            carrier_account_id: Some("ca_dhl".to_string()),
            from_address_id: Some("addr_origin".to_string()),
            api_base_url: Some(server.base_url()),
            ..Default::default()
        })
        .unwrap()
    }

    fn transaction_request() -> TransactionRequest {
        TransactionRequest {
            shipment: ShipmentRequest {
                shipment_date: Utc.with_ymd_and_hms(2024, 1, 2, 2, 0, 0).unwrap(),
                address_from: "addr_origin".to_string(),
                address_to: Address::test_recipient(),
                parcels: vec![Parcel::test_parcel()],
            },
            carrier_account: "ca_dhl".to_string(),
            servicelevel_token: "dhl_ecommerce_parcel_plus_expedited".to_string(),
            asynchronous: false,
        }
    }

    #[tokio::test]
    async fn sends_token_and_json_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/transactions/")
                .header("Authorization", "ShippoToken shippo_test_key")
                .json_body_partial(
                    r#"{"async": false, "shipment": {"shipment_date": "2024-01-02T02:00:00.000Z"}}"#,
                );
            then.status(201)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"object_id": "tx_1", "status": "SUCCESS"}));
        });

        let client = ShippoClient::new(&settings_for(&server)).unwrap();
        let transaction = client.create_transaction(&transaction_request()).await.unwrap();

        mock.assert();
        assert_eq!(transaction.object_id, "tx_1");
        assert_eq!(transaction.status.as_deref(), Some("SUCCESS"));
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/transactions/");
            then.status(401)
                .json_body(serde_json::json!({"detail": "Invalid token."}));
        });

        let client = ShippoClient::new(&settings_for(&server)).unwrap();
        let err = client.create_transaction(&transaction_request()).await.unwrap_err();

        match err {
            ReproError::Api {
                operation,
                status,
                body,
            } => {
                assert_eq!(operation, "transaction");
                assert_eq!(status, 401);
                assert!(body.contains("Invalid token."));
            }
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unexpected_body_is_a_serialization_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/transactions/");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = ShippoClient::new(&settings_for(&server)).unwrap();
        let err = client.create_transaction(&transaction_request()).await.unwrap_err();
        assert!(matches!(err, ReproError::Serialization(_)));
    }

    #[tokio::test]
    async fn manifest_body_is_kept_verbatim() {
        let server = MockServer::start();
        let body = r#"{"object_id":"mf_1","status":"ERROR","shipment_date":null,"transactions":[],"errors":[],"documents":[]}"#;
        server.mock(|when, then| {
            when.method(POST).path("/manifests/");
            then.status(201)
                .header("Content-Type", "application/json")
                .body(body);
        });

        let client = ShippoClient::new(&settings_for(&server)).unwrap();
        let request = ManifestRequest {
            address_from: "addr_origin".to_string(),
            carrier_account: "ca_dhl".to_string(),
            shipment_date: Utc.with_ymd_and_hms(2024, 1, 2, 23, 59, 59).unwrap(),
            transactions: vec!["tx_1".to_string(), "tx_2".to_string()],
            asynchronous: false,
        };
        let manifest = client.create_manifest(&request).await.unwrap();

        assert!(manifest.transactions.is_empty());
        assert_eq!(serde_json::to_string(&manifest.raw).unwrap(), body);
    }

    #[test]
    fn endpoint_ignores_trailing_slash_on_base() {
        let settings = Settings::try_from(RawSettings {
            api_key: Some("k".to_string()),
            carrier_account_id: Some("ca".to_string()),
            from_address_id: Some("addr".to_string()),
            api_base_url: Some("https://api.goshippo.com/".to_string()),
            ..Default::default()
        })
        .unwrap();
        let client = ShippoClient::new(&settings).unwrap();
        assert_eq!(
            client.endpoint("manifests"),
            "https://api.goshippo.com/manifests/"
        );
    }
}
