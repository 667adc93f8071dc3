use crate::config::Settings;
use crate::core::schedule::ShipmentDates;
use crate::domain::model::{
    Address, Manifest, ManifestRequest, Parcel, ShipmentRequest, Transaction, TransactionRequest,
};
use crate::domain::ports::ShippingApi;
use crate::utils::debug;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

/// Account references every request carries.
#[derive(Debug, Clone, PartialEq)]
pub struct ReproContext {
    pub carrier_account: String,
    pub address_from: String,
    pub servicelevel_token: String,
    pub reference_zone: Tz,
}

impl From<&Settings> for ReproContext {
    fn from(settings: &Settings) -> Self {
        Self {
            carrier_account: settings.carrier_account_id.clone(),
            address_from: settings.from_address_id.clone(),
            servicelevel_token: settings.servicelevel_token.clone(),
            reference_zone: settings.reference_timezone,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReproReport {
    pub dates: ShipmentDates,
    pub transaction_ids: Vec<String>,
    pub manifest: Manifest,
}

pub struct ManifestRepro<A: ShippingApi> {
    api: A,
    context: ReproContext,
}

impl<A: ShippingApi> ManifestRepro<A> {
    pub fn new(api: A, context: ReproContext) -> Self {
        Self { api, context }
    }

    pub fn transaction_request(&self, shipment_date: DateTime<Utc>) -> TransactionRequest {
        TransactionRequest {
            shipment: ShipmentRequest {
                shipment_date,
                address_from: self.context.address_from.clone(),
                address_to: Address::test_recipient(),
                parcels: vec![Parcel::test_parcel()],
            },
            carrier_account: self.context.carrier_account.clone(),
            servicelevel_token: self.context.servicelevel_token.clone(),
            asynchronous: false,
        }
    }

    pub fn manifest_request(
        &self,
        shipment_date: DateTime<Utc>,
        transaction_ids: Vec<String>,
    ) -> ManifestRequest {
        ManifestRequest {
            address_from: self.context.address_from.clone(),
            carrier_account: self.context.carrier_account.clone(),
            shipment_date,
            transactions: transaction_ids,
            asynchronous: false,
        }
    }

    pub async fn create_transaction(&self, shipment_date: DateTime<Utc>) -> Result<Transaction> {
        let request = self.transaction_request(shipment_date);

        debug::heading("Creating transaction...");
        debug::payload(&request);

        let transaction = self.api.create_transaction(&request).await?;
        debug::payload(&transaction.raw);
        tracing::info!(
            "Created transaction {} (status: {})",
            transaction.object_id,
            transaction.status.as_deref().unwrap_or("unknown")
        );

        Ok(transaction)
    }

    pub async fn create_manifest(
        &self,
        shipment_date: DateTime<Utc>,
        transaction_ids: Vec<String>,
    ) -> Result<Manifest> {
        let request = self.manifest_request(shipment_date, transaction_ids);

        debug::heading("Creating manifest...");
        debug::payload(&request);

        let manifest = self.api.create_manifest(&request).await?;
        debug::payload(&manifest.raw);

        // Soft failures are logged and returned unchanged.
        if manifest.reports_error() {
            tracing::warn!(
                "Manifest {} came back with status {}: {:?}",
                manifest.object_id.as_deref().unwrap_or("<none>"),
                manifest.status.as_deref().unwrap_or("unknown"),
                manifest.errors
            );
        }

        Ok(manifest)
    }

    pub async fn run(&self) -> Result<ReproReport> {
        self.run_at(Utc::now()).await
    }

    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<ReproReport> {
        let dates = ShipmentDates::for_tomorrow(now);

        debug::heading("Dates:");
        for line in dates.describe(self.context.reference_zone) {
            debug::heading(&line);
        }

        let (first, second) = tokio::try_join!(
            self.create_transaction(dates.first),
            self.create_transaction(dates.second),
        )?;
        let transaction_ids = vec![first.object_id, second.object_id];

        let manifest = self
            .create_manifest(dates.manifest_date(), transaction_ids.clone())
            .await?;

        debug::heading("Done!");

        Ok(ReproReport {
            dates,
            transaction_ids,
            manifest,
        })
    }
}
