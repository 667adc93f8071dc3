use crate::domain::model::{Manifest, ManifestRequest, Transaction, TransactionRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The two remote capabilities the repro calls.
///
/// Implementations must not retry. A non-2xx response is an error; a 2xx
/// body is returned as-is even when it describes a logical failure.
#[async_trait]
pub trait ShippingApi: Send + Sync {
    async fn create_transaction(&self, request: &TransactionRequest) -> Result<Transaction>;
    async fn create_manifest(&self, request: &ManifestRequest) -> Result<Manifest>;
}
