//! Startup wiring: validate settings, build the client, run the orchestrator.

use crate::adapters::ShippoClient;
use crate::config::{RawSettings, Settings};
use crate::core::orchestrator::{ManifestRepro, ReproContext, ReproReport};
use crate::utils::error::Result;

/// Validation happens before the client exists, so a missing setting never
/// reaches the network.
pub async fn execute(raw: RawSettings) -> Result<ReproReport> {
    let settings = Settings::try_from(raw)?;
    tracing::debug!("Settings: {:?}", settings);

    let client = ShippoClient::new(&settings)?;
    let repro = ManifestRepro::new(client, ReproContext::from(&settings));
    repro.run().await
}
