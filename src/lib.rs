pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, LogFormat};

pub use adapters::ShippoClient;
pub use config::{RawSettings, Settings};
pub use crate::core::orchestrator::{ManifestRepro, ReproContext, ReproReport};
pub use crate::core::schedule::ShipmentDates;
pub use utils::error::{ReproError, Result};
