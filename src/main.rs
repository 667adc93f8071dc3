use clap::Parser;
use shippo_manifest_repro::utils::logger;
use shippo_manifest_repro::{app, CliConfig, LogFormat};

#[tokio::main]
async fn main() {
    // An optional .env in the working directory supplies unset variables.
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting shippo-manifest-repro");

    let result = match config.into_raw() {
        Ok(raw) => app::execute(raw).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!(
                "✅ Run completed: transactions {:?}, manifest {} ({})",
                report.transaction_ids,
                report.manifest.object_id.as_deref().unwrap_or("<none>"),
                report.manifest.status.as_deref().unwrap_or("unknown")
            );
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {} (Category: {:?})", e, e.category());
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}
