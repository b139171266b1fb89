//! docsynth: generate one synthetic patient record and print it as JSON.

use std::process::ExitCode;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsynth_generator::{Config, RecordOptions};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    if config.cache.enabled {
        tracing::info!(
            directory = %config.cache.directory.display(),
            ttl_ms = config.cache.ttl.as_millis() as u64,
            "Result cache enabled"
        );
    } else {
        tracing::warn!("Result cache disabled");
    }

    let generator = docsynth_generator::build_generator(&config);

    let record = match generator
        .generate_patient_record(&RecordOptions::default())
        .await
    {
        Ok(record) => record,
        Err(e) => {
            tracing::error!(document = e.document(), error = %e, "Record generation failed");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&record) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize record");
            ExitCode::FAILURE
        }
    }
}
