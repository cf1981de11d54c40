//! Media tools runner binary.
//!
//! Stand-in for the upstream request layer: runs one pipeline for one
//! source and prints the result as JSON on stdout.
//!
//! Usage:
//!   studio-tools remove-background <path-or-url>
//!   studio-tools generate-clip <path-or-url>

use std::time::Duration;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use studio_ai::AiConfig;
use studio_media::ToolsConfig;
use studio_models::MediaSource;
use studio_pipelines::{BackgroundRemovalPipeline, ClipGenerationPipeline};
use studio_storage::{LocalStore, StoreConfig};

/// Timeout for fetching remote sources on the shared client.
const FETCH_TIMEOUT_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("studio=info".parse().expect("valid directive"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(true).with_target(true))
            .with(env_filter)
            .init();
    }

    let mut args = std::env::args().skip(1);
    let (tool, raw_source) = match (args.next(), args.next()) {
        (Some(tool), Some(source)) => (tool, source),
        _ => {
            eprintln!("usage: studio-tools <remove-background|generate-clip> <path-or-url>");
            std::process::exit(2);
        }
    };

    let store = LocalStore::new(StoreConfig::from_env());
    let tools = ToolsConfig::from_env();
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;

    let source = MediaSource::parse(&raw_source);
    info!("Running {} on {}", tool, source);

    let result = match tool.as_str() {
        "remove-background" => {
            let pipeline = BackgroundRemovalPipeline::new(store, tools, http);
            pipeline.remove_background(source).await
        }
        "generate-clip" => {
            let pipeline =
                ClipGenerationPipeline::new(store, tools, AiConfig::from_env(), http);
            pipeline.generate_clip(source).await
        }
        other => {
            eprintln!("unknown tool: {other}");
            std::process::exit(2);
        }
    };

    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.is_ok() {
        std::process::exit(1);
    }
    Ok(())
}
