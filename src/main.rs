use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_core::{resolve_rules_path, CoreConfig, SymptomEngine};

/// Main entry point for the symptom triage service
///
/// Resolves configuration, loads the rule set exactly once and serves the REST API.
/// A missing or invalid rules file aborts startup; the server never runs on a partial
/// rule set.
///
/// # Environment Variables
/// - `TRIAGE_REST_ADDR`: REST server address (default: "0.0.0.0:8000")
/// - `TRIAGE_RULES_PATH`: Rules file override (default: shipped `symptom_rules.yaml`)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration, rule loading or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage_run=info".parse()?)
                .add_directive("triage_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("TRIAGE_REST_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".into())
        .parse()?;

    let rules_override = std::env::var("TRIAGE_RULES_PATH").ok().map(PathBuf::from);
    let cfg = CoreConfig::new(resolve_rules_path(rules_override)?)?;
    let engine = SymptomEngine::from_config(&cfg)?;

    tracing::info!("++ Starting triage REST on {}", rest_addr);

    let app = api_rest::router(engine);
    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
