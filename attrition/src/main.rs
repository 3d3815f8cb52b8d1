use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use attrition::api::{create_router, AppState};
use attrition::config::Config;
use attrition::db::{Database, LibSqlBackend};
use attrition::llm::LlmProvider;
use attrition::models::{FactorSet, Profile, Tier, WeightSource, WeightVector};
use attrition::scoring::{ExplainabilityEntry, WeightResolver};
use attrition::services::evaluate;

#[derive(Parser)]
#[command(name = "attrition")]
#[command(about = "Self-hostable attrition risk scoring service")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Overrides ATTRITION_HOST
        #[arg(long)]
        host: Option<String>,
        /// Overrides ATTRITION_PORT
        #[arg(long)]
        port: Option<u16>,
    },
    /// Score a profile JSON file offline: no narrative, nothing persisted
    Score {
        #[arg(long)]
        profile: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "attrition=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
        Command::Score { profile } => score_file(config, profile).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "ATTRITION_API_KEYS is not set. Protected routes are locked until keys are configured."
        );
    }
    if config.server.admin_callers.is_empty() {
        tracing::warn!("ATTRITION_ADMIN_CALLERS is not set. Scoring weights cannot be changed.");
    }

    tracing::info!("Initializing database...");
    let raw_db = Database::new(&config.database).await?;
    let backend = Arc::new(LibSqlBackend::new(raw_db));

    if let Some(llm_config) = &config.llm {
        tracing::info!("Initializing LLM provider: {}...", llm_config.model);
    }
    let llm = LlmProvider::new(config.llm.as_ref());
    if !llm.is_available() {
        tracing::warn!("LLM unavailable - scores will be returned without narratives");
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, backend, Arc::new(llm));
    let app = create_router(state);

    tracing::info!("Attrition starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    factors: FactorSet,
    weights: WeightVector,
    weight_source: WeightSource,
    raw_score: f64,
    score: u8,
    tier: Tier,
    explainability: Vec<ExplainabilityEntry>,
}

async fn score_file(config: Config, path: PathBuf) -> anyhow::Result<()> {
    let raw = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let profile: Profile = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON profile object", path.display()))?;

    let raw_db = Database::new(&config.database).await?;
    let resolver = WeightResolver::new(Arc::new(LibSqlBackend::new(raw_db)));
    let evaluation = evaluate(&profile, &resolver).await;

    let report = ScoreReport {
        factors: evaluation.factors,
        weights: evaluation.weights.weights,
        weight_source: evaluation.weights.source,
        raw_score: evaluation.score.raw,
        score: evaluation.score.score,
        tier: evaluation.score.tier,
        explainability: evaluation.explainability,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
