use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deployer_core::DeployerConfig;
use generator::{ContentGenerator, GeminiClient};
use github::GitHubClient;
use orchestrator::{
    Notifier, PublishDriver, RetryPolicy, TaskOrchestrator, TaskQueue, WorkerPool,
    WorkspaceBuilder,
};
use server::{create_router, state::AppState};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vcs::GitVcs;

const DEFAULT_PORT: u16 = 10000;

#[derive(Parser)]
#[command(name = "site-deployer")]
#[command(about = "Generates static sites from briefs and publishes them to GitHub Pages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// TOML file with non-secret settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server and worker pool
    Serve {
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Number of concurrent task runs
        #[arg(short, long)]
        workers: Option<usize>,
    },
    /// Report required settings that are missing
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Serve { port, workers }) => serve(config, port, workers).await,
        Some(Commands::Check) => check(&config),
        None => serve(config, DEFAULT_PORT, None).await,
    }
}

/// File settings first, then credentials from the environment.
fn load_config(path: Option<&Path>) -> Result<DeployerConfig> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => DeployerConfig::default(),
    };

    Ok(config.with_credentials_from_env())
}

fn check(config: &DeployerConfig) -> Result<()> {
    let missing = config.missing_credentials();

    println!();
    println!("Workspace root: {}", config.workspace_root.display());
    println!("Model:          {}", config.gemini_model);
    println!("Workers:        {}", config.workers);
    println!();

    if missing.is_empty() {
        println!("All required settings are present.");
        return Ok(());
    }

    println!("Missing settings:");
    for name in &missing {
        println!("  - {}", name);
    }
    std::process::exit(1);
}

async fn serve(mut config: DeployerConfig, port: u16, workers: Option<usize>) -> Result<()> {
    init_tracing();

    if let Some(workers) = workers {
        config.workers = workers;
    }

    let missing = config.missing_credentials();
    if !missing.is_empty() {
        tracing::warn!(?missing, "Required settings missing; task runs will fail until they are set");
    }

    let config = Arc::new(config);
    let orchestrator = Arc::new(build_orchestrator(config.clone()));

    let (queue, receiver) = TaskQueue::bounded(config.queue_capacity);
    let pool = WorkerPool::spawn(orchestrator, receiver, config.workers);

    let app = create_router(AppState::new(config.clone(), queue));
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    println!();
    println!("Site Deployer");
    println!("════════════════════════════════════════");
    println!();
    println!("  Task endpoint: http://localhost:{}/api-endpoint", port);
    println!("  Swagger UI:    http://localhost:{}/swagger-ui", port);
    println!("  Workers:       {}", pool.size());
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, waiting for running tasks");
    pool.join().await;

    Ok(())
}

fn build_orchestrator(config: Arc<DeployerConfig>) -> TaskOrchestrator {
    let model = Arc::new(GeminiClient::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
    ));
    let repo_ops = Arc::new(GitVcs::new(
        config.commit_author_name.clone(),
        config.commit_author_email.clone(),
    ));
    let host = Arc::new(GitHubClient::new(config.github_api_url.clone()));

    TaskOrchestrator::new(
        config.clone(),
        WorkspaceBuilder::new(ContentGenerator::new(model)),
        PublishDriver::new(repo_ops, host),
        Notifier::new(RetryPolicy::with_timeout_secs(config.notify_timeout_secs)),
    )
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}
