use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use decoplan_api::{AppState, RestApi};
use decoplan_core::{AttributeFilter, Retriever};
use decoplan_storage::FurnitureStore;
use decoplan_training::{by_name, ADDITIONAL_OPTIMIZATIONS, DEFAULT_BASE_MODEL, RECOMMENDED};
use std::convert::Infallible;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Furniture retrieval and RAG prompt service
#[derive(Parser, Debug)]
#[command(name = "decoplan")]
#[command(about = "Semantic furniture search and retrieval-augmented prompts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind the HTTP server to
    #[arg(long, env = "DECOPLAN_HOST", default_value = "0.0.0.0", global = true)]
    host: String,

    /// HTTP API port
    #[arg(long, env = "DECOPLAN_PORT", default_value_t = 5000, global = true)]
    port: u16,

    /// Enable debug logging; only "true" in any case enables it
    #[arg(long, env = "DECOPLAN_DEBUG", global = true, value_parser = parse_debug_flag)]
    debug: bool,

    /// Log level, overridden by RUST_LOG
    #[arg(long, env = "DECOPLAN_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    /// Path to the furniture database directory
    #[arg(long, env = "DECOPLAN_DB_PATH", default_value = "./furniture_db", global = true)]
    db_path: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Check that the furniture database opens and answers a query
    Diagnose,
    /// Print LoRA fine-tuning settings
    TrainingConfig {
        /// Strategy name (max_speed, balanced, memory_efficient, long_context)
        #[arg(long, default_value = "recommended")]
        strategy: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_debug_flag(value: &str) -> Result<bool, Infallible> {
    Ok(value.trim().eq_ignore_ascii_case("true"))
}

fn init_tracing(log_level: &str, debug: bool) -> anyhow::Result<()> {
    let level = if debug { "debug" } else { log_level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow!("failed to install tracing subscriber: {}", e))
}

fn resolve_db_path(path: &Path) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.debug)?;

    let db_path = resolve_db_path(&cli.db_path)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&db_path, &cli.host, cli.port, cli.debug),
        Command::Diagnose => diagnose(&db_path),
        Command::TrainingConfig { strategy, json } => training_config(&strategy, json),
    }
}

fn serve(db_path: &Path, host: &str, port: u16, debug_enabled: bool) -> anyhow::Result<()> {
    info!("Starting DecoPlan v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::open(db_path);
    if !state.is_ready() {
        tracing::error!(
            "Failed to initialize RAG components. Server will start but endpoints will be unavailable."
        );
    }

    info!(debug = debug_enabled, "Starting server on {}:{}", host, port);
    let sys = actix_web::rt::System::new();
    sys.block_on(RestApi::start(state, host, port))
        .with_context(|| format!("HTTP server on {}:{} failed", host, port))?;

    info!("Shutting down...");
    Ok(())
}

fn diagnose(db_path: &Path) -> anyhow::Result<()> {
    println!("DecoPlan RAG system diagnostic");

    println!("\n[1/3] Checking database...");
    if !db_path.is_dir() {
        bail!("Database not found at {}", db_path.display());
    }
    let mut files: Vec<String> = std::fs::read_dir(db_path)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    files.truncate(5);
    println!("Database found at {}", db_path.display());
    println!("  Files: {:?}", files);

    println!("\n[2/3] Opening furniture store...");
    let store = FurnitureStore::open(db_path).context("failed to open furniture store")?;
    println!("Furniture store opened ({} items)", store.len());

    println!("\n[3/3] Testing retrieval...");
    let results = store
        .retrieve("modern sofa", 3, &AttributeFilter::default())
        .context("retrieval failed")?;
    println!("Retrieval successful, found {} results", results.len());
    if let Some(first) = results.first() {
        println!("  Sample result: {} ({:.3})", first.name, first.relevance_score);
    }

    println!("\nAll checks passed.");
    Ok(())
}

fn training_config(strategy: &str, json: bool) -> anyhow::Result<()> {
    let strategy = by_name(strategy).ok_or_else(|| anyhow!("unknown strategy: {}", strategy))?;

    if json {
        let out = serde_json::json!({
            "strategy": strategy,
            "additional_optimizations": ADDITIONAL_OPTIMIZATIONS,
            "command": strategy.train_command(DEFAULT_BASE_MODEL, 3),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let rule = "=".repeat(80);
    let heading = if strategy == &RECOMMENDED {
        "RECOMMENDED CONFIGURATION"
    } else {
        "CONFIGURATION"
    };
    println!("{rule}\n{heading}\n{rule}");
    println!("{}", strategy);
    println!("\n{rule}\nADDITIONAL OPTIMIZATIONS\n{rule}");
    println!("{}", ADDITIONAL_OPTIMIZATIONS);
    println!("\n{rule}\nCOMMAND\n{rule}");
    println!("{}", strategy.train_command(DEFAULT_BASE_MODEL, 3));
    Ok(())
}
