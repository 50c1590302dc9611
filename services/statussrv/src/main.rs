//! statussrv entry point

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use statussrv::api::create_router;
use statussrv::config::Config;
use statussrv::{logging, store, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "statussrv - status page storage service")]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate configuration and store connectivity, then exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Invalid config is fatal before anything else starts.
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        },
    };

    let _log_guard = logging::init(&config.log)?;

    match args.command {
        Some(Commands::Check) => check(config).await,
        None => run(config).await,
    }
}

async fn run(config: Config) -> Result<()> {
    info!("starting statussrv v{}", env!("CARGO_PKG_VERSION"));

    let pool = store::connect(&config.database_url).await?;
    store::schema::ensure_schema(&pool).await?;
    info!("connected to database: {}", config.database_url);

    let port = config.port;
    let state = AppState::new(pool, Arc::new(config));
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("statussrv listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Config check mode: verify the store is reachable and the schema can be
/// ensured, then exit.
async fn check(config: Config) -> Result<()> {
    println!("=== statussrv configuration check ===");
    println!("port:         {}", config.port);
    println!("dev mode:     {}", config.dev_mode);
    println!("database URL: {}", config.database_url);

    let pool = store::connect(&config.database_url).await?;
    store::schema::ensure_schema(&pool).await?;

    println!("database:     ok");
    Ok(())
}
