use std::{env, sync::Arc};

use anyhow::{Context, Result};
use log::{error, info};
use tokio::{fs, net::TcpListener, signal};

use persian_calendar::parse_source;

mod cache;
mod cli;
mod server;

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "persian_calendar_server=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }

    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let raw = fs::read_to_string(&args.source)
        .await
        .with_context(|| format!("Failed to read {}", args.source.display()))?;
    let source = parse_source(&raw)
        .with_context(|| format!("Failed to parse {}", args.source.display()))?;

    info!(
        "Loaded {} event records from {}",
        source.len(),
        args.source.display()
    );

    let state = Arc::new(server::AppState {
        source,
        default_types: args.default_types,
        cache: cache::Cache::new(cache::Config {
            enabled: args.enable_cache,
            ttl: args.cache_ttl,
        }),
    });

    let listener = TcpListener::bind(args.address).await?;
    info!("Listening at http://{}", args.address);

    axum::serve(listener, server::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
