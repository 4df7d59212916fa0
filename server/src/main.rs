//! wallet-server: HTTP surface over wallet-core plus the daily bonus sweep.
//!
//! Usage:
//!   wallet-server --port 5000 --db wallet.db
//!   wallet-server --db wallet.db --config wallet.json

mod routes;
mod scheduler;

use anyhow::{Context, Result};
use std::env;
use std::sync::{Arc, Mutex};
use wallet_core::{config::WalletConfig, service::WalletService};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let port = parse_arg(&args, "--port", 5000u16);
    let db = args
        .windows(2)
        .find(|w| w[0] == "--db")
        .map(|w| w[1].as_str())
        .unwrap_or("wallet.db");
    let config = match args.windows(2).find(|w| w[0] == "--config") {
        Some(w) => WalletConfig::load(&w[1])?,
        None => WalletConfig::default(),
    };
    let sweep_time = config.sweep_time()?;

    let service = WalletService::open(db, config)?;
    let service = Arc::new(Mutex::new(service));

    let sweeper = scheduler::BonusScheduler::start(service.clone(), sweep_time);

    let app = routes::router(service);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("wallet-server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .context("server error")?;

    sweeper.stop().await;
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
