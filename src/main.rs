use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;
use crate::config::Config;
use crate::controller::AppState;

pub mod config;
pub mod controller;
pub mod helpers;
pub mod models;
pub mod repositories;
pub mod services;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let config = Config::parse();
    let app_state = AppState::new(&config).context("Failed to build application state")?;

    controller::serve(app_state, &config).await
}
