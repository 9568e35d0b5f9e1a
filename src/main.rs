mod bot;
mod config;
mod data;
mod error;
mod model;
mod service;
mod startup;
mod state;
mod util;

use dioxus_logger::tracing::{self, Level};
use std::sync::Arc;

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let level = std::env::var("LOG_LEVEL")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);
    dioxus_logger::init(level).map_err(|e| AppError::InternalError(e.to_string()))?;

    let config = Config::from_env()?;
    let state = startup::load_state(&config).await?;

    tracing::info!("Starting BoneBot with prefix '{}'", config.command_prefix);

    bot::start::start_bot(&config, Arc::new(state)).await
}
