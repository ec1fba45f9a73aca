// src/services/bots.rs

//! Read-only bot metadata collaborator. Supplies the `strategy_name` the
//! router needs before a chart session mounts.

use reqwest::{Client, StatusCode};

use crate::config::settings::Settings;
use crate::utils::errors::ApiError;
use crate::utils::types::Bot;

pub async fn fetch_bots(http: &Client, settings: &Settings) -> Result<Vec<Bot>, ApiError> {
    get_json(http, settings, &format!("{}/bots", settings.api_base_url)).await
}

pub async fn fetch_bot(http: &Client, settings: &Settings, bot_id: &str) -> Result<Bot, ApiError> {
    get_json(
        http,
        settings,
        &format!("{}/bots/{bot_id}", settings.api_base_url),
    )
    .await
}

async fn get_json<T: serde::de::DeserializeOwned>(
    http: &Client,
    settings: &Settings,
    url: &str,
) -> Result<T, ApiError> {
    let resp = http
        .get(url)
        .bearer_auth(&settings.api_token)
        .send()
        .await?;

    if resp.status() != StatusCode::OK {
        return Err(ApiError::Other(format!("http {}", resp.status())));
    }

    Ok(resp.json::<T>().await?)
}
