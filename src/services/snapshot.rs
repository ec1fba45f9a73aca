// src/services/snapshot.rs

//! One-shot historical seed: `GET /bots/{id}/candles`.
//!
//! A single request, no retry/backoff built in — the caller may retry. Failure
//! means the subject starts with empty stores and waits for live updates; the
//! session engine downgrades any `Err` here to a logged warning, never a fault
//! on the render path.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::settings::Settings;
use crate::utils::errors::ApiError;
use crate::utils::types::CandleRow;

/// Seam for the historical fetch so session tests can substitute a fake
/// (same pattern as swapping the exchange client behind a trait).
#[async_trait]
pub trait HistoricalSource: Send + Sync {
    async fn load(&self, bot_id: &str) -> Result<Vec<CandleRow>, ApiError>;
}

pub struct HttpSnapshotLoader {
    http: Client,
    settings: Settings,
}

impl HttpSnapshotLoader {
    pub fn new(http: Client, settings: Settings) -> Self {
        Self { http, settings }
    }
}

#[async_trait]
impl HistoricalSource for HttpSnapshotLoader {
    async fn load(&self, bot_id: &str) -> Result<Vec<CandleRow>, ApiError> {
        let url = format!("{}/bots/{bot_id}/candles", self.settings.api_base_url);
        let resp = self
            .http
            .get(&url)
            .bearer_auth(&self.settings.api_token)
            .send()
            .await?;

        if resp.status() != StatusCode::OK {
            return Err(ApiError::Other(format!("http {}", resp.status())));
        }

        Ok(resp.json::<Vec<CandleRow>>().await?)
    }
}
