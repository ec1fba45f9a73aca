// src/utils/types.rs

//! Wire types shared between the snapshot loader and the live feed.

use serde::Deserialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::store::Candle;

/// Bot metadata as served by `GET /bots`.
#[derive(Debug, Clone, Deserialize)]
pub struct Bot {
    pub id: Uuid,
    pub symbol: String,
    pub interval: String,
    pub strategy_name: String,
    pub autonomous: bool,
    pub active: bool,
}

/// One historical or live candle row: the raw price fields plus whichever
/// indicator fields the bot's strategy produces (`ma9`, `rsi`, `bb_upper`, …).
/// Fields not present in the JSON are simply missing from `extra`.
#[derive(Debug, Clone, Deserialize)]
pub struct CandleRow {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CandleRow {
    pub fn candle(&self) -> Candle {
        Candle {
            time: self.time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        }
    }

    /// Numeric value of a named indicator field, if the row carries one.
    /// `null` or a non-numeric value counts as absent; never coerced to 0.
    pub fn indicator_value(&self, name: &str) -> Option<f64> {
        self.extra.get(name).and_then(Value::as_f64)
    }
}
