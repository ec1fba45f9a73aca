// src/store/markers.rs

//! Append-only log of discrete buy/sell decisions anchored to a timestamp and
//! price. The presentation layer redraws all markers on every arrival, so the
//! full ordered log stays readable; marker counts are small next to candles.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionMarker {
    pub time: i64,
    pub price: f64,
    pub decision: Decision,
}

#[derive(Debug, Default)]
pub struct MarkerLog {
    markers: Vec<DecisionMarker>,
}

impl MarkerLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional append. Semantic duplicates are the producer's business;
    /// the log keeps everything it was given.
    pub fn append(&mut self, marker: DecisionMarker) {
        self.markers.push(marker);
    }

    pub fn all(&self) -> Vec<DecisionMarker> {
        self.markers.clone()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
