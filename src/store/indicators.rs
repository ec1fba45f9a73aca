// src/store/indicators.rs

//! Named derived series (moving averages, RSI, MACD, Bollinger bands, volume
//! average) alongside the candle sequence.
//!
//! Every series is independently sparse: a candle without a value for some
//! indicator simply has no point there, and absence is never rendered as zero.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub time: i64,
    pub value: f64,
}

#[derive(Debug, Default)]
pub struct IndicatorRegistry {
    series: HashMap<String, Vec<IndicatorPoint>>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one named series with its historical points. The caller has
    /// already filtered out rows where the source field was absent.
    pub fn seed_series(&mut self, name: &str, points: Vec<IndicatorPoint>) {
        self.series.insert(name.to_owned(), points);
    }

    /// Append-or-replace by the same tail-time merge rule as the candle store.
    /// `None` means the field was absent from the message: a no-op, never 0.
    pub fn apply_point(&mut self, name: &str, time: i64, value: Option<f64>) {
        let Some(value) = value else { return };
        let points = self.series.entry(name.to_owned()).or_default();
        match points.last().map(|p| p.time) {
            Some(tail) if time == tail => points.last_mut().unwrap().value = value,
            Some(tail) if time < tail => {} // late delivery, drop
            _ => points.push(IndicatorPoint { time, value }),
        }
    }

    /// Snapshot copy of one series; empty if the name was never seeded.
    pub fn all(&self, name: &str) -> Vec<IndicatorPoint> {
        self.series.get(name).cloned().unwrap_or_default()
    }

    pub fn len(&self, name: &str) -> usize {
        self.series.get(name).map_or(0, Vec::len)
    }

    pub fn names(&self) -> Vec<String> {
        self.series.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.series.values().all(Vec::is_empty)
    }
}
