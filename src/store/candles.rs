// src/store/candles.rs

//! Ordered, time-indexed OHLCV bars for one subject.
//!
//! The last bar is the in-progress one and may be revised in place; every
//! earlier bar is committed history and never changes. Times are exchange-epoch
//! seconds, strictly increasing once committed.

use serde::{Deserialize, Serialize};

use crate::utils::errors::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    #[serde(default)]
    pub volume: f64,
}

/// Outcome of merging one incremental update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Appended,
    Replaced,
    Ignored,
}

#[derive(Debug, Default)]
pub struct CandleStore {
    bars: Vec<Candle>,
    ignored: u64,
}

impl CandleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire contents with a historical snapshot.
    ///
    /// Rejects input that is not strictly increasing in `time`, leaving the
    /// store untouched. Calling again with the same snapshot before any update
    /// has been applied is a harmless no-op in effect (snapshot retry).
    pub fn seed(&mut self, candles: Vec<Candle>) -> Result<(), StoreError> {
        for pair in candles.windows(2) {
            if pair[1].time <= pair[0].time {
                return Err(StoreError::NonMonotonic {
                    prev: pair[0].time,
                    next: pair[1].time,
                });
            }
        }
        self.bars = candles;
        Ok(())
    }

    /// Merge one incremental bar by the tail-time rule:
    /// equal time revises the in-progress bar, greater time appends,
    /// smaller time is a late/duplicate delivery and is dropped.
    pub fn apply(&mut self, update: Candle) -> Applied {
        match self.bars.last().map(|c| c.time) {
            Some(tail) if update.time == tail => {
                *self.bars.last_mut().unwrap() = update;
                Applied::Replaced
            }
            Some(tail) if update.time < tail => {
                self.ignored += 1;
                Applied::Ignored
            }
            _ => {
                self.bars.push(update);
                Applied::Appended
            }
        }
    }

    pub fn latest(&self) -> Option<Candle> {
        self.bars.last().copied()
    }

    /// Snapshot copy for the rendering side; never a live view.
    pub fn all(&self) -> Vec<Candle> {
        self.bars.clone()
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Number of late/duplicate updates dropped so far.
    pub fn ignored_count(&self) -> u64 {
        self.ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(time: i64, close: f64) -> Candle {
        Candle {
            time,
            open: close - 0.5,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume: 5.0,
        }
    }

    #[test]
    fn strictly_increasing_applies_reproduce_sequence() {
        let mut store = CandleStore::new();
        let seq: Vec<Candle> = (0..10).map(|i| bar(100 + i * 10, 10.0 + i as f64)).collect();
        for c in &seq {
            assert_eq!(store.apply(*c), Applied::Appended);
        }
        assert_eq!(store.all(), seq);
        assert_eq!(store.ignored_count(), 0);
    }

    #[test]
    fn equal_time_replaces_in_progress_bar() {
        let mut store = CandleStore::new();
        store.seed(vec![bar(100, 10.5)]).unwrap();

        let mut revision = bar(100, 10.5);
        revision.close = 10.8;
        assert_eq!(store.apply(revision), Applied::Replaced);

        assert_eq!(store.len(), 1);
        assert_eq!(store.latest().unwrap().close, 10.8);

        assert_eq!(store.apply(bar(110, 11.0)), Applied::Appended);
        let times: Vec<i64> = store.all().iter().map(|c| c.time).collect();
        assert_eq!(times, vec![100, 110]);
    }

    #[test]
    fn older_time_is_dropped_and_counted() {
        let mut store = CandleStore::new();
        store.seed(vec![bar(100, 10.0), bar(110, 11.0)]).unwrap();

        let before = store.all();
        assert_eq!(store.apply(bar(90, 9.0)), Applied::Ignored);
        assert_eq!(store.all(), before);
        assert_eq!(store.ignored_count(), 1);
    }

    #[test]
    fn seed_rejects_non_monotonic_input() {
        let mut store = CandleStore::new();
        let err = store.seed(vec![bar(100, 10.0), bar(100, 10.1)]).unwrap_err();
        assert!(matches!(err, StoreError::NonMonotonic { prev: 100, next: 100 }));
        assert!(store.is_empty());
    }

    #[test]
    fn reseeding_before_updates_is_idempotent() {
        let snapshot = vec![bar(100, 10.0), bar(110, 11.0)];
        let mut store = CandleStore::new();
        store.seed(snapshot.clone()).unwrap();
        store.seed(snapshot.clone()).unwrap();
        assert_eq!(store.all(), snapshot);
    }

    #[test]
    fn apply_into_empty_store_appends() {
        let mut store = CandleStore::new();
        assert_eq!(store.apply(bar(100, 10.0)), Applied::Appended);
        assert_eq!(store.len(), 1);
    }
}
