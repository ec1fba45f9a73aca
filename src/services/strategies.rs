// src/services/strategies.rs

//! Strategy → indicator-set routing.
//!
//! One static profile per strategy replaces a per-strategy chart component:
//! the profile lists which indicator fields the engine reads from each row and
//! how the rendering side groups them (price pane vs its own pane). Unknown
//! strategies route to a sentinel unsupported profile instead of failing, so
//! the presentation layer can show an explanatory message.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Where the rendering side draws a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    /// Overlaid on the candle price scale.
    Price,
    /// Its own pane below the candles (MACD histogram, volume average).
    Separate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesKind {
    Line,
    Histogram,
}

#[derive(Debug, Clone, Copy)]
pub struct IndicatorSpec {
    pub name: &'static str,
    pub pane: Pane,
    pub kind: SeriesKind,
}

const fn line(name: &'static str) -> IndicatorSpec {
    IndicatorSpec {
        name,
        pane: Pane::Price,
        kind: SeriesKind::Line,
    }
}

#[derive(Debug)]
pub struct StrategyProfile {
    pub strategy: &'static str,
    pub supported: bool,
    pub indicators: &'static [IndicatorSpec],
}

impl StrategyProfile {
    pub fn indicator_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.indicators.iter().map(|s| s.name)
    }
}

static CROSSOVER: StrategyProfile = StrategyProfile {
    strategy: "CROSSOVER",
    supported: true,
    indicators: &[line("ma9"), line("ma26")],
};

static EMA_FAN: StrategyProfile = StrategyProfile {
    strategy: "EMA_FAN",
    supported: true,
    indicators: &[
        line("ema10"),
        line("ema15"),
        line("ema20"),
        line("ema25"),
        line("ema30"),
        line("ema35"),
        line("ema40"),
    ],
};

static RSI2: StrategyProfile = StrategyProfile {
    strategy: "RSI2",
    supported: true,
    indicators: &[line("rsi")],
};

static MACD_CROSS: StrategyProfile = StrategyProfile {
    strategy: "MACD_CROSS",
    supported: true,
    indicators: &[
        line("macd"),
        line("macd_signal"),
        IndicatorSpec {
            name: "macd_histogram",
            pane: Pane::Separate,
            kind: SeriesKind::Histogram,
        },
    ],
};

static VOLUME_SPIKE: StrategyProfile = StrategyProfile {
    strategy: "VOLUME_SPIKE",
    supported: true,
    indicators: &[IndicatorSpec {
        name: "avg_volume",
        pane: Pane::Separate,
        kind: SeriesKind::Line,
    }],
};

static BB_REBOUND: StrategyProfile = StrategyProfile {
    strategy: "BB_REBOUND",
    supported: true,
    indicators: &[line("bb_upper"), line("bb_lower")],
};

/// Sentinel for strategies the chart has no rendering for.
static UNSUPPORTED: StrategyProfile = StrategyProfile {
    strategy: "UNSUPPORTED",
    supported: false,
    indicators: &[],
};

static PROFILES: Lazy<HashMap<&'static str, &'static StrategyProfile>> = Lazy::new(|| {
    HashMap::from([
        ("CROSSOVER", &CROSSOVER),
        ("CROSSOVER_ADVANCED", &CROSSOVER), // same indicator set, same panes
        ("EMA_FAN", &EMA_FAN),
        ("RSI2", &RSI2),
        ("MACD_CROSS", &MACD_CROSS),
        ("VOLUME_SPIKE", &VOLUME_SPIKE),
        ("BB_REBOUND", &BB_REBOUND),
    ])
});

/// Route a bot's configured strategy id to its chart profile.
pub fn profile_for(strategy_id: &str) -> &'static StrategyProfile {
    match PROFILES.get(strategy_id) {
        Some(profile) => *profile,
        None => {
            log::warn!("no chart support for strategy {strategy_id:?}");
            &UNSUPPORTED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_routes_to_unsupported() {
        let p = profile_for("FOO");
        assert!(!p.supported);
        assert!(p.indicators.is_empty());
    }

    #[test]
    fn crossover_variants_share_one_profile() {
        let a = profile_for("CROSSOVER");
        let b = profile_for("CROSSOVER_ADVANCED");
        assert!(std::ptr::eq(a, b));
        let names: Vec<_> = a.indicator_names().collect();
        assert_eq!(names, vec!["ma9", "ma26"]);
    }

    #[test]
    fn ema_fan_lists_seven_overlay_lines() {
        let p = profile_for("EMA_FAN");
        assert_eq!(p.indicators.len(), 7);
        assert!(p.indicators.iter().all(|s| s.pane == Pane::Price));
    }

    #[test]
    fn macd_histogram_sits_in_its_own_pane() {
        let p = profile_for("MACD_CROSS");
        let hist = p
            .indicators
            .iter()
            .find(|s| s.name == "macd_histogram")
            .unwrap();
        assert_eq!(hist.pane, Pane::Separate);
        assert_eq!(hist.kind, SeriesKind::Histogram);
    }
}
