pub mod config;
pub mod engine {
    pub mod registry;
    pub mod session;
}
pub mod services {
    pub mod bots;
    pub mod live_feed;
    pub mod snapshot;
    pub mod strategies;
}
pub mod store {
    pub mod candles;
    pub mod indicators;
    pub mod markers;

    pub use self::candles::{Candle, CandleStore};
    pub use self::indicators::{IndicatorPoint, IndicatorRegistry};
    pub use self::markers::{Decision, DecisionMarker, MarkerLog};
}

pub mod utils;
