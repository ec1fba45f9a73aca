// src/engine/session.rs

//! One chart session per subject (bot): owns the candle store, indicator
//! registry and marker log, the live channel, and the teardown epoch.
//!
//! Ordering guarantee: the snapshot seeds the stores before any live message
//! is applied. Live messages that arrive while the snapshot is pending queue
//! up in the feed channel and are drained in arrival order right after
//! seeding. All mutation happens on the driver task; readers get snapshot
//! copies, never live views.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use reqwest::Client;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::config::settings::Settings;
use crate::services::live_feed::{self, ChannelState, LiveMessage};
use crate::services::snapshot::{HistoricalSource, HttpSnapshotLoader};
use crate::services::strategies::{profile_for, StrategyProfile};
use crate::store::{
    Candle, CandleStore, DecisionMarker, IndicatorPoint, IndicatorRegistry, MarkerLog,
};
use crate::utils::errors::StoreError;
use crate::utils::types::{Bot, CandleRow};

/// Live messages queued while the snapshot is pending.
const FEED_BUFFER: usize = 256;

#[derive(Default)]
struct ChartState {
    candles: CandleStore,
    indicators: IndicatorRegistry,
    markers: MarkerLog,
}

struct SessionShared {
    state: RwLock<ChartState>,
    /// Bumped on teardown; compared at every asynchronous apply site.
    epoch: AtomicU64,
    status: Arc<watch::Sender<ChannelState>>,
    shutdown: watch::Sender<bool>,
}

impl SessionShared {
    fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }
}

pub struct ChartSession {
    subject: String,
    profile: &'static StrategyProfile,
    shared: Arc<SessionShared>,
    feed_task: Option<JoinHandle<()>>,
    driver_task: JoinHandle<()>,
}

impl ChartSession {
    /// Open a session against the bot backend: WebSocket feed plus HTTP
    /// snapshot, both authenticated with the caller's bearer credential.
    pub fn open(settings: &Settings, bot: &Bot) -> Self {
        let subject = bot.id.to_string();
        let url = live_feed::feed_url(&settings.ws_base_url, &subject, &settings.api_token);
        let source = Arc::new(HttpSnapshotLoader::new(Client::new(), settings.clone()));

        let (tx, rx) = mpsc::channel(FEED_BUFFER);
        let mut session = Self::attach(subject, &bot.strategy_name, source, rx);

        let status = session.shared.status.clone();
        let shutdown_rx = session.shared.shutdown.subscribe();
        session.feed_task = Some(tokio::spawn(live_feed::run(url, tx, status, shutdown_rx)));
        session
    }

    /// Open a session over an externally supplied feed. The transport is the
    /// caller's business; seeding, ordering and teardown semantics are the
    /// same as [`ChartSession::open`].
    pub fn attach(
        subject: String,
        strategy_id: &str,
        source: Arc<dyn HistoricalSource>,
        feed: mpsc::Receiver<LiveMessage>,
    ) -> Self {
        let profile = profile_for(strategy_id);
        let (status_tx, _) = watch::channel(ChannelState::Connecting);
        let (shutdown_tx, _) = watch::channel(false);

        let shared = Arc::new(SessionShared {
            state: RwLock::new(ChartState::default()),
            epoch: AtomicU64::new(0),
            status: Arc::new(status_tx),
            shutdown: shutdown_tx,
        });

        let epoch0 = shared.epoch();
        let driver_task = tokio::spawn(drive(
            shared.clone(),
            epoch0,
            source,
            subject.clone(),
            profile,
            feed,
        ));

        Self {
            subject,
            profile,
            shared,
            feed_task: None,
            driver_task,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn profile(&self) -> &'static StrategyProfile {
        self.profile
    }

    /// False when the bot's strategy routed to the unsupported sentinel.
    pub fn is_supported(&self) -> bool {
        self.profile.supported
    }

    // ---- read surface for the rendering side --------------------------------

    pub fn candles(&self) -> Vec<Candle> {
        self.shared.state.read().unwrap().candles.all()
    }

    pub fn latest_candle(&self) -> Option<Candle> {
        self.shared.state.read().unwrap().candles.latest()
    }

    pub fn ignored_candles(&self) -> u64 {
        self.shared.state.read().unwrap().candles.ignored_count()
    }

    pub fn indicator(&self, name: &str) -> Vec<IndicatorPoint> {
        self.shared.state.read().unwrap().indicators.all(name)
    }

    pub fn markers(&self) -> Vec<DecisionMarker> {
        self.shared.state.read().unwrap().markers.all()
    }

    pub fn channel_state(&self) -> ChannelState {
        *self.shared.status.borrow()
    }

    // ---- teardown -----------------------------------------------------------

    /// Tear the session down: bump the epoch so in-flight work is abandoned,
    /// signal the feed to close, and settle the channel state on `Closed`.
    /// A message already delivered but not yet applied will be dropped.
    pub fn close(&self) {
        self.shared.epoch.fetch_add(1, Ordering::SeqCst);
        let _ = self.shared.shutdown.send(true);
        self.shared.status.send_replace(ChannelState::Closed);
    }
}

impl Drop for ChartSession {
    fn drop(&mut self) {
        self.close();
        if let Some(feed) = &self.feed_task {
            feed.abort();
        }
        self.driver_task.abort();
    }
}

/// Snapshot → seed → drain queued live messages → live loop.
async fn drive(
    shared: Arc<SessionShared>,
    epoch0: u64,
    source: Arc<dyn HistoricalSource>,
    subject: String,
    profile: &'static StrategyProfile,
    mut feed: mpsc::Receiver<LiveMessage>,
) {
    match source.load(&subject).await {
        Ok(rows) => {
            if shared.epoch() != epoch0 {
                return; // subject switched while the snapshot was in flight
            }
            let mut st = shared.state.write().unwrap();
            if let Err(e) = seed(&mut st, profile, &rows) {
                log::warn!("snapshot for {subject} rejected: {e}; starting empty");
            }
        }
        Err(e) => {
            // accepted weak point: no retry, the chart starts empty and
            // fills from live updates only
            log::warn!("snapshot load failed for {subject}: {e}; starting empty");
        }
    }

    while let Some(msg) = feed.recv().await {
        if shared.epoch() != epoch0 {
            break; // torn down; the message is stale and must not apply
        }
        let mut st = shared.state.write().unwrap();
        apply_message(&mut st, profile, msg);
    }
}

fn seed(st: &mut ChartState, profile: &StrategyProfile, rows: &[CandleRow]) -> Result<(), StoreError> {
    st.candles.seed(rows.iter().map(CandleRow::candle).collect())?;
    for spec in profile.indicators {
        let points = rows
            .iter()
            .filter_map(|r| {
                r.indicator_value(spec.name).map(|value| IndicatorPoint {
                    time: r.time,
                    value,
                })
            })
            .collect();
        st.indicators.seed_series(spec.name, points);
    }
    Ok(())
}

fn apply_message(st: &mut ChartState, profile: &StrategyProfile, msg: LiveMessage) {
    match msg {
        LiveMessage::Candle(row) => {
            st.candles.apply(row.candle());
            // true partial update: absent fields leave their series untouched
            for spec in profile.indicators {
                st.indicators
                    .apply_point(spec.name, row.time, row.indicator_value(spec.name));
            }
        }
        LiveMessage::Decision(marker) => st.markers.append(marker),
    }
}
