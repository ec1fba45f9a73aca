// src/engine/registry.rs

//! In-memory registry of active chart sessions, one per subject.
//!
//! Opening a subject that already has a session closes the old one first, so
//! a subject never holds more than one live channel at a time. Dropping a
//! session (or the whole registry) tears its channel down.

use dashmap::DashMap;

use crate::config::settings::Settings;
use crate::engine::session::ChartSession;
use crate::services::live_feed::ChannelState;
use crate::store::{Candle, DecisionMarker, IndicatorPoint};
use crate::utils::types::Bot;

#[derive(Default)]
pub struct ChartRegistry {
    sessions: DashMap<String, ChartSession>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or replace) the session for this bot. The previous session for
    /// the same subject is closed before the new channel is established.
    pub fn open(&self, settings: &Settings, bot: &Bot) {
        let subject = bot.id.to_string();
        self.sessions.remove(&subject); // drop closes the old channel
        self.sessions.insert(subject, ChartSession::open(settings, bot));
    }

    /// Insert a session built elsewhere (tests, alternative transports).
    pub fn adopt(&self, session: ChartSession) {
        let subject = session.subject().to_owned();
        self.sessions.remove(&subject);
        self.sessions.insert(subject, session);
    }

    pub fn close(&self, subject: &str) -> bool {
        self.sessions.remove(subject).is_some()
    }

    pub fn contains(&self, subject: &str) -> bool {
        self.sessions.contains_key(subject)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    // ---- per-subject read surface ------------------------------------------

    pub fn candles(&self, subject: &str) -> Option<Vec<Candle>> {
        self.sessions.get(subject).map(|s| s.candles())
    }

    pub fn latest_candle(&self, subject: &str) -> Option<Candle> {
        self.sessions.get(subject).and_then(|s| s.latest_candle())
    }

    pub fn indicator(&self, subject: &str, name: &str) -> Option<Vec<IndicatorPoint>> {
        self.sessions.get(subject).map(|s| s.indicator(name))
    }

    pub fn markers(&self, subject: &str) -> Option<Vec<DecisionMarker>> {
        self.sessions.get(subject).map(|s| s.markers())
    }

    pub fn channel_state(&self, subject: &str) -> Option<ChannelState> {
        self.sessions.get(subject).map(|s| s.channel_state())
    }
}
