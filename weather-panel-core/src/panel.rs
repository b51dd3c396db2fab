//! The weather panel: owned display state, a reducer over [`PanelEvent`]s,
//! and the two fetch paths (initial position lookup and manual search).
//!
//! Fetches run as tokio tasks and report back over a channel. Events are
//! applied one at a time in the order they resolve, so when an initial load
//! and a search are both in flight the one that finishes last wins,
//! whichever was started first.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{location::LocationSource, model::WeatherSnapshot, provider::WeatherFetcher};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelEvent {
    QueryChanged(String),
    InitialLoaded(WeatherSnapshot),
    InitialFailed(String),
    SearchLoaded(WeatherSnapshot),
    SearchFailed(String),
}

/// What the panel currently shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Display<'a> {
    Loading,
    Ready(&'a WeatherSnapshot),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelState {
    pub snapshot: Option<WeatherSnapshot>,
    /// Set once the position-based load has succeeded. Searches never set it.
    pub initial_load_done: bool,
    pub query: String,
}

impl PanelState {
    pub fn apply(&mut self, event: &PanelEvent) {
        match event {
            PanelEvent::QueryChanged(text) => {
                self.query.clone_from(text);
            }
            PanelEvent::InitialLoaded(snapshot) => {
                self.snapshot = Some(snapshot.clone());
                self.initial_load_done = true;
            }
            PanelEvent::SearchLoaded(snapshot) => {
                self.snapshot = Some(snapshot.clone());
            }
            PanelEvent::InitialFailed(reason) => {
                tracing::error!(%reason, "Initial weather load failed; panel stays loading");
            }
            PanelEvent::SearchFailed(reason) => {
                tracing::error!(%reason, "No results found");
            }
        }
    }

    /// Ready needs both a snapshot and a completed initial load.
    pub fn display(&self) -> Display<'_> {
        match &self.snapshot {
            Some(snapshot) if self.initial_load_done => Display::Ready(snapshot),
            _ => Display::Loading,
        }
    }
}

#[derive(Debug)]
pub struct WeatherPanel {
    state: PanelState,
    fetcher: Arc<dyn WeatherFetcher>,
    tx: mpsc::UnboundedSender<PanelEvent>,
    rx: mpsc::UnboundedReceiver<PanelEvent>,
    mounted: bool,
}

impl WeatherPanel {
    pub fn new(fetcher: Arc<dyn WeatherFetcher>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: PanelState::default(),
            fetcher,
            tx,
            rx,
            mounted: false,
        }
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn display(&self) -> Display<'_> {
        self.state.display()
    }

    /// Start the one-shot position lookup followed by a coordinate fetch.
    ///
    /// Only the first call does anything. Must be called within a tokio runtime.
    pub fn mount(&mut self, location: Arc<dyn LocationSource>) {
        if self.mounted {
            tracing::debug!("Panel already mounted; ignoring");
            return;
        }
        self.mounted = true;

        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let event = match location.current_position().await {
                Err(e) => PanelEvent::InitialFailed(format!("geolocation failed: {e}")),
                Ok(pos) => {
                    tracing::debug!(lat = pos.latitude, lon = pos.longitude, "Got position");
                    match fetcher.by_coordinates(pos.latitude, pos.longitude).await {
                        Ok(snapshot) => PanelEvent::InitialLoaded(snapshot),
                        Err(e) => PanelEvent::InitialFailed(format!("{e:#}")),
                    }
                }
            };
            let _ = tx.send(event);
        });
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.state.apply(&PanelEvent::QueryChanged(text.into()));
    }

    /// Fetch weather for the current query.
    ///
    /// A query that is empty after trimming is ignored and `false` is
    /// returned. Otherwise the query is sent as typed and `true` is returned;
    /// the result arrives through [`Self::next_event`].
    ///
    /// Must be called within a tokio runtime.
    pub fn search(&mut self) -> bool {
        if self.state.query.trim().is_empty() {
            tracing::debug!("Empty search query; nothing to do");
            return false;
        }

        let city = self.state.query.clone();
        let fetcher = Arc::clone(&self.fetcher);
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let event = match fetcher.by_city_name(&city).await {
                Ok(snapshot) => PanelEvent::SearchLoaded(snapshot),
                Err(e) => PanelEvent::SearchFailed(format!("{city}: {e:#}")),
            };
            let _ = tx.send(event);
        });

        true
    }

    /// Wait for the next fetch to resolve and apply it.
    ///
    /// The panel keeps a sender of its own, so this never returns `None`
    /// while the panel is alive; a hung request simply keeps it waiting.
    pub async fn next_event(&mut self) -> Option<PanelEvent> {
        let event = self.rx.recv().await?;
        self.state.apply(&event);
        Some(event)
    }

    /// Apply every event that has already resolved, without waiting.
    pub fn drain_ready(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.state.apply(&event);
            applied += 1;
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(name: &str, country: &str) -> WeatherSnapshot {
        WeatherSnapshot {
            location_name: name.to_string(),
            country: country.to_string(),
            temperature_c: 10.0,
            humidity_pct: 50.0,
            wind_speed: 2.0,
            condition: "Clear".to_string(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn starts_loading_with_empty_query() {
        let state = PanelState::default();
        assert_eq!(state.display(), Display::Loading);
        assert!(state.query.is_empty());
    }

    #[test]
    fn initial_load_makes_panel_ready() {
        let mut state = PanelState::default();
        let oslo = snapshot("Oslo", "NO");

        state.apply(&PanelEvent::InitialLoaded(oslo.clone()));

        assert!(state.initial_load_done);
        assert_eq!(state.display(), Display::Ready(&oslo));
    }

    #[test]
    fn search_before_initial_load_stays_loading() {
        let mut state = PanelState::default();

        state.apply(&PanelEvent::SearchLoaded(snapshot("Paris", "FR")));

        assert!(state.snapshot.is_some());
        assert!(!state.initial_load_done);
        assert_eq!(state.display(), Display::Loading);
    }

    #[test]
    fn search_replaces_snapshot_wholesale() {
        let mut state = PanelState::default();
        state.apply(&PanelEvent::InitialLoaded(snapshot("Oslo", "NO")));

        let paris = snapshot("Paris", "FR");
        state.apply(&PanelEvent::SearchLoaded(paris.clone()));

        assert_eq!(state.snapshot, Some(paris));
        assert!(state.initial_load_done);
    }

    #[test]
    fn failures_leave_state_untouched() {
        let mut state = PanelState::default();
        state.apply(&PanelEvent::InitialLoaded(snapshot("Oslo", "NO")));
        state.apply(&PanelEvent::QueryChanged("Atlantis".into()));
        let before = state.clone();

        state.apply(&PanelEvent::SearchFailed("Atlantis: 404".into()));
        state.apply(&PanelEvent::InitialFailed("denied".into()));

        assert_eq!(state, before);
    }

    #[test]
    fn initial_failure_keeps_loading() {
        let mut state = PanelState::default();
        state.apply(&PanelEvent::InitialFailed("denied".into()));
        assert_eq!(state.display(), Display::Loading);
        assert!(!state.initial_load_done);
    }

    #[test]
    fn query_changes_replace_text() {
        let mut state = PanelState::default();
        state.apply(&PanelEvent::QueryChanged("Par".into()));
        state.apply(&PanelEvent::QueryChanged("Paris".into()));
        assert_eq!(state.query, "Paris");
    }
}
