//! Application state management for the TUI.
//!
//! This module manages the dashboard state: the current view, the two
//! chart adapters, refresh bookkeeping and user interactions. History
//! fetches run as background tasks, each tagged with a generation so a
//! slow response for an old request can never overwrite a newer one.

use crate::api::{HistoryProvider, HistoryResponse};
use crate::error::Result;
use crate::ui::widgets::{EnvChart, SoilChart};
use crate::view::{build_view, View};
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc;

/// History window presets cycled with the arrow keys, in hours
pub const WINDOW_PRESETS: [u32; 6] = [1, 6, 12, 24, 72, 168];

/// Outcome of one background fetch, tagged with its request generation
pub struct FetchOutcome {
    /// Value returned by `begin_refresh` when the request was issued
    pub generation: u64,
    /// Fetched history, or the error that ended the request
    pub result: Result<HistoryResponse>,
}

/// Application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    /// Show help panel
    pub show_help: bool,
    /// Currently selected history window in hours
    pub window_hours: u32,
    /// Maximum number of samples per rendered series
    pub point_budget: usize,
    /// Latest built view, if any fetch has succeeded yet
    pub view: Option<View>,
    /// Soil moisture chart, created once and updated in place
    pub soil_chart: SoilChart,
    /// Environment chart, created once and updated in place
    pub env_chart: EnvChart,
    /// Whether a fetch is currently in flight
    pub refreshing: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Error message
    pub error_message: Option<String>,
    /// Generation of the most recently issued fetch
    latest_generation: u64,
}

impl App {
    /// Create a new application state
    pub fn new(window_hours: u32, point_budget: usize) -> Self {
        Self {
            should_quit: false,
            show_help: false,
            window_hours,
            point_budget,
            view: None,
            soil_chart: SoilChart::new(),
            env_chart: EnvChart::new(),
            refreshing: false,
            status_message: Some("Application started".to_string()),
            error_message: None,
            latest_generation: 0,
        }
    }

    /// Mark the start of a new fetch and return its generation tag
    pub fn begin_refresh(&mut self) -> u64 {
        self.latest_generation += 1;
        self.refreshing = true;
        self.latest_generation
    }

    /// Spawn a background fetch for the current window.
    ///
    /// The task reports back over `tx` with the generation returned here;
    /// `handle_fetch` drops outcomes of superseded requests.
    pub fn spawn_refresh(
        &mut self,
        provider: &Arc<dyn HistoryProvider>,
        tx: &mpsc::Sender<FetchOutcome>,
    ) -> u64 {
        let generation = self.begin_refresh();
        let provider = Arc::clone(provider);
        let tx = tx.clone();
        let hours = self.window_hours;
        tokio::spawn(async move {
            let result = provider.fetch_history(hours).await;
            // A closed receiver means the UI loop already exited
            let _ = tx.send(FetchOutcome { generation, result }).await;
        });
        generation
    }

    /// Apply a finished fetch to the application state.
    ///
    /// Only the outcome of the most recently issued request is applied;
    /// anything older is discarded, whatever order responses arrive in.
    pub fn handle_fetch(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.latest_generation {
            tracing::debug!(
                generation = outcome.generation,
                latest = self.latest_generation,
                "discarding stale fetch outcome"
            );
            return;
        }

        self.refreshing = false;
        match outcome.result {
            Ok(raw) => {
                let view = build_view(raw, self.window_hours, self.point_budget);
                tracing::debug!(
                    samples = view.ts.len(),
                    events = view.events.len(),
                    window_hours = view.window_hours,
                    "view rebuilt"
                );
                self.soil_chart.apply(&view);
                self.env_chart.apply(&view);
                self.view = Some(view);
                self.error_message = None;
                self.status_message =
                    Some(format!("Updated {}", Local::now().format("%H:%M:%S")));
            }
            Err(e) => {
                tracing::warn!("history fetch failed: {}", e);
                // Keep showing the previous view alongside the error
                self.error_message = Some(format!("Fetch failed: {}", e));
            }
        }
    }

    /// Switch to the next longer window preset, returning true if it changed
    pub fn next_window(&mut self) -> bool {
        let target = WINDOW_PRESETS
            .iter()
            .copied()
            .find(|&hours| hours > self.window_hours)
            .unwrap_or(WINDOW_PRESETS[WINDOW_PRESETS.len() - 1]);
        self.set_window(target)
    }

    /// Switch to the previous shorter window preset, returning true if it changed
    pub fn prev_window(&mut self) -> bool {
        let target = WINDOW_PRESETS
            .iter()
            .rev()
            .copied()
            .find(|&hours| hours < self.window_hours)
            .unwrap_or(WINDOW_PRESETS[0]);
        self.set_window(target)
    }

    fn set_window(&mut self, hours: u32) -> bool {
        if hours == self.window_hours {
            return false;
        }
        self.window_hours = hours;
        self.status_message = Some(format!("Window: last {}h", hours));
        true
    }

    /// Toggle help panel
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockHistoryProvider;
    use crate::error::ApiError;
    use async_trait::async_trait;
    use std::time::Duration;

    fn history_with_soil(value: f64) -> HistoryResponse {
        HistoryResponse {
            timestamps: vec![0],
            soil1: vec![Some(value)],
            ..HistoryResponse::default()
        }
    }

    fn fetch_error() -> crate::error::AppError {
        ApiError::RequestError("connection refused".to_string()).into()
    }

    /// Provider that answers after a fixed delay, for racing two fetches
    struct SlowProvider {
        delay_ms: u64,
        soil: f64,
    }

    #[async_trait]
    impl HistoryProvider for SlowProvider {
        async fn fetch_history(&self, _hours: u32) -> Result<HistoryResponse> {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
            Ok(history_with_soil(self.soil))
        }
    }

    #[test]
    fn test_successful_fetch_builds_view() {
        let mut app = App::new(6, 600);
        let generation = app.begin_refresh();
        assert!(app.refreshing);

        app.handle_fetch(FetchOutcome {
            generation,
            result: Ok(history_with_soil(42.0)),
        });

        assert!(!app.refreshing);
        assert!(app.error_message.is_none());
        let view = app.view.as_ref().unwrap();
        assert_eq!(view.soil.s1, vec![Some(42.0)]);
        assert_eq!(view.window_hours, 6);
    }

    #[test]
    fn test_stale_outcome_arriving_late_is_discarded() {
        let mut app = App::new(24, 600);
        let old = app.begin_refresh();
        let new = app.begin_refresh();

        app.handle_fetch(FetchOutcome {
            generation: new,
            result: Ok(history_with_soil(2.0)),
        });
        app.handle_fetch(FetchOutcome {
            generation: old,
            result: Ok(history_with_soil(1.0)),
        });

        let view = app.view.as_ref().unwrap();
        assert_eq!(view.soil.s1, vec![Some(2.0)]);
    }

    #[test]
    fn test_stale_outcome_arriving_early_is_discarded() {
        let mut app = App::new(24, 600);
        let old = app.begin_refresh();
        let new = app.begin_refresh();

        // The superseded request happens to finish first
        app.handle_fetch(FetchOutcome {
            generation: old,
            result: Ok(history_with_soil(1.0)),
        });
        assert!(app.view.is_none());
        assert!(app.refreshing, "a newer request is still in flight");

        app.handle_fetch(FetchOutcome {
            generation: new,
            result: Ok(history_with_soil(2.0)),
        });
        let view = app.view.as_ref().unwrap();
        assert_eq!(view.soil.s1, vec![Some(2.0)]);
        assert!(!app.refreshing);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_view() {
        let mut app = App::new(24, 600);
        let generation = app.begin_refresh();
        app.handle_fetch(FetchOutcome {
            generation,
            result: Ok(history_with_soil(42.0)),
        });

        let generation = app.begin_refresh();
        app.handle_fetch(FetchOutcome {
            generation,
            result: Err(fetch_error()),
        });

        assert!(app.error_message.is_some());
        let view = app.view.as_ref().unwrap();
        assert_eq!(view.soil.s1, vec![Some(42.0)]);

        // the next success clears the error again
        let generation = app.begin_refresh();
        app.handle_fetch(FetchOutcome {
            generation,
            result: Ok(history_with_soil(43.0)),
        });
        assert!(app.error_message.is_none());
    }

    #[test]
    fn test_window_cycles_through_presets() {
        let mut app = App::new(24, 600);

        assert!(app.next_window());
        assert_eq!(app.window_hours, 72);
        assert!(app.next_window());
        assert_eq!(app.window_hours, 168);
        assert!(!app.next_window(), "already at the longest preset");
        assert_eq!(app.window_hours, 168);

        assert!(app.prev_window());
        assert_eq!(app.window_hours, 72);
        for expected in [24, 12, 6, 1] {
            assert!(app.prev_window());
            assert_eq!(app.window_hours, expected);
        }
        assert!(!app.prev_window(), "already at the shortest preset");
        assert_eq!(app.window_hours, 1);
    }

    #[test]
    fn test_window_snaps_from_non_preset_value() {
        let mut app = App::new(10, 600);
        assert!(app.next_window());
        assert_eq!(app.window_hours, 12);

        let mut app = App::new(10, 600);
        assert!(app.prev_window());
        assert_eq!(app.window_hours, 6);
    }

    #[tokio::test]
    async fn test_spawn_refresh_tags_outcome_with_generation() {
        let mut app = App::new(24, 600);
        let (tx, mut rx) = mpsc::channel(4);

        let mut mock = MockHistoryProvider::new();
        mock.expect_fetch_history()
            .withf(|&hours| hours == 24)
            .returning(|_| Ok(history_with_soil(42.0)));
        let provider: Arc<dyn HistoryProvider> = Arc::new(mock);

        let generation = app.spawn_refresh(&provider, &tx);
        let outcome = rx.recv().await.unwrap();
        assert_eq!(outcome.generation, generation);

        app.handle_fetch(outcome);
        assert_eq!(app.view.as_ref().unwrap().soil.s1, vec![Some(42.0)]);
    }

    #[tokio::test]
    async fn test_latest_issued_fetch_wins_race() {
        let mut app = App::new(24, 600);
        let (tx, mut rx) = mpsc::channel(4);

        let slow: Arc<dyn HistoryProvider> = Arc::new(SlowProvider { delay_ms: 40, soil: 1.0 });
        let fast: Arc<dyn HistoryProvider> = Arc::new(SlowProvider { delay_ms: 1, soil: 2.0 });

        app.spawn_refresh(&slow, &tx);
        app.spawn_refresh(&fast, &tx);

        // Whichever order the responses land in, the second request wins
        for _ in 0..2 {
            let outcome = rx.recv().await.unwrap();
            app.handle_fetch(outcome);
        }

        let view = app.view.as_ref().unwrap();
        assert_eq!(view.soil.s1, vec![Some(2.0)]);
        assert!(!app.refreshing);
    }
}
