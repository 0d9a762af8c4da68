use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use weathernow_core::AppError;
use weathernow_weather::{
    CurrentConditions, LocationCandidate, LocationError, RecentLocation, RecentSearches,
    TemperatureUnit,
};

use crate::preferences::Preferences;
use crate::services::{
    request_weather_fetch, request_weather_locate, request_weather_search, WeatherError,
    WeatherServiceMessage, WeatherServices,
};

/// View state for the weather screen.
///
/// Owned by the UI thread. Operations start async requests and return
/// immediately; call `poll_channel` (or `wait_for_update`) to apply results.
pub struct WeatherModel {
    query: String,
    loading: bool,
    error_message: String,
    candidates: Vec<LocationCandidate>,
    place: Option<LocationCandidate>,
    current: Option<CurrentConditions>,
    fetched_at: Option<DateTime<Utc>>,
    unit: TemperatureUnit,
    recent: RecentSearches,
    // Internal state
    services: WeatherServices,
    preferences: Preferences,
    generation: u64,
    cancel: Option<CancellationToken>,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
}

impl WeatherModel {
    /// Create the model, restoring unit and recent searches from preferences.
    pub fn new(
        services: WeatherServices,
        preferences: Preferences,
        default_unit: TemperatureUnit,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        let unit = preferences.unit(default_unit);
        let recent = preferences.recent();
        tracing::debug!(
            "WeatherModel restored unit {:?} and {} recent searches",
            unit,
            recent.len()
        );

        Self {
            query: String::new(),
            loading: false,
            error_message: String::new(),
            candidates: Vec::new(),
            place: None,
            current: None,
            fetched_at: None,
            unit,
            recent,
            services,
            preferences,
            generation: 0,
            cancel: None,
            tx,
            rx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Current user-facing error, empty when there is none.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        &self.candidates
    }

    pub fn place(&self) -> Option<&LocationCandidate> {
        self.place.as_ref()
    }

    pub fn current(&self) -> Option<&CurrentConditions> {
        self.current.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn recent(&self) -> &[RecentLocation] {
        self.recent.entries()
    }

    /// True once a place and its reading are both available.
    pub fn has_result(&self) -> bool {
        self.place.is_some() && self.current.is_some()
    }

    pub fn geolocation_available(&self) -> bool {
        self.services.geolocation_available()
    }

    /// Supersede whatever is in flight and hand out a fresh generation.
    fn begin_request(&mut self) -> (u64, CancellationToken) {
        if let Some(previous) = self.cancel.take() {
            previous.cancel();
        }
        self.generation += 1;
        let token = CancellationToken::new();
        self.cancel = Some(token.clone());
        (self.generation, token)
    }

    fn show_error(&mut self, error: WeatherError) {
        let app_error = AppError::from(error);
        tracing::debug!("Showing error: {}", app_error);
        self.error_message = app_error.user_message().to_string();
    }

    /// Search for places matching `name`, or the current query when `None`.
    ///
    /// Returns false (and does nothing) for a blank query.
    pub fn search(&mut self, name: Option<&str>) -> bool {
        let query = name.unwrap_or(&self.query).trim().to_string();
        if query.is_empty() {
            return false;
        }

        self.error_message.clear();
        self.loading = true;
        self.candidates.clear();

        let (generation, cancel) = self.begin_request();
        tracing::info!("Searching locations for {:?}", query);
        request_weather_search(&self.tx, &self.services, generation, cancel, query);
        true
    }

    /// Fetch current conditions for `place` and make it the selected place.
    pub fn fetch_weather(&mut self, place: LocationCandidate) {
        self.error_message.clear();
        self.loading = true;
        self.current = None;
        self.fetched_at = None;
        self.place = Some(place.clone());

        let (generation, cancel) = self.begin_request();
        request_weather_fetch(&self.tx, &self.services, generation, cancel, place);
    }

    /// Fetch weather for the search candidate at `index`.
    pub fn select_candidate(&mut self, index: usize) -> bool {
        match self.candidates.get(index).cloned() {
            Some(place) => {
                self.fetch_weather(place);
                true
            }
            None => false,
        }
    }

    /// Fetch weather for the recent entry at `index`.
    pub fn select_recent(&mut self, index: usize) -> bool {
        match self.recent.get(index).map(LocationCandidate::from) {
            Some(place) => {
                self.fetch_weather(place);
                true
            }
            None => false,
        }
    }

    /// Look up weather for the device position.
    pub fn use_my_location(&mut self) {
        if !self.services.geolocation_available() {
            self.show_error(WeatherError::Location(LocationError::Unsupported));
            return;
        }

        self.loading = true;
        let (generation, cancel) = self.begin_request();
        request_weather_locate(&self.tx, &self.services, generation, cancel);
    }

    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
        self.preferences.save_unit(self.unit);
    }

    pub fn clear_recent(&mut self) {
        self.recent.clear();
        self.preferences.save_recent(&self.recent);
    }

    fn handle_message(&mut self, message: WeatherServiceMessage) {
        if message.generation() != self.generation {
            tracing::debug!(
                "Dropping stale weather result (generation {}, current {})",
                message.generation(),
                self.generation
            );
            return;
        }

        match message {
            WeatherServiceMessage::SearchDone { result, .. } => {
                self.loading = false;
                match result {
                    Ok(candidates) => self.candidates = candidates,
                    Err(e) => self.show_error(e),
                }
            }
            WeatherServiceMessage::FetchDone { result, .. } => {
                self.loading = false;
                match result {
                    Ok(report) => {
                        self.recent.record(&report.place);
                        self.preferences.save_recent(&self.recent);
                        self.current = Some(report.current);
                        self.fetched_at = Some(report.fetched_at);
                        self.candidates.clear();
                    }
                    Err(e) => self.show_error(e),
                }
            }
            WeatherServiceMessage::PositionResolved { result, .. } => match result {
                Ok(place) => self.fetch_weather(place),
                Err(e) => {
                    self.loading = false;
                    self.show_error(e);
                }
            },
        }
    }

    /// Apply every completed request. Returns true if anything arrived.
    pub fn poll_channel(&mut self) -> bool {
        let mut changed = false;
        while let Ok(message) = self.rx.try_recv() {
            self.handle_message(message);
            changed = true;
        }
        changed
    }

    /// Block until at least one request completes or `timeout` passes.
    pub fn wait_for_update(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(message) => {
                self.handle_message(message);
                self.poll_channel();
                true
            }
            Err(_) => false,
        }
    }

    /// Block until no request is pending. Returns false on timeout.
    pub fn wait_until_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.loading {
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            self.wait_for_update(deadline - now);
        }
        true
    }
}
