//! Dashboard orchestration: one query at a time, history and theme bookkeeping.
//!
//! State changes go through [`transition`], a pure function over
//! [`ViewState`]. [`Dashboard`] drives it around calls to a
//! [`WeatherProvider`]. Search and refresh take `&mut self` across the
//! fetch, so a second query cannot start while one is in flight.

use crate::{
    error::ErrorKind,
    forecast::{DayBucket, DayBuckets, group_by_day},
    history::SearchHistoryStore,
    model::{CityQuery, FetchResult, WeatherReport},
    provider::WeatherProvider,
    theme::{Theme, ThemeSetting},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading {
        query: CityQuery,
    },
    Success(WeatherReport),
    Error {
        kind: ErrorKind,
        message: String,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading { .. })
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            ViewState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            ViewState::Error { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Event {
    Started(CityQuery),
    Finished(FetchResult),
}

/// Next view state for `event`.
///
/// A finished fetch replaces whatever was shown: success drops any previous
/// error, failure drops any previous report.
pub fn transition(state: ViewState, event: Event) -> ViewState {
    match event {
        Event::Started(query) => ViewState::Loading { query },
        Event::Finished(Ok(report)) => ViewState::Success(report),
        Event::Finished(Err(err)) => {
            if !state.is_loading() {
                tracing::debug!("Fetch finished without a pending query");
            }
            ViewState::Error { kind: err.kind, message: err.message }
        }
    }
}

#[derive(Debug)]
pub struct Dashboard<P: WeatherProvider> {
    provider: P,
    view: ViewState,
    days: DayBuckets,
    selected_day: usize,
    history: SearchHistoryStore,
    theme: ThemeSetting,
}

impl<P: WeatherProvider> Dashboard<P> {
    pub fn new(provider: P, history: SearchHistoryStore, theme: ThemeSetting) -> Self {
        Self {
            provider,
            view: ViewState::Idle,
            days: DayBuckets::default(),
            selected_day: 0,
            history,
            theme,
        }
    }

    /// Search for `input`. Blank input is ignored.
    ///
    /// The query is recorded in history before fetching, whatever the outcome.
    pub async fn search(&mut self, input: &str) -> &ViewState {
        let Ok(query) = CityQuery::try_from(input) else {
            tracing::debug!("Ignoring blank search");
            return &self.view;
        };

        self.history.record(&query);
        self.run(query).await
    }

    /// Re-query the location currently displayed. No-op without a result.
    pub async fn refresh(&mut self) -> &ViewState {
        let Some(query) = self
            .view
            .report()
            .and_then(|report| CityQuery::try_from(report.current.name.as_str()).ok())
        else {
            tracing::debug!("Nothing to refresh");
            return &self.view;
        };

        self.run(query).await
    }

    async fn run(&mut self, query: CityQuery) -> &ViewState {
        tracing::info!(city = %query, "Fetching weather");
        self.apply(Event::Started(query.clone()));

        let result = self.provider.fetch_weather(&query).await;
        if let Err(err) = &result {
            tracing::warn!(city = %query, kind = ?err.kind, "Weather query failed");
        }

        self.apply(Event::Finished(result));
        &self.view
    }

    fn apply(&mut self, event: Event) {
        let previous = std::mem::take(&mut self.view);
        self.view = transition(previous, event);

        self.days = match &self.view {
            ViewState::Success(report) => group_by_day(&report.forecast),
            _ => DayBuckets::default(),
        };
        self.selected_day = 0;
    }

    pub fn state(&self) -> &ViewState {
        &self.view
    }

    pub fn forecast_days(&self) -> &DayBuckets {
        &self.days
    }

    /// Select a forecast day, clamped to the available days.
    pub fn select_day(&mut self, index: usize) -> usize {
        self.selected_day = self.days.clamp_index(index);
        self.selected_day
    }

    pub fn selected_day_index(&self) -> usize {
        self.selected_day
    }

    pub fn selected_day(&self) -> Option<&DayBucket> {
        self.days.select(self.selected_day)
    }

    pub fn history(&self) -> &[String] {
        self.history.list()
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme.set(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }
}
