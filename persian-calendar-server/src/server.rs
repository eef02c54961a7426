use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::debug;
use serde::{Deserialize, Serialize};

use persian_calendar::{
    CalendarEvents, CalendarKind, Event, EventSource, EventsStore, HolidayTypes,
};

use crate::cache::Cache;

const ROUTES: &str = "GET /events?calendar=&month=&day=[&types=]\n\
                      GET /holidays?calendar=&month=&day=[&types=]\n";

pub struct AppState {
    pub source: EventSource,
    pub default_types: HolidayTypes,
    pub cache: Arc<Cache<String, CalendarEvents>>,
}

type SharedState = Arc<AppState>;

impl AppState {
    async fn events_for(&self, types: HolidayTypes) -> Arc<CalendarEvents> {
        let key = types.key();

        if let Some(events) = self.cache.get(&key).await {
            debug!("Cache hit for types `{key}`");
            return events;
        }

        let events = self.source.load(&types);
        debug!("Loaded {} events for types `{key}`", events.len());

        Arc::clone(&self.cache).insert(key, events).await
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/events", get(handle_events))
        .route("/holidays", get(handle_holidays))
        .fallback(|| async { (StatusCode::NOT_FOUND, ROUTES) })
        .with_state(state)
}

#[derive(Deserialize)]
struct DayQuery {
    calendar: CalendarKind,
    month: u32,
    day: u32,
    types: Option<String>,
}

impl DayQuery {
    fn check(&self) -> Result<(), Response> {
        if !(1..=12).contains(&self.month) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Month {} is out of range", self.month),
            )
                .into_response());
        }

        if !(1..=31).contains(&self.day) {
            return Err((
                StatusCode::BAD_REQUEST,
                format!("Day {} is out of range", self.day),
            )
                .into_response());
        }

        Ok(())
    }

    fn types(&self, default: HolidayTypes) -> HolidayTypes {
        self.types.as_deref().map_or(default, HolidayTypes::parse)
    }
}

#[derive(Serialize)]
struct HolidayReport<'a, D> {
    holiday: bool,
    events: Vec<&'a Event<D>>,
}

fn day_events<D: Serialize>(store: &EventsStore<D>, month: u32, day: u32) -> Response {
    Json(store.get(month, day)).into_response()
}

fn day_holidays<D: Serialize>(store: &EventsStore<D>, month: u32, day: u32) -> Response {
    let events: Vec<_> = store.holidays(month, day).collect();

    Json(HolidayReport {
        holiday: !events.is_empty(),
        events,
    })
    .into_response()
}

async fn handle_events(
    State(state): State<SharedState>,
    Query(query): Query<DayQuery>,
) -> Response {
    if let Err(response) = query.check() {
        return response;
    }

    let events = state.events_for(query.types(state.default_types)).await;

    match query.calendar {
        CalendarKind::Persian => day_events(&events.persian, query.month, query.day),
        CalendarKind::Islamic => day_events(&events.islamic, query.month, query.day),
        CalendarKind::Gregorian => day_events(&events.gregorian, query.month, query.day),
    }
}

async fn handle_holidays(
    State(state): State<SharedState>,
    Query(query): Query<DayQuery>,
) -> Response {
    if let Err(response) = query.check() {
        return response;
    }

    let events = state.events_for(query.types(state.default_types)).await;

    match query.calendar {
        CalendarKind::Persian => day_holidays(&events.persian, query.month, query.day),
        CalendarKind::Islamic => day_holidays(&events.islamic, query.month, query.day),
        CalendarKind::Gregorian => day_holidays(&events.gregorian, query.month, query.day),
    }
}
