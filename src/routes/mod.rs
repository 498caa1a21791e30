use axum::{
    Router,
    routing::{get, post},
};
use sqlx::SqlitePool;

mod attendance;
mod check_in;
mod events;
mod health;
mod members;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub member_command: rollcall_member::Command,
    pub event_command: rollcall_event::Command,
    pub event_query: rollcall_event::Query,
    pub attendance_query: rollcall_attendance::Query,
    pub check_in: crate::CheckIn,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: rollcall_shared::State) -> Self {
        Self {
            member_command: rollcall_member::Command(state.clone()),
            event_command: rollcall_event::Command(state.clone()),
            event_query: rollcall_event::Query(state.clone()),
            attendance_query: rollcall_attendance::Query::new(state.clone(), config.activity),
            check_in: crate::CheckIn::new(state.clone()),
            pool: state.read_db.clone(),
            config,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/events/check-in", post(check_in::action))
        .route("/events/upcoming", get(events::upcoming))
        .route("/events", get(events::list).post(events::create))
        .route("/events/{id}", get(events::get).delete(events::delete))
        .route("/events/{id}/attendees", get(events::attendees))
        .route("/attendance", get(attendance::list))
        .route("/members/status", get(members::status))
        .with_state(app_state)
}
