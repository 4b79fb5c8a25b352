use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use core_sim::{Command, SessionEvent};
use serde::Serialize;

use crate::{state::AppState, ws};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/static/styles.css", get(styles))
        .route("/static/app.js", get(script))
        .route("/api/session", get(session_snapshot))
        .route("/api/session/buy", post(buy))
        .route("/api/session/sell", post(sell))
        .route("/api/session/advance", post(advance))
        .route("/api/session/restart", post(restart))
        .route("/ws/events", get(ws::events_socket))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct CommandResponse {
    accepted: bool,
    events: Vec<SessionEvent>,
}

async fn index() -> Html<&'static str> {
    Html(ui::index_html())
}

async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], ui::styles_css())
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        ui::app_js(),
    )
}

async fn session_snapshot(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.snapshot().await)
}

async fn buy(State(state): State<AppState>) -> Response {
    run_command(&state, Command::Buy).await
}

async fn sell(State(state): State<AppState>) -> Response {
    run_command(&state, Command::Sell).await
}

async fn advance(State(state): State<AppState>) -> Response {
    run_command(&state, Command::Advance).await
}

async fn restart(State(state): State<AppState>) -> Response {
    run_command(&state, Command::Restart).await
}

async fn run_command(state: &AppState, command: Command) -> Response {
    match state.execute(command).await {
        Ok(events) => (
            StatusCode::OK,
            Json(CommandResponse {
                accepted: true,
                events,
            }),
        )
            .into_response(),
        Err(reason) => (
            StatusCode::CONFLICT,
            Json(CommandResponse {
                accepted: false,
                events: vec![SessionEvent::rejected(command, reason)],
            }),
        )
            .into_response(),
    }
}
