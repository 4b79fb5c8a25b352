use axum::{routing::get, Router};
use runtime::GameEngine;
use tower_http::trace::TraceLayer;

pub fn build_app(engine: GameEngine) -> Router {
    debug_assert!(runtime::module_ready());
    debug_assert!(api::module_ready());
    debug_assert!(ui::module_ready());

    api::app(engine)
        .route("/health", get(healthcheck))
        .layer(TraceLayer::new_for_http())
}

async fn healthcheck() -> &'static str {
    "ok"
}
