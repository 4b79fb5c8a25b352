pub mod routes;
pub mod state;
pub mod ws;

use axum::Router;
use runtime::GameEngine;

pub fn module_ready() -> bool {
    true
}

pub fn app(engine: GameEngine) -> Router {
    routes::router(state::AppState::new(engine))
}
