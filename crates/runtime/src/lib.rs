pub mod engine;
pub mod logging;

pub use engine::{BoxedObserver, GameEngine};

pub fn module_ready() -> bool {
    true
}
