mod config;
mod events;
mod generators;
mod observer;
mod session;
mod state;

pub use config::{ConfigError, GameConfig};
pub use events::{ChartPoint, Command, FinalSummary, SessionEvent, Snapshot};
pub use generators::{generate, PriceGenerator, PriceSeries, SeriesError, WalkParams};
pub use observer::{InMemoryObserver, SessionObserver};
pub use session::Session;
pub use state::{Phase, SessionState, TradeError};

#[cfg(test)]
mod tests {
    use super::{GameConfig, SessionState};

    #[test]
    fn game_config_defaults_match_the_classic_walk() {
        let config = GameConfig::default();
        assert_eq!(config.total_steps, 100);
        assert_eq!(config.starting_cash, 10_000.0);
        assert_eq!(config.start_price, 100.0);
        assert_eq!(config.price_floor, 10.0);
        assert_eq!(config.volatility, 10.0);
        assert_eq!(config.drift_bias, 0.02);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn session_state_starts_flat_at_step_zero() {
        let state = SessionState::new(10_000.0);
        assert_eq!(state.cash, 10_000.0);
        assert_eq!(state.shares, 0);
        assert_eq!(state.step, 0);
        assert!(!state.is_terminated());
    }
}
