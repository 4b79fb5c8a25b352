use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::{ConfigError, GameConfig},
    events::{ChartPoint, Command, FinalSummary, SessionEvent, Snapshot},
    generators::{generate, PriceSeries},
    state::{SessionState, TradeError},
};

/// Owns one price series and the trading state walking along it.
#[derive(Debug, Clone)]
pub struct Session<R = StdRng> {
    config: GameConfig,
    rng: R,
    series: PriceSeries,
    state: SessionState,
}

impl Session<StdRng> {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn seeded(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let series = generate(&config.walk_params(), &mut rng);

        Ok(Self {
            config,
            rng,
            series,
            state: SessionState::new(config.starting_cash),
        })
    }

    /// Starts on a caller-supplied series. `total_steps` follows the series
    /// length, and later restarts draw fresh walks of that length.
    pub fn with_series(
        config: GameConfig,
        series: PriceSeries,
        rng: R,
    ) -> Result<Self, ConfigError> {
        let config = GameConfig {
            total_steps: series.len(),
            ..config
        };
        config.validate()?;

        Ok(Self {
            config,
            rng,
            series,
            state: SessionState::new(config.starting_cash),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_price(&self) -> f64 {
        // step stays within the series for the whole session
        self.series.as_slice()[self.state.step]
    }

    pub fn snapshot(&self) -> Snapshot {
        let step = self.state.step;
        let price = self.current_price();
        let completed = (0..self.series.len()).map(|index| index <= step).collect();
        let chart = self
            .series
            .visible(step)
            .iter()
            .enumerate()
            .map(|(index, price)| ChartPoint {
                step: index,
                price: *price,
            })
            .collect();

        Snapshot {
            step,
            total_steps: self.series.len(),
            price,
            cash: self.state.cash,
            shares: self.state.shares,
            portfolio_value: self.state.portfolio_value(price),
            terminated: self.state.is_terminated(),
            completed,
            chart,
        }
    }

    pub fn buy(&mut self) -> Result<Vec<SessionEvent>, TradeError> {
        let next = self.state.buy(&self.series)?;
        Ok(self.commit(next))
    }

    pub fn sell(&mut self) -> Result<Vec<SessionEvent>, TradeError> {
        let next = self.state.sell(&self.series)?;
        Ok(self.commit(next))
    }

    pub fn advance(&mut self) -> Result<Vec<SessionEvent>, TradeError> {
        let next = self.state.advance(&self.series)?;
        Ok(self.commit(next))
    }

    pub fn restart(&mut self) -> Vec<SessionEvent> {
        self.series = generate(&self.config.walk_params(), &mut self.rng);
        self.state = SessionState::new(self.config.starting_cash);
        vec![SessionEvent::restarted(self.snapshot())]
    }

    pub fn execute(&mut self, command: Command) -> Result<Vec<SessionEvent>, TradeError> {
        match command {
            Command::Buy => self.buy(),
            Command::Sell => self.sell(),
            Command::Advance => self.advance(),
            Command::Restart => Ok(self.restart()),
        }
    }

    fn commit(&mut self, next: SessionState) -> Vec<SessionEvent> {
        self.state = next;

        let mut events = vec![SessionEvent::snapshot(self.snapshot())];
        if let Some(final_value) = self.state.final_value() {
            events.push(SessionEvent::finished(FinalSummary {
                final_value,
                cash: self.state.cash,
                shares: self.state.shares,
                last_price: self.current_price(),
            }));
        }
        events
    }
}
