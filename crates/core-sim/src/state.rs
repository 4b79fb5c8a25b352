use std::fmt;

use serde::Serialize;

use crate::generators::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TradeError {
    InsufficientFunds { cash: f64, price: f64 },
    InsufficientHoldings,
    SessionFinished,
}

impl fmt::Display for TradeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds { cash, price } => {
                write!(f, "insufficient funds: cash {cash:.2} is below price {price:.2}")
            }
            Self::InsufficientHoldings => write!(f, "insufficient holdings: no shares to sell"),
            Self::SessionFinished => write!(f, "session has finished; restart to play again"),
        }
    }
}

impl std::error::Error for TradeError {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Active,
    Terminated { final_value: f64 },
}

/// Trading state for one session.
///
/// Every transition consumes the state and returns the next one, leaving the
/// caller's copy untouched when the transition is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionState {
    pub cash: f64,
    pub shares: u64,
    pub step: usize,
    pub phase: Phase,
}

impl SessionState {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            cash: starting_cash,
            shares: 0,
            step: 0,
            phase: Phase::Active,
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self.phase, Phase::Terminated { .. })
    }

    pub fn final_value(&self) -> Option<f64> {
        match self.phase {
            Phase::Active => None,
            Phase::Terminated { final_value } => Some(final_value),
        }
    }

    pub fn portfolio_value(&self, price: f64) -> f64 {
        self.cash + self.shares as f64 * price
    }

    pub fn buy(self, series: &PriceSeries) -> Result<Self, TradeError> {
        let price = self.current_price(series)?;
        if self.cash < price {
            return Err(TradeError::InsufficientFunds {
                cash: self.cash,
                price,
            });
        }

        let bought = Self {
            cash: self.cash - price,
            shares: self.shares + 1,
            ..self
        };
        bought.advance(series)
    }

    pub fn sell(self, series: &PriceSeries) -> Result<Self, TradeError> {
        let price = self.current_price(series)?;
        if self.shares == 0 {
            return Err(TradeError::InsufficientHoldings);
        }

        let sold = Self {
            cash: self.cash + price,
            shares: self.shares - 1,
            ..self
        };
        sold.advance(series)
    }

    pub fn advance(self, series: &PriceSeries) -> Result<Self, TradeError> {
        let price = self.current_price(series)?;
        if self.step < series.last_step() {
            return Ok(Self {
                step: self.step + 1,
                ..self
            });
        }

        Ok(Self {
            phase: Phase::Terminated {
                final_value: self.portfolio_value(price),
            },
            ..self
        })
    }

    fn current_price(&self, series: &PriceSeries) -> Result<f64, TradeError> {
        if self.is_terminated() {
            return Err(TradeError::SessionFinished);
        }
        // step never passes the last index while active
        series
            .price_at(self.step)
            .ok_or(TradeError::SessionFinished)
    }
}
