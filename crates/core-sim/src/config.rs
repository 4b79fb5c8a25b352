use std::fmt;

use crate::generators::WalkParams;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub total_steps: usize,
    pub starting_cash: f64,
    pub start_price: f64,
    pub price_floor: f64,
    pub volatility: f64,
    pub drift_bias: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_steps: 100,
            starting_cash: 10_000.0,
            start_price: 100.0,
            price_floor: 10.0,
            volatility: 10.0,
            drift_bias: 0.02,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    InvalidTotalSteps,
    InvalidStartingCash,
    InvalidStartPrice,
    InvalidPriceFloor,
    InvalidVolatility,
    InvalidDriftBias,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTotalSteps => write!(f, "total_steps must be at least 1"),
            Self::InvalidStartingCash => {
                write!(f, "starting_cash must be finite and non-negative")
            }
            Self::InvalidStartPrice => {
                write!(f, "start_price must be finite and not below price_floor")
            }
            Self::InvalidPriceFloor => write!(f, "price_floor must be finite and positive"),
            Self::InvalidVolatility => {
                write!(f, "volatility must be finite and non-negative")
            }
            Self::InvalidDriftBias => write!(f, "drift_bias must be finite"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_steps == 0 {
            return Err(ConfigError::InvalidTotalSteps);
        }
        if !self.starting_cash.is_finite() || self.starting_cash < 0.0 {
            return Err(ConfigError::InvalidStartingCash);
        }
        if !self.price_floor.is_finite() || self.price_floor <= 0.0 {
            return Err(ConfigError::InvalidPriceFloor);
        }
        if !self.start_price.is_finite() || self.start_price < self.price_floor {
            return Err(ConfigError::InvalidStartPrice);
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(ConfigError::InvalidVolatility);
        }
        if !self.drift_bias.is_finite() {
            return Err(ConfigError::InvalidDriftBias);
        }

        Ok(())
    }

    pub fn walk_params(&self) -> WalkParams {
        WalkParams {
            length: self.total_steps,
            start_price: self.start_price,
            drift_bias: self.drift_bias,
            volatility: self.volatility,
            floor: self.price_floor,
        }
    }
}
