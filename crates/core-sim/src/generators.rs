use std::fmt;

use rand::Rng;

/// Shape of the biased random walk.
///
/// Each increment is `(u - 0.5 + drift_bias) * volatility` for `u` uniform in
/// `[0, 1)`, and the walk never drops below `floor`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkParams {
    pub length: usize,
    pub start_price: f64,
    pub drift_bias: f64,
    pub volatility: f64,
    pub floor: f64,
}

#[derive(Debug, Clone)]
pub struct PriceGenerator<R> {
    rng: R,
    price: f64,
    params: WalkParams,
}

impl<R: Rng> PriceGenerator<R> {
    pub fn new(rng: R, params: WalkParams) -> Self {
        assert!(params.length >= 1, "length must be at least 1");
        assert!(
            params.floor.is_finite() && params.floor > 0.0,
            "floor must be finite and positive"
        );
        assert!(
            params.start_price.is_finite() && params.start_price >= params.floor,
            "start_price must be finite and not below floor"
        );
        assert!(
            params.volatility.is_finite() && params.volatility >= 0.0,
            "volatility must be finite and non-negative"
        );
        assert!(params.drift_bias.is_finite(), "drift_bias must be finite");

        Self {
            rng,
            price: params.start_price,
            params,
        }
    }

    pub fn next_price(&mut self) -> f64 {
        let unit: f64 = self.rng.gen();
        let delta = (unit - 0.5 + self.params.drift_bias) * self.params.volatility;
        self.price = (self.price + delta).max(self.params.floor);
        self.price
    }
}

/// Materializes a full walk of `params.length` prices starting at
/// `params.start_price`.
pub fn generate<R: Rng + ?Sized>(params: &WalkParams, rng: &mut R) -> PriceSeries {
    let mut generator = PriceGenerator::new(rng, *params);
    let mut prices = Vec::with_capacity(params.length);
    prices.push(params.start_price);
    for _ in 1..params.length {
        prices.push(generator.next_price());
    }

    PriceSeries { prices }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesError {
    Empty,
    NonPositivePrice { index: usize },
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "price series must not be empty"),
            Self::NonPositivePrice { index } => {
                write!(f, "price at step {index} must be finite and positive")
            }
        }
    }
}

impl std::error::Error for SeriesError {}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn from_prices(prices: Vec<f64>) -> Result<Self, SeriesError> {
        if prices.is_empty() {
            return Err(SeriesError::Empty);
        }
        if let Some(index) = prices
            .iter()
            .position(|price| !price.is_finite() || *price <= 0.0)
        {
            return Err(SeriesError::NonPositivePrice { index });
        }

        Ok(Self { prices })
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn last_step(&self) -> usize {
        self.prices.len().saturating_sub(1)
    }

    pub fn price_at(&self, step: usize) -> Option<f64> {
        self.prices.get(step).copied()
    }

    /// Prices for steps `0..=step`, clamped to the series length.
    pub fn visible(&self, step: usize) -> &[f64] {
        let end = step.saturating_add(1).min(self.prices.len());
        &self.prices[..end]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }
}
