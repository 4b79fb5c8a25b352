use serde::{Deserialize, Serialize};

use crate::state::TradeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Buy,
    Sell,
    Advance,
    Restart,
}

impl Command {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Advance => "advance",
            Self::Restart => "restart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub step: usize,
    pub price: f64,
}

/// Read-only view of a session for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub total_steps: usize,
    pub price: f64,
    pub cash: f64,
    pub shares: u64,
    pub portfolio_value: f64,
    pub terminated: bool,
    /// One flag per step, set for every step up to and including `step`.
    pub completed: Vec<bool>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinalSummary {
    pub final_value: f64,
    pub cash: f64,
    pub shares: u64,
    pub last_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum SessionEvent {
    Snapshot { snapshot: Snapshot },
    Rejected { command: Command, reason: TradeError },
    Finished { summary: FinalSummary },
    Restarted { snapshot: Snapshot },
}

impl SessionEvent {
    pub fn snapshot(snapshot: Snapshot) -> Self {
        Self::Snapshot { snapshot }
    }

    pub fn rejected(command: Command, reason: TradeError) -> Self {
        Self::Rejected { command, reason }
    }

    pub fn finished(summary: FinalSummary) -> Self {
        Self::Finished { summary }
    }

    pub fn restarted(snapshot: Snapshot) -> Self {
        Self::Restarted { snapshot }
    }
}
