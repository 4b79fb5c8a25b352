use core_sim::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunLogEventKind {
    CommandApplied,
    CommandRejected,
    SessionFinished,
    SessionRestarted,
}

impl RunLogEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CommandApplied => "command_applied",
            Self::CommandRejected => "command_rejected",
            Self::SessionFinished => "session_finished",
            Self::SessionRestarted => "session_restarted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEvent {
    /// Step the command was issued at.
    pub step: usize,
    pub command: Command,
    pub kind: RunLogEventKind,
    pub portfolio_value: f64,
}

impl RunLogEvent {
    pub fn new(step: usize, command: Command, kind: RunLogEventKind, portfolio_value: f64) -> Self {
        Self {
            step,
            command,
            kind,
            portfolio_value,
        }
    }
}

pub trait RunLogWriter {
    fn write(&mut self, event: RunLogEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryRunLogWriter {
    events: Vec<RunLogEvent>,
}

impl InMemoryRunLogWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RunLogEvent] {
        &self.events
    }
}

impl RunLogWriter for InMemoryRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        self.events.push(event);
    }
}

/// Forwards run-log events to `tracing`; rejections are logged at warn level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRunLogWriter;

impl RunLogWriter for TracingRunLogWriter {
    fn write(&mut self, event: RunLogEvent) {
        match event.kind {
            RunLogEventKind::CommandRejected => tracing::warn!(
                step = event.step,
                command = event.command.as_str(),
                kind = event.kind.as_str(),
                "command rejected"
            ),
            _ => tracing::info!(
                step = event.step,
                command = event.command.as_str(),
                kind = event.kind.as_str(),
                portfolio_value = event.portfolio_value,
                "session event"
            ),
        }
    }
}
