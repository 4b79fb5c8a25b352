use core_sim::{Command, GameConfig, Session, SessionEvent, SessionObserver, Snapshot, TradeError};
use rand::{rngs::StdRng, Rng};

use crate::logging::{RunLogEvent, RunLogEventKind, RunLogWriter, TracingRunLogWriter};

pub type BoxedObserver = Box<dyn SessionObserver + Send>;

/// Applies commands to a session, journals them and fans the resulting
/// events out to every registered observer.
pub struct GameEngine<W = TracingRunLogWriter, R = StdRng> {
    session: Session<R>,
    observers: Vec<BoxedObserver>,
    run_log: W,
}

impl GameEngine {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, core_sim::ConfigError> {
        let session = match seed {
            Some(seed) => Session::seeded(config, seed)?,
            None => Session::new(config)?,
        };

        Ok(Self::with_session(session, TracingRunLogWriter))
    }
}

impl<W: RunLogWriter, R: Rng> GameEngine<W, R> {
    pub fn with_session(session: Session<R>, run_log: W) -> Self {
        Self {
            session,
            observers: Vec::new(),
            run_log,
        }
    }

    pub fn register(&mut self, observer: BoxedObserver) {
        self.observers.push(observer);
    }

    pub fn session(&self) -> &Session<R> {
        &self.session
    }

    pub fn run_log(&self) -> &W {
        &self.run_log
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    pub fn handle(&mut self, command: Command) -> Result<Vec<SessionEvent>, TradeError> {
        let step = self.session.state().step;

        match self.session.execute(command) {
            Ok(events) => {
                let kind = match command {
                    Command::Restart => RunLogEventKind::SessionRestarted,
                    _ if self.session.state().is_terminated() => RunLogEventKind::SessionFinished,
                    _ => RunLogEventKind::CommandApplied,
                };
                self.journal(step, command, kind);
                self.dispatch(&events);
                Ok(events)
            }
            Err(reason) => {
                self.journal(step, command, RunLogEventKind::CommandRejected);
                self.dispatch(&[SessionEvent::rejected(command, reason)]);
                Err(reason)
            }
        }
    }

    fn journal(&mut self, step: usize, command: Command, kind: RunLogEventKind) {
        let portfolio_value = self
            .session
            .state()
            .portfolio_value(self.session.current_price());
        self.run_log
            .write(RunLogEvent::new(step, command, kind, portfolio_value));
    }

    fn dispatch(&mut self, events: &[SessionEvent]) {
        for observer in &mut self.observers {
            for event in events {
                observer.on_event(event);
            }
        }
    }
}
