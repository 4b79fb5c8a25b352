use crate::events::SessionEvent;

/// Receives every event a session emits, in emission order.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

#[derive(Debug, Default)]
pub struct InMemoryObserver {
    events: Vec<SessionEvent>,
}

impl InMemoryObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }
}

impl SessionObserver for InMemoryObserver {
    fn on_event(&mut self, event: &SessionEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryObserver, SessionObserver};
    use crate::{
        config::GameConfig, events::SessionEvent, generators::PriceSeries, session::Session,
    };
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn in_memory_observer_keeps_events_in_order() {
        let series = PriceSeries::from_prices(vec![10.0, 12.0]).unwrap();
        let mut session =
            Session::with_series(GameConfig::default(), series, StdRng::seed_from_u64(0))
                .unwrap();
        let mut observer = InMemoryObserver::new();

        let mut emitted = session.buy().unwrap();
        emitted.extend(session.sell().unwrap());
        for event in &emitted {
            observer.on_event(event);
        }

        let events = observer.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], SessionEvent::Snapshot { .. }));
        assert!(matches!(events[1], SessionEvent::Snapshot { .. }));
        match &events[2] {
            SessionEvent::Finished { summary } => assert_eq!(summary.final_value, 10_002.0),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
