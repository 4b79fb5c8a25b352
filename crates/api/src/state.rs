use std::sync::Arc;

use core_sim::{Command, SessionEvent, SessionObserver, Snapshot, TradeError};
use runtime::GameEngine;
use tokio::sync::{broadcast, Mutex};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Pushes session events onto the websocket fan-out channel.
struct BroadcastObserver {
    events_tx: broadcast::Sender<SessionEvent>,
}

impl SessionObserver for BroadcastObserver {
    fn on_event(&mut self, event: &SessionEvent) {
        // no subscribers is not an error
        let _ = self.events_tx.send(event.clone());
    }
}

#[derive(Clone)]
pub struct AppState {
    engine: Arc<Mutex<GameEngine>>,
    events_tx: broadcast::Sender<SessionEvent>,
}

impl AppState {
    pub fn new(mut engine: GameEngine) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        engine.register(Box::new(BroadcastObserver {
            events_tx: events_tx.clone(),
        }));

        Self {
            engine: Arc::new(Mutex::new(engine)),
            events_tx,
        }
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.engine.lock().await.snapshot()
    }

    /// Commands are applied one at a time; observers have seen every event
    /// by the time this returns.
    pub async fn execute(&self, command: Command) -> Result<Vec<SessionEvent>, TradeError> {
        self.engine.lock().await.handle(command)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events_tx.subscribe()
    }

    /// Subscribes under the engine lock so no event slips between the
    /// snapshot and the first received event.
    pub async fn subscribe_with_snapshot(&self) -> (Snapshot, broadcast::Receiver<SessionEvent>) {
        let engine = self.engine.lock().await;
        let events = self.events_tx.subscribe();
        (engine.snapshot(), events)
    }
}
