//! Status subscribers

use super::state::StatusUpdate;

/// Receives status updates from the run controller
pub trait StateObserver: Send {
    fn on_state(&mut self, update: StatusUpdate);
}

impl<F> StateObserver for F
where
    F: FnMut(StatusUpdate) + Send,
{
    fn on_state(&mut self, update: StatusUpdate) {
        self(update)
    }
}

/// Handle returned by [`ObserverRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Ordered list of subscribers
#[derive(Default)]
pub struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(ObserverId, Box<dyn StateObserver>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Remove a subscriber; returns false if it was already gone
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, update: StatusUpdate) {
        for (_, observer) in &mut self.observers {
            observer.on_state(update);
        }
    }
}
