//! # EventLog
//! An append-only list of `Timestamped` events. The log never reorders: events are kept in the order they were pushed, which is also the order they are folded in.

use crate::AppState;
use crate::data_model::Timestamped;

#[derive(Clone, Debug)]
pub struct EventLog<E> {
    events: Vec<Timestamped<E>>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventLog<E> {
    pub fn push(&mut self, elapsed_secs: f64, event: E) -> &Timestamped<E> {
        let index = self.events.len();
        self.events.push(Timestamped {
            elapsed_secs,
            index,
            event,
        });
        &self.events[index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Timestamped<E>> {
        self.events.iter()
    }

    pub fn last(&self) -> Option<&Timestamped<E>> {
        self.events.last()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Replays every event, oldest first, on top of `initial`.
    pub fn state<S: AppState<Event = E>>(&self, initial: S) -> S {
        self.events
            .iter()
            .fold(initial, |state, event| state.apply_event(event))
    }
}
