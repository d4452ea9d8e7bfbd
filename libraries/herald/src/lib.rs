//! Small event plumbing for single-threaded, tick-driven applications.
//!
//! Model:
//! 1. Something happens inside the app (a question is shown, an answer is graded, a balance changes). Instead of callers polling for it, the owner emits an event.
//! 2. Interested parties register a listener and get a `ListenerKey` back. Listeners are invoked synchronously, inside the call that produced the event.
//! 3. Events that matter after the fact are also appended to an `EventLog`, stamped with the session clock. Derived state (reports, statistics) is obtained by folding the log into an `AppState`, starting from a default.
//!
//! Nothing here is thread-safe. A host that needs concurrency should put the owner behind a single mutex.

pub mod data_model;

use crate::data_model::Timestamped;

pub trait AppState: Sized {
    type Event;

    fn apply_event(self, event: &Timestamped<Self::Event>) -> Self;
}
