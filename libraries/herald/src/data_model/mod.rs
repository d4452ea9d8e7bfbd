#[path = "1-timestamped.rs"]
mod timestamped;

#[path = "2-listeners.rs"]
mod listeners;

#[path = "3-event-log.rs"]
mod event_log;

pub use event_log::*;
pub use listeners::*;
pub use timestamped::*;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ListenerKey(pub(crate) slotmap::DefaultKey);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppState;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default, Debug, PartialEq)]
    struct Tally {
        sum: i32,
        last_seen_at: f64,
    }

    impl AppState for Tally {
        type Event = i32;

        fn apply_event(mut self, event: &Timestamped<i32>) -> Self {
            self.sum += event.event;
            self.last_seen_at = event.elapsed_secs;
            self
        }
    }

    #[test]
    fn test_listeners_called_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<i32> = Listeners::default();

        let first = seen.clone();
        listeners.register_listener(move |_, event| first.borrow_mut().push(("first", *event)));
        let second = seen.clone();
        listeners.register_listener(move |_, event| second.borrow_mut().push(("second", *event)));

        listeners.notify(&7);

        assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn test_unregistered_listener_is_not_called() {
        let count = Rc::new(RefCell::new(0));
        let mut listeners: Listeners<()> = Listeners::default();

        let counter = count.clone();
        let key = listeners.register_listener(move |_, _| *counter.borrow_mut() += 1);
        listeners.notify(&());
        assert!(listeners.unregister_listener(key));
        listeners.notify(&());

        assert_eq!(*count.borrow(), 1);
        assert!(listeners.is_empty());
        // a second unregister is harmless
        assert!(!listeners.unregister_listener(key));
    }

    #[test]
    fn test_listener_receives_its_own_key() {
        let keys = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<u8> = Listeners::default();

        let sink = keys.clone();
        let key = listeners.register_listener(move |key, _| sink.borrow_mut().push(key));
        listeners.notify(&0);

        assert_eq!(*keys.borrow(), vec![key]);
    }

    #[test]
    fn test_event_log_indexes_are_sequential() {
        let mut log = EventLog::default();
        log.push(0.5, "a");
        log.push(1.0, "b");
        log.push(1.0, "c");

        let indexes: Vec<usize> = log.iter().map(|e| e.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(log.last().map(|e| e.event), Some("c"));
    }

    #[test]
    fn test_event_log_folds_into_state() {
        let mut log = EventLog::default();
        log.push(1.0, 3);
        log.push(2.5, -1);
        log.push(4.0, 10);

        let tally = log.state(Tally::default());
        assert_eq!(
            tally,
            Tally {
                sum: 12,
                last_seen_at: 4.0
            }
        );
    }

    #[test]
    fn test_cleared_log_starts_over() {
        let mut log = EventLog::default();
        log.push(1.0, 1);
        log.clear();
        let entry = log.push(2.0, 2);

        assert_eq!(entry.index, 0);
        assert_eq!(log.len(), 1);
    }
}
