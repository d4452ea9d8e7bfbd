//! # Listeners
//! A registry of callbacks keyed by `ListenerKey`. Notification is synchronous: `notify` returns once every listener has run.
//! Listeners only get a shared reference to the event, so they cannot reach back into the owner that is notifying them.

use crate::data_model::ListenerKey;

type Callback<E> = Box<dyn Fn(ListenerKey, &E)>;

pub struct Listeners<E> {
    listeners: slotmap::SlotMap<slotmap::DefaultKey, Callback<E>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            listeners: Default::default(),
        }
    }
}

impl<E> std::fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("registered", &self.listeners.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    pub fn register_listener(
        &mut self,
        listener: impl Fn(ListenerKey, &E) + 'static,
    ) -> ListenerKey {
        let key = self.listeners.insert(Box::new(listener));
        ListenerKey(key)
    }

    /// Returns false if the key was not registered (or was already removed).
    pub fn unregister_listener(&mut self, key: ListenerKey) -> bool {
        let removed = self.listeners.remove(key.0).is_some();
        if !removed {
            log::debug!("Tried to unregister a listener that is not registered: {key:?}");
        }
        removed
    }

    pub fn notify(&self, event: &E) {
        for (key, listener) in self.listeners.iter() {
            listener(ListenerKey(key), event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
