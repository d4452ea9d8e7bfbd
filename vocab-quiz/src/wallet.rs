use herald::data_model::{ListenerKey, Listeners};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceChanged {
    pub previous: u32,
    pub current: u32,
}

/// The quiz economy: power earned by answering, spent elsewhere by the host.
#[derive(Debug)]
pub struct Wallet {
    balance: u32,
    initial: u32,
    cap: Option<u32>,
    listeners: Listeners<BalanceChanged>,
}

impl Default for Wallet {
    fn default() -> Self {
        Wallet::new(100, None)
    }
}

impl Wallet {
    /// A cap of zero means no cap.
    pub fn new(initial: u32, cap: Option<u32>) -> Self {
        let cap = cap.filter(|cap| *cap > 0);
        let initial = cap.map_or(initial, |cap| initial.min(cap));
        Self {
            balance: initial,
            initial,
            cap,
            listeners: Listeners::default(),
        }
    }

    pub fn balance(&self) -> u32 {
        self.balance
    }

    pub fn cap(&self) -> Option<u32> {
        self.cap
    }

    pub fn add(&mut self, amount: u32) -> u32 {
        if amount == 0 {
            return self.balance;
        }
        self.update(self.balance.saturating_add(amount));
        self.balance
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.balance >= amount
    }

    pub fn try_spend(&mut self, amount: u32) -> bool {
        if !self.can_afford(amount) {
            log::debug!("Cannot spend {amount}, balance is {}", self.balance);
            return false;
        }
        self.update(self.balance - amount);
        true
    }

    pub fn set(&mut self, amount: u32) {
        self.update(amount);
    }

    pub fn reset(&mut self) {
        self.update(self.initial);
    }

    pub fn subscribe(&mut self, listener: impl Fn(BalanceChanged) + 'static) -> ListenerKey {
        self.listeners
            .register_listener(move |_, change| listener(*change))
    }

    pub fn unsubscribe(&mut self, key: ListenerKey) -> bool {
        self.listeners.unregister_listener(key)
    }

    fn update(&mut self, amount: u32) {
        let amount = self.cap.map_or(amount, |cap| amount.min(cap));
        let previous = self.balance;
        if amount == previous {
            return;
        }
        self.balance = amount;
        self.listeners.notify(&BalanceChanged {
            previous,
            current: amount,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_add_respects_cap() {
        let mut wallet = Wallet::new(100, Some(150));
        assert_eq!(wallet.add(30), 130);
        assert_eq!(wallet.add(30), 150);
        assert_eq!(wallet.add(0), 150);
    }

    #[test]
    fn test_initial_is_capped() {
        let wallet = Wallet::new(500, Some(200));
        assert_eq!(wallet.balance(), 200);
    }

    #[test]
    fn test_zero_cap_is_no_cap() {
        let mut wallet = Wallet::new(100, Some(0));
        assert_eq!(wallet.cap(), None);
        assert_eq!(wallet.balance(), 100);
        assert_eq!(wallet.add(50), 150);
    }

    #[test]
    fn test_spending() {
        let mut wallet = Wallet::default();
        assert!(wallet.can_afford(100));
        assert!(!wallet.try_spend(101));
        assert_eq!(wallet.balance(), 100);
        assert!(wallet.try_spend(60));
        assert_eq!(wallet.balance(), 40);
    }

    #[test]
    fn test_set_and_reset() {
        let mut wallet = Wallet::new(100, Some(300));
        wallet.set(1000);
        assert_eq!(wallet.balance(), 300);
        wallet.reset();
        assert_eq!(wallet.balance(), 100);
    }

    #[test]
    fn test_subscribers_see_changes_only() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut wallet = Wallet::new(10, None);
        let sink = changes.clone();
        let key = wallet.subscribe(move |change| sink.borrow_mut().push(change));

        wallet.add(5);
        wallet.add(0);
        wallet.set(15);
        assert!(wallet.try_spend(15));
        assert!(wallet.unsubscribe(key));
        wallet.add(1);

        assert_eq!(
            *changes.borrow(),
            vec![
                BalanceChanged {
                    previous: 10,
                    current: 15
                },
                BalanceChanged {
                    previous: 15,
                    current: 0
                },
            ]
        );
    }
}
