//! Change notification fan-out shared by the store implementations.

use futures::channel::mpsc::UnboundedSender;
use std::cell::{Cell, RefCell};

/// What happened to a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// A single row change on a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationChange {
    pub table: String,
    pub kind: ChangeKind,
    pub id: String,
}

pub type ChangeSender = UnboundedSender<StationChange>;

/// Identifies a subscription for `StationStore::unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(pub u64);

struct Subscriber {
    handle: SubscriptionHandle,
    table: String,
    sender: ChangeSender,
}

/// Registry of subscribers for a single-threaded store.
#[derive(Default)]
pub struct Subscribers {
    next: Cell<u64>,
    entries: RefCell<Vec<Subscriber>>,
}

impl Subscribers {
    pub fn add(&self, table: &str, sender: ChangeSender) -> SubscriptionHandle {
        let handle = SubscriptionHandle(self.next.get());
        self.next.set(handle.0 + 1);
        self.entries.borrow_mut().push(Subscriber {
            handle,
            table: table.to_string(),
            sender,
        });
        handle
    }

    pub fn remove(&self, handle: SubscriptionHandle) {
        self.entries.borrow_mut().retain(|s| s.handle != handle);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `change` to every subscriber of its table, dropping closed channels.
    pub fn notify(&self, change: StationChange) {
        self.entries.borrow_mut().retain(|s| {
            if s.table != change.table {
                return true;
            }
            match s.sender.unbounded_send(change.clone()) {
                Ok(()) => true,
                Err(_) => {
                    log::debug!("dropping closed subscription {:?}", s.handle);
                    false
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::mpsc::unbounded;

    fn change(table: &str) -> StationChange {
        StationChange {
            table: table.to_string(),
            kind: ChangeKind::Update,
            id: "a".to_string(),
        }
    }

    #[test]
    fn notifies_matching_table_only() {
        let subs = Subscribers::default();
        let (tx_points, mut rx_points) = unbounded();
        let (tx_other, mut rx_other) = unbounded();
        subs.add("feeding_points", tx_points);
        subs.add("profiles", tx_other);

        subs.notify(change("feeding_points"));
        assert_eq!(rx_points.try_next().unwrap(), Some(change("feeding_points")));
        assert!(rx_other.try_next().is_err(), "other table must stay quiet");
    }

    #[test]
    fn removed_and_closed_subscribers_stop_receiving() {
        let subs = Subscribers::default();
        let (tx_a, mut rx_a) = unbounded();
        let (tx_b, rx_b) = unbounded();
        let a = subs.add("feeding_points", tx_a);
        subs.add("feeding_points", tx_b);
        assert_ne!(a, SubscriptionHandle(1));

        subs.remove(a);
        drop(rx_b);
        subs.notify(change("feeding_points"));
        assert!(subs.is_empty());
        // sender was dropped with the entry, so the stream is finished
        assert_eq!(rx_a.try_next().unwrap(), None);
    }
}
