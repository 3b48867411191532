use std::fmt;

use crate::CollectionState;

/// The two observable fields of a collection store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// The loaded sequence changed (append or removal).
    Creatures,
    /// The favourites set changed.
    Favourites,
}

/// Handle returned by `subscribe`; pass it to `unsubscribe` to stop notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subscription(u64);

type Callback = Box<dyn FnMut(&CollectionState) + Send>;

struct Observer {
    subscription: Subscription,
    topic: Topic,
    callback: Callback,
}

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<Observer>,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, topic: Topic, callback: Callback) -> Subscription {
        self.next_id += 1;
        let subscription = Subscription(self.next_id);
        self.entries.push(Observer {
            subscription,
            topic,
            callback,
        });
        subscription
    }

    pub(crate) fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|observer| observer.subscription != subscription);
        self.entries.len() != before
    }

    /// Delivers `state` to every observer of `topic`, in subscription order.
    pub(crate) fn notify(&mut self, topic: Topic, state: &CollectionState) {
        for observer in self.entries.iter_mut().filter(|o| o.topic == topic) {
            (observer.callback)(state);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
