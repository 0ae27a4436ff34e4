//! Typed publish/subscribe channels.
//!
//! Each widget exposes one `EventChannel<T>` per event kind. Subscribers are
//! plain closures; `emit` calls them in subscription order. A subscriber must
//! not reach back into the widget that is emitting: the strip, for instance,
//! only queues handle events from its callbacks and processes them once the
//! emitting call has returned.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback<T> = Box<dyn FnMut(&T)>;

pub struct EventChannel<T> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Callback<T>)>,
}

impl<T> Default for EventChannel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventChannel<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<T> EventChannel<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&T) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a subscriber. Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    pub fn emit(&mut self, value: &T) {
        for (_, callback) in &mut self.subscribers {
            callback(value);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_every_subscriber_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut channel = EventChannel::<u32>::new();
        let a = seen.clone();
        channel.subscribe(move |v| a.borrow_mut().push(("a", *v)));
        let b = seen.clone();
        channel.subscribe(move |v| b.borrow_mut().push(("b", *v)));
        channel.emit(&5);
        assert_eq!(*seen.borrow(), vec![("a", 5), ("b", 5)]);
    }

    #[test]
    fn unsubscribed_callbacks_stop_firing() {
        let count = Rc::new(RefCell::new(0));
        let mut channel = EventChannel::<()>::new();
        let c = count.clone();
        let id = channel.subscribe(move |_| *c.borrow_mut() += 1);
        channel.emit(&());
        assert!(channel.unsubscribe(id));
        assert!(!channel.unsubscribe(id));
        channel.emit(&());
        assert_eq!(*count.borrow(), 1);
        assert!(channel.is_empty());
    }
}
