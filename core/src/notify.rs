use core::fmt;

use crate::*;

/// Callback receiving the id and new state of a changed shape.
pub type ShapeObserver = Box<dyn FnMut(ShapeId, &ShapeState)>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u32);

/// Subscription held by a single shape.
pub enum Subscriber {
    /// Forwards the change to every grid level observer.
    Grid,
    Callback(ShapeObserver),
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grid => f.write_str("Grid"),
            Self::Callback(_) => f.write_str("Callback"),
        }
    }
}

/// Ordered list of subscribers with stable ids.
pub struct Notifier<S> {
    next_id: u32,
    subscribers: Vec<(SubscriptionId, S)>,
}

impl<S> Default for Notifier<S> {
    fn default() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }
}

impl<S> fmt::Debug for Notifier<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<S> Notifier<S> {
    pub fn subscribe(&mut self, subscriber: S) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn unsubscribe_all(&mut self) {
        self.subscribers.clear();
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.subscribers.iter_mut().map(|(_, subscriber)| subscriber)
    }
}
