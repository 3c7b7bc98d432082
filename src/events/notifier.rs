//! Notification of transition listeners.

use crate::events::event::{Signal, TransitionEvent};
use std::fmt;
use std::sync::Arc;

/// Receives test, pre- and post-transition signals.
///
/// Listeners veto by calling [`TransitionEvent::reject`] during
/// [`Signal::TestTransition`] or [`Signal::PreTransition`].
pub trait EventNotifier<E>: Send + Sync {
    fn notify(&self, signal: Signal, event: &TransitionEvent<'_, E>);
}

type Listener<E> = Arc<dyn Fn(&TransitionEvent<'_, E>) + Send + Sync>;

enum Subscriber<E> {
    Listener(Signal, Listener<E>),
    Notifier(Arc<dyn EventNotifier<E>>),
}

/// A simple in-process notifier.
///
/// Subscribers are called in subscription order, synchronously, for every
/// signal they subscribed to. A rejection does not stop delivery to later
/// subscribers.
///
/// # Example
///
/// ```rust
/// use multistate::events::{EventDispatcher, Signal};
///
/// struct Invoice {
///     locked: bool,
/// }
///
/// let dispatcher = EventDispatcher::<Invoice>::new().on(Signal::PreTransition, |event| {
///     if event.entity().locked {
///         event.reject();
///     }
/// });
/// assert_eq!(dispatcher.len(), 1);
/// ```
pub struct EventDispatcher<E> {
    subscribers: Vec<Subscriber<E>>,
}

impl<E> EventDispatcher<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Subscribe a listener to one signal.
    pub fn on<F>(mut self, signal: Signal, listener: F) -> Self
    where
        F: Fn(&TransitionEvent<'_, E>) + Send + Sync + 'static,
    {
        self.subscribers
            .push(Subscriber::Listener(signal, Arc::new(listener)));
        self
    }

    /// Forward every signal to another notifier.
    pub fn attach(mut self, notifier: Arc<dyn EventNotifier<E>>) -> Self {
        self.subscribers.push(Subscriber::Notifier(notifier));
        self
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for EventDispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventDispatcher<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl<E> EventNotifier<E> for EventDispatcher<E> {
    fn notify(&self, signal: Signal, event: &TransitionEvent<'_, E>) {
        for subscriber in &self.subscribers {
            match subscriber {
                Subscriber::Listener(wanted, listener) if *wanted == signal => listener(event),
                Subscriber::Listener(..) => {}
                Subscriber::Notifier(notifier) => notifier.notify(signal, event),
            }
        }
    }
}
