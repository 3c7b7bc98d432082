//! Transition events and lifecycle notification.
//!
//! - [`TransitionEvent`]: what callbacks and listeners receive
//! - [`Signal`]: test, pre- and post-transition
//! - [`EventNotifier`]: the listener capability a machine may be given
//! - [`EventDispatcher`] and [`HistoryRecorder`]: ready-made notifiers

mod event;
mod notifier;
mod recorder;

pub use event::{Signal, TransitionEvent};
pub use notifier::{EventDispatcher, EventNotifier};
pub use recorder::HistoryRecorder;
