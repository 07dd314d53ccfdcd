//! Event bus
//!
//! Ordered pub/sub fan-out. Subscriber lists are built during client
//! assembly and read-only during dispatch, so `publish` takes `&self` and
//! needs no locking. Callbacks run synchronously, in insertion order,
//! concrete-variant subscribers before universal ones.

use std::collections::HashMap;

use crate::error::Result;
use crate::event::{Event, EventKind, Selector};

/// Subscriber callback invoked for each matching published event
///
/// Returning `Err` aborts the remaining callbacks for that one event and
/// propagates to the publisher's caller; it does not affect other events.
pub type Callback = Box<dyn Fn(&Event) -> Result<()> + Send + Sync>;

/// Fan-out engine: selector → ordered subscriber list
#[derive(Default)]
pub struct EventBus {
    by_kind: HashMap<EventKind, Vec<Callback>>,
    universal: Vec<Callback>,
}

impl EventBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a callback to the list for `selector`
    ///
    /// No de-duplication: subscribing the same callback twice invokes it
    /// twice per matching event.
    pub fn subscribe<F>(&mut self, selector: Selector, callback: F)
    where
        F: Fn(&Event) -> Result<()> + Send + Sync + 'static,
    {
        match selector {
            Selector::Kind(kind) => {
                self.by_kind.entry(kind).or_default().push(Box::new(callback));
            }
            Selector::Any => self.universal.push(Box::new(callback)),
        }
    }

    /// Invoke every subscriber matching `event`, in order
    ///
    /// Concrete-variant subscribers first, then universal subscribers, each
    /// list in insertion order. Zero matching subscribers is a silent no-op.
    /// The first callback `Err` stops the remaining callbacks for this event
    /// and is returned to the caller.
    pub fn publish(&self, event: &Event) -> Result<()> {
        let kind = event.kind();
        tracing::trace!(kind = ?kind, "Publishing event");

        if let Some(callbacks) = self.by_kind.get(&kind) {
            for callback in callbacks {
                callback(event)?;
            }
        }
        for callback in &self.universal {
            callback(event)?;
        }

        Ok(())
    }

    /// Number of subscribers matching `selector`
    pub fn subscriber_count(&self, selector: Selector) -> usize {
        match selector {
            Selector::Kind(kind) => self.by_kind.get(&kind).map_or(0, Vec::len),
            Selector::Any => self.universal.len(),
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("kinds", &self.by_kind.len())
            .field("universal", &self.universal.len())
            .finish()
    }
}
