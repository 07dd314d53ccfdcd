//! Batch processor
//!
//! Drives the registry and bus over an incoming batch. The one hard
//! guarantee here: `process` never fails, whatever the input. A malformed
//! frame, an unmapped tag, or a misbehaving subscriber is converted into a
//! published event at that frame's boundary and processing moves on, so the
//! transport loop can keep reading the connection indefinitely.

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::event::{DecodeFailure, Event};
use crate::protocol::frame::{Batch, Frame};

use super::bus::EventBus;
use super::registry::FrameRegistry;

/// Decode-and-dispatch driver; stateless across calls
#[derive(Debug)]
pub struct BatchProcessor {
    registry: FrameRegistry,
    bus: EventBus,
}

impl BatchProcessor {
    /// Create a processor over an assembled registry and bus
    pub fn new(registry: FrameRegistry, bus: EventBus) -> Self {
        Self { registry, bus }
    }

    /// The registry consulted per frame
    pub fn registry(&self) -> &FrameRegistry {
        &self.registry
    }

    /// The bus events are published through
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Process one batch: announce it, then dispatch each frame in order
    ///
    /// Publishes `BatchObserved` first, unconditionally. Each frame is then
    /// dispatched inside its own fault boundary: any failure becomes a
    /// published `DecodeFailure` carrying the frame, the batch, and the
    /// cause. Never returns an error and never panics on any input.
    pub fn process(&self, batch: &Batch) {
        if let Err(e) = self.bus.publish(&Event::BatchObserved(batch.clone())) {
            tracing::warn!(error = %e, "Batch observer failed");
        }

        for frame in &batch.frames {
            if let Err(cause) = self.dispatch_frame(frame) {
                self.report_failure(frame, Some(batch), cause);
            }
        }
    }

    /// Process one already-extracted frame outside a batch context
    ///
    /// Publishes `FrameObserved` in place of the batch event, then runs the
    /// same per-frame dispatch logic. A resulting `DecodeFailure` carries no
    /// batch. Like `process`, never returns an error.
    pub fn process_single(&self, tag: impl Into<String>, payload: Bytes) {
        let frame = Frame::new(tag, payload);

        if let Err(e) = self.bus.publish(&Event::FrameObserved(frame.clone())) {
            tracing::warn!(error = %e, "Frame observer failed");
        }

        if let Err(cause) = self.dispatch_frame(&frame) {
            self.report_failure(&frame, None, cause);
        }
    }

    /// One frame's dispatch: canonicalize, look up, decode, publish
    ///
    /// Any `Err` out of here is caught by the caller at the frame boundary.
    /// A failing subscriber for the decoded event surfaces the same way as a
    /// failing decoder.
    fn dispatch_frame(&self, frame: &Frame) -> Result<()> {
        let tag = frame.canonical_tag();

        let decode = match self.registry.lookup(&tag) {
            Some(decode) => decode,
            None => {
                tracing::debug!(tag = %tag, "No handler for frame");
                return self.bus.publish(&Event::UnhandledFrame(frame.clone()));
            }
        };

        let event = decode(&frame.payload)?;
        self.bus.publish(&event)
    }

    /// Convert a per-frame failure into a published `DecodeFailure`
    fn report_failure(&self, frame: &Frame, batch: Option<&Batch>, cause: Error) {
        tracing::debug!(tag = %frame.tag, error = %cause, "Frame dispatch failed");

        let event = Event::DecodeFailure(DecodeFailure {
            frame: frame.clone(),
            batch: batch.cloned(),
            cause,
        });

        if let Err(e) = self.bus.publish(&event) {
            tracing::warn!(tag = %frame.tag, error = %e, "Failure subscriber failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::Error;
    use crate::event::{EventKind, Selector};
    use crate::protocol::messages::ChatMessage;

    /// Bus that records the kind of every published event
    fn recording_bus() -> (EventBus, Arc<Mutex<Vec<EventKind>>>) {
        let mut bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        bus.subscribe(Selector::Any, move |event| {
            seen_clone.lock().unwrap().push(event.kind());
            Ok(())
        });
        (bus, seen)
    }

    fn chat_registry() -> FrameRegistry {
        let mut registry = FrameRegistry::new();
        registry.register("WebcastChatMessage", |_payload| {
            Ok(Event::Chat(ChatMessage::default()))
        });
        registry
    }

    #[test]
    fn test_batch_observed_published_first() {
        let (bus, seen) = recording_bus();
        let processor = BatchProcessor::new(chat_registry(), bus);

        let batch = Batch::new(
            vec![Frame::new("ChatMessage", Bytes::new())],
            Bytes::from_static(b"raw"),
        );
        processor.process(&batch);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventKind::BatchObserved, EventKind::Chat]
        );
    }

    #[test]
    fn test_unknown_tag_publishes_unhandled() {
        let (bus, seen) = recording_bus();
        let processor = BatchProcessor::new(FrameRegistry::new(), bus);

        let batch = Batch::new(vec![Frame::new("Mystery", Bytes::new())], Bytes::new());
        processor.process(&batch);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventKind::BatchObserved, EventKind::UnhandledFrame]
        );
    }

    #[test]
    fn test_failed_decode_becomes_decode_failure() {
        let (bus, seen) = recording_bus();
        let mut registry = FrameRegistry::new();
        registry.register("WebcastBadMessage", |_payload| {
            Err(Error::Mapping {
                tag: "WebcastBadMessage".into(),
                reason: "test".into(),
            })
        });
        let processor = BatchProcessor::new(registry, bus);

        let batch = Batch::new(vec![Frame::new("BadMessage", Bytes::new())], Bytes::new());
        processor.process(&batch);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventKind::BatchObserved, EventKind::DecodeFailure]
        );
    }

    #[test]
    fn test_decode_failure_carries_frame_and_batch() {
        let mut bus = EventBus::new();
        let captured = Arc::new(Mutex::new(None));
        let captured_clone = Arc::clone(&captured);
        bus.subscribe(Selector::Kind(EventKind::DecodeFailure), move |event| {
            if let Event::DecodeFailure(failure) = event {
                *captured_clone.lock().unwrap() = Some(failure.clone());
            }
            Ok(())
        });

        let mut registry = FrameRegistry::new();
        registry.register("WebcastBadMessage", |_payload| {
            Err(Error::Mapping {
                tag: "WebcastBadMessage".into(),
                reason: "test".into(),
            })
        });
        let processor = BatchProcessor::new(registry, bus);

        let batch = Batch::new(
            vec![Frame::new("BadMessage", Bytes::from_static(b"xyz"))],
            Bytes::from_static(b"raw"),
        );
        processor.process(&batch);

        let failure = captured.lock().unwrap().clone().unwrap();
        assert_eq!(failure.frame.tag, "BadMessage");
        assert_eq!(failure.batch.as_ref().unwrap().raw, Bytes::from_static(b"raw"));
        assert!(matches!(failure.cause, Error::Mapping { .. }));
    }

    #[test]
    fn test_process_single_publishes_frame_observed() {
        let (bus, seen) = recording_bus();
        let processor = BatchProcessor::new(chat_registry(), bus);

        processor.process_single("ChatMessage", Bytes::new());

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EventKind::FrameObserved, EventKind::Chat]
        );
    }

    #[test]
    fn test_process_single_failure_has_no_batch() {
        let mut bus = EventBus::new();
        let captured = Arc::new(Mutex::new(None));
        let captured_clone = Arc::clone(&captured);
        bus.subscribe(Selector::Kind(EventKind::DecodeFailure), move |event| {
            if let Event::DecodeFailure(failure) = event {
                *captured_clone.lock().unwrap() = Some(failure.clone());
            }
            Ok(())
        });

        let mut registry = FrameRegistry::new();
        registry.register("WebcastBadMessage", |_payload| {
            Err(Error::Subscriber("nope".into()))
        });
        let processor = BatchProcessor::new(registry, bus);

        processor.process_single("BadMessage", Bytes::new());

        let failure = captured.lock().unwrap().clone().unwrap();
        assert!(failure.batch.is_none());
    }

    #[test]
    fn test_batch_observer_failure_does_not_abort_frames() {
        let mut bus = EventBus::new();
        bus.subscribe(Selector::Kind(EventKind::BatchObserved), |_event| {
            Err(Error::Subscriber("batch observer boom".into()))
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        bus.subscribe(Selector::Kind(EventKind::Chat), move |event| {
            seen_clone.lock().unwrap().push(event.kind());
            Ok(())
        });

        let processor = BatchProcessor::new(chat_registry(), bus);
        let batch = Batch::new(vec![Frame::new("ChatMessage", Bytes::new())], Bytes::new());
        processor.process(&batch);

        assert_eq!(*seen.lock().unwrap(), vec![EventKind::Chat]);
    }
}
