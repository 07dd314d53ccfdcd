//! Live client
//!
//! The assembled client instance: an immutable registry + bus behind a
//! batch processor, plus the settings the transport layer reads. The
//! transport hands batches in either directly (`dispatch`) or through the
//! single-consumer pump (`run`), which serializes delivery so at most one
//! batch is in flight at a time.

use bytes::Bytes;
use tokio::sync::mpsc;

use crate::dispatch::{BatchProcessor, FrameRegistry};
use crate::protocol::frame::Batch;

pub mod builder;
pub mod settings;

pub use builder::LiveClientBuilder;
pub use settings::ClientSettings;

/// An assembled live client
///
/// Created through [`LiveClientBuilder`]; registry and subscribers are
/// fixed for the client's lifetime.
pub struct LiveClient {
    settings: ClientSettings,
    processor: BatchProcessor,
}

impl LiveClient {
    pub(crate) fn new(settings: ClientSettings, processor: BatchProcessor) -> Self {
        Self {
            settings,
            processor,
        }
    }

    /// The settings this client was built with
    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// The processor driving dispatch
    pub fn processor(&self) -> &BatchProcessor {
        &self.processor
    }

    /// The registry consulted per frame
    pub fn registry(&self) -> &FrameRegistry {
        self.processor.registry()
    }

    /// Dispatch one received batch; never fails
    pub fn dispatch(&self, batch: &Batch) {
        self.processor.process(batch);
    }

    /// Dispatch one already-extracted frame outside a batch context
    pub fn dispatch_single(&self, tag: impl Into<String>, payload: Bytes) {
        self.processor.process_single(tag, payload);
    }

    /// Drain a batch queue until the sending side closes
    ///
    /// Serializes delivery: one `dispatch` at a time, in queue order. The
    /// transport task owns the sender; dropping it ends the pump.
    pub async fn run(&self, mut batches: mpsc::Receiver<Batch>) {
        tracing::info!(host = %self.settings.host_name, "Dispatch pump started");

        while let Some(batch) = batches.recv().await {
            tracing::trace!(frames = batch.len(), "Batch received");
            self.processor.process(&batch);
        }

        tracing::info!(host = %self.settings.host_name, "Dispatch pump stopped");
    }
}
