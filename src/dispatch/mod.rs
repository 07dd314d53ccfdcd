//! Decode-and-dispatch pipeline
//!
//! This module provides:
//! - The frame registry (tag → decode function)
//! - The event bus (ordered pub/sub fan-out)
//! - The batch processor (fault-isolated dispatch loop)
//!
//! # Architecture
//!
//! ```text
//! Transport ──batch──► BatchProcessor
//!                          │ per frame, in order
//!                          ▼
//!                     FrameRegistry ──decode──► Event
//!                          │
//!                          ▼
//!                      EventBus ──fan-out──► subscriber callbacks
//! ```
//!
//! Registry and bus are populated during client assembly and read-only
//! afterwards; the processor holds no state between batches.

pub mod bus;
pub mod processor;
pub mod registry;

pub use bus::{Callback, EventBus};
pub use processor::BatchProcessor;
pub use registry::{DecodeFn, FrameRegistry};
