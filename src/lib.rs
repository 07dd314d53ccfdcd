//! Webcast live-streaming client library
//!
//! Decodes the tagged binary frames a webcast connection delivers and fans
//! the resulting events out to subscribers:
//!
//! - `protocol` — frame/batch envelopes, tag canonicalization, wire codec
//! - `event` — the closed event union and subscription selectors
//! - `dispatch` — frame registry, event bus, fault-isolated batch processor
//! - `client` — fluent assembly and the batch pump
//!
//! The transport session itself (connection bootstrap, reconnects, outer
//! framing) is a collaborator, not part of this crate: it feeds batches to
//! [`client::LiveClient::dispatch`] or through an `mpsc` queue into
//! [`client::LiveClient::run`]. Dispatch never fails — malformed frames,
//! unmapped tags, and failing subscribers all surface as published events,
//! so the transport loop can keep reading the connection.
//!
//! # Example
//! ```no_run
//! use webcast_rs::client::LiveClientBuilder;
//!
//! # fn main() -> webcast_rs::error::Result<()> {
//! let client = LiveClientBuilder::new("some_streamer")
//!     .on_chat(|msg| {
//!         println!("{}: {}", msg.user.nickname, msg.comment);
//!         Ok(())
//!     })
//!     .on_error(|failure| {
//!         eprintln!("frame {} failed: {}", failure.frame.tag, failure.cause);
//!         Ok(())
//!     })
//!     .build()?;
//! # let _ = client;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod protocol;

pub use client::{ClientSettings, LiveClient, LiveClientBuilder};
pub use dispatch::{BatchProcessor, EventBus, FrameRegistry};
pub use error::{Error, Result};
pub use event::{DecodeFailure, Event, EventKind, Selector};
pub use protocol::{Batch, Frame};
