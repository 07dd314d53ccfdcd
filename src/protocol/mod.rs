//! Webcast protocol types
//!
//! This module provides:
//! - Frame and batch envelopes plus tag canonicalization
//! - The protobuf wire-format reader
//! - Typed message payloads for the stock mappings

pub mod frame;
pub mod messages;
pub mod wire;

pub use frame::{canonical_tag, Batch, Frame, WEBCAST_PREFIX};
pub use messages::WireMessage;
pub use wire::{WireField, WireReader, WireValue};
