//! Frame and batch envelope types
//!
//! Frames are the tagged binary message units delivered by the transport.
//! They arrive as members of a batch (one network read) and are transient:
//! created per read, dropped after dispatch.

use bytes::Bytes;

/// Namespace prefix carried by every canonical frame tag
pub const WEBCAST_PREFIX: &str = "Webcast";

/// One tagged binary message unit within a batch
///
/// Cheap to clone: the payload is reference-counted `Bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Logical message kind (e.g., "WebcastChatMessage")
    pub tag: String,
    /// Opaque payload, decoded by the registry's handler for `tag`
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame
    pub fn new(tag: impl Into<String>, payload: Bytes) -> Self {
        Self {
            tag: tag.into(),
            payload,
        }
    }

    /// Canonical form of this frame's tag
    pub fn canonical_tag(&self) -> String {
        canonical_tag(&self.tag)
    }
}

impl std::fmt::Display for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} bytes)", self.tag, self.payload.len())
    }
}

/// One network-level delivery: an ordered sequence of frames plus the raw
/// response payload they were extracted from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Batch {
    /// Frames in arrival order; order is significant through dispatch
    pub frames: Vec<Frame>,
    /// Raw batch payload as received from the transport
    pub raw: Bytes,
}

impl Batch {
    /// Create a new batch
    pub fn new(frames: Vec<Frame>, raw: Bytes) -> Self {
        Self { frames, raw }
    }

    /// Number of frames in this batch
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the batch carries no frames
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Canonicalize a frame tag by prepending the namespace prefix when absent
///
/// Tags differing only in the prefix are equivalent for registry lookup.
/// The check is a substring test, matching the upstream protocol's own
/// handling, so an already-namespaced tag is never double-prefixed.
pub fn canonical_tag(tag: &str) -> String {
    if tag.contains(WEBCAST_PREFIX) {
        tag.to_string()
    } else {
        format!("{}{}", WEBCAST_PREFIX, tag)
    }
}
