//! Frame registry
//!
//! Maps canonical frame tags to decode functions. Populated once during
//! client assembly and read-only afterwards; the dispatch path only calls
//! `lookup`.

use std::collections::HashMap;

use bytes::Bytes;

use crate::error::{Error, Result};
use crate::event::Event;
use crate::protocol::frame::canonical_tag;
use crate::protocol::messages::WireMessage;

/// Decode function: frame payload to event
pub type DecodeFn = Box<dyn Fn(&Bytes) -> Result<Event> + Send + Sync>;

/// Tag → decoder table consulted once per frame
#[derive(Default)]
pub struct FrameRegistry {
    handlers: HashMap<String, DecodeFn>,
}

impl FrameRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-loaded with the stock message mappings
    pub fn with_default_mappings() -> Self {
        let mut registry = Self::new();
        registry.install_default_mappings();
        registry
    }

    /// Install or replace the handler for a tag
    ///
    /// The tag is canonicalized first, so `"ChatMessage"` and
    /// `"WebcastChatMessage"` address the same entry. Registering twice
    /// under one tag keeps the later handler.
    pub fn register<F>(&mut self, tag: impl Into<String>, decode: F)
    where
        F: Fn(&Bytes) -> Result<Event> + Send + Sync + 'static,
    {
        let tag = canonical_tag(&tag.into());
        tracing::debug!(tag = %tag, "Handler registered");
        self.handlers.insert(tag, Box::new(decode));
    }

    /// Declare a mapping from a typed wire message to an event
    ///
    /// Synthesizes the decode function: parse the payload as `M`, then build
    /// the event with `map`. A parse failure surfaces as `Error::Mapping`
    /// naming the tag. This keeps each message kind a one-line table entry.
    pub fn register_message<M, F>(&mut self, tag: impl Into<String>, map: F)
    where
        M: WireMessage,
        F: Fn(M) -> Event + Send + Sync + 'static,
    {
        let tag = canonical_tag(&tag.into());
        let error_tag = tag.clone();
        self.register(tag, move |payload: &Bytes| {
            let message = M::decode(payload).map_err(|e| Error::Mapping {
                tag: error_tag.clone(),
                reason: e.to_string(),
            })?;
            Ok(map(message))
        });
    }

    /// Look up the handler for a tag, canonicalizing first
    pub fn lookup(&self, tag: &str) -> Option<&DecodeFn> {
        self.handlers.get(&canonical_tag(tag))
    }

    /// Move every handler from `other` into this registry
    ///
    /// Entries from `other` replace existing ones under the same tag.
    pub fn merge(&mut self, other: FrameRegistry) {
        self.handlers.extend(other.handlers);
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Stock tag table, one line per message kind
    fn install_default_mappings(&mut self) {
        self.register_message("WebcastChatMessage", Event::Chat);
        self.register_message("WebcastGiftMessage", Event::Gift);
        self.register_message("WebcastLikeMessage", Event::Like);
        self.register_message("WebcastMemberMessage", Event::Join);
        self.register_message("WebcastSocialMessage", Event::Social);
        self.register_message("WebcastRoomUserSeqMessage", Event::ViewerCount);
        self.register_message("WebcastControlMessage", Event::Control);
        self.register_message("WebcastSubNotifyMessage", Event::Subscribe);
        self.register_message("WebcastEmoteChatMessage", Event::Emote);
        self.register_message("WebcastQuestionNewMessage", Event::Question);
        self.register_message("WebcastPollMessage", Event::Poll);
        self.register_message("WebcastRoomPinMessage", Event::RoomPin);
        self.register_message("WebcastBarrageMessage", Event::Barrage);
        self.register_message("WebcastEnvelopeMessage", Event::Envelope);
        self.register_message("WebcastCaptionMessage", Event::Caption);
        self.register_message("WebcastGoalUpdateMessage", Event::GoalUpdate);
        self.register_message("WebcastLinkMicBattle", Event::LinkMicBattle);
        self.register_message("WebcastRoomMessage", Event::RoomText);
    }
}

impl std::fmt::Debug for FrameRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameRegistry")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
