//! Client-visible events
//!
//! Everything the client observes is published as one of these variants,
//! including the infrastructure conditions (`BatchObserved`, `FrameObserved`,
//! `UnhandledFrame`, `DecodeFailure`). Consumers select events by
//! `EventKind`, or subscribe to everything with `Selector::Any`.

use crate::error::Error;
use crate::protocol::frame::{Batch, Frame};
use crate::protocol::messages::{
    BarrageMessage, CaptionMessage, ChatMessage, ControlMessage, EmoteChatMessage,
    EnvelopeMessage, GiftMessage, GoalUpdateMessage, LikeMessage, LinkMicBattleMessage,
    MemberMessage, PollMessage, QuestionNewMessage, RoomMessage, RoomPinMessage,
    RoomUserSeqMessage, SocialMessage, SubscribeMessage,
};

/// A frame that decoded but could not be dispatched, or failed to decode
///
/// Carries the offending frame, the owning batch (when dispatch was
/// batch-driven), and the underlying cause. A failing subscriber during the
/// frame's dispatch surfaces here too, indistinguishable from a failing
/// decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeFailure {
    /// The frame whose dispatch failed
    pub frame: Frame,
    /// The batch the frame arrived in; `None` for single-frame dispatch
    pub batch: Option<Batch>,
    /// The underlying failure
    pub cause: Error,
}

/// Every event the client can publish
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    // Infrastructure
    /// A batch arrived; published before any of its frames are processed
    BatchObserved(Batch),
    /// A single frame arrived outside a batch context
    FrameObserved(Frame),
    /// No handler is registered for the frame's canonical tag
    UnhandledFrame(Frame),
    /// A frame's decode or dispatch failed
    DecodeFailure(DecodeFailure),

    // Domain
    /// Chat comment
    Chat(ChatMessage),
    /// Gift sent to the host
    Gift(GiftMessage),
    /// Likes from a viewer
    Like(LikeMessage),
    /// Viewer joined the room
    Join(MemberMessage),
    /// Follow or share
    Social(SocialMessage),
    /// Viewer-count update
    ViewerCount(RoomUserSeqMessage),
    /// Stream lifecycle control
    Control(ControlMessage),
    /// Viewer subscribed
    Subscribe(SubscribeMessage),
    /// Subscriber emote
    Emote(EmoteChatMessage),
    /// Q&A question
    Question(QuestionNewMessage),
    /// Poll update
    Poll(PollMessage),
    /// Pinned comment
    RoomPin(RoomPinMessage),
    /// Announcement banner
    Barrage(BarrageMessage),
    /// Treasure-chest envelope
    Envelope(EnvelopeMessage),
    /// Live caption
    Caption(CaptionMessage),
    /// Goal progress
    GoalUpdate(GoalUpdateMessage),
    /// Link-mic battle state
    LinkMicBattle(LinkMicBattleMessage),
    /// System room text
    RoomText(RoomMessage),
}

impl Event {
    /// The tag identifying this event's concrete variant
    pub fn kind(&self) -> EventKind {
        match self {
            Event::BatchObserved(_) => EventKind::BatchObserved,
            Event::FrameObserved(_) => EventKind::FrameObserved,
            Event::UnhandledFrame(_) => EventKind::UnhandledFrame,
            Event::DecodeFailure(_) => EventKind::DecodeFailure,
            Event::Chat(_) => EventKind::Chat,
            Event::Gift(_) => EventKind::Gift,
            Event::Like(_) => EventKind::Like,
            Event::Join(_) => EventKind::Join,
            Event::Social(_) => EventKind::Social,
            Event::ViewerCount(_) => EventKind::ViewerCount,
            Event::Control(_) => EventKind::Control,
            Event::Subscribe(_) => EventKind::Subscribe,
            Event::Emote(_) => EventKind::Emote,
            Event::Question(_) => EventKind::Question,
            Event::Poll(_) => EventKind::Poll,
            Event::RoomPin(_) => EventKind::RoomPin,
            Event::Barrage(_) => EventKind::Barrage,
            Event::Envelope(_) => EventKind::Envelope,
            Event::Caption(_) => EventKind::Caption,
            Event::GoalUpdate(_) => EventKind::GoalUpdate,
            Event::LinkMicBattle(_) => EventKind::LinkMicBattle,
            Event::RoomText(_) => EventKind::RoomText,
        }
    }
}

/// Fieldless tag for each `Event` variant, used as the subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    BatchObserved,
    FrameObserved,
    UnhandledFrame,
    DecodeFailure,
    Chat,
    Gift,
    Like,
    Join,
    Social,
    ViewerCount,
    Control,
    Subscribe,
    Emote,
    Question,
    Poll,
    RoomPin,
    Barrage,
    Envelope,
    Caption,
    GoalUpdate,
    LinkMicBattle,
    RoomText,
}

/// Subscription selector: one concrete variant, or every event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    /// Match one concrete event variant
    Kind(EventKind),
    /// Match every published event
    Any,
}

impl From<EventKind> for Selector {
    fn from(kind: EventKind) -> Self {
        Selector::Kind(kind)
    }
}
