//! Typed webcast message payloads
//!
//! One struct per wire message kind the stock registry maps. Each decodes
//! itself from its frame payload via the `wire` reader; unknown fields are
//! skipped so newer server payloads still decode.

use bytes::Bytes;

use crate::error::WireError;

use super::wire::WireReader;

/// A message that can decode itself from a frame payload
pub trait WireMessage: Sized {
    /// Decode from the raw payload bytes
    fn decode(payload: &Bytes) -> Result<Self, WireError>;
}

/// The user a message originates from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Numeric user id
    pub id: u64,
    /// Display name
    pub nickname: String,
    /// Unique handle (login name)
    pub unique_id: String,
}

impl WireMessage for User {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut user = User::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => user.id = field.value.as_u64(),
                2 => user.nickname = field.value.as_string()?,
                3 => user.unique_id = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(user)
    }
}

/// A chat comment posted to the room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatMessage {
    pub user: User,
    pub comment: String,
}

impl WireMessage for ChatMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = ChatMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.comment = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// A gift sent to the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GiftMessage {
    pub user: User,
    /// Gift catalogue id
    pub gift_id: u64,
    /// Current combo count
    pub repeat_count: u64,
    /// Whether the combo has finished
    pub repeat_end: bool,
}

impl WireMessage for GiftMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = GiftMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.gift_id = field.value.as_u64(),
                3 => msg.repeat_count = field.value.as_u64(),
                4 => msg.repeat_end = field.value.as_bool(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Likes sent by a viewer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LikeMessage {
    pub user: User,
    /// Likes in this message
    pub count: u64,
    /// Room like total
    pub total: u64,
}

impl WireMessage for LikeMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = LikeMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.count = field.value.as_u64(),
                3 => msg.total = field.value.as_u64(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// A viewer joining the room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberMessage {
    pub user: User,
    /// Raw action code from the server
    pub action: u64,
}

impl WireMessage for MemberMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = MemberMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.action = field.value.as_u64(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Social interaction (follow / share)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocialMessage {
    pub user: User,
    /// Server display-type string; distinguishes follow from share
    pub display_type: String,
}

impl SocialMessage {
    /// Which social action this message represents
    pub fn action(&self) -> SocialAction {
        if self.display_type.contains("follow") {
            SocialAction::Follow
        } else if self.display_type.contains("share") {
            SocialAction::Share
        } else {
            SocialAction::Unknown
        }
    }
}

/// Social action kinds carried by `SocialMessage`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialAction {
    Follow,
    Share,
    Unknown,
}

impl WireMessage for SocialMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = SocialMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.display_type = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Periodic viewer-count update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomUserSeqMessage {
    /// Current viewer count
    pub viewer_count: u64,
}

impl WireMessage for RoomUserSeqMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = RoomUserSeqMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                msg.viewer_count = field.value.as_u64();
            }
        }
        Ok(msg)
    }
}

/// Stream control action codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    Pause,
    Resume,
    StreamEnded,
    Unknown(u64),
}

impl ControlAction {
    fn from_code(code: u64) -> Self {
        match code {
            1 => ControlAction::Pause,
            2 => ControlAction::Resume,
            3 => ControlAction::StreamEnded,
            other => ControlAction::Unknown(other),
        }
    }
}

/// Stream lifecycle control (pause, resume, ended)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlMessage {
    pub action: ControlAction,
}

impl WireMessage for ControlMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut action = ControlAction::Unknown(0);
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                action = ControlAction::from_code(field.value.as_u64());
            }
        }
        Ok(ControlMessage { action })
    }
}

/// A viewer subscribing to the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscribeMessage {
    pub user: User,
}

impl WireMessage for SubscribeMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = SubscribeMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                msg.user = User::decode(&field.value.as_bytes())?;
            }
        }
        Ok(msg)
    }
}

/// A subscriber-only emote posted to chat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmoteChatMessage {
    pub user: User,
    pub emote_id: String,
}

impl WireMessage for EmoteChatMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = EmoteChatMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.emote_id = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// A question submitted through the Q&A panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionNewMessage {
    pub user: User,
    pub text: String,
}

impl WireMessage for QuestionNewMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = QuestionNewMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.text = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Poll started or updated by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollMessage {
    pub prompt: String,
}

impl WireMessage for PollMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = PollMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                msg.prompt = field.value.as_string()?;
            }
        }
        Ok(msg)
    }
}

/// A chat comment pinned by the host
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomPinMessage {
    pub user: User,
    pub comment: String,
}

impl WireMessage for RoomPinMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = RoomPinMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.comment = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Barrage (announcement banner) message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarrageMessage {
    pub user: User,
    pub text: String,
}

impl WireMessage for BarrageMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = BarrageMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.text = field.value.as_string()?,
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Treasure-chest envelope dropped into the room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeMessage {
    pub user: User,
    pub coins: u64,
}

impl WireMessage for EnvelopeMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = EnvelopeMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.user = User::decode(&field.value.as_bytes())?,
                2 => msg.coins = field.value.as_u64(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Live caption text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptionMessage {
    pub text: String,
}

impl WireMessage for CaptionMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = CaptionMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                msg.text = field.value.as_string()?;
            }
        }
        Ok(msg)
    }
}

/// Host goal progress update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalUpdateMessage {
    pub label: String,
    pub progress: u64,
    pub target: u64,
}

impl WireMessage for GoalUpdateMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = GoalUpdateMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            match field.number {
                1 => msg.label = field.value.as_string()?,
                2 => msg.progress = field.value.as_u64(),
                3 => msg.target = field.value.as_u64(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// Link-mic battle state between hosts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMicBattleMessage {
    pub battle_id: u64,
}

impl WireMessage for LinkMicBattleMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = LinkMicBattleMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                msg.battle_id = field.value.as_u64();
            }
        }
        Ok(msg)
    }
}

/// System text shown in the room
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomMessage {
    pub text: String,
}

impl WireMessage for RoomMessage {
    fn decode(payload: &Bytes) -> Result<Self, WireError> {
        let mut msg = RoomMessage::default();
        let mut reader = WireReader::new(payload.clone());
        while let Some(field) = reader.next_field()? {
            if field.number == 1 {
                msg.text = field.value.as_string()?;
            }
        }
        Ok(msg)
    }
}
