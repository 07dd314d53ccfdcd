//! Fluent client assembly
//!
//! The builder is the one place where the registry and subscriber lists are
//! mutated; after `build` both are read-only behind the client. Each `on_*`
//! helper subscribes a typed callback that narrows the published event to
//! its variant before invoking the user closure.

use bytes::Bytes;

use crate::dispatch::{BatchProcessor, EventBus, FrameRegistry};
use crate::error::Result;
use crate::event::{DecodeFailure, Event, EventKind, Selector};
use crate::protocol::frame::{Batch, Frame};
use crate::protocol::messages::{
    BarrageMessage, CaptionMessage, ChatMessage, ControlMessage, EmoteChatMessage,
    EnvelopeMessage, GiftMessage, GoalUpdateMessage, LikeMessage, LinkMicBattleMessage,
    MemberMessage, PollMessage, QuestionNewMessage, RoomMessage, RoomPinMessage,
    RoomUserSeqMessage, SocialMessage, SubscribeMessage, WireMessage,
};

use super::settings::ClientSettings;
use super::LiveClient;

/// Builder for [`LiveClient`]
///
/// # Example
/// ```no_run
/// use webcast_rs::client::LiveClientBuilder;
///
/// # fn example() -> webcast_rs::error::Result<()> {
/// let client = LiveClientBuilder::new("some_streamer")
///     .on_chat(|msg| {
///         println!("{}: {}", msg.user.nickname, msg.comment);
///         Ok(())
///     })
///     .on_gift(|msg| {
///         println!("gift {} x{}", msg.gift_id, msg.repeat_count);
///         Ok(())
///     })
///     .build()?;
/// # let _ = client;
/// # Ok(())
/// # }
/// ```
pub struct LiveClientBuilder {
    settings: ClientSettings,
    registry: FrameRegistry,
    bus: EventBus,
}

impl LiveClientBuilder {
    /// Start a builder for the given host's room
    pub fn new(host_name: impl Into<String>) -> Self {
        Self {
            settings: ClientSettings::for_host(host_name),
            registry: FrameRegistry::new(),
            bus: EventBus::new(),
        }
    }

    /// Adjust settings in place
    pub fn configure<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ClientSettings),
    {
        f(&mut self.settings);
        self
    }

    /// Install or replace a raw decode handler for a tag
    pub fn register_mapping<F>(mut self, tag: impl Into<String>, decode: F) -> Self
    where
        F: Fn(&Bytes) -> Result<Event> + Send + Sync + 'static,
    {
        self.registry.register(tag, decode);
        self
    }

    /// Declare a typed wire-message → event mapping for a tag
    pub fn register_message<M, F>(mut self, tag: impl Into<String>, map: F) -> Self
    where
        M: WireMessage,
        F: Fn(M) -> Event + Send + Sync + 'static,
    {
        self.registry.register_message(tag, map);
        self
    }

    /// Subscribe a callback under an explicit selector
    pub fn subscribe<F>(mut self, selector: Selector, callback: F) -> Self
    where
        F: Fn(&Event) -> Result<()> + Send + Sync + 'static,
    {
        self.bus.subscribe(selector, callback);
        self
    }

    /// Subscribe to every published event
    pub fn on_event<F>(self, callback: F) -> Self
    where
        F: Fn(&Event) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Any, callback)
    }

    /// Observe each incoming batch before its frames are processed
    pub fn on_batch<F>(self, callback: F) -> Self
    where
        F: Fn(&Batch) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::BatchObserved), move |event| {
            match event {
                Event::BatchObserved(batch) => callback(batch),
                _ => Ok(()),
            }
        })
    }

    /// Observe frames whose tag has no registered handler
    pub fn on_unhandled<F>(self, callback: F) -> Self
    where
        F: Fn(&Frame) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::UnhandledFrame), move |event| {
            match event {
                Event::UnhandledFrame(frame) => callback(frame),
                _ => Ok(()),
            }
        })
    }

    /// Observe per-frame dispatch failures
    pub fn on_error<F>(self, callback: F) -> Self
    where
        F: Fn(&DecodeFailure) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::DecodeFailure), move |event| {
            match event {
                Event::DecodeFailure(failure) => callback(failure),
                _ => Ok(()),
            }
        })
    }

    /// Observe chat comments
    pub fn on_chat<F>(self, callback: F) -> Self
    where
        F: Fn(&ChatMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Chat), move |event| match event {
            Event::Chat(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe gifts
    pub fn on_gift<F>(self, callback: F) -> Self
    where
        F: Fn(&GiftMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Gift), move |event| match event {
            Event::Gift(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe likes
    pub fn on_like<F>(self, callback: F) -> Self
    where
        F: Fn(&LikeMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Like), move |event| match event {
            Event::Like(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe viewers joining the room
    pub fn on_join<F>(self, callback: F) -> Self
    where
        F: Fn(&MemberMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Join), move |event| match event {
            Event::Join(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe follows and shares
    pub fn on_social<F>(self, callback: F) -> Self
    where
        F: Fn(&SocialMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Social), move |event| match event {
            Event::Social(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe viewer-count updates
    pub fn on_viewer_count<F>(self, callback: F) -> Self
    where
        F: Fn(&RoomUserSeqMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::ViewerCount), move |event| {
            match event {
                Event::ViewerCount(msg) => callback(msg),
                _ => Ok(()),
            }
        })
    }

    /// Observe stream control messages (pause, resume, ended)
    pub fn on_control<F>(self, callback: F) -> Self
    where
        F: Fn(&ControlMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Control), move |event| match event {
            Event::Control(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe new subscriptions
    pub fn on_subscribe<F>(self, callback: F) -> Self
    where
        F: Fn(&SubscribeMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Subscribe), move |event| {
            match event {
                Event::Subscribe(msg) => callback(msg),
                _ => Ok(()),
            }
        })
    }

    /// Observe subscriber emotes
    pub fn on_emote<F>(self, callback: F) -> Self
    where
        F: Fn(&EmoteChatMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Emote), move |event| match event {
            Event::Emote(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe Q&A questions
    pub fn on_question<F>(self, callback: F) -> Self
    where
        F: Fn(&QuestionNewMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Question), move |event| match event {
            Event::Question(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe poll updates
    pub fn on_poll<F>(self, callback: F) -> Self
    where
        F: Fn(&PollMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Poll), move |event| match event {
            Event::Poll(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe pinned comments
    pub fn on_room_pin<F>(self, callback: F) -> Self
    where
        F: Fn(&RoomPinMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::RoomPin), move |event| match event {
            Event::RoomPin(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe announcement banners
    pub fn on_barrage<F>(self, callback: F) -> Self
    where
        F: Fn(&BarrageMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Barrage), move |event| match event {
            Event::Barrage(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe treasure-chest envelopes
    pub fn on_envelope<F>(self, callback: F) -> Self
    where
        F: Fn(&EnvelopeMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Envelope), move |event| match event {
            Event::Envelope(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe live captions
    pub fn on_caption<F>(self, callback: F) -> Self
    where
        F: Fn(&CaptionMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::Caption), move |event| match event {
            Event::Caption(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Observe goal progress
    pub fn on_goal_update<F>(self, callback: F) -> Self
    where
        F: Fn(&GoalUpdateMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::GoalUpdate), move |event| {
            match event {
                Event::GoalUpdate(msg) => callback(msg),
                _ => Ok(()),
            }
        })
    }

    /// Observe link-mic battles
    pub fn on_link_mic_battle<F>(self, callback: F) -> Self
    where
        F: Fn(&LinkMicBattleMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::LinkMicBattle), move |event| {
            match event {
                Event::LinkMicBattle(msg) => callback(msg),
                _ => Ok(()),
            }
        })
    }

    /// Observe system room text
    pub fn on_room_text<F>(self, callback: F) -> Self
    where
        F: Fn(&RoomMessage) -> Result<()> + Send + Sync + 'static,
    {
        self.subscribe(Selector::Kind(EventKind::RoomText), move |event| match event {
            Event::RoomText(msg) => callback(msg),
            _ => Ok(()),
        })
    }

    /// Validate settings and assemble the client
    ///
    /// Installs the stock mappings first (unless disabled), so mappings
    /// declared on the builder override them via last-write-wins.
    pub fn build(mut self) -> Result<LiveClient> {
        self.settings.validate()?;

        let registry = if self.settings.default_mappings {
            let mut registry = FrameRegistry::with_default_mappings();
            registry.merge(self.registry);
            registry
        } else {
            self.registry
        };

        tracing::info!(
            host = %self.settings.host_name,
            mappings = registry.len(),
            "Client assembled"
        );

        Ok(LiveClient::new(
            self.settings,
            BatchProcessor::new(registry, self.bus),
        ))
    }
}
