//! Domain layer: value objects, entities, events, and the channel contract.

pub mod channel;
pub mod entity;
pub mod error;
pub mod event;
pub mod typing;
pub mod value_object;

pub use channel::{ChatChannel, EventSender, SubscriberRegistry, Subscription};
pub use entity::{
    ChatMessage, ConnectionStatus, MessageLog, OnlineUser, Roster, Session, SessionState,
};
pub use error::{ChannelError, ValueObjectError};
pub use event::{ChannelEvent, ClientAction, IncomingMessage, OutgoingMessage, ServerEvent};
pub use typing::{TypingThrottle, TypingTracker};
pub use value_object::{AvatarColor, MessageText, Username};
