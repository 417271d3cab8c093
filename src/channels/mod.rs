//! Channel abstraction for message I/O.

pub mod telegram;

pub use telegram::TelegramChannel;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::ChannelError;
use crate::registry::OriginContext;

/// An inbound text message with just enough context to classify and reply.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    /// Raw message text.
    pub text: String,
    /// Sender identity (Telegram numeric user id rendered as a string).
    pub sender_id: String,
    /// Chat + forum topic the message arrived in.
    pub origin: OriginContext,
    /// Channel-native message id, used to address the reply.
    pub message_id: i64,
}

/// Stream of inbound messages produced by a channel.
pub type MessageStream = Pin<Box<dyn Stream<Item = IncomingMessage> + Send>>;

/// Trait for message transports — pure I/O, no report logic.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name for logs.
    fn name(&self) -> &str;

    /// Start listening and return the inbound message stream.
    async fn start(&self) -> Result<MessageStream, ChannelError>;

    /// Send a short reply to a previously received message.
    async fn reply(&self, msg: &IncomingMessage, text: &str) -> Result<(), ChannelError>;
}
