//! Structured messaging over the host's chat transport.
//!
//! Mods exchange JSON payloads inside `Hidden` chat messages. This module
//! frames outbound payloads into envelopes and filters/decodes inbound
//! ones. Delivery is fire-and-forget: no acknowledgement, no retry.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::schema::message::{Envelope, MessageType};
use crate::schema::player::MemberNumber;

#[derive(Debug, Error)]
pub enum MessageError {
    #[error("payload serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Inbound message callback. Returns `true` when the message was claimed,
/// so the host dispatcher stops offering it to later handlers.
pub type HandlerCallback = Box<dyn FnMut(&Envelope) -> bool + Send>;

/// A registered inbound handler. Priority is an ordering key interpreted
/// by the host dispatcher, not here.
pub struct MessageHandler {
    pub description: String,
    pub priority: i32,
    pub callback: HandlerCallback,
}

/// The host's chat transport seam.
pub trait ChatTransport {
    /// Hand an outbound envelope to the network.
    fn send(&mut self, envelope: Envelope);
    /// Show a local-only message to this client; nothing goes on the wire.
    fn send_local(&mut self, message: &str);
    /// Register an inbound handler with the host dispatcher.
    fn register_handler(&mut self, handler: MessageHandler);
}

/// Messaging wrapper bound to one transport.
pub struct Messager<T: ChatTransport> {
    transport: T,
}

impl<T: ChatTransport> Messager<T> {
    pub fn new(transport: T) -> Messager<T> {
        Messager { transport }
    }

    /// Serialize a payload and send it, optionally targeted at one member.
    pub fn send_json<P: Serialize>(
        &mut self,
        payload: &P,
        target: Option<MemberNumber>,
        message_type: MessageType,
    ) -> Result<(), MessageError> {
        let content = serde_json::to_string(payload)?;
        self.transport.send(Envelope {
            content,
            message_type,
            target,
            sender: None,
        });
        Ok(())
    }

    /// Send an already-formed string without serializing it again.
    pub fn send_raw(
        &mut self,
        content: impl Into<String>,
        target: Option<MemberNumber>,
        message_type: MessageType,
    ) {
        self.transport.send(Envelope {
            content: content.into(),
            message_type,
            target,
            sender: None,
        });
    }

    /// Local-only message, never networked.
    pub fn send_local(&mut self, message: &str) {
        self.transport.send_local(message);
    }

    /// Register an inbound callback with the host dispatcher.
    pub fn listen<F>(&mut self, callback: F, priority: i32, description: impl Into<String>)
    where
        F: FnMut(&Envelope) -> bool + Send + 'static,
    {
        self.transport.register_handler(MessageHandler {
            description: description.into(),
            priority,
            callback: Box::new(callback),
        });
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}

/// Decode an envelope's content into a typed payload.
///
/// `None` when the type tag mismatches or the content is not valid JSON
/// for `P` — inbound garbage is silently discarded, never raised.
pub fn decode_payload<P: DeserializeOwned>(
    envelope: &Envelope,
    expected: MessageType,
) -> Option<P> {
    if envelope.message_type != expected {
        return None;
    }
    serde_json::from_str(&envelope.content).ok()
}

/// Decode an envelope's content as a loose JSON object merged with the
/// envelope's own fields; envelope fields win key collisions.
///
/// `None` when the type tag mismatches, the content is not valid JSON, or
/// either side is not an object.
pub fn decode_merged(envelope: &Envelope, expected: MessageType) -> Option<Value> {
    if envelope.message_type != expected {
        return None;
    }
    let payload: Value = serde_json::from_str(&envelope.content).ok()?;
    let mut merged = payload.as_object()?.clone();
    let envelope_fields = serde_json::to_value(envelope).ok()?;
    for (key, value) in envelope_fields.as_object()? {
        merged.insert(key.clone(), value.clone());
    }
    Some(Value::Object(merged))
}
