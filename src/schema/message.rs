//! Chat transport envelopes — the wire shape the host expects.

use serde::{Deserialize, Serialize};

use super::player::MemberNumber;

/// The host's chat message kinds. `Hidden` is the conventional carrier for
/// mod-to-mod traffic the room UI never renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Chat,
    Whisper,
    Action,
    Emote,
    Activity,
    Hidden,
    ServerMessage,
    LocalMessage,
}

impl Default for MessageType {
    fn default() -> Self {
        Self::Hidden
    }
}

/// The outer structure wrapping a chat transport message, independent of
/// whatever payload its content carries. Field names follow the host's
/// PascalCase wire convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Envelope {
    pub content: String,
    #[serde(rename = "Type")]
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<MemberNumber>,
    /// Filled in by the host on delivery; never set on outbound messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<MemberNumber>,
}

impl Envelope {
    pub fn new(content: impl Into<String>, message_type: MessageType) -> Envelope {
        Envelope {
            content: content.into(),
            message_type,
            target: None,
            sender: None,
        }
    }

    pub fn with_target(mut self, target: MemberNumber) -> Envelope {
        self.target = Some(target);
        self
    }
}
