//! End-to-end messaging tests: a mod framing an item gift over the wire.

use serde::{Deserialize, Serialize};

use roomkit::core::messaging::{
    decode_merged, decode_payload, ChatTransport, Messager, MessageHandler,
};
use roomkit::schema::item::{
    AssetCatalog, AssetRef, CraftingDescriptor, ItemColor, ItemDescriptor, ItemSpec,
};
use roomkit::schema::message::{Envelope, MessageType};
use roomkit::schema::player::MemberNumber;

#[derive(Default)]
struct RecordingTransport {
    sent: Vec<Envelope>,
    local: Vec<String>,
    handlers: Vec<MessageHandler>,
}

impl ChatTransport for RecordingTransport {
    fn send(&mut self, envelope: Envelope) {
        self.sent.push(envelope);
    }

    fn send_local(&mut self, message: &str) {
        self.local.push(message.to_string());
    }

    fn register_handler(&mut self, handler: MessageHandler) {
        self.handlers.push(handler);
    }
}

struct OneItemCatalog;

impl AssetCatalog for OneItemCatalog {
    fn get(&self, style: &str, group: &str, name: &str) -> Option<AssetRef> {
        (group == "ItemNeck" && name == "LeatherCollar").then(|| AssetRef {
            style: style.to_string(),
            group: group.to_string(),
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct GiftMessage {
    kind: String,
    item: ItemSpec,
}

fn collar_gift() -> GiftMessage {
    let craft = CraftingDescriptor::builder("Starlight Collar", "A gift between friends", "Normal")
        .color("#222266")
        .private(true)
        .build();
    GiftMessage {
        kind: "gift".to_string(),
        item: ItemSpec {
            name: "LeatherCollar".to_string(),
            group: "ItemNeck".to_string(),
            color: ItemColor::Palette(vec!["#222266".to_string()]),
            difficulty: Some(2),
            craft: Some(craft),
            property: None,
        },
    }
}

#[test]
fn gift_round_trip_over_the_wire() {
    // Sender side: frame the gift into a hidden envelope.
    let mut messager = Messager::new(RecordingTransport::default());
    messager
        .send_json(&collar_gift(), Some(MemberNumber(9)), MessageType::Hidden)
        .unwrap();

    messager.send_local("Gift sent.");
    assert_eq!(messager.transport().local, vec!["Gift sent."]);

    let envelope = messager.transport().sent[0].clone();
    assert_eq!(envelope.message_type, MessageType::Hidden);
    assert_eq!(envelope.target, Some(MemberNumber(9)));

    // Receiver side: decode and resolve against the catalog.
    let gift: GiftMessage = decode_payload(&envelope, MessageType::Hidden).unwrap();
    assert_eq!(gift.kind, "gift");
    let item = ItemDescriptor::from_spec(&OneItemCatalog, &gift.item).unwrap();
    assert_eq!(item.asset.name, "LeatherCollar");
    assert_eq!(item.difficulty, 2);
    assert_eq!(item.craft.unwrap().name, "Starlight Collar");
}

#[test]
fn mismatched_type_is_discarded() {
    let mut messager = Messager::new(RecordingTransport::default());
    messager
        .send_json(&collar_gift(), None, MessageType::Whisper)
        .unwrap();
    let envelope = &messager.transport().sent[0];
    assert!(decode_payload::<GiftMessage>(envelope, MessageType::Hidden).is_none());
}

#[test]
fn merged_decode_keeps_envelope_precedence() {
    let envelope = Envelope::new(
        r#"{"kind":"gift","Content":"spoofed"}"#,
        MessageType::Hidden,
    )
    .with_target(MemberNumber(12));
    let merged = decode_merged(&envelope, MessageType::Hidden).unwrap();
    assert_eq!(merged["kind"], "gift");
    // The payload's fake Content field loses to the envelope's.
    assert_eq!(merged["Content"], r#"{"kind":"gift","Content":"spoofed"}"#);
    assert_eq!(merged["Target"], 12);
}

#[test]
fn handler_chain_claims_in_order() {
    let mut messager = Messager::new(RecordingTransport::default());
    messager.listen(
        |envelope| decode_payload::<GiftMessage>(envelope, MessageType::Hidden).is_some(),
        -10,
        "gift handler",
    );
    messager.listen(|_| true, 0, "catch-all");

    let gift_envelope = Envelope::new(
        serde_json::to_string(&collar_gift()).unwrap(),
        MessageType::Hidden,
    );
    let chat_envelope = Envelope::new("hello", MessageType::Chat);

    let handlers = &mut messager.transport_mut().handlers;
    assert!((handlers[0].callback)(&gift_envelope));
    assert!(!(handlers[0].callback)(&chat_envelope));
    assert!((handlers[1].callback)(&chat_envelope));
}
