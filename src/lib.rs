//! Roomkit — scripting toolkit for chat-room game mods.
//!
//! Convenience utilities on top of a host game's facilities: resolving a
//! player from the room roster, blending colors, assembling crafted-item
//! records, framing structured chat messages, caching key/value data in
//! persistent storage, and substituting `§key§` pronoun placeholders in
//! template strings. Host facilities (roster, asset catalog, chat
//! transport, storage) are consumed through traits and never owned here.

pub mod core;
pub mod schema;
