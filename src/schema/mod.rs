//! Plain data contracts shared with the host game.

pub mod item;
pub mod message;
pub mod player;
