//! Toolkit behavior: color math, template substitution, roster lookup,
//! messaging, caching, and the JSON fetch helper.

pub mod cache;
pub mod color;
pub mod fetch;
pub mod messaging;
pub mod roster;
pub mod template;
