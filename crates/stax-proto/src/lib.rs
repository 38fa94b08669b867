//! Shared domain types and browse logic for the stax music-shelf browser.

pub mod browse;
pub mod config;
pub mod cursor;
pub mod folder;
pub mod letters;
pub mod location;
pub mod pagination;
pub mod source;
pub mod title;
