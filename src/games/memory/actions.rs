//! Semantic action IDs for Memory Match click targets.

pub const NEW_GAME: u16 = 1;
pub const SELECT_CARD_BASE: u16 = 100; // +board index
