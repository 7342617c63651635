//! Semantic action IDs for Pattern Match click targets.

pub const START: u16 = 1;
pub const PICK_COLOR_BASE: u16 = 10; // +palette index 0..5
