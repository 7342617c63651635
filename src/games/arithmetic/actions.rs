//! Semantic action IDs for Math Speed click targets.

pub const START: u16 = 1;
pub const DIFFICULTY_BASE: u16 = 10; // +index into Difficulty::ALL
pub const KEYPAD_DIGIT_BASE: u16 = 20; // +digit 0..9
pub const KEYPAD_MINUS: u16 = 30;
pub const KEYPAD_BACKSPACE: u16 = 31;
pub const KEYPAD_SUBMIT: u16 = 32;
