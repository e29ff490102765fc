//! Scoreboard symbols for a frame.
//!
//! Slots hold a decimal pin count, `"X"` for a strike, `"/"` for a spare, or
//! `""` for a ball not yet bowled.

use pinfall_core::error::PINS_IN_RACK;

use crate::frame::{Frame, FrameKind};

pub const EMPTY: &str = "";
pub const STRIKE: &str = "X";
pub const SPARE: &str = "/";

/// Display slots for a frame: two for frames 1-9, two or three for the tenth.
pub fn display_slots(frame: &Frame) -> Vec<String> {
    match frame.kind() {
        FrameKind::Standard => standard_slots(frame),
        FrameKind::Tenth => tenth_slots(frame),
    }
}

fn standard_slots(frame: &Frame) -> Vec<String> {
    let rolls = frame.rolls();
    if frame.contains_strike() {
        return vec![EMPTY.to_string(), STRIKE.to_string()];
    }
    let second = if frame.contains_spare() {
        SPARE.to_string()
    } else {
        pin_count(rolls.get(1).copied())
    };
    vec![pin_count(rolls.first().copied()), second]
}

fn tenth_slots(frame: &Frame) -> Vec<String> {
    let rolls = frame.rolls();
    let mut slots = if frame.contains_strike() {
        vec![STRIKE.to_string(), ball(rolls.get(1).copied())]
    } else {
        standard_slots(frame)
    };
    if let Some(&third) = rolls.get(2) {
        slots.push(ball(Some(third)));
    }
    slots
}

fn pin_count(pins: Option<u8>) -> String {
    pins.map_or_else(|| EMPTY.to_string(), |p| p.to_string())
}

/// Like `pin_count`, but a full rack shows as a strike.
fn ball(pins: Option<u8>) -> String {
    match pins {
        Some(PINS_IN_RACK) => STRIKE.to_string(),
        other => pin_count(other),
    }
}
