use serde::{Deserialize, Serialize};

/// Pins in a full rack.
pub const PINS_IN_RACK: u8 = 10;

/// Rejected roll. Every variant is a caller input error; a rejected roll is
/// never partially applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvalidInput {
    /// Pin count below zero.
    NegativePins(i32),
    /// Pin count above a full rack.
    TooManyPins(i32),
    /// More pins than are left standing in the rack.
    ExceedsStanding { standing: u8, pins: u8 },
    /// The frame takes no further rolls.
    FrameClosed,
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NegativePins(pins) => write!(f, "negative pins are not accepted: {pins}"),
            Self::TooManyPins(pins) => {
                write!(f, "too many pins: {pins} (a rack holds {PINS_IN_RACK})")
            },
            Self::ExceedsStanding { standing, pins } => {
                write!(f, "too many pins in the frame: {pins} with {standing} standing")
            },
            Self::FrameClosed => write!(f, "frame is already complete"),
        }
    }
}

impl std::error::Error for InvalidInput {}

/// Check a raw pin count against the rack ceiling.
pub fn validate_pins(pins: i32) -> Result<u8, InvalidInput> {
    if pins < 0 {
        return Err(InvalidInput::NegativePins(pins));
    }
    if pins > i32::from(PINS_IN_RACK) {
        return Err(InvalidInput::TooManyPins(pins));
    }
    Ok(pins as u8)
}
