use serde::{Deserialize, Serialize};

use pinfall_core::error::{InvalidInput, PINS_IN_RACK, validate_pins};

/// Which rule set a frame follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameKind {
    /// Frames 1-9: up to two rolls, strike/spare bonuses come from later rolls.
    Standard,
    /// Frame 10: up to three rolls, bonus balls are bowled in the frame itself.
    Tenth,
}

/// One scoring unit on a player's card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    kind: FrameKind,
    rolls: Vec<u8>,
    score: u32,
    pending_rolls: u8,
    complete: bool,
    accumulated_score: u32,
    contains_strike: bool,
    contains_spare: bool,
}

impl Frame {
    pub fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            rolls: Vec::with_capacity(kind.max_rolls()),
            score: 0,
            pending_rolls: 0,
            complete: false,
            accumulated_score: 0,
            contains_strike: false,
            contains_spare: false,
        }
    }

    pub fn standard() -> Self {
        Self::new(FrameKind::Standard)
    }

    pub fn tenth() -> Self {
        Self::new(FrameKind::Tenth)
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// Pins recorded in this frame, in roll order.
    pub fn rolls(&self) -> &[u8] {
        &self.rolls
    }

    /// Own pins plus any bonus donated by later rolls so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Player total through this frame, as of the last recalculation.
    pub fn accumulated_score(&self) -> u32 {
        self.accumulated_score
    }

    pub fn pending_rolls(&self) -> u8 {
        self.pending_rolls
    }

    pub fn has_pending_rolls(&self) -> bool {
        self.pending_rolls > 0
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn contains_strike(&self) -> bool {
        self.contains_strike
    }

    pub fn contains_spare(&self) -> bool {
        self.contains_spare
    }

    /// Pins left standing for the next roll of this frame, 0 once complete.
    ///
    /// The tenth frame resets the rack after a strike or a spare.
    pub fn pins_standing(&self) -> u8 {
        if self.complete {
            return 0;
        }
        match (self.kind, self.rolls.as_slice()) {
            (FrameKind::Standard, [first]) => PINS_IN_RACK - first,
            (FrameKind::Tenth, [first]) if *first < PINS_IN_RACK => PINS_IN_RACK - first,
            (FrameKind::Tenth, [PINS_IN_RACK, second]) if *second < PINS_IN_RACK => {
                PINS_IN_RACK - second
            },
            _ => PINS_IN_RACK,
        }
    }

    /// Validate and record one roll. Nothing changes when the roll is rejected.
    ///
    /// Returns the validated pin count. Bonus pins owed to earlier frames are
    /// not handled here; the owning score card propagates them.
    pub fn register_roll(&mut self, pins: i32) -> Result<u8, InvalidInput> {
        let pins = validate_pins(pins)?;
        if self.complete {
            return Err(InvalidInput::FrameClosed);
        }
        let standing = self.pins_standing();
        if pins > standing {
            return Err(InvalidInput::ExceedsStanding { standing, pins });
        }

        self.rolls.push(pins);
        match self.kind {
            FrameKind::Standard => self.settle_standard(),
            FrameKind::Tenth => self.settle_tenth(),
        }
        self.score += u32::from(pins);
        Ok(pins)
    }

    fn settle_standard(&mut self) {
        match self.rolls.as_slice() {
            [PINS_IN_RACK] => {
                self.contains_strike = true;
                self.pending_rolls = 2;
                self.complete = true;
            },
            [_] => {},
            [first, second, ..] => {
                if first + second == PINS_IN_RACK {
                    self.contains_spare = true;
                    self.pending_rolls = 1;
                }
                self.complete = true;
            },
            [] => {},
        }
    }

    fn settle_tenth(&mut self) {
        match self.rolls.as_slice() {
            [first] => {
                if *first == PINS_IN_RACK {
                    self.contains_strike = true;
                }
            },
            [first, second] => {
                if !self.contains_strike && first + second == PINS_IN_RACK {
                    self.contains_spare = true;
                } else if !self.contains_strike {
                    self.complete = true;
                }
            },
            [_, _, _, ..] => self.complete = true,
            [] => {},
        }
    }

    /// Credit one later roll to this frame if it still owes bonus pins.
    ///
    /// Returns whether the pins were taken.
    pub fn absorb_bonus(&mut self, pins: u8) -> bool {
        if !self.has_pending_rolls() {
            return false;
        }
        self.score += u32::from(pins);
        self.pending_rolls -= 1;
        true
    }

    pub(crate) fn set_accumulated_score(&mut self, score: u32) {
        self.accumulated_score = score;
    }
}

impl FrameKind {
    pub fn max_rolls(self) -> usize {
        match self {
            Self::Standard => 2,
            Self::Tenth => 3,
        }
    }
}
