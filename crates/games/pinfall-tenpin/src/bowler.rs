use serde::{Deserialize, Serialize};

use pinfall_core::FRAME_COUNT;
use pinfall_core::error::InvalidInput;
use pinfall_core::player::{Player, PlayerIndex};

use crate::frame::Frame;

/// A player's score card: ten frames plus the running total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bowler {
    player: Player,
    frames: Vec<Frame>,
    current_frame: usize,
    current_score: u32,
}

/// What a single roll did to the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollOutcome {
    pub frame: usize,
    pub pins: u8,
    pub frame_complete: bool,
}

impl Bowler {
    pub fn new(player: Player) -> Self {
        let mut frames: Vec<Frame> = (1..FRAME_COUNT).map(|_| Frame::standard()).collect();
        frames.push(Frame::tenth());
        Self {
            player,
            frames,
            current_frame: 0,
            current_score: 0,
        }
    }

    pub fn index(&self) -> PlayerIndex {
        self.player.index
    }

    pub fn name(&self) -> &str {
        &self.player.display_name
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame the next roll goes into; equals `FRAME_COUNT` once the card is full.
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn is_finished(&self) -> bool {
        self.current_frame >= FRAME_COUNT
    }

    pub fn pins_standing(&self) -> u8 {
        self.frames
            .get(self.current_frame)
            .map_or(0, Frame::pins_standing)
    }

    /// Record a roll in the frame being played.
    ///
    /// Earlier strike/spare frames still owed bonus pins take this roll, the
    /// totals are recomputed, and the card moves on once the frame closes.
    pub fn roll(&mut self, pins: i32) -> Result<RollOutcome, InvalidInput> {
        let index = self.current_frame;
        let frame = self
            .frames
            .get_mut(index)
            .ok_or(InvalidInput::FrameClosed)?;
        let pins = frame.register_roll(pins)?;
        let frame_complete = frame.is_complete();

        // Consecutive strikes can both be waiting on the same roll
        for earlier in &mut self.frames[..index] {
            earlier.absorb_bonus(pins);
        }
        self.recalculate();

        if frame_complete {
            self.current_frame += 1;
        }
        Ok(RollOutcome {
            frame: index,
            pins,
            frame_complete,
        })
    }

    fn recalculate(&mut self) {
        let mut total = 0;
        for frame in &mut self.frames {
            total += frame.score();
            frame.set_accumulated_score(total);
        }
        self.current_score = total;
    }

    pub fn is_frame_complete(&self, frame: usize) -> bool {
        self.frames[frame].is_complete()
    }
}
