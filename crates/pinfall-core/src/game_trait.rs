use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;
use crate::player::PlayerIndex;

/// Core trait that every Pinfall scoring game implements.
///
/// Front ends (replay CLI, scoreboards, tests) only feed rolls in and read
/// state back out; all rule evaluation lives behind this trait.
pub trait ScoringGame: Send + Sync {
    /// Game metadata for display.
    fn metadata(&self) -> GameMetadata;

    /// Register the pins knocked down by the awaited roll.
    ///
    /// Returns the events the roll caused. Once the game is over the call is
    /// a no-op and returns no events. A rejected roll leaves the game exactly
    /// as it was.
    fn roll(&mut self, pins: i32) -> Result<Vec<GameEvent>, InvalidInput>;

    /// Players keyed by their position in the turn order.
    fn players(&self) -> BTreeMap<PlayerIndex, String>;

    /// The player whose roll is awaited. Stale once the game is over.
    fn next_player(&self) -> PlayerIndex;

    /// Running total of the given player.
    fn player_score(&self, player: PlayerIndex) -> u32;

    /// Zero-based frame (round) currently being played.
    fn current_frame(&self) -> usize;

    /// Largest legal pin count for the awaited roll.
    fn pins_standing(&self) -> u8;

    /// Whether the game still accepts rolls.
    fn is_active(&self) -> bool;

    /// Winner of a finished game; `None` while the game is still going.
    fn winner(&self) -> Option<PlayerIndex>;
}

/// Game metadata. Front ends read it to check a roster before a game starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub name: String,
    pub description: String,
    pub min_players: u8,
    pub frame_count: u8,
}

/// Events emitted by a game while registering a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    RollRegistered {
        player: PlayerIndex,
        frame: usize,
        pins: u8,
    },
    ScoreUpdate {
        player: PlayerIndex,
        score: u32,
    },
    FrameComplete {
        player: PlayerIndex,
        frame: usize,
    },
    TurnChange {
        player: PlayerIndex,
        frame: usize,
    },
    GameOver {
        winner: PlayerIndex,
    },
}
