pub mod config;
pub mod render;

use pinfall_core::error::InvalidInput;
use pinfall_core::game_trait::ScoringGame;
use pinfall_tenpin::TenPinGame;

use config::{OutputFormat, PinfallConfig};

/// A roll the engine refused, with its position in the replayed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayError {
    pub position: usize,
    pub pins: i32,
    pub source: InvalidInput,
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "roll #{} ({}) rejected: {}",
            self.position + 1,
            self.pins,
            self.source
        )
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Feed rolls into a game in order, stopping at the first rejected roll.
///
/// Returns how many rolls changed the game; rolls after game over are
/// accepted but ignored.
pub fn replay(game: &mut dyn ScoringGame, rolls: &[i32]) -> Result<usize, ReplayError> {
    let mut applied = 0;
    for (position, &pins) in rolls.iter().enumerate() {
        let events = game.roll(pins).map_err(|source| ReplayError {
            position,
            pins,
            source,
        })?;
        if !events.is_empty() {
            applied += 1;
        }
    }
    Ok(applied)
}

/// Scoreboard output of a replay, plus how the replay went.
#[derive(Debug, Clone)]
pub struct Replayed {
    pub output: String,
    pub outcome: Result<usize, ReplayError>,
}

/// Build the game described by `config`, replay its rolls and render the
/// scoreboard. After a rejected roll the board is rendered as it stood
/// before it.
///
/// `config` must name at least one player (see `PinfallConfig::validate`
/// with `TenPinGame::game_metadata()`).
pub fn run(config: &PinfallConfig) -> Replayed {
    let mut game = TenPinGame::new(config.players.iter().cloned());
    let outcome = replay(&mut game, &config.rolls);
    match &outcome {
        Ok(applied) => {
            tracing::info!(
                applied,
                ignored = config.rolls.len() - applied,
                "Replay finished"
            );
        },
        Err(e) => tracing::warn!(error = %e, "Replay stopped"),
    }

    let board = game.scoreboard();
    let output = match config.output {
        OutputFormat::Text => render::render_text(&board),
        OutputFormat::Json => serde_json::to_string_pretty(&board)
            .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}")),
    };
    Replayed { output, outcome }
}
