pub mod error;
pub mod game_trait;
pub mod player;

/// Frames per player in a full game.
pub const FRAME_COUNT: usize = 10;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::FRAME_COUNT;
    use crate::error::InvalidInput;
    use crate::game_trait::{GameEvent, ScoringGame};
    use crate::player::PlayerIndex;

    /// Create `n` display names "Player1", "Player2", ...
    pub fn make_names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Player{}", i + 1)).collect()
    }

    /// Feed a roll sequence, panicking on the first rejected roll.
    pub fn roll_series(game: &mut dyn ScoringGame, rolls: &[i32]) -> Vec<GameEvent> {
        let mut all_events = Vec::new();
        for &pins in rolls {
            match game.roll(pins) {
                Ok(events) => all_events.extend(events),
                Err(e) => panic!("roll of {pins} rejected: {e}"),
            }
        }
        all_events
    }

    /// Every player bowls two gutter balls for `frames` rounds.
    pub fn play_gutter_frames(game: &mut dyn ScoringGame, frames: usize) {
        let players = game.players().len();
        for _ in 0..frames {
            for _ in 0..players {
                roll_series(game, &[0, 0]);
            }
        }
    }

    /// Observable state used to check that a call changed nothing.
    #[derive(Debug, PartialEq, Eq)]
    pub struct Observed {
        pub next_player: PlayerIndex,
        pub current_frame: usize,
        pub pins_standing: u8,
        pub active: bool,
        pub scores: Vec<u32>,
    }

    pub fn observe(game: &dyn ScoringGame) -> Observed {
        Observed {
            next_player: game.next_player(),
            current_frame: game.current_frame(),
            pins_standing: game.pins_standing(),
            active: game.is_active(),
            scores: game
                .players()
                .keys()
                .map(|&p| game.player_score(p))
                .collect(),
        }
    }

    // ================================================================
    // Game Trait Contract Tests
    // ================================================================
    // Every ScoringGame implementation must pass these. Game crates call
    // them from their own #[cfg(test)] modules with a freshly created game.

    /// Out-of-range and over-standing rolls are rejected without side effects.
    pub fn contract_rejected_roll_leaves_state_unchanged(game: &mut dyn ScoringGame) {
        roll_series(game, &[6]);
        let before = observe(game);

        assert_eq!(game.roll(-1), Err(InvalidInput::NegativePins(-1)));
        assert_eq!(game.roll(11), Err(InvalidInput::TooManyPins(11)));
        assert_eq!(
            game.roll(5),
            Err(InvalidInput::ExceedsStanding {
                standing: 4,
                pins: 5
            })
        );
        assert_eq!(before, observe(game), "Rejected rolls must not change state");

        // The rack still accepts a legal second ball afterwards
        assert!(game.roll(4).is_ok());
    }

    /// An open frame passes the turn to the next player after two rolls.
    pub fn contract_open_frame_passes_turn(game: &mut dyn ScoringGame) {
        let players = game.players().len();
        assert!(players >= 2, "contract needs at least two players");

        roll_series(game, &[1]);
        assert_eq!(game.next_player(), 0, "Turn must not pass mid-frame");
        roll_series(game, &[4]);
        assert_eq!(game.next_player(), 1, "Turn must pass after an open frame");
        assert_eq!(game.current_frame(), 0);
    }

    /// All players finish round k before anyone starts round k+1.
    pub fn contract_rounds_advance_in_lockstep(game: &mut dyn ScoringGame) {
        let players = game.players().len();
        for round in 0..3 {
            for player in 0..players {
                assert_eq!(game.current_frame(), round);
                assert_eq!(game.next_player(), player);
                roll_series(game, &[10]);
            }
        }
        assert_eq!(game.current_frame(), 3);
        assert_eq!(game.next_player(), 0);
    }

    /// The game ends after the last player's tenth frame and then ignores rolls.
    pub fn contract_game_ends_after_last_frame(game: &mut dyn ScoringGame) {
        assert!(game.is_active());
        assert_eq!(game.winner(), None, "No winner while the game is active");

        play_gutter_frames(game, FRAME_COUNT);

        assert!(!game.is_active(), "Game must be over after ten rounds");
        assert_eq!(game.winner(), Some(0));

        let before = observe(game);
        let events = game.roll(10).expect("rolls after game over are ignored");
        assert!(events.is_empty());
        assert_eq!(before, observe(game));
    }
}
