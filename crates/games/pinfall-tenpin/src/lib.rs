pub mod bowler;
pub mod display;
pub mod frame;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use pinfall_core::FRAME_COUNT;
use pinfall_core::error::InvalidInput;
use pinfall_core::game_trait::{GameEvent, GameMetadata, ScoringGame};
use pinfall_core::player::{PlayerIndex, roster};

use bowler::Bowler;
use display::display_slots;
use frame::Frame;

/// Complete state of a ten-pin game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenPinState {
    pub bowlers: Vec<Bowler>,
    pub current_player: PlayerIndex,
    /// Round shared by all players; everyone bowls frame k before frame k+1.
    pub current_frame: usize,
    pub active: bool,
}

/// One row of a player's results table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameView {
    pub slots: Vec<String>,
    pub score: u32,
    pub accumulated_score: u32,
    pub is_complete: bool,
    pub contains_strike: bool,
    pub contains_spare: bool,
}

impl From<&Frame> for FrameView {
    fn from(frame: &Frame) -> Self {
        Self {
            slots: display_slots(frame),
            score: frame.score(),
            accumulated_score: frame.accumulated_score(),
            is_complete: frame.is_complete(),
            contains_strike: frame.contains_strike(),
            contains_spare: frame.contains_spare(),
        }
    }
}

/// A player's line on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub player: PlayerIndex,
    pub name: String,
    pub score: u32,
    pub frames: Vec<FrameView>,
}

/// Everything a scoreboard needs, in one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub lines: Vec<ScoreLine>,
    pub next_player: PlayerIndex,
    pub current_frame: usize,
    pub active: bool,
    pub winner: Option<PlayerIndex>,
}

/// Multi-player ten-pin bowling, implementing `ScoringGame`.
#[derive(Debug, Clone)]
pub struct TenPinGame {
    state: TenPinState,
}

impl TenPinGame {
    /// Start a game for the given players, bowling in the given order.
    ///
    /// # Panics
    ///
    /// Panics if `names` is empty.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let bowlers: Vec<Bowler> = roster(names).into_iter().map(Bowler::new).collect();
        assert!(!bowlers.is_empty(), "a game needs at least one player");
        Self {
            state: TenPinState {
                bowlers,
                current_player: 0,
                current_frame: 0,
                active: true,
            },
        }
    }

    /// Metadata without a game instance, so front ends can check a roster
    /// before creating one.
    pub fn game_metadata() -> GameMetadata {
        GameMetadata {
            name: "Ten-Pin".to_string(),
            description: "Ten frames of ten-pin bowling with strike and spare bonuses."
                .to_string(),
            min_players: 1,
            frame_count: FRAME_COUNT as u8,
        }
    }

    /// Accessor for the current game state.
    pub fn state(&self) -> &TenPinState {
        &self.state
    }

    pub fn bowler(&self, player: PlayerIndex) -> &Bowler {
        &self.state.bowlers[player]
    }

    /// The player's ten frames as display-ready rows.
    pub fn player_results_table(&self, player: PlayerIndex) -> Vec<FrameView> {
        self.bowler(player)
            .frames()
            .iter()
            .map(FrameView::from)
            .collect()
    }

    pub fn scoreboard(&self) -> Scoreboard {
        Scoreboard {
            lines: self
                .state
                .bowlers
                .iter()
                .map(|b| ScoreLine {
                    player: b.index(),
                    name: b.name().to_string(),
                    score: b.current_score(),
                    frames: self.player_results_table(b.index()),
                })
                .collect(),
            next_player: self.state.current_player,
            current_frame: self.state.current_frame,
            active: self.state.active,
            winner: self.winner(),
        }
    }

    fn is_last_player(&self) -> bool {
        self.state.current_player + 1 == self.state.bowlers.len()
    }

    fn is_last_frame(&self) -> bool {
        self.state.current_frame + 1 == FRAME_COUNT
    }

    fn advance_turn(&mut self, events: &mut Vec<GameEvent>) {
        if !self.is_last_player() {
            self.state.current_player += 1;
        } else if !self.is_last_frame() {
            self.state.current_frame += 1;
            self.state.current_player = 0;
        } else {
            self.state.active = false;
            let winner = self.linear_winner();
            tracing::info!(
                winner,
                score = self.state.bowlers[winner].current_score(),
                "Game over"
            );
            events.push(GameEvent::GameOver { winner });
            return;
        }

        tracing::debug!(
            player = self.state.current_player,
            frame = self.state.current_frame,
            "Turn passed"
        );
        events.push(GameEvent::TurnChange {
            player: self.state.current_player,
            frame: self.state.current_frame,
        });
    }

    /// First strictly-highest score, seeded with player 0 at zero points.
    fn linear_winner(&self) -> PlayerIndex {
        let mut winner = 0;
        let mut max_score = 0;
        for bowler in &self.state.bowlers {
            if bowler.current_score() > max_score {
                winner = bowler.index();
                max_score = bowler.current_score();
            }
        }
        winner
    }
}

impl ScoringGame for TenPinGame {
    fn metadata(&self) -> GameMetadata {
        Self::game_metadata()
    }

    fn roll(&mut self, pins: i32) -> Result<Vec<GameEvent>, InvalidInput> {
        if !self.state.active {
            return Ok(Vec::new());
        }

        let player = self.state.current_player;
        let round = self.state.current_frame;
        let bowler = &mut self.state.bowlers[player];
        let outcome = match bowler.roll(pins) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::debug!(player, pins, error = %e, "Rejected roll");
                return Err(e);
            },
        };
        tracing::debug!(player, frame = outcome.frame, pins = outcome.pins, "Roll registered");

        let mut events = vec![
            GameEvent::RollRegistered {
                player,
                frame: outcome.frame,
                pins: outcome.pins,
            },
            GameEvent::ScoreUpdate {
                player,
                score: bowler.current_score(),
            },
        ];

        if bowler.is_frame_complete(round) {
            events.push(GameEvent::FrameComplete {
                player,
                frame: round,
            });
            self.advance_turn(&mut events);
        }
        Ok(events)
    }

    fn players(&self) -> BTreeMap<PlayerIndex, String> {
        self.state
            .bowlers
            .iter()
            .map(|b| (b.index(), b.name().to_string()))
            .collect()
    }

    fn next_player(&self) -> PlayerIndex {
        self.state.current_player
    }

    fn player_score(&self, player: PlayerIndex) -> u32 {
        self.bowler(player).current_score()
    }

    fn current_frame(&self) -> usize {
        self.state.current_frame
    }

    fn pins_standing(&self) -> u8 {
        if !self.state.active {
            return 0;
        }
        self.bowler(self.state.current_player).pins_standing()
    }

    fn is_active(&self) -> bool {
        self.state.active
    }

    fn winner(&self) -> Option<PlayerIndex> {
        if self.state.active {
            return None;
        }
        Some(self.linear_winner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinfall_core::test_helpers::{
        contract_game_ends_after_last_frame, contract_open_frame_passes_turn,
        contract_rejected_roll_leaves_state_unchanged, contract_rounds_advance_in_lockstep,
        make_names, play_gutter_frames, roll_series,
    };

    fn one_player() -> TenPinGame {
        TenPinGame::new(["First Player"])
    }

    fn two_players() -> TenPinGame {
        TenPinGame::new(["First Player", "Second"])
    }

    fn slots(view: &FrameView) -> Vec<&str> {
        view.slots.iter().map(String::as_str).collect()
    }

    // ================================================================
    // Contract tests
    // ================================================================

    #[test]
    fn contract_rejected_roll() {
        contract_rejected_roll_leaves_state_unchanged(&mut two_players());
    }

    #[test]
    fn contract_turn_passing() {
        contract_open_frame_passes_turn(&mut two_players());
    }

    #[test]
    fn contract_lockstep() {
        contract_rounds_advance_in_lockstep(&mut TenPinGame::new(make_names(3)));
    }

    #[test]
    fn contract_game_end() {
        contract_game_ends_after_last_frame(&mut two_players());
        contract_game_ends_after_last_frame(&mut one_player());
    }

    // ================================================================
    // Scoring
    // ================================================================

    #[test]
    fn lists_players_in_order() {
        let game = two_players();
        let players = game.players();
        assert_eq!(players.len(), 2);
        assert_eq!(players[&0], "First Player");
        assert_eq!(players[&1], "Second");
    }

    #[test]
    fn gutter_frame() {
        let mut game = one_player();
        roll_series(&mut game, &[0, 0]);
        assert_eq!(game.player_score(0), 0);
        let table = game.player_results_table(0);
        assert!(!table[0].contains_strike);
        assert!(!table[0].contains_spare);
    }

    #[test]
    fn unfinished_frame_counts() {
        let mut game = one_player();
        roll_series(&mut game, &[1]);
        assert_eq!(game.player_score(0), 1);
    }

    #[test]
    fn open_frames() {
        let mut game = one_player();
        roll_series(&mut game, &[1, 4]);
        assert_eq!(game.player_score(0), 5);
        roll_series(&mut game, &[4, 5]);
        assert_eq!(game.player_score(0), 14);
    }

    #[test]
    fn spare_bonus() {
        let mut game = one_player();
        roll_series(&mut game, &[1, 4, 6, 4]);
        assert_eq!(game.player_score(0), 15);
        roll_series(&mut game, &[5]);
        assert_eq!(game.player_score(0), 25);
    }

    #[test]
    fn strike_bonus() {
        let mut game = one_player();
        roll_series(&mut game, &[1, 4, 10]);
        assert_eq!(game.player_score(0), 15);
        roll_series(&mut game, &[1, 3]);
        assert_eq!(game.player_score(0), 23);
    }

    #[test]
    fn tenth_frame_spare() {
        let mut game = one_player();
        play_gutter_frames(&mut game, 9);
        roll_series(&mut game, &[2, 8, 6]);

        assert_eq!(game.player_score(0), 16);
        let tenth = &game.player_results_table(0)[9];
        assert_eq!(slots(tenth), ["2", "/", "6"]);
        assert_eq!(tenth.score, 16);
        assert_eq!(tenth.accumulated_score, 16);
        assert!(!game.is_active());
    }

    #[test]
    fn tenth_frame_strikes() {
        let mut game = one_player();
        play_gutter_frames(&mut game, 9);
        roll_series(&mut game, &[10, 10, 10]);

        let tenth = &game.player_results_table(0)[9];
        assert_eq!(slots(tenth), ["X", "X", "X"]);
        assert_eq!(tenth.score, 30);
        assert_eq!(tenth.accumulated_score, 30);
    }

    #[test]
    fn first_player_table() {
        let mut game = two_players();
        roll_series(&mut game, &[1, 4, 3, 5, 6, 4, 3, 5, 10]);
        let table = game.player_results_table(0);

        assert_eq!(slots(&table[0]), ["1", "4"]);
        assert_eq!(table[0].score, 5);
        assert_eq!(table[0].accumulated_score, 5);

        assert_eq!(slots(&table[1]), ["6", "/"]);
        assert_eq!(table[1].score, 20);
        assert_eq!(table[1].accumulated_score, 25);

        assert_eq!(slots(&table[2]), ["", "X"]);
        assert_eq!(table[2].score, 10);
        assert_eq!(table[2].accumulated_score, 35);

        assert_eq!(slots(&table[3]), ["", ""]);
        assert_eq!(table.len(), FRAME_COUNT);
    }

    // ================================================================
    // Turn rotation
    // ================================================================

    #[test]
    fn next_player_after_gutter_frame() {
        let mut game = two_players();
        roll_series(&mut game, &[0]);
        assert_eq!(game.next_player(), 0);
        roll_series(&mut game, &[0]);
        assert_eq!(game.next_player(), 1);
    }

    #[test]
    fn next_player_after_spare() {
        let mut game = two_players();
        roll_series(&mut game, &[1, 4, 0, 0, 6, 4]);
        assert_eq!(game.next_player(), 1);
        assert_eq!(game.current_frame(), 1);
    }

    #[test]
    fn next_player_after_strike() {
        let mut game = two_players();
        roll_series(&mut game, &[1, 4, 0, 0, 10]);
        assert_eq!(game.next_player(), 1);
    }

    #[test]
    fn tenth_frame_spare_keeps_turn() {
        let mut game = two_players();
        for _ in 0..9 {
            roll_series(&mut game, &[10, 0, 0]);
        }
        roll_series(&mut game, &[6, 4]);
        assert_eq!(game.next_player(), 0);
        assert_eq!(game.current_frame(), 9);
        assert_eq!(game.pins_standing(), 10);
    }

    #[test]
    fn tenth_frame_strike_keeps_turn_for_two_balls() {
        let mut game = two_players();
        play_gutter_frames(&mut game, 9);
        roll_series(&mut game, &[10, 3]);
        assert_eq!(game.next_player(), 0);
        assert_eq!(game.pins_standing(), 7);
        roll_series(&mut game, &[7]);
        assert_eq!(game.next_player(), 1);
    }

    #[test]
    fn events_describe_the_roll() {
        let mut game = two_players();
        let events = game.roll(3).unwrap();
        assert_eq!(
            events,
            [
                GameEvent::RollRegistered {
                    player: 0,
                    frame: 0,
                    pins: 3
                },
                GameEvent::ScoreUpdate {
                    player: 0,
                    score: 3
                },
            ]
        );

        let events = game.roll(7).unwrap();
        assert!(events.contains(&GameEvent::FrameComplete {
            player: 0,
            frame: 0
        }));
        assert!(events.contains(&GameEvent::TurnChange {
            player: 1,
            frame: 0
        }));
    }

    // ================================================================
    // Winner
    // ================================================================

    #[test]
    fn winner_after_last_frame() {
        let mut game = two_players();
        play_gutter_frames(&mut game, 9);
        roll_series(&mut game, &[0, 0]);
        assert_eq!(game.winner(), None);
        let events = roll_series(&mut game, &[2, 8, 6]);

        assert!(!game.is_active());
        assert_eq!(game.winner(), Some(1));
        assert!(events.contains(&GameEvent::GameOver { winner: 1 }));
    }

    #[test]
    fn tie_goes_to_lowest_index() {
        let mut game = TenPinGame::new(make_names(3));
        play_gutter_frames(&mut game, 9);
        roll_series(&mut game, &[1, 0, 3, 0, 3, 0]);
        assert_eq!(game.winner(), Some(1));
    }

    #[test]
    fn all_gutter_game_reports_first_player() {
        let mut game = two_players();
        play_gutter_frames(&mut game, 10);
        assert_eq!(game.winner(), Some(0));
    }

    #[test]
    fn rolls_after_game_over_are_ignored() {
        let mut game = one_player();
        play_gutter_frames(&mut game, 10);
        assert_eq!(game.roll(10), Ok(Vec::new()));
        assert_eq!(game.roll(42), Ok(Vec::new()));
        assert_eq!(game.player_score(0), 0);
        assert_eq!(game.pins_standing(), 0);
    }

    // ================================================================
    // Snapshots
    // ================================================================

    #[test]
    fn scoreboard_matches_queries() {
        let mut game = two_players();
        roll_series(&mut game, &[10, 3, 4, 5]);
        let board = game.scoreboard();

        assert_eq!(board.lines.len(), 2);
        assert_eq!(board.lines[0].score, game.player_score(0));
        assert_eq!(board.lines[1].score, 7);
        assert_eq!(board.lines[1].name, "Second");
        assert_eq!(board.next_player, game.next_player());
        assert_eq!(board.current_frame, 1);
        assert!(board.active);
        assert_eq!(board.winner, None);
    }

    #[test]
    fn state_serializes_to_json() {
        let mut game = two_players();
        roll_series(&mut game, &[10, 3, 4]);
        let json = serde_json::to_string(game.state()).unwrap();
        let restored: TenPinState = serde_json::from_str(&json).unwrap();
        assert_eq!(&restored, game.state());
    }

    #[test]
    fn metadata_describes_the_card() {
        let game = one_player();
        let meta = game.metadata();
        assert_eq!(usize::from(meta.frame_count), FRAME_COUNT);
        assert_eq!(meta.min_players, 1);
        assert_eq!(meta.name, TenPinGame::game_metadata().name);
        assert_eq!(game.player_results_table(0).len(), usize::from(meta.frame_count));
    }

    #[test]
    #[should_panic(expected = "at least one player")]
    fn empty_roster_panics() {
        let _ = TenPinGame::new(Vec::<String>::new());
    }

    // ================================================================
    // Property-based tests (proptest)
    // ================================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn one_player_game() -> TenPinGame {
            TenPinGame::new(["Solo"])
        }

        /// Play seeded rolls, always choosing a legal pin count.
        fn play(game: &mut TenPinGame, seeds: &[u8]) {
            for &seed in seeds {
                if !game.is_active() {
                    break;
                }
                let standing = game.pins_standing();
                let pins = i32::from(seed % (standing + 1));
                game.roll(pins).unwrap();
            }
        }

        proptest! {
            #[test]
            fn totals_match_frame_scores(
                players in 1usize..4,
                seeds in proptest::collection::vec(0u8..=255, 0..90)
            ) {
                let mut game = TenPinGame::new(make_names(players));
                play(&mut game, &seeds);

                for p in 0..players {
                    let table = game.player_results_table(p);
                    let sum: u32 = table.iter().map(|f| f.score).sum();
                    prop_assert_eq!(sum, game.player_score(p));
                    prop_assert_eq!(table[FRAME_COUNT - 1].accumulated_score, sum);
                    prop_assert!(sum <= 300);
                    for pair in table.windows(2) {
                        prop_assert_eq!(
                            pair[1].accumulated_score,
                            pair[0].accumulated_score + pair[1].score
                        );
                    }
                }
            }

            #[test]
            fn strike_and_spare_frames_have_expected_rolls(
                seeds in proptest::collection::vec(0u8..=255, 0..25)
            ) {
                let mut game = one_player_game();
                play(&mut game, &seeds);

                for frame in &game.bowler(0).frames()[..FRAME_COUNT - 1] {
                    if frame.contains_strike() {
                        prop_assert_eq!(frame.rolls(), &[10u8][..]);
                    }
                    if frame.contains_spare() {
                        prop_assert_eq!(frame.rolls().len(), 2);
                        prop_assert_eq!(frame.rolls()[0] + frame.rolls()[1], 10);
                    }
                    if frame.is_complete() && !frame.has_pending_rolls() {
                        let own: u32 = frame.rolls().iter().map(|&p| u32::from(p)).sum();
                        prop_assert!(frame.score() >= own);
                    }
                }
            }

            #[test]
            fn game_always_finishes(
                players in 1usize..4,
                seeds in proptest::collection::vec(0u8..=255, 63..64)
            ) {
                // Twenty-one balls per player always complete a card
                let mut game = TenPinGame::new(make_names(players));
                let mut rolls = seeds.into_iter().cycle();
                for _ in 0..21 * players {
                    if !game.is_active() {
                        break;
                    }
                    let seed = rolls.next().unwrap_or(0);
                    let pins = i32::from(seed % (game.pins_standing() + 1));
                    game.roll(pins).unwrap();
                }
                prop_assert!(!game.is_active());
                prop_assert!(game.winner().is_some());
                for p in 0..players {
                    prop_assert!(game.bowler(p).is_finished());
                }
            }

            #[test]
            fn tenth_third_ball_only_after_mark(
                first in 0u8..=10,
                second_seed in 0u8..=255,
                third_seed in 0u8..=255,
            ) {
                let mut game = one_player_game();
                play_gutter_frames(&mut game, 9);
                game.roll(i32::from(first)).unwrap();
                let second = second_seed % (game.pins_standing() + 1);
                game.roll(i32::from(second)).unwrap();

                let marked = first == 10 || first + second == 10;
                prop_assert_eq!(game.is_active(), marked);
                if marked {
                    let third = third_seed % (game.pins_standing() + 1);
                    game.roll(i32::from(third)).unwrap();
                    prop_assert!(!game.is_active());
                    prop_assert_eq!(game.player_results_table(0)[9].slots.len(), 3);
                } else {
                    prop_assert_eq!(game.player_results_table(0)[9].slots.len(), 2);
                }
            }
        }
    }
}
