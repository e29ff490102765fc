use serde::{Deserialize, Serialize};

/// Zero-based position of a player in the turn order.
pub type PlayerIndex = usize;

/// A named participant, fixed for the lifetime of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub index: PlayerIndex,
    pub display_name: String,
}

impl Player {
    pub fn new(index: PlayerIndex, display_name: impl Into<String>) -> Self {
        Self {
            index,
            display_name: display_name.into(),
        }
    }
}

/// Build the turn order from display names, assigning sequential indices.
pub fn roster<I, S>(names: I) -> Vec<Player>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Player::new(index, name))
        .collect()
}
