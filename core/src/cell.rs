use serde::{Deserialize, Serialize};

/// One board position as the engine stores it.
///
/// `adjacent_mines` is only meaningful for non-mine cells once mines have been placed. A revealed cell may keep a
/// stale `flagged` bit after the board is shown at the end of a game, readers should ignore it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub adjacent_mines: u8,
}

impl Cell {
    /// Whether a reveal may act on this cell.
    pub const fn is_openable(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    /// Whether the flood fill may open this cell without the player asking for it.
    pub const fn is_flood_candidate(self) -> bool {
        self.is_openable() && !self.is_mine
    }
}
