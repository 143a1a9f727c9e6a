//! Board engine for a classic minesweeper game.
//!
//! [`Engine`] owns the grid and exposes coordinate based operations, a presentation shell only has to translate
//! its input into `(x, y)` pairs and draw whatever [`Engine::cell_at`] reports.
#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use types::*;

mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod layout;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// 16x16 with 40 mines.
    pub const DEFAULT: Self = Self::new_unchecked((16, 16), 40);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validates that at least one cell stays free of mines, which also rules out empty boards.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if mines >= cell_count(size) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_count(self.size)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }

    /// Whether this reveal ended the game in a loss.
    pub const fn hit_mine(self) -> bool {
        matches!(self, Self::HitMine)
    }
}
