use crate::*;
use serde::{Deserialize, Serialize};
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Decides where the mines go once the first cell to open is known.
pub trait MineGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout;

    /// Rejects configurations this generator cannot produce a matching layout for.
    fn check_config(&self, _config: GameConfig) -> Result<()> {
        Ok(())
    }
}

/// How much of the board around the first opened cell is kept free of mines.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafeZone {
    /// Only the opened cell itself.
    #[default]
    Cell,
    /// The opened cell and all of its neighbors, so the first reveal always floods.
    Neighborhood,
}
