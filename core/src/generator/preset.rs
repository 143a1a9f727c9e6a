use super::*;

/// Hands out the same, already decided layout every time.
///
/// The layout is used as is, including a mine under the first reveal if it has one. Only the config matching the
/// layout's size and mine count is accepted.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMines(pub MineLayout);

impl MineGenerator for PresetMines {
    fn generate(&mut self, _config: GameConfig, safe: Coord2) -> MineLayout {
        if self.0.contains_mine(safe) {
            log::debug!("Preset layout has a mine under the first reveal at {:?}", safe);
        }
        self.0.clone()
    }

    fn check_config(&self, config: GameConfig) -> Result<()> {
        if self.0.game_config() == config {
            Ok(())
        } else {
            Err(GameError::InvalidBoardShape)
        }
    }
}
