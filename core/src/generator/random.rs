use alloc::vec::Vec;
use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::SeedableRng;

use super::*;

/// Uniform placement over every cell outside the safe zone.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
    safe_zone: SafeZone,
}

impl RandomMineGenerator {
    pub fn new(seed: u64, safe_zone: SafeZone) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            safe_zone,
        }
    }

    pub fn from_entropy(safe_zone: SafeZone) -> Self {
        let seed = rand::random();
        log::debug!("seed: {}", seed);
        Self::new(seed, safe_zone)
    }

    fn effective_zone(&self, config: GameConfig, safe: Coord2) -> SafeZone {
        match self.safe_zone {
            SafeZone::Cell => SafeZone::Cell,
            SafeZone::Neighborhood => {
                let zone_size = 1 + Neighbors::new(safe, config.size).count() as CellCount;
                if config.mines + zone_size > config.total_cells() {
                    log::warn!("Not enough room to keep the neighborhood safe, fallback to single cell");
                    SafeZone::Cell
                } else {
                    SafeZone::Neighborhood
                }
            }
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: GameConfig, safe: Coord2) -> MineLayout {
        let mut excluded: Array2<bool> = Array2::default(config.size.to_nd_index());
        excluded[safe.to_nd_index()] = true;
        if self.effective_zone(config, safe) == SafeZone::Neighborhood {
            for pos in Neighbors::new(safe, config.size) {
                excluded[pos.to_nd_index()] = true;
            }
        }

        let candidates: Vec<Coord2> = excluded
            .indexed_iter()
            .filter(|&(_, &is_excluded)| !is_excluded)
            .map(|((x, y), _)| (x as Coord, y as Coord))
            .collect();

        let wanted = usize::from(config.mines);
        if wanted > candidates.len() {
            log::warn!(
                "Minefield cannot fit, requested {} but only {} cells are free",
                wanted,
                candidates.len()
            );
        }
        let amount = wanted.min(candidates.len());

        let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
        for i in index::sample(&mut self.rng, candidates.len(), amount).iter() {
            mine_mask[candidates[i].to_nd_index()] = true;
        }

        MineLayout::from_mine_mask_unchecked(mine_mask)
    }
}
