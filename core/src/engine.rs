use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress, on the first reveal
/// - InProgress -> Won
/// - InProgress -> Lost
/// - any -> NotStarted, only through a new game or restart
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No mines placed and nothing revealed yet
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GamePhase {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// Indicates the game has ended and no moves are accepted anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Owns one board and every counter derived from it.
///
/// All operations run to completion before returning and take `&mut self`, callers sharing an engine across threads
/// have to serialize access themselves.
#[derive(Clone, Debug)]
pub struct Engine<G = RandomMineGenerator, C = SystemClock> {
    config: GameConfig,
    cells: Array2<Cell>,
    phase: GamePhase,
    // mines actually placed, the config count until the first reveal
    mine_count: CellCount,
    revealed_count: CellCount,
    flags_remaining: CellCount,
    started_at: Option<Instant>,
    final_secs: Option<u64>,
    generator: G,
    clock: C,
}

impl Engine {
    /// Engine with randomly seeded placement and the system clock.
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_generator(
            config,
            RandomMineGenerator::from_entropy(SafeZone::default()),
        )
    }
}

impl<G: MineGenerator> Engine<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Result<Self> {
        Self::with_parts(config, generator, SystemClock)
    }
}

impl Engine<PresetMines> {
    /// Engine that will use exactly `layout` once the first cell is revealed.
    pub fn with_layout(layout: MineLayout) -> Result<Self> {
        let config = GameConfig::new(layout.size(), layout.mine_count())?;
        Self::with_generator(config, PresetMines(layout))
    }
}

impl<G: MineGenerator, C: Clock> Engine<G, C> {
    pub fn with_parts(config: GameConfig, generator: G, clock: C) -> Result<Self> {
        let config = GameConfig::new(config.size, config.mines)?;
        generator.check_config(config)?;
        Ok(Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            phase: GamePhase::NotStarted,
            mine_count: config.mines,
            revealed_count: 0,
            flags_remaining: config.mines,
            started_at: None,
            final_secs: None,
            generator,
            clock,
        })
    }

    /// Replaces the board with a fresh one for `config`, leaving the current game untouched if `config` is invalid
    /// or the generator cannot produce it.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        let config = GameConfig::new(config.size, config.mines)?;
        self.generator.check_config(config)?;
        self.reset(config);
        Ok(())
    }

    /// Starts over with the current configuration.
    pub fn restart(&mut self) {
        self.reset(self.config);
    }

    fn reset(&mut self, config: GameConfig) {
        log::debug!("New game: {:?}", config);
        self.config = config;
        self.cells = Array2::default(config.size.to_nd_index());
        self.phase = GamePhase::NotStarted;
        self.mine_count = config.mines;
        self.revealed_count = 0;
        self.flags_remaining = config.mines;
        self.started_at = None;
        self.final_secs = None;
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    /// Revealed cells so far, the mine that ended a lost game included.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<Cell> {
        in_bounds(coords, self.size()).then(|| self.cells[coords.to_nd_index()])
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((x, y), &cell)| ((x as Coord, y as Coord), cell))
    }

    /// Whole seconds since the first reveal, 0 before it, frozen once the game is over.
    pub fn elapsed_secs(&self) -> u64 {
        match self.phase {
            GamePhase::NotStarted => 0,
            GamePhase::InProgress => self.running_secs(),
            GamePhase::Won | GamePhase::Lost => self.final_secs.unwrap_or(0),
        }
    }

    fn running_secs(&self) -> u64 {
        self.started_at
            .map(|started_at| {
                self.clock
                    .now()
                    .saturating_duration_since(started_at)
                    .as_secs()
            })
            .unwrap_or(0)
    }

    /// Opens a hidden, unflagged cell. The first successful call places the mines around it.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.phase.is_finished() || !in_bounds(coords, self.size()) {
            return RevealOutcome::NoChange;
        }
        if !self.cells[coords.to_nd_index()].is_openable() {
            return RevealOutcome::NoChange;
        }

        if !self.phase.is_started() {
            self.place_mines(coords);
            self.phase = GamePhase::InProgress;
            let now = self.clock.now();
            self.started_at = Some(now);
            log::debug!("started at {:?}", now);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        cell.is_revealed = true;
        self.revealed_count += 1;
        let Cell {
            is_mine,
            adjacent_mines,
            ..
        } = *cell;

        if is_mine {
            log::debug!("Hit mine at {:?}", coords);
            self.end_game(false);
            return RevealOutcome::HitMine;
        }

        log::debug!("Revealed cell at {:?}, mine count: {}", coords, adjacent_mines);
        if adjacent_mines == 0 {
            self.flood_fill(coords);
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Breadth-first reveal starting from an already revealed zero cell.
    ///
    /// Numbered cells are opened but not expanded, flagged and mined cells are never touched. A cell is marked
    /// revealed before it can be queued, so each one is visited at most once.
    fn flood_fill(&mut self, start: Coord2) {
        let size = self.size();
        let mut to_visit = VecDeque::from([start]);

        while let Some(center) = to_visit.pop_front() {
            for pos in Neighbors::new(center, size) {
                let cell = &mut self.cells[pos.to_nd_index()];
                if !cell.is_flood_candidate() {
                    continue;
                }

                cell.is_revealed = true;
                self.revealed_count += 1;
                log::trace!(
                    "Flood opened cell at {:?}, mine count: {}",
                    pos,
                    cell.adjacent_mines
                );

                if cell.adjacent_mines == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    /// Flags or unflags a hidden cell, never placing more flags than there are mines.
    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.phase.is_finished() || !in_bounds(coords, self.size()) {
            return MarkOutcome::NoChange;
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed {
            return MarkOutcome::NoChange;
        }

        let outcome = if cell.is_flagged {
            cell.is_flagged = false;
            self.flags_remaining += 1;
            MarkOutcome::Unflagged
        } else if self.flags_remaining == 0 {
            return MarkOutcome::NoChange;
        } else {
            cell.is_flagged = true;
            self.flags_remaining -= 1;
            MarkOutcome::Flagged
        };

        // never true here, flags reveal nothing
        self.check_win();
        outcome
    }

    /// Copies the generated layout onto the board and counts adjacency from the board itself, so a layout of the
    /// wrong shape is clipped instead of read out of bounds.
    fn place_mines(&mut self, safe: Coord2) {
        let layout = self.generator.generate(self.config, safe);
        if layout.size() != self.config.size {
            log::warn!(
                "Generated layout size {:?} does not match board size {:?}, clipping",
                layout.size(),
                self.config.size
            );
        }

        let mut placed: CellCount = 0;
        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            cell.is_mine = layout.contains_mine((x as Coord, y as Coord));
            if cell.is_mine {
                placed += 1;
            }
        }

        let size = self.size();
        let mine_mask = self.cells.map(|cell| cell.is_mine);
        for ((x, y), cell) in self.cells.indexed_iter_mut() {
            cell.adjacent_mines = if cell.is_mine {
                0
            } else {
                Neighbors::new((x as Coord, y as Coord), size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8
            };
        }

        if placed != self.config.mines {
            log::warn!(
                "Generated {} mines but {} were requested",
                placed,
                self.config.mines
            );
        }
        self.mine_count = placed;
        log::debug!("Placed {} mines, first reveal at {:?}", placed, safe);
    }

    /// Ends the game as won once every safe cell is open, returns whether it did.
    fn check_win(&mut self) -> bool {
        let safe_cells = cell_count(self.size()) - self.mine_count;
        if self.phase == GamePhase::InProgress && self.revealed_count == safe_cells {
            self.end_game(true);
            true
        } else {
            false
        }
    }

    /// Freezes the timer and shows the board: everything on a win, only the mines on a loss.
    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        self.final_secs = Some(self.running_secs());
        self.phase = if won { GamePhase::Won } else { GamePhase::Lost };
        for cell in self.cells.iter_mut() {
            if won || cell.is_mine {
                cell.is_revealed = true;
            }
        }

        log::debug!(
            "ended as {:?} after {} seconds",
            self.phase,
            self.final_secs.unwrap_or(0)
        );
    }
}
