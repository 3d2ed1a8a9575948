use alloc::collections::VecDeque;
use core::fmt;
use hashbrown::HashSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first move until a win or a loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    mine_layout: MineLayout,
    board: Array2<CellState>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GameState {
    pub fn new(mine_layout: MineLayout) -> Self {
        let size = mine_layout.size();
        Self {
            mine_layout,
            board: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.mine_layout
    }

    pub fn size(&self) -> Coord2 {
        self.mine_layout.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    /// Number of flagged cells, revealed ones included.
    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn has_mine_at(&self, coords: Coord2) -> bool {
        self.mine_layout.contains_mine(coords)
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.board[coords.to_nd_index()]
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        Tile::from_state(
            self.cell_at(coords),
            self.mine_layout.contains_mine(coords),
            self.mine_layout.adjacent_mine_count(coords),
        )
    }

    /// Runs one player action and reports the status after the win check.
    pub fn apply(&mut self, action: Action) -> Result<GameStatus> {
        match action {
            Action::Reveal(coords) => {
                self.reveal(coords)?;
            }
            Action::ToggleFlag(coords) => self.toggle_flag(coords)?,
            Action::ToggleMark(coords) => self.toggle_mark(coords)?,
        }
        Ok(self.status)
    }

    /// Like [`GameState::apply`], for raw player coordinates that may not fit the board.
    ///
    /// A reveal outside the board is a no-op that still runs the win check,
    /// toggles outside the board are [`GameError::InvalidCoords`].
    pub fn apply_at(&mut self, kind: ActionKind, (row, col): (i64, i64)) -> Result<GameStatus> {
        match (Coord::try_from(row), Coord::try_from(col)) {
            (Ok(row), Ok(col)) => self.apply(Action::new(kind, (row, col))),
            _ => {
                self.check_not_finished()?;
                log::trace!("{:?} at ({}, {}) is off the board", kind, row, col);
                match kind {
                    ActionKind::Reveal => Ok(self.evaluate()),
                    ActionKind::Flag | ActionKind::Mark => Err(GameError::InvalidCoords),
                }
            }
        }
    }

    /// Reveals a cell, flooding outwards from cells without adjacent mines.
    ///
    /// Coordinates outside the board and cells that are already revealed are
    /// ignored. Flagged and marked cells are revealed like any other.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        self.check_not_finished()?;

        let outcome = if self.mine_layout.contains(coords) && !self.cell_at(coords).is_revealed() {
            self.reveal_region(coords)
        } else {
            log::trace!("Ignoring reveal at {:?}", coords);
            RevealOutcome::NoChange
        };

        self.evaluate();
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<()> {
        self.check_not_finished()?;
        let coords = self.mine_layout.validate_coords(coords)?;

        let cell = &mut self.board[coords.to_nd_index()];
        cell.toggle(CellState::FLAGGED);
        if cell.is_flagged() {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }

        self.evaluate();
        Ok(())
    }

    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<()> {
        self.check_not_finished()?;
        let coords = self.mine_layout.validate_coords(coords)?;

        self.board[coords.to_nd_index()].toggle(CellState::MARKED);

        self.evaluate();
        Ok(())
    }

    /// Win check: every mine flagged, or every safe cell revealed.
    ///
    /// Either condition alone is enough, so flagging all mines wins without
    /// revealing anything. Finished games keep their status.
    pub fn evaluate(&mut self) -> GameStatus {
        if self.status.is_finished() {
            return self.status;
        }

        let mut all_mines_flagged = true;
        let mut all_safe_revealed = true;
        for ((row, col), cell) in self.board.indexed_iter() {
            if self.mine_layout.contains_mine((row as Coord, col as Coord)) {
                all_mines_flagged &= cell.is_flagged();
            } else {
                all_safe_revealed &= cell.is_revealed();
            }
        }

        if all_mines_flagged || all_safe_revealed {
            log::debug!(
                "Game won, all mines flagged: {}, all safe cells revealed: {}",
                all_mines_flagged,
                all_safe_revealed
            );
            self.status = GameStatus::Won;
        }
        self.status
    }

    fn reveal_region(&mut self, coords: Coord2) -> RevealOutcome {
        let mut cells: CellCount = 0;
        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::new();
        visited.insert(coords);
        to_visit.push_back(coords);

        while let Some(visit_coords) = to_visit.pop_front() {
            if self.cell_at(visit_coords).is_revealed() {
                continue;
            }

            self.board[visit_coords.to_nd_index()].insert(CellState::REVEALED);
            self.revealed_count += 1;
            cells += 1;

            if self.mine_layout.contains_mine(visit_coords) {
                log::debug!("Hit mine at {:?}", visit_coords);
                self.triggered_mine = Some(visit_coords);
                self.status = GameStatus::Lost;
                return RevealOutcome::HitMine;
            }

            let adjacent_mines = self.mine_layout.adjacent_mine_count(visit_coords);
            log::trace!(
                "Revealed cell at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            // numbered cells border the region, only blanks keep spreading
            if adjacent_mines == 0 {
                for pos in self.mine_layout.iter_neighbors(visit_coords) {
                    if !self.cell_at(pos).is_revealed() && visited.insert(pos) {
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        log::debug!("Revealed {} cells from {:?}", cells, coords);
        RevealOutcome::Revealed { cells }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.size();

        f.write_str("  ")?;
        for col in 0..cols {
            write!(f, "{} ", col)?;
        }
        writeln!(f)?;

        for row in 0..rows {
            write!(f, "{} ", row)?;
            for col in 0..cols {
                write!(f, "{} ", self.tile_at((row, col)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
