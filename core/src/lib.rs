#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, cols)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// The only board the console game plays: 10×10 with 10 mines.
    pub const CLASSIC: Self = Self::new_unchecked((10, 10), 10);

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((rows, cols): Coord2, mines: CellCount) -> Self {
        let rows = rows.clamp(1, Coord::MAX);
        let cols = cols.clamp(1, Coord::MAX);
        let mines = mines.min(mult(rows, cols));
        Self::new_unchecked((rows, cols), mines)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Where the mines are, plus the adjacency count of every cell.
///
/// Both grids are fixed once the layout is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent_mines: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap_or(CellCount::MAX);

        let mut adjacent_mines: Array2<u8> = Array2::zeros(mine_mask.dim());
        for ((row, col), count) in adjacent_mines.indexed_iter_mut() {
            let coords = (row as Coord, col as Coord);
            // at most 8 neighbors, the cast cannot truncate
            *count = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
        }

        Self {
            mine_mask,
            adjacent_mines,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        types::array_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap_or(CellCount::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent_mines[coords.to_nd_index()]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// A player action on one cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Reveal(Coord2),
    ToggleFlag(Coord2),
    ToggleMark(Coord2),
}

impl Action {
    pub const fn new(kind: ActionKind, coords: Coord2) -> Self {
        match kind {
            ActionKind::Reveal => Self::Reveal(coords),
            ActionKind::Flag => Self::ToggleFlag(coords),
            ActionKind::Mark => Self::ToggleMark(coords),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Reveal,
    Flag,
    Mark,
}

impl TryFrom<char> for ActionKind {
    type Error = GameError;

    fn try_from(value: char) -> Result<Self> {
        match value {
            'R' => Ok(Self::Reveal),
            'F' => Ok(Self::Flag),
            'M' => Ok(Self::Mark),
            other => Err(GameError::InvalidAction(other)),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed { cells: CellCount },
    HitMine,
}
