use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Player-visible state of a single cell.
    ///
    /// The three bits are independent: a cell may be both flagged and marked,
    /// and flags/marks are kept (but no longer displayed) once it is revealed.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct CellState: u8 {
        const REVEALED = 1 << 0;
        const FLAGGED = 1 << 1;
        const MARKED = 1 << 2;
    }
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        self.contains(Self::REVEALED)
    }

    pub const fn is_flagged(self) -> bool {
        self.contains(Self::FLAGGED)
    }

    pub const fn is_marked(self) -> bool {
        self.contains(Self::MARKED)
    }
}

/// What a cell looks like to the player.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Covered,
    Flagged,
    Marked,
    Revealed(u8),
    Mine,
}

impl Tile {
    pub const COVERED_SYMBOL: char = '-';
    pub const MINE_SYMBOL: char = 'X';
    pub const EMPTY_SYMBOL: char = ' ';
    pub const FLAG_SYMBOL: char = 'F';
    pub const MARK_SYMBOL: char = '?';

    /// Resolves the displayed tile, priority is revealed > flagged > marked > covered.
    pub const fn from_state(state: CellState, is_mine: bool, adjacent_mines: u8) -> Self {
        if state.is_revealed() {
            if is_mine {
                Self::Mine
            } else {
                Self::Revealed(adjacent_mines)
            }
        } else if state.is_flagged() {
            Self::Flagged
        } else if state.is_marked() {
            Self::Marked
        } else {
            Self::Covered
        }
    }

    pub fn symbol(self) -> char {
        use Tile::*;
        match self {
            Covered => Self::COVERED_SYMBOL,
            Flagged => Self::FLAG_SYMBOL,
            Marked => Self::MARK_SYMBOL,
            Revealed(0) => Self::EMPTY_SYMBOL,
            Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
            Mine => Self::MINE_SYMBOL,
        }
    }
}
