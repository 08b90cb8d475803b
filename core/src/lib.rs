extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use grid::*;
pub use line::*;
pub use math::*;
pub use notify::*;
pub use shape::*;
pub use topology::*;
pub use transform::*;

mod error;
mod generator;
mod grid;
mod line;
mod math;
mod notify;
mod shape;
mod topology;
mod transform;

/// Board setup for a topology's default grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub topology: Topology,
    pub size: u16,
    pub mines: usize,
}

impl BoardConfig {
    pub const fn new_unchecked(topology: Topology, size: u16, mines: usize) -> Self {
        Self {
            topology,
            size,
            mines,
        }
    }

    pub fn new(topology: Topology, size: u16, mines: usize) -> Self {
        let size = size.max(1);
        Self::new_unchecked(topology, size, mines)
    }

    /// Builds the default grid and scatters the mines, counts above the shape count are clamped.
    pub fn build(&self, seed: u64) -> Result<Grid> {
        let mut grid = Grid::new(self.topology);
        grid.generate_default_grid(self.size)?;
        grid.set_random_mines(self.mines, seed);
        Ok(grid)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
