use crate::*;
pub use catalog::*;
pub use pattern::*;
pub use standard::*;

mod catalog;
mod pattern;
mod standard;

/// Produces the shape paths of a tiling, ready to be published into a [`Grid`].
pub trait ShapeGenerator {
    fn topology(&self) -> Topology;

    fn generate(&self) -> Vec<ShapePath>;
}

impl Grid {
    /// Builds a grid holding every shape of `generator`, with contacts computed.
    pub fn generate<G: ShapeGenerator + ?Sized>(generator: &G) -> Result<Self> {
        let mut grid = Self::new(generator.topology());
        grid.extend_shapes(generator.generate())?;
        Ok(grid)
    }
}

impl Topology {
    /// Generator used by [`Grid::generate_default_grid`].
    pub fn default_generator(self, size: u16) -> Box<dyn ShapeGenerator> {
        match self {
            Self::Square => Box::new(SquareGenerator::square(size)),
            Self::Hex => Box::new(HexagonGenerator::new(size)),
            Self::HexFlipped => Box::new(PatternGenerator::new(
                &TRIANGLE,
                LatticeRegion::centered(size),
            )),
        }
    }
}
