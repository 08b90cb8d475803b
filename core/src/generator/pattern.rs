use alloc::borrow::Cow;
use core::ops::RangeInclusive;

use super::*;

/// One polygon of a pattern motif, anchored at the lattice origin.
#[derive(Clone, Debug, PartialEq)]
pub struct SingleTile {
    path: ShapePath,
}

impl SingleTile {
    pub fn new(path: impl IntoIterator<Item = ShapePoint>) -> Self {
        Self {
            path: path.into_iter().collect(),
        }
    }

    pub fn path(&self) -> &[ShapePoint] {
        &self.path
    }

    pub fn translated(&self, offset: Point) -> ShapePath {
        self.path.iter().map(|p| p.translated(offset)).collect()
    }
}

/// Position of a lattice index along one axis of the stamped region.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Edge {
    Lower,
    Inner,
    Upper,
}

impl Edge {
    /// Axes only one cell wide have no distinct edges and count as inner.
    fn locate(index: i32, (low, high): (i32, i32)) -> Self {
        if low == high {
            Self::Inner
        } else if index == low {
            Self::Lower
        } else if index == high {
            Self::Upper
        } else {
            Self::Inner
        }
    }
}

/// Lattice cell handed to varying motifs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LatticeCell {
    /// Coefficients of the `a` and `b` repeat vectors.
    pub step: (i32, i32),
    pub edges: (Edge, Edge),
}

#[derive(Clone, Debug)]
pub enum Motif {
    Tiles(Vec<SingleTile>),
    /// Tiles depending on where the cell sits, used to trim half tiles at the region border.
    Varying(fn(LatticeCell) -> Vec<SingleTile>),
}

impl Motif {
    fn tiles_for(&self, cell: LatticeCell) -> Cow<'_, [SingleTile]> {
        match self {
            Self::Tiles(tiles) => Cow::Borrowed(tiles),
            Self::Varying(make) => Cow::Owned(make(cell)),
        }
    }
}

/// Inclusive ranges of lattice coefficients to stamp.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LatticeRegion {
    pub a: (i32, i32),
    pub b: (i32, i32),
}

impl LatticeRegion {
    pub fn new(a: RangeInclusive<i32>, b: RangeInclusive<i32>) -> Self {
        Self {
            a: (*a.start(), *a.end()),
            b: (*b.start(), *b.end()),
        }
    }

    /// `width × height` cells starting at the origin.
    pub fn rect(width: u16, height: u16) -> Self {
        Self::new(0..=i32::from(width) - 1, 0..=i32::from(height) - 1)
    }

    /// `size × size` cells around the origin.
    pub fn centered(size: u16) -> Self {
        let size = i32::from(size);
        let half = size / 2;
        Self::new(-half..=size - 1 - half, -half..=size - 1 - half)
    }

    /// Grows the upper end of each axis.
    pub fn widened(self, a_by: i32, b_by: i32) -> Self {
        Self {
            a: (self.a.0, self.a.1.saturating_add(a_by)),
            b: (self.b.0, self.b.1.saturating_add(b_by)),
        }
    }

    /// Saturates at `usize::MAX` for regions too large to address.
    pub fn cell_count(&self) -> usize {
        let span = |(low, high): (i32, i32)| {
            usize::try_from(i64::from(high) - i64::from(low) + 1).unwrap_or(0)
        };
        span(self.a).saturating_mul(span(self.b))
    }

    pub fn cells(self) -> impl Iterator<Item = LatticeCell> {
        (self.a.0..=self.a.1).flat_map(move |i| {
            (self.b.0..=self.b.1).map(move |j| LatticeCell {
                step: (i, j),
                edges: (Edge::locate(i, self.a), Edge::locate(j, self.b)),
            })
        })
    }
}

/// Named tiling recipe, a motif repeated along two lattice vectors.
#[derive(Clone, Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub a: Point,
    pub b: Point,
    pub motif: Motif,
    pub topology: Topology,
    adjust_region: Option<fn(LatticeRegion) -> LatticeRegion>,
}

impl Pattern {
    pub fn new(name: &'static str, a: Point, b: Point, motif: Motif, topology: Topology) -> Self {
        Self {
            name,
            a,
            b,
            motif,
            topology,
            adjust_region: None,
        }
    }

    /// Hook applied to every region before stamping.
    pub fn with_region_adjust(mut self, adjust: fn(LatticeRegion) -> LatticeRegion) -> Self {
        self.adjust_region = Some(adjust);
        self
    }

    pub fn region_for(&self, region: LatticeRegion) -> LatticeRegion {
        match self.adjust_region {
            Some(adjust) => adjust(region),
            None => region,
        }
    }

    pub fn offset(&self, (i, j): (i32, i32)) -> Point {
        self.a.scale(f64::from(i)) + self.b.scale(f64::from(j))
    }

    /// Translated copies of the motif for every cell of `region`.
    pub fn stamp(&self, region: LatticeRegion) -> Vec<ShapePath> {
        let region = self.region_for(region);
        let mut paths = Vec::with_capacity(region.cell_count());
        for cell in region.cells() {
            let offset = self.offset(cell.step);
            paths.extend(
                self.motif
                    .tiles_for(cell)
                    .iter()
                    .map(|tile| tile.translated(offset)),
            );
        }
        paths
    }

    /// Grid of `size × size` motif copies around the origin.
    pub fn build(&self, size: u16) -> Result<Grid> {
        Grid::generate(&PatternGenerator::new(self, LatticeRegion::centered(size)))
    }
}

/// [`ShapeGenerator`] stamping a pattern over a fixed region.
#[derive(Copy, Clone, Debug)]
pub struct PatternGenerator<'a> {
    pub pattern: &'a Pattern,
    pub region: LatticeRegion,
}

impl<'a> PatternGenerator<'a> {
    pub const fn new(pattern: &'a Pattern, region: LatticeRegion) -> Self {
        Self { pattern, region }
    }
}

impl ShapeGenerator for PatternGenerator<'_> {
    fn topology(&self) -> Topology {
        self.pattern.topology
    }

    fn generate(&self) -> Vec<ShapePath> {
        let paths = self.pattern.stamp(self.region);
        log::debug!(
            "Stamped {} tiles of pattern {}",
            paths.len(),
            self.pattern.name
        );
        paths
    }
}
