use smallvec::smallvec;

use super::*;

/// Rectangle of unit squares, the square with lower corner `(x, y)` covers `[x, x+1] × [y, y+1]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SquareGenerator {
    pub width: u16,
    pub height: u16,
}

impl SquareGenerator {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub const fn square(size: u16) -> Self {
        Self::new(size, size)
    }
}

impl ShapeGenerator for SquareGenerator {
    fn topology(&self) -> Topology {
        Topology::Square
    }

    fn generate(&self) -> Vec<ShapePath> {
        let mut paths = Vec::with_capacity(usize::from(self.width) * usize::from(self.height));
        for x in 0..i32::from(self.width) {
            for y in 0..i32::from(self.height) {
                paths.push(smallvec![
                    move_to(x, y),
                    line_to(x + 1, y),
                    line_to(x + 1, y + 1),
                    line_to(x, y + 1),
                ]);
            }
        }
        paths
    }
}

/// Octagons on a 3-unit stride with small diamonds filling the gaps between them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OctagonGenerator {
    pub size: u16,
}

impl OctagonGenerator {
    pub const fn new(size: u16) -> Self {
        Self { size }
    }
}

impl ShapeGenerator for OctagonGenerator {
    fn topology(&self) -> Topology {
        Topology::Square
    }

    fn generate(&self) -> Vec<ShapePath> {
        let size = i32::from(self.size);
        let half = size / 2;
        let max = half + size % 2;

        let mut paths = Vec::new();
        for i in -half..max {
            for j in -half..max {
                let x = i * 3;
                let y = j * 3;
                paths.push(smallvec![
                    move_to(x, y),
                    line_to(x + 1, y),
                    line_to(x + 2, y + 1),
                    line_to(x + 2, y + 2),
                    line_to(x + 1, y + 3),
                    line_to(x, y + 3),
                    line_to(x - 1, y + 2),
                    line_to(x - 1, y + 1),
                ]);
                if i < max - 1 && j > -half {
                    paths.push(smallvec![
                        move_to(x + 1, y),
                        line_to(x + 2, y + 1),
                        line_to(x + 3, y),
                        line_to(x + 2, y - 1),
                    ]);
                }
            }
        }
        paths
    }
}

/// Hexagon made of hexagons, `size` cells along each side.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HexagonGenerator {
    pub size: u16,
}

impl HexagonGenerator {
    pub const fn new(size: u16) -> Self {
        Self { size }
    }
}

impl ShapeGenerator for HexagonGenerator {
    fn topology(&self) -> Topology {
        Topology::Hex
    }

    fn generate(&self) -> Vec<ShapePath> {
        let size = i32::from(self.size);
        let half = size / 2;

        let mut paths = Vec::new();
        for i in 0..(size * 2 - 1).max(0) {
            // rows shrink past the middle to keep a hexagonal outline
            let first = (size - i - 1).max(0);
            let end = size * 2 - (i - size + 2).max(1);
            for j in first..end {
                let x = 2 * i + j - 5 * half;
                let y = j - i - half;
                paths.push(smallvec![
                    move_to(x, y),
                    line_to(x + 1, y),
                    line_to(x + 1, y + 1),
                    line_to(x, y + 2),
                    line_to(x - 1, y + 2),
                    line_to(x - 1, y + 1),
                ]);
            }
        }
        paths
    }
}

/// Large triangle of `(size - 1)²` unit triangles on the axial lattice.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TriangleGenerator {
    pub size: u16,
}

impl TriangleGenerator {
    pub const fn new(size: u16) -> Self {
        Self { size }
    }
}

impl ShapeGenerator for TriangleGenerator {
    fn topology(&self) -> Topology {
        Topology::Hex
    }

    fn generate(&self) -> Vec<ShapePath> {
        let size = i32::from(self.size);

        let mut paths = Vec::new();
        for i in 1..(size * 2 - 1) {
            let x = i / 2;
            // odd columns point one way, even columns the other
            let rows = (2 * size - i - 1) / 2;
            for y in 0..rows {
                let path = if i % 2 == 1 {
                    smallvec![move_to(x, y), line_to(x + 1, y), line_to(x, y + 1)]
                } else {
                    smallvec![move_to(x, y), line_to(x, y + 1), line_to(x - 1, y + 1)]
                };
                paths.push(path);
            }
        }
        paths
    }
}
