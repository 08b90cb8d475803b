use serde::{Deserialize, Serialize};

use crate::*;

const SQRT3_OVER_2: f64 = 0.866_025_403_784_438_6;

/// Maps grid-local coordinates to model space and back.
pub trait Projection {
    fn to_vector(&self, point: Point) -> Point;

    /// Inverse of [`Projection::to_vector`].
    fn from_vector(&self, vector: Point) -> Point;

    /// Coordinate level neighbour test, independent from shape contacts.
    fn is_adjacent(&self, p1: Point, p2: Point) -> bool;
}

/// Unit square lattice with the y axis pointing up in model space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SquareLattice;

impl Projection for SquareLattice {
    fn to_vector(&self, Point { x, y }: Point) -> Point {
        Point::new(x, -y)
    }

    fn from_vector(&self, Point { x, y }: Point) -> Point {
        Point::new(x, -y)
    }

    fn is_adjacent(&self, p1: Point, p2: Point) -> bool {
        let dx = (p1.x - p2.x).abs();
        let dy = (p1.y - p2.y).abs();
        (approx(dx, 0.0) && approx(dy, 1.0)) || (approx(dy, 0.0) && approx(dx, 1.0))
    }
}

const AXIAL_NEIGHBORS: [(f64, f64); 6] = [
    (0.0, 1.0),
    (1.0, 0.0),
    (0.0, -1.0),
    (-1.0, 0.0),
    (-1.0, 1.0),
    (1.0, -1.0),
];

fn is_axial_neighbor(p1: Point, p2: Point) -> bool {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    AXIAL_NEIGHBORS
        .iter()
        .any(|&(nx, ny)| approx(dx, nx) && approx(dy, ny))
}

/// Axial triangular lattice, the x axis points down-right and the y axis up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct HexLattice;

impl Projection for HexLattice {
    fn to_vector(&self, Point { x, y }: Point) -> Point {
        Point::new(x * SQRT3_OVER_2, -y - x * 0.5)
    }

    fn from_vector(&self, Point { x, y }: Point) -> Point {
        let new_x = x / SQRT3_OVER_2;
        Point::new(new_x, -y - new_x * 0.5)
    }

    fn is_adjacent(&self, p1: Point, p2: Point) -> bool {
        is_axial_neighbor(p1, p2)
    }
}

/// Axial triangular lattice turned so the x axis is horizontal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlippedHexLattice;

impl Projection for FlippedHexLattice {
    fn to_vector(&self, Point { x, y }: Point) -> Point {
        Point::new(x + y * 0.5, -y * SQRT3_OVER_2)
    }

    fn from_vector(&self, Point { x, y }: Point) -> Point {
        let new_y = -y / SQRT3_OVER_2;
        Point::new(x - new_y * 0.5, new_y)
    }

    fn is_adjacent(&self, p1: Point, p2: Point) -> bool {
        is_axial_neighbor(p1, p2)
    }
}

/// Closed set of supported grid topologies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    #[default]
    Square,
    Hex,
    HexFlipped,
}

impl Topology {
    fn projection(self) -> &'static dyn Projection {
        match self {
            Self::Square => &SquareLattice,
            Self::Hex => &HexLattice,
            Self::HexFlipped => &FlippedHexLattice,
        }
    }
}

impl Projection for Topology {
    fn to_vector(&self, point: Point) -> Point {
        self.projection().to_vector(point)
    }

    fn from_vector(&self, vector: Point) -> Point {
        self.projection().from_vector(vector)
    }

    fn is_adjacent(&self, p1: Point, p2: Point) -> bool {
        self.projection().is_adjacent(p1, p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Topology; 3] = [Topology::Square, Topology::Hex, Topology::HexFlipped];

    #[test]
    fn vectors_round_trip() {
        for topology in ALL {
            for x in -4..=4 {
                for y in -4..=4 {
                    let point = Point::from((x, y));
                    let back = topology.from_vector(topology.to_vector(point));
                    assert!(back.approx_eq(point), "{topology:?} {point:?} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn square_flips_y() {
        let vector = Topology::Square.to_vector(Point::new(2.0, 3.0));
        assert_eq!(vector, Point::new(2.0, -3.0));
    }

    #[test]
    fn axial_unit_steps_have_unit_length() {
        for topology in [Topology::Hex, Topology::HexFlipped] {
            let origin = topology.to_vector(Point::ZERO);
            for (dx, dy) in AXIAL_NEIGHBORS {
                let step = topology.to_vector(Point::new(dx, dy));
                assert!(approx(step.distance_sq(origin), 1.0), "{topology:?} ({dx}, {dy})");
            }
        }
    }

    #[test]
    fn adjacency_offsets() {
        let origin = Point::ZERO;
        assert!(Topology::Square.is_adjacent(origin, Point::new(0.0, -1.0)));
        assert!(!Topology::Square.is_adjacent(origin, Point::new(1.0, 1.0)));
        assert!(!Topology::Square.is_adjacent(origin, origin));

        assert!(Topology::Hex.is_adjacent(origin, Point::new(1.0, -1.0)));
        assert!(Topology::Hex.is_adjacent(origin, Point::new(-1.0, 1.0)));
        assert!(!Topology::Hex.is_adjacent(origin, Point::new(1.0, 1.0)));
        assert!(Topology::HexFlipped.is_adjacent(Point::new(2.0, 2.0), Point::new(2.0, 3.0)));
    }
}
