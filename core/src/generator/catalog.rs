use std::sync::LazyLock;

use super::*;

fn tile(points: &[(i32, i32)]) -> SingleTile {
    SingleTile::new(points.iter().enumerate().map(|(index, &(x, y))| {
        if index == 0 {
            move_to(x, y)
        } else {
            line_to(x, y)
        }
    }))
}

fn lozenges() -> Vec<SingleTile> {
    vec![
        tile(&[(0, 0), (1, 0), (0, 1), (-1, 1)]),
        tile(&[(0, 0), (1, 0), (1, -1), (0, -1)]),
        tile(&[(0, 0), (0, -1), (-1, 0), (-1, 1)]),
    ]
}

/// Rows are sheared by `b`, so trimming the row ends leaves straight slanted sides.
fn triangle_cell(cell: LatticeCell) -> Vec<SingleTile> {
    let lower = tile(&[(0, 0), (1, 0), (0, 1)]);
    let upper = tile(&[(1, 0), (1, 1), (0, 1)]);
    match cell.edges.0 {
        Edge::Lower => vec![upper],
        Edge::Upper => vec![lower],
        Edge::Inner => vec![lower, upper],
    }
}

pub static HEX: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(
        "Hex",
        Point::new(2.0, -1.0),
        Point::new(1.0, 1.0),
        Motif::Tiles(vec![tile(&[
            (0, 0),
            (1, 0),
            (1, 1),
            (0, 2),
            (-1, 2),
            (-1, 1),
        ])]),
        Topology::Hex,
    )
});

pub static TRIANGLE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(
        "Triangle",
        Point::new(1.0, 0.0),
        Point::new(-1.0, 1.0),
        Motif::Varying(triangle_cell),
        Topology::HexFlipped,
    )
    .with_region_adjust(|region| region.widened(1, 1))
});

pub static SQUARE: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(
        "Square",
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
        Motif::Tiles(vec![tile(&[(0, 0), (1, 0), (1, 1), (0, 1)])]),
        Topology::Square,
    )
});

pub static LOZENGES: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(
        "Lozenges",
        Point::new(2.0, -1.0),
        Point::new(1.0, 1.0),
        Motif::Tiles(lozenges()),
        Topology::Hex,
    )
});

/// Same tiles as [`LOZENGES`], listed separately as the first tetrille.
pub static TETRILLE_1: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(
        "Tetrille 1",
        Point::new(2.0, -1.0),
        Point::new(1.0, 1.0),
        Motif::Tiles(lozenges()),
        Topology::Hex,
    )
});

pub static TETRILLE_2: LazyLock<Pattern> = LazyLock::new(|| {
    Pattern::new(
        "Tetrille 2",
        Point::new(5.0, -1.0),
        Point::new(1.0, 4.0),
        Motif::Tiles(vec![
            tile(&[(0, 0), (2, 0), (3, -1), (3, -2), (2, -2)]),
            tile(&[(0, 0), (2, 0), (2, 1), (1, 2), (0, 2)]),
            tile(&[(0, 0), (0, 2), (-1, 3), (-2, 3), (-2, 2)]),
            tile(&[(0, 0), (-2, 2), (-3, 2), (-3, 1), (-2, 0)]),
            tile(&[(0, 0), (-2, 0), (-2, -1), (-1, -2), (0, -2)]),
            tile(&[(0, 0), (0, -2), (1, -3), (2, -3), (2, -2)]),
        ]),
        Topology::Hex,
    )
});

/// Outline of the Tetrille 2 flower, split into triangles fanning out of the origin.
const TETRILLE_3_RIM: [(i32, i32); 18] = [
    (2, -2),
    (3, -2),
    (3, -1),
    (2, 0),
    (2, 1),
    (1, 2),
    (0, 2),
    (-1, 3),
    (-2, 3),
    (-2, 2),
    (-3, 2),
    (-3, 1),
    (-2, 0),
    (-2, -1),
    (-1, -2),
    (0, -2),
    (1, -3),
    (2, -3),
];

pub static TETRILLE_3: LazyLock<Pattern> = LazyLock::new(|| {
    let tiles = (0..TETRILLE_3_RIM.len())
        .map(|index| {
            let from = TETRILLE_3_RIM[index];
            let to = TETRILLE_3_RIM[(index + 1) % TETRILLE_3_RIM.len()];
            tile(&[(0, 0), from, to])
        })
        .collect();
    Pattern::new(
        "Tetrille 3",
        Point::new(5.0, -1.0),
        Point::new(1.0, 4.0),
        Motif::Tiles(tiles),
        Topology::Hex,
    )
});

pub static COMPLEX_1: LazyLock<Pattern> = LazyLock::new(|| {
    let mut tiles = lozenges();
    tiles.extend([
        tile(&[(1, 0), (0, 1), (0, 2), (2, 0)]),
        tile(&[(1, 0), (2, 0), (2, -2), (1, -1)]),
        tile(&[(1, -1), (2, -2), (0, -2), (0, -1)]),
        tile(&[(0, -1), (0, -2), (-2, 0), (-1, 0)]),
        tile(&[(-1, 0), (-2, 0), (-2, 2), (-1, 1)]),
        tile(&[(-1, 1), (-2, 2), (0, 2), (0, 1)]),
    ]);
    Pattern::new(
        "Complex 1",
        Point::new(4.0, -2.0),
        Point::new(2.0, 2.0),
        Motif::Tiles(tiles),
        Topology::Hex,
    )
});

/// Every built-in pattern, in menu order.
pub fn patterns() -> [&'static Pattern; 8] {
    [
        &HEX,
        &TRIANGLE,
        &SQUARE,
        &LOZENGES,
        &TETRILLE_1,
        &TETRILLE_2,
        &TETRILLE_3,
        &COMPLEX_1,
    ]
}

pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    patterns()
        .into_iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}
