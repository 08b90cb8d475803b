use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Whether a path vertex starts a new subpath or extends the current one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathVerb {
    Move,
    Line,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePoint {
    pub point: Point,
    pub verb: PathVerb,
}

impl ShapePoint {
    pub const fn is_move(&self) -> bool {
        matches!(self.verb, PathVerb::Move)
    }

    pub fn translated(self, offset: Point) -> Self {
        Self {
            point: self.point + offset,
            ..self
        }
    }
}

/// Vertex path of a shape, one or more implicitly closed subpaths.
pub type ShapePath = SmallVec<[ShapePoint; 8]>;

pub fn move_to(x: impl Into<f64>, y: impl Into<f64>) -> ShapePoint {
    move_to_point(Point::new(x.into(), y.into()))
}

pub fn move_to_point(point: Point) -> ShapePoint {
    ShapePoint {
        point,
        verb: PathVerb::Move,
    }
}

pub fn line_to(x: impl Into<f64>, y: impl Into<f64>) -> ShapePoint {
    line_to_point(Point::new(x.into(), y.into()))
}

pub fn line_to_point(point: Point) -> ShapePoint {
    ShapePoint {
        point,
        verb: PathVerb::Line,
    }
}

/// Player-facing state of a single shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeState {
    pub has_mine: bool,
    flagged: bool,
    pub revealed: bool,
    pub color: String,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            has_mine: false,
            flagged: false,
            revealed: false,
            color: String::from("default"),
        }
    }
}

impl ShapeState {
    /// Flags are hidden once the shape is revealed, the stored flag is kept.
    pub const fn is_flagged(&self) -> bool {
        self.flagged && !self.revealed
    }

    /// Returns whether anything changed, flags can't be placed on revealed shapes.
    pub fn set_flagged(&mut self, flagged: bool) -> bool {
        if self.revealed || self.flagged == flagged {
            return false;
        }
        self.flagged = flagged;
        true
    }

    pub fn display_state(&self, hovering: bool) -> DisplayState {
        use DisplayState::*;

        match (self.revealed, self.has_mine) {
            (true, true) => Exploded,
            (true, false) => Revealed,
            _ if self.is_flagged() => Flagged,
            _ if hovering => Hovering,
            _ => Normal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayState {
    Exploded,
    Revealed,
    Flagged,
    Hovering,
    Normal,
}

impl DisplayState {
    pub const fn as_str(self) -> &'static str {
        use DisplayState::*;
        match self {
            Exploded => "exploded",
            Revealed => "revealed",
            Flagged => "flagged",
            Hovering => "hovering",
            Normal => "normal",
        }
    }
}

/// One polygonal tile of the grid.
///
/// Geometry is fixed at construction, everything that depends on other shapes (contacts, the mine
/// number) lives on [`Grid`] which owns all shapes.
#[derive(Debug)]
pub struct Shape {
    points: ShapePath,
    corner_keys: HashSet<LatticeKey>,
    pub(crate) state: ShapeState,
    pub(crate) contacts: Vec<ShapeId>,
    pub(crate) updating: bool,
    pub(crate) notifier: Notifier<Subscriber>,
}

impl Shape {
    pub fn new(points: impl IntoIterator<Item = ShapePoint>) -> Result<Self> {
        let points: ShapePath = points.into_iter().collect();
        if points.is_empty() {
            return Err(GridError::EmptyPath);
        }

        let corner_keys = corner_points_of(&points)
            .into_iter()
            .map(LatticeKey::from)
            .collect();

        Ok(Self {
            points,
            corner_keys,
            state: ShapeState::default(),
            contacts: Vec::new(),
            updating: false,
            notifier: Notifier::default(),
        })
    }

    pub fn with_mine(mut self, has_mine: bool) -> Self {
        self.state.has_mine = has_mine;
        self
    }

    pub fn points(&self) -> &[ShapePoint] {
        &self.points
    }

    pub fn state(&self) -> &ShapeState {
        &self.state
    }

    pub fn contacts(&self) -> &[ShapeId] {
        &self.contacts
    }

    /// Outline edges, each subpath closed back to its first vertex, in path order.
    pub fn lines(&self) -> Vec<Line> {
        lines_of(&self.points)
    }

    /// Every lattice point covered by the outline, not only the vertices.
    pub fn corner_points(&self) -> Vec<Point> {
        corner_points_of(&self.points)
    }

    /// Corner adjacency, true when the outlines share at least one lattice point.
    pub fn touches(&self, other: &Shape) -> bool {
        let (small, large) = if self.corner_keys.len() <= other.corner_keys.len() {
            (&self.corner_keys, &other.corner_keys)
        } else {
            (&other.corner_keys, &self.corner_keys)
        };
        small.iter().any(|key| large.contains(key))
    }

    /// Edge adjacency, true when a pair of parallel edges shares two distinct lattice points.
    ///
    /// Stricter than [`Shape::touches`], shapes meeting only at a corner don't count.
    pub fn shares_edge(&self, other: &Shape) -> bool {
        let other_lines = other.lines();
        self.lines().iter().any(|l1| {
            other_lines.iter().filter(|l2| l1.is_parallel(l2)).any(|l2| {
                let keys: SmallVec<[LatticeKey; 4]> =
                    l1.lattice_points().into_iter().map(LatticeKey::from).collect();
                let mut shared = l2
                    .lattice_points()
                    .into_iter()
                    .map(LatticeKey::from)
                    .filter(|key| keys.contains(key));
                shared.next().is_some() && shared.next().is_some()
            })
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(self.points.iter().map(|p| p.point))
            .unwrap_or_else(|| Bounds::point(self.points[0].point))
    }

    /// Average of the path vertices.
    pub fn center(&self) -> Point {
        let sum = self
            .points
            .iter()
            .fold(Point::ZERO, |acc, p| acc + p.point);
        sum.scale(1.0 / self.points.len() as f64)
    }

    /// Even-odd containment test, points on the outline count as inside.
    pub fn contains(&self, point: Point) -> bool {
        let lines = self.lines();
        if lines.iter().any(|line| line.is_between(point)) {
            return true;
        }

        lines
            .iter()
            .filter(|Line { p1, p2 }| (p1.y > point.y) != (p2.y > point.y))
            .filter(|Line { p1, p2 }| {
                let cross_x = p1.x + (point.y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y);
                point.x < cross_x
            })
            .count()
            % 2
            == 1
    }

    /// SVG path data with every vertex mapped through `project`.
    pub fn svg_path(&self, project: impl Fn(Point) -> Point) -> String {
        let mut path = String::new();
        for (index, shape_point) in self.points.iter().enumerate() {
            let Point { x, y } = project(shape_point.point);
            // no "-0" in the output
            let (x, y) = (x + 0.0, y + 0.0);
            if index == 0 {
                path.push_str(&format!("M {x},{y}"));
            } else if shape_point.is_move() {
                path.push_str(&format!(" z M {x},{y}"));
            } else {
                path.push_str(&format!(" L {x},{y}"));
            }
        }
        path.push_str(" z");
        path
    }
}

fn lines_of(points: &[ShapePoint]) -> Vec<Line> {
    let mut lines = Vec::with_capacity(points.len());
    let mut first = points[0].point;
    let mut prev = first;
    for shape_point in &points[1..] {
        let point = shape_point.point;
        if shape_point.is_move() {
            lines.push(Line::new(prev, first));
            first = point;
        } else {
            lines.push(Line::new(prev, point));
        }
        prev = point;
    }
    lines.push(Line::new(prev, first));
    lines
}

fn corner_points_of(points: &[ShapePoint]) -> Vec<Point> {
    lines_of(points)
        .iter()
        .flat_map(|line| line.lattice_points())
        .collect()
}
