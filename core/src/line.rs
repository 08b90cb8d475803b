use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Points produced by expanding a single line, most edges have only a handful.
pub type LinePoints = SmallVec<[Point; 4]>;

/// Longest lattice walk [`Line::lattice_points`] performs, longer edges keep only their endpoints.
pub const MAX_LATTICE_STEPS: u64 = 1 << 16;

/// Directed segment between two grid-local points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p1: Point,
    pub p2: Point,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

impl Line {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn dx(&self) -> f64 {
        self.p2.x - self.p1.x
    }

    pub fn dy(&self) -> f64 {
        self.p2.y - self.p1.y
    }

    pub fn is_degenerate(&self) -> bool {
        self.size_sq() <= EPSILON * EPSILON
    }

    /// Direction in degrees within `[0, 360)`, zero-length lines report `0`.
    pub fn rotation(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        wrap_angle(to_deg(self.dy().atan2(self.dx())))
    }

    pub fn size_sq(&self) -> f64 {
        self.p2.distance_sq(self.p1)
    }

    /// Same or opposite direction.
    pub fn is_parallel(&self, other: &Line) -> bool {
        let rotation = self.rotation();
        let other_rotation = other.rotation();
        approx(rotation, other_rotation) || approx(rotation, inverse_angle(other_rotation))
    }

    /// Whether `point` lies on the segment, endpoints included.
    pub fn is_between(&self, point: Point) -> bool {
        self.on_line_within(point, 0.0)
    }

    /// Whether `point` lies strictly inside the segment, at least [`EPSILON`] away from both ends.
    pub fn is_between_exclusive(&self, point: Point) -> bool {
        self.on_line_within(point, EPSILON)
    }

    fn on_line_within(&self, point: Point, margin: f64) -> bool {
        let Line { p1, p2 } = *self;
        let dxc = point.x - p1.x;
        let dyc = point.y - p1.y;
        let dxl = self.dx();
        let dyl = self.dy();

        let cross = dxc * dyl - dyc * dxl;
        if cross.abs() > EPSILON {
            return false;
        }

        // compare along the dominant axis
        let (start, end, value) = if dxl.abs() >= dyl.abs() {
            (p1.x, p2.x, point.x)
        } else {
            (p1.y, p2.y, point.y)
        };
        let (low, high) = if start <= end { (start, end) } else { (end, start) };

        if margin > 0.0 {
            low + margin < value && value < high - margin
        } else {
            low <= value && value <= high
        }
    }

    /// General segment intersection, touching and collinear overlapping segments also count.
    pub fn intersects(&self, other: &Line) -> bool {
        use Orientation::*;

        let (p1, q1) = (self.p1, self.p2);
        let (p2, q2) = (other.p1, other.p2);

        let o1 = orientation(p1, q1, p2);
        let o2 = orientation(p1, q1, q2);
        let o3 = orientation(p2, q2, p1);
        let o4 = orientation(p2, q2, q1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Collinear && on_segment(p1, p2, q1))
            || (o2 == Collinear && on_segment(p1, q2, q1))
            || (o3 == Collinear && on_segment(p2, p1, q2))
            || (o4 == Collinear && on_segment(p2, q1, q2))
    }

    /// Every lattice point on the segment, in order from `p1` to `p2`.
    ///
    /// When both deltas are whole numbers the segment is walked in `gcd(|dx|, |dy|)` equal steps, so
    /// points where a neighbour's vertex sits in the middle of this edge are included. Otherwise only
    /// the endpoints are returned, as they are for walks longer than [`MAX_LATTICE_STEPS`].
    pub fn lattice_points(&self) -> LinePoints {
        if self.is_degenerate() {
            return smallvec![self.p1];
        }

        let (Some(dx), Some(dy)) = (as_integral(self.dx()), as_integral(self.dy())) else {
            return smallvec![self.p1, self.p2];
        };

        let steps = gcd(dx.unsigned_abs(), dy.unsigned_abs());
        if steps > MAX_LATTICE_STEPS {
            log::warn!("Edge spans {steps} lattice steps, only its endpoints are used");
            return smallvec![self.p1, self.p2];
        }
        let step = Point::new(dx as f64 / steps as f64, dy as f64 / steps as f64);
        (0..=steps)
            .map(|k| self.p1 + step.scale(k as f64))
            .collect()
    }
}

fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);

    if val.abs() <= EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Given collinear `p`, `q`, `r`, checks whether `q` lies on segment `pr`.
fn on_segment(p: Point, q: Point, r: Point) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x1: i32, y1: i32, x2: i32, y2: i32) -> Line {
        Line::new((x1, y1).into(), (x2, y2).into())
    }

    #[test]
    fn crossing_diagonals_intersect() {
        assert!(line(0, 0, 2, 2).intersects(&line(0, 2, 2, 0)));
    }

    #[test]
    fn parallel_segments_do_not_intersect() {
        let a = line(0, 0, 1, 0);
        let b = line(0, 1, 1, 1);
        assert!(a.is_parallel(&b));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn touching_and_overlapping_segments_intersect() {
        assert!(line(0, 0, 1, 0).intersects(&line(1, 0, 1, 1)));
        assert!(line(0, 0, 2, 0).intersects(&line(1, 0, 3, 0)));
        assert!(!line(0, 0, 1, 0).intersects(&line(2, 0, 3, 0)));
    }

    #[test]
    fn degenerate_line_only_meets_segments_through_its_point() {
        let dot = line(1, 0, 1, 0);
        assert_eq!(dot.rotation(), 0.0);
        assert!(dot.intersects(&line(0, 0, 2, 0)));
        assert!(!dot.intersects(&line(0, 1, 2, 1)));
        assert!(dot.intersects(&dot));
    }

    #[test]
    fn rotation_is_wrapped_and_parallel_detects_opposites() {
        assert!(approx(line(0, 0, 0, -1).rotation(), 270.0));
        assert!(approx(line(0, 0, -1, 0).rotation(), 180.0));
        assert!(line(0, 0, 1, 1).is_parallel(&line(3, 3, 2, 2)));
        assert!(!line(0, 0, 1, 1).is_parallel(&line(0, 0, 1, 0)));
    }

    #[test]
    fn between_respects_endpoints() {
        let l = line(2, 2, 0, 0);
        assert!(l.is_between((1, 1).into()));
        assert!(l.is_between((0, 0).into()));
        assert!(!l.is_between_exclusive((0, 0).into()));
        assert!(l.is_between_exclusive((1, 1).into()));
        assert!(!l.is_between((3, 3).into()));
        assert!(!l.is_between((1, 0).into()));

        let steep = line(0, 0, 1, 3);
        assert!(steep.is_between(Point::new(0.5, 1.5)));
        assert!(!steep.is_between(Point::new(1.0 / 3.0, 4.0)));
    }

    #[test]
    fn lattice_points_include_mid_edge_points() {
        let points = line(0, 0, 2, -4).lattice_points();
        assert_eq!(
            points.as_slice(),
            &[
                Point::new(0.0, 0.0),
                Point::new(1.0, -2.0),
                Point::new(2.0, -4.0)
            ]
        );
        assert_eq!(line(0, 0, 3, 1).lattice_points().len(), 2);
        assert_eq!(line(4, 4, 4, 4).lattice_points().len(), 1);

        let fractional = Line::new(Point::ZERO, Point::new(0.5, 0.25));
        assert_eq!(fractional.lattice_points().len(), 2);
    }

    #[test]
    fn long_edges_keep_only_endpoints() {
        let capped = Line::new(Point::ZERO, Point::new(1e12, 0.0));
        assert_eq!(
            capped.lattice_points().as_slice(),
            &[Point::ZERO, Point::new(1e12, 0.0)]
        );

        let huge = Line::new(Point::ZERO, Point::new(0.0, 1e30));
        assert_eq!(huge.lattice_points().len(), 2);

        let limit = MAX_LATTICE_STEPS as f64;
        let walked = Line::new(Point::ZERO, Point::new(limit, 0.0));
        assert_eq!(walked.lattice_points().len() as u64, MAX_LATTICE_STEPS + 1);
    }
}
