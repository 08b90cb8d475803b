use core::cell::OnceCell;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Index of a shape inside its [`Grid`].
pub type ShapeId = usize;

/// Which shapes count as neighbours for the mine number and the flood reveal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjacencyRule {
    /// Any shared outline point, corners included.
    #[default]
    Corner,
    /// Only shapes sharing a stretch of edge.
    Edge,
}

/// Owns every shape of a board along with its topology and view transform.
///
/// The shape list only grows, during play only per-shape state changes. Contacts are kept
/// symmetric by rebuilding them whenever shapes are added.
#[derive(Debug)]
pub struct Grid {
    topology: Topology,
    adjacency: AdjacencyRule,
    shapes: Vec<Shape>,
    pub(crate) transform: Transform,
    observers: Notifier<ShapeObserver>,
    bounds: OnceCell<Option<Bounds>>,
    vector_bounds: OnceCell<Option<Bounds>>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(Topology::default())
    }
}

impl Grid {
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            adjacency: AdjacencyRule::default(),
            shapes: Vec::new(),
            transform: Transform::default(),
            observers: Notifier::default(),
            bounds: OnceCell::new(),
            vector_bounds: OnceCell::new(),
        }
    }

    pub fn with_adjacency(mut self, adjacency: AdjacencyRule) -> Self {
        self.adjacency = adjacency;
        self.rebuild_contacts();
        self
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn adjacency(&self) -> AdjacencyRule {
        self.adjacency
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn ids(&self) -> core::ops::Range<ShapeId> {
        0..self.shapes.len()
    }

    pub fn validate_id(&self, id: ShapeId) -> Result<ShapeId> {
        if id < self.shapes.len() {
            Ok(id)
        } else {
            Err(GridError::InvalidShape(id))
        }
    }

    pub fn shape(&self, id: ShapeId) -> Result<&Shape> {
        self.shapes.get(id).ok_or(GridError::InvalidShape(id))
    }

    /// Adds a single shape and updates the contacts around it.
    pub fn add_shape(&mut self, points: impl IntoIterator<Item = ShapePoint>) -> Result<ShapeId> {
        let shape = Shape::new(points)?;
        let id = self.publish(vec![shape]).start;
        self.update_contacts(id)?;
        Ok(id)
    }

    /// Adds many shapes at once and rebuilds the contact graph.
    ///
    /// Every path is validated before anything is added, on error the grid is left untouched.
    pub fn extend_shapes<I, P>(&mut self, paths: I) -> Result<core::ops::Range<ShapeId>>
    where
        I: IntoIterator<Item = P>,
        P: IntoIterator<Item = ShapePoint>,
    {
        let shapes = paths
            .into_iter()
            .map(Shape::new)
            .collect::<Result<Vec<_>>>()?;
        let added = self.publish(shapes);
        self.rebuild_contacts();
        log::debug!(
            "Added {} shapes, grid now holds {}",
            added.len(),
            self.shapes.len()
        );
        Ok(added)
    }

    /// Fills the grid with the default generator of its topology.
    pub fn generate_default_grid(&mut self, size: u16) -> Result<()> {
        let generator = self.topology.default_generator(size);
        self.extend_shapes(generator.generate())?;
        Ok(())
    }

    fn publish(&mut self, shapes: Vec<Shape>) -> core::ops::Range<ShapeId> {
        let start = self.shapes.len();
        self.shapes.extend(shapes);
        for shape in &mut self.shapes[start..] {
            shape.notifier.subscribe(Subscriber::Grid);
        }
        self.invalidate_bounds();
        start..self.shapes.len()
    }

    fn invalidate_bounds(&mut self) {
        self.bounds.take();
        self.vector_bounds.take();
    }

    fn is_contact(&self, a: ShapeId, b: ShapeId) -> bool {
        let (a, b) = (&self.shapes[a], &self.shapes[b]);
        match self.adjacency {
            AdjacencyRule::Corner => a.touches(b),
            AdjacencyRule::Edge => a.touches(b) && a.shares_edge(b),
        }
    }

    fn compute_contacts(&self, id: ShapeId) -> Vec<ShapeId> {
        self.ids()
            .filter(|&other| other != id && self.is_contact(id, other))
            .collect()
    }

    /// Replaces the contacts of a single shape, returns the contacts it lost.
    fn refresh_contacts(&mut self, id: ShapeId) -> Vec<ShapeId> {
        let contacts = self.compute_contacts(id);
        let previous = core::mem::replace(&mut self.shapes[id].contacts, contacts);
        self.notify(id);
        let current = &self.shapes[id].contacts;
        previous
            .into_iter()
            .filter(|other| !current.contains(other))
            .collect()
    }

    /// Recomputes the contacts of `id` and of every shape that was or now is in contact with it.
    pub fn update_contacts(&mut self, id: ShapeId) -> Result<()> {
        let id = self.validate_id(id)?;
        if self.shapes[id].updating {
            return Ok(());
        }

        self.shapes[id].updating = true;
        let lost = self.refresh_contacts(id);
        let current = self.shapes[id].contacts.clone();
        for other in current.into_iter().chain(lost) {
            if !self.shapes[other].updating {
                self.refresh_contacts(other);
            }
        }
        self.shapes[id].updating = false;
        Ok(())
    }

    /// Rebuilds the whole contact graph.
    ///
    /// Shapes are bucketed by the lattice points of their outline, so only shapes sharing at least
    /// one point are ever compared. The result is the same as calling
    /// [`Grid::update_contacts`] on every shape, and shapes whose contacts changed are notified.
    pub fn rebuild_contacts(&mut self) {
        let mut index: HashMap<LatticeKey, SmallVec<[ShapeId; 6]>> = HashMap::new();
        for (id, shape) in self.shapes.iter().enumerate() {
            for point in shape.corner_points() {
                let bucket = index.entry(point.key()).or_default();
                if bucket.last() != Some(&id) {
                    bucket.push(id);
                }
            }
        }

        let all_contacts: Vec<Vec<ShapeId>> = self
            .ids()
            .map(|id| {
                let mut candidates: Vec<ShapeId> = self.shapes[id]
                    .corner_points()
                    .into_iter()
                    .filter_map(|point| index.get(&point.key()))
                    .flatten()
                    .copied()
                    .filter(|&other| other != id)
                    .collect();
                candidates.sort_unstable();
                candidates.dedup();
                if self.adjacency != AdjacencyRule::Corner {
                    candidates.retain(|&other| self.is_contact(id, other));
                }
                candidates
            })
            .collect();

        let mut changed = Vec::new();
        for (id, contacts) in all_contacts.into_iter().enumerate() {
            if self.shapes[id].contacts != contacts {
                self.shapes[id].contacts = contacts;
                changed.push(id);
            }
        }
        for &id in &changed {
            self.notify(id);
        }
        log::debug!(
            "Rebuilt contacts for {} shapes, {} changed",
            self.shapes.len(),
            changed.len()
        );
    }

    pub fn contacts(&self, id: ShapeId) -> Result<&[ShapeId]> {
        Ok(self.shape(id)?.contacts())
    }

    /// Number of mined contacts, always derived from the current contacts.
    pub fn number(&self, id: ShapeId) -> Result<usize> {
        let shape = self.shape(id)?;
        Ok(self.count_mined(&shape.contacts))
    }

    fn count_mined(&self, ids: &[ShapeId]) -> usize {
        ids.iter()
            .filter(|&&other| self.shapes[other].state.has_mine)
            .count()
    }

    pub fn state(&self, id: ShapeId) -> Result<&ShapeState> {
        Ok(self.shape(id)?.state())
    }

    pub fn display_state(&self, id: ShapeId, hovering: bool) -> Result<DisplayState> {
        Ok(self.state(id)?.display_state(hovering))
    }

    /// Reveals a shape and floods through contacts while the mine number is zero.
    ///
    /// Revealing an already revealed shape changes nothing. The flood uses an explicit stack and
    /// the revealed flag as its only guard, so every shape is visited at most once even on cyclic
    /// contact graphs.
    pub fn reveal(&mut self, id: ShapeId) -> Result<RevealOutcome> {
        use RevealOutcome::*;

        let id = self.validate_id(id)?;
        if self.shapes[id].state.revealed {
            return Ok(NoChange);
        }

        let mut outcome = NoChange;
        let mut to_visit = vec![id];
        while let Some(current) = to_visit.pop() {
            if self.shapes[current].state.revealed {
                continue;
            }
            self.shapes[current].state.revealed = true;
            self.notify(current);

            let shape = &self.shapes[current];
            if shape.state.has_mine {
                outcome = outcome | HitMine;
                continue;
            }
            outcome = outcome | Revealed;

            if self.count_mined(&shape.contacts) == 0 {
                to_visit.extend(
                    shape
                        .contacts
                        .iter()
                        .copied()
                        .filter(|&other| !self.shapes[other].state.revealed),
                );
            }
        }

        if outcome == Revealed && self.is_cleared() {
            outcome = Won;
        }
        Ok(outcome)
    }

    /// Whether every shape without a mine is revealed.
    pub fn is_cleared(&self) -> bool {
        self.shapes
            .iter()
            .all(|shape| shape.state.has_mine || shape.state.revealed)
    }

    pub fn set_flagged(&mut self, id: ShapeId, flagged: bool) -> Result<MarkOutcome> {
        let id = self.validate_id(id)?;
        if self.shapes[id].state.set_flagged(flagged) {
            self.notify(id);
            Ok(MarkOutcome::Changed)
        } else {
            Ok(MarkOutcome::NoChange)
        }
    }

    pub fn toggle_flag(&mut self, id: ShapeId) -> Result<MarkOutcome> {
        let flagged = self.state(id)?.is_flagged();
        self.set_flagged(id, !flagged)
    }

    pub fn set_mine(&mut self, id: ShapeId, has_mine: bool) -> Result<()> {
        let id = self.validate_id(id)?;
        if self.shapes[id].state.has_mine != has_mine {
            self.shapes[id].state.has_mine = has_mine;
            self.notify(id);
        }
        Ok(())
    }

    pub fn set_color(&mut self, id: ShapeId, color: impl Into<String>) -> Result<()> {
        let id = self.validate_id(id)?;
        self.shapes[id].state.color = color.into();
        self.notify(id);
        Ok(())
    }

    /// Places mines on `count` distinct shapes chosen uniformly at random.
    ///
    /// Counts above the number of shapes are clamped, returns how many shapes were picked.
    pub fn set_random_mines(&mut self, count: usize, seed: u64) -> usize {
        use rand::prelude::*;

        let total = self.shapes.len();
        let count = if count > total {
            log::warn!(
                "Too many mines requested, clamped, requested {} but only fits {}",
                count,
                total
            );
            total
        } else {
            count
        };

        let mut rng = SmallRng::seed_from_u64(seed);
        let mut pool: Vec<ShapeId> = self.ids().collect();
        let mut picked = Vec::with_capacity(count);
        for _ in 0..count {
            let index = rng.random_range(0..pool.len());
            picked.push(pool.swap_remove(index));
        }

        for id in picked {
            self.shapes[id].state.has_mine = true;
            self.notify(id);
        }
        count
    }

    /// Places `floor(len * ratio)` mines, `ratio` is clamped to `[0, 1]`.
    pub fn set_mine_ratio(&mut self, ratio: f64, seed: u64) -> usize {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        let count = (self.shapes.len() as f64 * ratio).floor() as usize;
        self.set_random_mines(count, seed)
    }

    pub fn mines_count(&self) -> usize {
        self.shapes.iter().filter(|s| s.state.has_mine).count()
    }

    /// Mines not yet accounted for by a flag or an explosion, negative when over-flagged.
    pub fn mines_left(&self) -> isize {
        let accounted = self
            .shapes
            .iter()
            .filter(|s| (s.state.revealed && s.state.has_mine) || s.state.is_flagged())
            .count();
        self.mines_count() as isize - accounted as isize
    }

    /// Clears every per-shape state and re-subscribes all shapes to the grid observers.
    ///
    /// Per-shape callbacks registered with [`Grid::subscribe_shape`] are dropped.
    pub fn reset_shapes(&mut self) {
        for shape in &mut self.shapes {
            shape.state = ShapeState::default();
            shape.notifier.unsubscribe_all();
            shape.notifier.subscribe(Subscriber::Grid);
        }
        for id in self.ids() {
            self.notify(id);
        }
    }

    /// Registers an observer for state changes of any shape.
    pub fn subscribe(
        &mut self,
        observer: impl FnMut(ShapeId, &ShapeState) + 'static,
    ) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        self.observers.unsubscribe(subscription)
    }

    /// Registers a callback for a single shape, it lasts until the next [`Grid::reset_shapes`].
    pub fn subscribe_shape(
        &mut self,
        id: ShapeId,
        callback: impl FnMut(ShapeId, &ShapeState) + 'static,
    ) -> Result<SubscriptionId> {
        let id = self.validate_id(id)?;
        Ok(self.shapes[id]
            .notifier
            .subscribe(Subscriber::Callback(Box::new(callback))))
    }

    fn notify(&mut self, id: ShapeId) {
        let Shape {
            notifier, state, ..
        } = &mut self.shapes[id];

        let mut forward = false;
        for subscriber in notifier.iter_mut() {
            match subscriber {
                Subscriber::Grid => forward = true,
                Subscriber::Callback(callback) => callback(id, state),
            }
        }

        if forward {
            for observer in self.observers.iter_mut() {
                observer(id, state);
            }
        }
    }

    /// Bounding box of every shape in grid-local coordinates.
    pub fn bounds(&self) -> Option<Bounds> {
        *self.bounds.get_or_init(|| {
            self.shapes
                .iter()
                .map(Shape::bounds)
                .reduce(Bounds::union)
        })
    }

    /// Bounding box of every shape vertex in model space.
    pub fn vector_bounds(&self) -> Option<Bounds> {
        *self.vector_bounds.get_or_init(|| {
            Bounds::from_points(
                self.shapes
                    .iter()
                    .flat_map(|shape| shape.points())
                    .map(|p| self.topology.to_vector(p.point)),
            )
        })
    }

    /// Model space center of the grid.
    pub fn center(&self) -> Point {
        self.vector_bounds()
            .map(|bounds| bounds.center())
            .unwrap_or(Point::ZERO)
    }

    /// Larger model space extent of the grid.
    pub fn span(&self) -> f64 {
        self.vector_bounds()
            .map(|bounds| bounds.span())
            .unwrap_or(0.0)
    }

    /// First shape containing the grid-local `point`.
    pub fn shape_at(&self, point: Point) -> Option<ShapeId> {
        self.shapes.iter().position(|shape| shape.contains(point))
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            topology: self.topology,
            adjacency: self.adjacency,
            shapes: self
                .shapes
                .iter()
                .map(|shape| ShapeSnapshot {
                    points: shape.points().iter().copied().collect(),
                    state: shape.state.clone(),
                })
                .collect(),
        }
    }

    /// Rebuilds a grid from a snapshot, contacts are recomputed from the geometry.
    pub fn from_snapshot(snapshot: GridSnapshot) -> Result<Self> {
        if let Some(index) = snapshot
            .shapes
            .iter()
            .position(|shape| shape.points.is_empty())
        {
            return Err(GridError::InvalidSnapshot(index));
        }

        let mut grid = Self::new(snapshot.topology);
        grid.adjacency = snapshot.adjacency;

        let (paths, states): (Vec<_>, Vec<_>) = snapshot
            .shapes
            .into_iter()
            .map(|shape| (shape.points, shape.state))
            .unzip();
        grid.extend_shapes(paths)?;
        for (shape, state) in grid.shapes.iter_mut().zip(states) {
            shape.state = state;
        }
        Ok(grid)
    }
}

/// Serializable copy of a grid's shapes and their state, without observers or view transform.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub topology: Topology,
    pub adjacency: AdjacencyRule,
    pub shapes: Vec<ShapeSnapshot>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeSnapshot {
    pub points: ShapePath,
    pub state: ShapeState,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn square_grid(size: u16) -> Grid {
        Grid::generate(&SquareGenerator::square(size)).unwrap()
    }

    /// Shape id of the unit square with lower corner `(x, y)` in a square grid.
    fn cell(grid: &Grid, x: i32, y: i32) -> ShapeId {
        grid.shape_at(Point::new(x as f64 + 0.5, y as f64 + 0.5))
            .unwrap()
    }

    #[test]
    fn revealing_empty_board_floods_everything() {
        let mut grid = square_grid(5);
        assert_eq!(grid.len(), 25);

        let outcome = grid.reveal(cell(&grid, 2, 3)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert!(grid.ids().all(|id| grid.state(id).unwrap().revealed));
        assert!(grid.ids().all(|id| grid.number(id).unwrap() == 0));
    }

    #[test]
    fn flood_stops_at_numbered_boundary() {
        let mut grid = square_grid(5);
        let mine = cell(&grid, 2, 2);
        grid.set_mine(mine, true).unwrap();

        let outcome = grid.reveal(cell(&grid, 0, 2)).unwrap();
        assert_eq!(outcome, RevealOutcome::Won);
        assert!(!grid.state(mine).unwrap().revealed);

        for &neighbor in grid.contacts(mine).unwrap() {
            assert!(grid.state(neighbor).unwrap().revealed);
            assert!(grid.number(neighbor).unwrap() >= 1);
        }
        assert_eq!(grid.contacts(mine).unwrap().len(), 8);
    }

    #[test]
    fn flood_does_not_expand_numbered_cells() {
        let mut grid = square_grid(5);
        // a wall of mines along x = 2 splits the board
        for y in 0..5 {
            let id = cell(&grid, 2, y);
            grid.set_mine(id, true).unwrap();
        }

        let outcome = grid.reveal(cell(&grid, 0, 0)).unwrap();
        assert_eq!(outcome, RevealOutcome::Revealed);

        for y in 0..5 {
            assert!(grid.state(cell(&grid, 0, y)).unwrap().revealed);
            assert!(grid.state(cell(&grid, 1, y)).unwrap().revealed);
            assert!(!grid.state(cell(&grid, 2, y)).unwrap().revealed);
            assert!(!grid.state(cell(&grid, 3, y)).unwrap().revealed);
            assert!(!grid.state(cell(&grid, 4, y)).unwrap().revealed);
        }
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut grid = square_grid(5);
        grid.set_mine(cell(&grid, 4, 4), true).unwrap();
        let start = cell(&grid, 0, 0);

        grid.reveal(start).unwrap();
        let once = grid.snapshot();
        assert_eq!(grid.reveal(start).unwrap(), RevealOutcome::NoChange);
        assert_eq!(grid.snapshot(), once);
    }

    #[test]
    fn revealing_a_mine_reports_hit() {
        let mut grid = square_grid(3);
        let mine = cell(&grid, 1, 1);
        grid.set_mine(mine, true).unwrap();

        assert_eq!(grid.reveal(mine).unwrap(), RevealOutcome::HitMine);
        assert_eq!(
            grid.display_state(mine, false).unwrap(),
            DisplayState::Exploded
        );
        assert_eq!(grid.mines_left(), 0);
    }

    #[test]
    fn flag_is_suppressed_by_reveal() {
        let mut grid = square_grid(3);
        let id = cell(&grid, 0, 0);
        grid.set_mine(cell(&grid, 2, 2), true).unwrap();

        assert_eq!(grid.toggle_flag(id).unwrap(), MarkOutcome::Changed);
        assert!(grid.state(id).unwrap().is_flagged());
        grid.reveal(id).unwrap();
        assert!(!grid.state(id).unwrap().is_flagged());
        assert_eq!(grid.set_flagged(id, true).unwrap(), MarkOutcome::NoChange);
        assert!(!grid.state(id).unwrap().is_flagged());
    }

    #[test]
    fn contacts_are_symmetric() {
        let grids = [
            square_grid(4),
            Grid::generate(&OctagonGenerator::new(4)).unwrap(),
            Grid::generate(&HexagonGenerator::new(3)).unwrap(),
            Grid::generate(&TriangleGenerator::new(5)).unwrap(),
        ];
        for grid in &grids {
            for a in grid.ids() {
                for b in grid.ids() {
                    let ab = grid.contacts(a).unwrap().contains(&b);
                    let ba = grid.contacts(b).unwrap().contains(&a);
                    assert_eq!(ab, ba, "{:?} {a} {b}", grid.topology());
                }
            }
        }
    }

    #[test]
    fn bulk_and_incremental_contacts_agree() {
        for adjacency in [AdjacencyRule::Corner, AdjacencyRule::Edge] {
            let generator = OctagonGenerator::new(3);
            let bulk = Grid::generate(&generator)
                .unwrap()
                .with_adjacency(adjacency);

            let mut incremental = Grid::new(Topology::Square).with_adjacency(adjacency);
            for path in generator.generate() {
                incremental.add_shape(path).unwrap();
            }

            for id in bulk.ids() {
                assert_eq!(
                    bulk.contacts(id).unwrap(),
                    incremental.contacts(id).unwrap(),
                    "{adjacency:?} {id}"
                );
            }
        }
    }

    #[test]
    fn edge_rule_drops_diagonal_contacts() {
        let grid = square_grid(3).with_adjacency(AdjacencyRule::Edge);
        let center = cell(&grid, 1, 1);
        assert_eq!(grid.contacts(center).unwrap().len(), 4);
        assert!(!grid.contacts(center).unwrap().contains(&cell(&grid, 0, 0)));
    }

    #[test]
    fn random_mines_are_distinct_and_clamped() {
        let mut grid = square_grid(4);
        assert_eq!(grid.set_random_mines(5, 7), 5);
        assert_eq!(grid.mines_count(), 5);

        let mut full = square_grid(3);
        assert_eq!(full.set_random_mines(20, 7), 9);
        assert_eq!(full.mines_count(), 9);
    }

    #[test]
    fn mine_ratio_floors_and_clamps() {
        let mut grid = square_grid(5);
        assert_eq!(grid.set_mine_ratio(0.15, 3), 3);
        assert_eq!(grid.mines_count(), 3);

        let mut grid = square_grid(2);
        assert_eq!(grid.set_mine_ratio(4.0, 3), 4);
        let mut grid = square_grid(2);
        assert_eq!(grid.set_mine_ratio(f64::NAN, 3), 0);
    }

    #[test]
    fn mines_left_can_go_negative() {
        let mut grid = square_grid(3);
        grid.set_mine(0, true).unwrap();
        for id in 1..4 {
            grid.toggle_flag(id).unwrap();
        }
        assert_eq!(grid.mines_left(), -2);
    }

    #[test]
    fn reset_clears_state_and_callbacks() {
        let mut grid = square_grid(3);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let shape_calls = Rc::new(RefCell::new(0));

        let sink = seen.clone();
        grid.subscribe(move |id, state| sink.borrow_mut().push((id, state.revealed)));
        grid.set_random_mines(2, 11);

        let counter = shape_calls.clone();
        grid.subscribe_shape(4, move |_, _| *counter.borrow_mut() += 1)
            .unwrap();
        grid.toggle_flag(4).unwrap();
        assert_eq!(*shape_calls.borrow(), 1);

        grid.reset_shapes();
        assert_eq!(grid.mines_count(), 0);
        assert!(grid.ids().all(|id| !grid.state(id).unwrap().is_flagged()));

        seen.borrow_mut().clear();
        grid.toggle_flag(4).unwrap();
        assert_eq!(*shape_calls.borrow(), 1);
        assert_eq!(*seen.borrow(), [(4, false)]);
    }

    #[test]
    fn reveal_notifies_every_flooded_shape_once() {
        let mut grid = square_grid(4);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        grid.subscribe(move |id, _| sink.borrow_mut().push(id));

        grid.reveal(0).unwrap();

        let mut seen = seen.borrow().clone();
        seen.sort_unstable();
        assert_eq!(seen, grid.ids().collect::<Vec<_>>());
    }

    #[test]
    fn bounds_are_invalidated_when_shapes_are_added() {
        let mut grid = square_grid(2);
        let before = grid.bounds().unwrap();
        assert_eq!(before.max, Point::new(2.0, 2.0));
        assert_eq!(grid.vector_bounds().unwrap().min, Point::new(0.0, -2.0));

        grid.add_shape([move_to(2, 0), line_to(3, 0), line_to(3, 1), line_to(2, 1)])
            .unwrap();
        assert_eq!(grid.bounds().unwrap().max, Point::new(3.0, 2.0));
        assert_eq!(grid.vector_bounds().unwrap().max, Point::new(3.0, 0.0));
        assert_eq!(grid.contacts(grid.len() - 1).unwrap().len(), 2);
    }

    #[test]
    fn invalid_ids_are_rejected() {
        let mut grid = square_grid(2);
        assert_eq!(grid.reveal(4), Err(GridError::InvalidShape(4)));
        assert_eq!(grid.toggle_flag(9), Err(GridError::InvalidShape(9)));
        assert!(grid.update_contacts(4).is_err());
    }

    #[test]
    fn failed_extend_leaves_grid_untouched() {
        let mut grid = square_grid(2);
        let paths: Vec<Vec<ShapePoint>> = vec![vec![move_to(5, 5), line_to(6, 5)], vec![]];
        assert_eq!(grid.extend_shapes(paths), Err(GridError::EmptyPath));
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut grid = Grid::generate(&HexagonGenerator::new(2)).unwrap();
        grid.set_random_mines(2, 5);
        grid.toggle_flag(1).unwrap();

        let json = serde_json::to_string(&grid.snapshot()).unwrap();
        let restored =
            Grid::from_snapshot(serde_json::from_str::<GridSnapshot>(&json).unwrap()).unwrap();

        assert_eq!(restored.snapshot(), grid.snapshot());
        for id in grid.ids() {
            assert_eq!(restored.contacts(id).unwrap(), grid.contacts(id).unwrap());
        }
    }

    #[test]
    fn snapshot_with_empty_path_is_rejected() {
        let mut snapshot = square_grid(2).snapshot();
        snapshot.shapes[3].points.clear();
        assert_eq!(
            Grid::from_snapshot(snapshot).unwrap_err(),
            GridError::InvalidSnapshot(3)
        );
    }

    #[test]
    fn bulk_rebuild_notifies_changed_contacts() {
        let mut grid = square_grid(2);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        grid.subscribe(move |id, _| sink.borrow_mut().push(id));

        // a column to the right touches the squares at x = 1 only
        let added = grid
            .extend_shapes([
                vec![move_to(2, 0), line_to(3, 0), line_to(3, 1), line_to(2, 1)],
                vec![move_to(2, 1), line_to(3, 1), line_to(3, 2), line_to(2, 2)],
            ])
            .unwrap();

        let mut seen = seen.borrow().clone();
        seen.sort_unstable();
        let mut expected = vec![cell(&grid, 1, 0), cell(&grid, 1, 1)];
        expected.extend(added);
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }
}
