use serde::{Deserialize, Serialize};

use crate::*;

/// Size of the area the grid is drawn into, in screen pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_wide(&self) -> bool {
        self.width > self.height
    }

    /// Pixels per model unit before any zoom, one hundredth of the shorter side.
    pub fn unit(&self) -> f64 {
        self.width.min(self.height) / 100.0
    }

    /// Offset of the square drawing area along the longer side.
    pub fn offset(&self) -> Point {
        if self.is_wide() {
            Point::new(self.width - self.height, 0.0)
        } else {
            Point::new(0.0, self.height - self.width)
        }
    }
}

/// View state of a grid.
///
/// `scale` and `position` belong to the player (zoom and pan), `scale_adjust` and
/// `position_adjust` are owned by [`Grid::center_on_screen`], so fitting never undoes a pan.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub scale: f64,
    pub scale_adjust: f64,
    /// Pan in screen pixels.
    pub position: Point,
    /// Model space translation applied before scaling.
    pub position_adjust: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            scale_adjust: 1.0,
            position: Point::ZERO,
            position_adjust: Point::ZERO,
        }
    }
}

impl Transform {
    pub fn scale(&self, point: Point) -> Point {
        point.scale(self.scale_adjust)
    }

    pub fn inverse_scale(&self, point: Point) -> Point {
        point.scale(1.0 / self.scale_adjust)
    }

    /// Scale-adjust, then translate by the pan.
    pub fn transform(&self, point: Point) -> Point {
        self.scale(point) + self.position
    }

    pub fn inverse_transform(&self, point: Point) -> Point {
        self.inverse_scale(point - self.position)
    }

    /// Model space to the fitted space the renderer draws in.
    pub fn fit(&self, vector: Point) -> Point {
        self.scale(vector + self.position_adjust)
    }

    pub fn unfit(&self, point: Point) -> Point {
        self.inverse_scale(point) - self.position_adjust
    }

    /// Model space to screen pixels.
    pub fn to_screen(&self, vector: Point, viewport: Viewport) -> Point {
        self.fit(vector).scale(viewport.unit() * self.scale) + viewport.offset() + self.position
    }

    /// Screen pixels to model space, the inverse of [`Transform::to_screen`].
    pub fn from_screen(&self, screen: Point, viewport: Viewport) -> Point {
        let fitted =
            (screen - self.position - viewport.offset()).scale(1.0 / (viewport.unit() * self.scale));
        self.unfit(fitted)
    }
}

/// Sub-linear fit so large grids shrink slower than small ones.
fn fit_scale(span: f64) -> f64 {
    50.0 / span.powf(0.8)
}

impl Grid {
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.transform.scale = scale;
    }

    pub fn set_position(&mut self, position: Point) {
        self.transform.position = position;
    }

    pub fn set_scale_adjust(&mut self, scale_adjust: f64) {
        self.transform.scale_adjust = scale_adjust;
    }

    pub fn set_position_adjust(&mut self, position_adjust: Point) {
        self.transform.position_adjust = position_adjust;
    }

    /// Centers the grid and scales it to fit, the player's zoom and pan are kept.
    pub fn center_on_screen(&mut self) {
        let Some(bounds) = self.vector_bounds() else {
            self.transform.scale_adjust = 1.0;
            self.transform.position_adjust = Point::ZERO;
            return;
        };

        let span = bounds.span();
        self.transform.scale_adjust = if span > EPSILON { fit_scale(span) } else { 1.0 };
        self.transform.position_adjust = -bounds.center();
    }

    /// Grid-local point to the fitted space, as used by [`Shape::svg_path`].
    pub fn to_model(&self, point: Point) -> Point {
        self.transform.fit(self.topology().to_vector(point))
    }

    pub fn to_screen(&self, point: Point, viewport: Viewport) -> Point {
        self.transform
            .to_screen(self.topology().to_vector(point), viewport)
    }

    /// Maps a pointer position to grid-local coordinates.
    pub fn from_mouse_pos(&self, x: f64, y: f64, viewport: Viewport) -> Point {
        let vector = self.transform.from_screen(Point::new(x, y), viewport);
        self.topology().from_vector(vector)
    }

    /// Shape under the pointer, if any.
    pub fn shape_at_mouse(&self, x: f64, y: f64, viewport: Viewport) -> Option<ShapeId> {
        self.shape_at(self.from_mouse_pos(x, y, viewport))
    }

    pub fn svg_path(&self, id: ShapeId) -> Result<String> {
        Ok(self.shape(id)?.svg_path(|point| self.to_model(point)))
    }
}
