//! Axis-aligned rectangles in canvas space.

use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box. `x, y` is the top-left (min) corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the rectangle spanned by two arbitrary corner points.
    /// Width and height are always non-negative; `x, y` is the min corner.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: (x2 - x1).abs(),
            height: (y2 - y1).abs(),
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.right() && py >= self.y && py <= self.bottom()
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Closed-rectangle overlap test. Boxes that share an edge or a corner
    /// intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    /// Smallest box containing both.
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Bounds {
            x,
            y,
            width: self.right().max(other.right()) - x,
            height: self.bottom().max(other.bottom()) - y,
        }
    }

    /// Grow on every side by `pad`.
    pub fn inflate(&self, pad: f32) -> Bounds {
        Bounds {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Bounding box of a `width × height` rectangle placed at `(x, y)` and
    /// rotated by `degrees` clockwise around that origin.
    pub fn of_rotated(x: f32, y: f32, width: f32, height: f32, degrees: f32) -> Bounds {
        if degrees.rem_euclid(360.0) == 0.0 {
            return Bounds::new(x, y, width, height);
        }
        let (sin, cos) = degrees.to_radians().sin_cos();
        let corners = [(0.0, 0.0), (width, 0.0), (width, height), (0.0, height)];

        let mut min_x = f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_x = f32::MIN;
        let mut max_y = f32::MIN;
        for (cx, cy) in corners {
            let rx = x + cx * cos - cy * sin;
            let ry = y + cx * sin + cy * cos;
            min_x = min_x.min(rx);
            min_y = min_y.min(ry);
            max_x = max_x.max(rx);
            max_y = max_y.max(ry);
        }
        Bounds::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}
