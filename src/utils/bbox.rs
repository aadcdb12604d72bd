use crate::{EstimateClose, EPS};

/// Axis-aligned bounding box in the corner format (x1, y1, x2, y2)
///
/// The corners are normalized on construction, so `x1 <= x2` and `y1 <= y2` always hold.
///
#[derive(Clone, Default, Debug, Copy)]
pub struct BoundingBox {
    _x1: f64,
    _y1: f64,
    _x2: f64,
    _y2: f64,
}

impl BoundingBox {
    /// Constructor
    ///
    /// # Parameters
    /// * `x1`, `y1` - one corner of the box
    /// * `x2`, `y2` - the opposite corner of the box
    ///
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            _x1: x1.min(x2),
            _y1: y1.min(y2),
            _x2: x1.max(x2),
            _y2: y1.max(y2),
        }
    }

    /// Constructor for the (left, top, width, height) layout used by OTB ground truth files
    ///
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    pub fn x1(&self) -> f64 {
        self._x1
    }

    pub fn y1(&self) -> f64 {
        self._y1
    }

    pub fn x2(&self) -> f64 {
        self._x2
    }

    pub fn y2(&self) -> f64 {
        self._y2
    }

    pub fn width(&self) -> f64 {
        self._x2 - self._x1
    }

    pub fn height(&self) -> f64 {
        self._y2 - self._y1
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self._x1 + self._x2) / 2.0,
            (self._y1 + self._y2) / 2.0,
        )
    }

    /// Area shared by two boxes, 0 when they are disjoint
    ///
    pub fn intersection(&self, other: &BoundingBox) -> f64 {
        let int_width = (self._x2.min(other._x2) - self._x1.max(other._x1)).max(0.0);
        let int_height = (self._y2.min(other._y2) - self._y1.max(other._y1)).max(0.0);
        int_width * int_height
    }

    pub fn union(&self, other: &BoundingBox) -> f64 {
        self.area() + other.area() - self.intersection(other)
    }

    /// Intersection over union
    ///
    /// Returns 0 when the union is empty (both boxes are degenerate).
    ///
    pub fn overlap_ratio(&self, other: &BoundingBox) -> f64 {
        let union = self.union(other);
        if union <= 0.0 {
            0.0
        } else {
            self.intersection(other) / union
        }
    }

    /// Euclidean distance between the box centers
    ///
    pub fn center_distance(&self, other: &BoundingBox) -> f64 {
        let (x1, y1) = self.center();
        let (x2, y2) = other.center();
        (x1 - x2).hypot(y1 - y2)
    }

    /// Moves the box by `(dx, dy)`
    ///
    pub fn shift(&self, dx: f64, dy: f64) -> Self {
        Self::new(self._x1 + dx, self._y1 + dy, self._x2 + dx, self._y2 + dy)
    }
}

impl EstimateClose for BoundingBox {
    /// Allows comparing bboxes
    ///
    fn almost_same(&self, other: &Self, eps: f64) -> bool {
        (self._x1 - other._x1).abs() < eps
            && (self._y1 - other._y1).abs() < eps
            && (self._x2 - other._x2).abs() < eps
            && (self._y2 - other._y2).abs() < eps
    }
}

impl PartialEq<Self> for BoundingBox {
    fn eq(&self, other: &Self) -> bool {
        self.almost_same(other, EPS)
    }
}
