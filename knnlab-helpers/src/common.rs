use crate::Float;
use ndarray::{array, Array1};
use std::fmt::Debug;

/// Identifier of a training class.
///
/// The generator assigns ids densely from 0 up to the cluster count; the id
/// never changes after a point is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct ClassId(pub usize);

/// A single training point with coordinates and a class label.
///
/// L: The type of the label (e.g., `ClassId`, String, enum).
/// F: The float type for the coordinates (e.g., f32, f64).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct LabeledPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub label: L,
}

impl<L, F> LabeledPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn new(features: Array1<F>, label: L) -> Self {
        LabeledPoint { features, label }
    }

    /// Builds a 2D point, the only dimensionality this demo generates.
    pub fn from_xy(x: F, y: F, label: L) -> Self {
        Self::new(array![x, y], label)
    }

    pub fn x(&self) -> F {
        self.features[0]
    }

    pub fn y(&self) -> F {
        self.features[1]
    }
}

/// The user-placed point awaiting classification.
///
/// `predicted` stays `None` until a majority vote assigns a label and is
/// cleared whenever the ranking it came from is discarded.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct QueryPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub features: Array1<F>,
    pub predicted: Option<L>,
}

impl<L, F> QueryPoint<L, F>
where
    L: Clone + Eq + std::hash::Hash + Debug,
    F: Float,
{
    pub fn from_xy(x: F, y: F) -> Self {
        QueryPoint {
            features: array![x, y],
            predicted: None,
        }
    }

    pub fn x(&self) -> F {
        self.features[0]
    }

    pub fn y(&self) -> F {
        self.features[1]
    }
}

/// Axis-aligned plot bounds in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_crate::Serialize, serde_crate::Deserialize),
    serde(crate = "serde_crate")
)]
pub struct Rect<F: Float> {
    pub min_x: F,
    pub min_y: F,
    pub max_x: F,
    pub max_y: F,
}

impl<F: Float> Rect<F> {
    pub fn new(min_x: F, min_y: F, max_x: F, max_y: F) -> Self {
        Rect {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn width(&self) -> F {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> F {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> (F, F) {
        let half = F::from(0.5).unwrap();
        (
            (self.min_x + self.max_x) * half,
            (self.min_y + self.max_y) * half,
        )
    }

    pub fn contains(&self, x: F, y: F) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// The same rectangle inset by `margin` on every side.
    pub fn shrink(&self, margin: F) -> Self {
        Rect {
            min_x: self.min_x + margin,
            min_y: self.min_y + margin,
            max_x: self.max_x - margin,
            max_y: self.max_y - margin,
        }
    }

    /// Clamps a coordinate pair into the rectangle.
    pub fn clamp(&self, x: F, y: F) -> (F, F) {
        (
            x.max(self.min_x).min(self.max_x),
            y.max(self.min_y).min(self.max_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_point_from_xy() {
        let p = LabeledPoint::from_xy(3.0, 4.0, ClassId(1));
        assert_eq!(p.x(), 3.0);
        assert_eq!(p.y(), 4.0);
        assert_eq!(p.label, ClassId(1));
        assert_eq!(p.features.len(), 2);
    }

    #[test]
    fn query_point_starts_unclassified() {
        let q: QueryPoint<ClassId, f64> = QueryPoint::from_xy(1.0, 2.0);
        assert_eq!(q.predicted, None);
        assert_eq!((q.x(), q.y()), (1.0, 2.0));
    }

    #[test]
    fn rect_geometry() {
        let r = Rect::new(0.0, 0.0, 760.0, 560.0);
        assert_eq!(r.width(), 760.0);
        assert_eq!(r.height(), 560.0);
        assert_eq!(r.center(), (380.0, 280.0));
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(760.0, 560.0));
        assert!(!r.contains(-0.1, 10.0));
        assert!(!r.contains(10.0, 560.1));
    }

    #[test]
    fn rect_shrink_and_clamp() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0).shrink(20.0);
        assert_eq!(
            (r.min_x, r.min_y, r.max_x, r.max_y),
            (20.0, 20.0, 80.0, 30.0)
        );
        assert_eq!(r.clamp(-5.0, 200.0), (20.0, 30.0));
        assert_eq!(r.clamp(50.0, 25.0), (50.0, 25.0));
    }
}
