use ndarray::NdFloat;
use num_traits::{FromPrimitive, NumCast};
use std::iter::Sum;

mod common;
mod distance;

pub use common::{ClassId, LabeledPoint, QueryPoint, Rect};
pub use distance::{Distance, L2Dist};

/// The float types the demo can run on.
///
/// A thin bundle of the numeric capabilities the generator, ranking engine
/// and plot geometry need, so downstream crates can stay generic over
/// `f32`/`f64` without repeating the bound list.
pub trait Float: NdFloat + FromPrimitive + Default + Sum {
    fn cast<T: NumCast>(x: T) -> Option<Self> {
        NumCast::from(x)
    }
}

impl Float for f32 {}
impl Float for f64 {}
