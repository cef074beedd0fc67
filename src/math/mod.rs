//! Small generic vector support for the XYZ coordinate space.
//!
//! Kept deliberately narrow: the projection kernel never normalizes a
//! vector (doing so degrades precision against the reference, see
//! `s2::mod`), so this module only needs construction, component access,
//! and the largest-absolute-component face selector.

pub mod vector;

pub use vector::Vector3;

use num_traits::{Num, NumCast};

/// Bound shared by the scalar types a `Vector3` can hold.
pub trait Scalar: Copy + Clone + Num + NumCast + PartialOrd {}
impl<T> Scalar for T where T: Copy + Clone + Num + NumCast + PartialOrd {}
