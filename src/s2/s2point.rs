use crate::math::Vector3;

/// A direction vector in the ambient XYZ space, not necessarily unit
/// length. The projection kernel works with unnormalized vectors
/// throughout; see `s2::mod` for why normalization is avoided.
pub type S2Point = Vector3<f64>;
