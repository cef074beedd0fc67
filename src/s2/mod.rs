//! Coordinate projection kernel.
//!
//! This file documents the various coordinate systems used throughout the
//! library. S2 decomposes the unit sphere into a hierarchy of "cells" by
//! projecting the six faces of a cube onto the sphere and recursively
//! subdividing each face along a Hilbert space-filling curve.
//!
//! In the process of converting a latitude/longitude pair to a 64-bit cell
//! ID, the following coordinate systems are used:
//!
//!  (id)
//!    An S2CellId is a 64-bit encoding of a face and a Hilbert curve
//!    position on that face. The position implicitly encodes both the
//!    cell and its subdivision level (see `s2cell_id`).
//!
//!  (face, i, j)
//!    Leaf-cell coordinates. "i" and "j" are integers in `[0, 2**30)`
//!    identifying a particular leaf cell on the given face.
//!
//!  (face, s, t)
//!    Cell-space coordinates. "s" and "t" are reals in `[0, 1]`.
//!
//!  (face, si, ti)
//!    Discrete cell-space coordinates, obtained by multiplying s/t by
//!    `2**31`. Can represent both cell centers and edges without loss.
//!
//!  (face, u, v)
//!    Cube-space coordinates in `[-1, 1]`, related to (s, t) by a
//!    nonlinear (quadratic) transform chosen to equalize cell areas.
//!
//!  (x, y, z)
//!    A direction vector (`S2Point`), not necessarily unit length.
//!
//!  (lat, lon)
//!    Latitude/longitude in degrees.
//!
//! Only the quadratic ST<->UV mapping is implemented; the reference
//! implementation's alternative (linear, tangent) projections are out of
//! scope here since bit-exactness is required against the quadratic
//! default only.

use crate::error::S2Error;

mod internal;
pub mod neighbors;
pub mod s2cell_id;
pub mod s2point;
pub mod token;

pub use s2cell_id::S2CellId;
pub use s2point::S2Point;

/// Number of levels needed to specify a leaf cell.
pub const MAX_LEVEL: i32 = 30;

/// One past the maximum valid leaf-cell IJ index: `2**30`.
pub const MAX_SIZE: i32 = 1 << MAX_LEVEL;

/// One past the maximum valid Si/Ti value: `2**31`.
pub const MAX_SI_TI: i64 = 1 << (MAX_LEVEL + 1);

/// Convert an s- or t-value in `[0, 1]` to the corresponding u- or
/// v-value in `[-1, 1]`. Quadratic projection: a non-linear transform
/// chosen to make cell sizes more uniform after projection onto the
/// sphere.
pub fn st_to_uv(s: f64) -> f64 {
    if s >= 0.5 {
        (1.0 / 3.0) * (4.0 * s * s - 1.0)
    } else {
        (1.0 / 3.0) * (1.0 - 4.0 * (1.0 - s) * (1.0 - s))
    }
}

/// Inverse of [`st_to_uv`]. Not exactly self-inverse due to floating
/// point error.
pub fn uv_to_st(u: f64) -> f64 {
    if u >= 0.0 {
        0.5 * (1.0 + 3.0 * u).sqrt()
    } else {
        1.0 - 0.5 * (1.0 - 3.0 * u).sqrt()
    }
}

/// Return the i- or j-index of the leaf cell containing the given s- or
/// t-value, clamped to `[0, MAX_SIZE - 1]`.
///
/// # Examples
/// ```
/// use s2cell::s2::{st_to_ij, MAX_SIZE};
///
/// assert_eq!(st_to_ij(0.5), MAX_SIZE / 2);
/// ```
pub fn st_to_ij(s: f64) -> i32 {
    let index = (MAX_SIZE as f64 * s - 0.5).round() as i32;
    index.clamp(0, MAX_SIZE - 1)
}

/// Convert an si- or ti-value to the corresponding s- or t-value.
pub fn si_ti_to_st(si: i64) -> f64 {
    (1.0 / MAX_SI_TI as f64) * (si as f64)
}

/// Convert (face, u, v) coordinates to an unnormalized direction vector.
pub fn face_uv_to_xyz(face: i32, u: f64, v: f64) -> Result<S2Point, S2Error> {
    #[rustfmt::skip]
    let p = match face {
        0 => S2Point::new( 1.0,    u,    v),
        1 => S2Point::new(  -u,  1.0,    v),
        2 => S2Point::new(  -u,   -v,  1.0),
        3 => S2Point::new(-1.0,   -v,   -u),
        4 => S2Point::new(   v, -1.0,   -u),
        5 => S2Point::new(   v,    u, -1.0),
        _ => return Err(S2Error::InvalidFace(face)),
    };
    Ok(p)
}

/// Convert a direction vector on a given face to (u, v) cube-space
/// coordinates, by dividing the two non-axis components by the
/// face-axis component.
pub fn face_xyz_to_uv(face: i32, p: &S2Point) -> Result<(f64, f64), S2Error> {
    let (u, v) = match face {
        0 => (p.y() / p.x(), p.z() / p.x()),
        1 => (-p.x() / p.y(), p.z() / p.y()),
        2 => (-p.x() / p.z(), -p.y() / p.z()),
        3 => (p.z() / -p.x(), p.y() / -p.x()),
        4 => (p.z() / -p.y(), -p.x() / -p.y()),
        5 => (-p.y() / -p.z(), -p.x() / -p.z()),
        _ => return Err(S2Error::InvalidFace(face)),
    };
    Ok((u, v))
}

/// Return the cube face containing the given direction vector. Ties (on
/// the boundary between faces) resolve to the first-found largest
/// component, matching the reference implementation.
pub fn xyz_to_face(p: &S2Point) -> i32 {
    let face = p.largest_abs_component();
    if p[face as usize] < 0.0 {
        face + 3
    } else {
        face
    }
}

/// Convert a lat/lon pair (in degrees) to an unnormalized direction
/// vector. The vector need not be unit length: the tangent ratios used
/// to recover lat/lon are invariant under scaling.
pub fn lat_lon_to_xyz(lat_deg: f64, lon_deg: f64) -> S2Point {
    let lat = lat_deg.to_radians();
    let lon = lon_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    S2Point::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Convert an unnormalized direction vector to a lat/lon pair in
/// degrees, using `atan2` directly on the raw components (explicit
/// normalization is avoided: it degrades precision against the
/// reference implementation without changing the result).
pub fn xyz_to_lat_lon(p: &S2Point) -> (f64, f64) {
    let lat = p.z().atan2((p.x() * p.x() + p.y() * p.y()).sqrt());
    let lon = p.y().atan2(p.x());
    (lat.to_degrees(), lon.to_degrees())
}
