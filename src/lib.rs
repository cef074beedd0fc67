//! Conversions between latitude/longitude coordinates and S2 Geometry
//! cell identifiers.
//!
//! This crate implements the coordinate projection and Hilbert-curve bit
//! codec used by the S2 cell hierarchy: a recursive subdivision of the
//! unit sphere (via a cube projection) into up to 30 levels of cells.
//! See [`s2`] for the coordinate systems involved.
//!
//! The public surface is the set of free functions below, each taking
//! and returning plain values (`f64`, `u64`, `String`) rather than
//! requiring callers to hold an `S2CellId` themselves. Every level
//! argument is validated against `0..=30` before use.

pub mod error;
pub mod math;
pub mod s2;

pub use error::S2Error;
pub use s2::{S2CellId, S2Point};

use s2::neighbors::cell_id_to_neighbor_cell_ids as neighbor_cell_ids;
use s2::token;

fn check_level(level: u8) -> Result<i32, S2Error> {
    let level = level as i32;
    if level > S2CellId::MAX_LEVEL {
        return Err(S2Error::InvalidLevel {
            level: level as i64,
            context: "",
        });
    }
    Ok(level)
}

/// Convert a lat/lon pair (degrees) to the cell ID of the cell
/// containing it at `level`.
pub fn lat_lon_to_cell_id(lat: f64, lon: f64, level: u8) -> Result<u64, S2Error> {
    let level = check_level(level)?;
    Ok(S2CellId::from_lat_lon(lat, lon, level)?.id())
}

/// Convert a lat/lon pair (degrees) to the token of the cell
/// containing it at `level`.
pub fn lat_lon_to_token(lat: f64, lon: f64, level: u8) -> Result<String, S2Error> {
    let level = check_level(level)?;
    let id = S2CellId::from_lat_lon(lat, lon, level)?;
    Ok(token::cell_id_to_token(id))
}

/// Convert a cell ID to the lat/lon (degrees) of its center.
pub fn cell_id_to_lat_lon(cell_id: u64) -> Result<(f64, f64), S2Error> {
    S2CellId::new(cell_id).to_lat_lon()
}

/// Convert a token to the lat/lon (degrees) of its cell's center.
pub fn token_to_lat_lon(token: &str) -> Result<(f64, f64), S2Error> {
    token::token_to_cell_id(token)?.to_lat_lon()
}

/// Convert a cell ID to its canonical token.
pub fn cell_id_to_token(cell_id: u64) -> String {
    token::cell_id_to_token(S2CellId::new(cell_id))
}

/// Convert a token to its cell ID.
pub fn token_to_cell_id(token: &str) -> Result<u64, S2Error> {
    Ok(token::token_to_cell_id(token)?.id())
}

/// The subdivision level of a cell ID.
pub fn cell_id_to_level(cell_id: u64) -> Result<i32, S2Error> {
    S2CellId::new(cell_id).level()
}

/// The subdivision level of a token's cell.
pub fn token_to_level(token: &str) -> Result<i32, S2Error> {
    token::token_to_cell_id(token)?.level()
}

/// The ancestor cell ID at `level` (or the direct parent, if `level`
/// is `None`).
pub fn cell_id_to_parent(cell_id: u64, level: Option<u8>) -> Result<u64, S2Error> {
    let level = level.map(check_level).transpose()?;
    Ok(S2CellId::new(cell_id).parent(level)?.id())
}

/// The token of the ancestor cell at `level` (or the direct parent, if
/// `level` is `None`).
pub fn token_to_parent_token(token: &str, level: Option<u8>) -> Result<String, S2Error> {
    let level = level.map(check_level).transpose()?;
    let parent = token::token_to_cell_id(token)?.parent(level)?;
    Ok(token::cell_id_to_token(parent))
}

/// Returns true if `cell_id` is a valid S2 cell ID.
pub fn cell_id_is_valid(cell_id: u64) -> bool {
    S2CellId::new(cell_id).is_valid()
}

/// Returns true if `token` is syntactically well-formed and decodes to
/// a valid S2 cell ID.
pub fn token_is_valid(token: &str) -> bool {
    token::token_is_valid(token)
}

/// Normalize a token to its canonical lowercase, trailing-zero-elided
/// form.
pub fn token_to_canonical_token(token: &str) -> String {
    token::token_to_canonical_token(token)
}

/// Enumerate the neighbors of `cell_id`: edge-adjacent cells, corner-
/// adjacent cells, or both, per the given flags.
pub fn cell_id_to_neighbor_cell_ids(
    cell_id: u64,
    edge: bool,
    corner: bool,
) -> Result<Vec<u64>, S2Error> {
    let neighbors = neighbor_cell_ids(S2CellId::new(cell_id), edge, corner)?;
    Ok(neighbors.into_iter().map(|n| n.id()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenarios_round_trip() {
        let scenarios: [(f64, f64, u8, u64, &str); 5] = [
            (0.0, 0.0, 0, 1152921504606846976, "1"),
            (0.0, 0.0, 30, 1152921504606846977, "1000000000000001"),
            (45.0, 45.0, 30, 4635422624767557889, "4054545155144101"),
            (-45.0, -45.0, 30, 13811321448941993727, "bfababaeaaebbeff"),
            (90.0, -180.0, 30, 5764607523034234881, "5000000000000001"),
        ];

        for (lat, lon, level, id, token) in scenarios {
            assert_eq!(lat_lon_to_cell_id(lat, lon, level).unwrap(), id);
            assert_eq!(lat_lon_to_token(lat, lon, level).unwrap(), token);
            assert_eq!(token_to_cell_id(token).unwrap(), id);
        }
    }

    #[test]
    fn level_out_of_range_errors() {
        assert!(lat_lon_to_cell_id(0.0, 0.0, 31).is_err());
    }

    #[test]
    fn parent_defaults_to_direct_parent() {
        let id = lat_lon_to_cell_id(10.0, 20.0, 12).unwrap();
        let parent = cell_id_to_parent(id, None).unwrap();
        assert_eq!(cell_id_to_level(parent).unwrap(), 11);
    }
}
