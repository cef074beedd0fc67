// Copyright 2005 Google Inc. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS-IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

// Original Author: ericv@google.com (Eric Veach)

use lazy_static::lazy_static;

use crate::error::S2Error;
use crate::s2::internal::{INVERT_MASK, POS_TO_IJ, POS_TO_ORIENTATION, SWAP_MASK};
use crate::s2::{
    face_uv_to_xyz, face_xyz_to_uv, lat_lon_to_xyz, si_ti_to_st, st_to_ij, st_to_uv, uv_to_st,
    xyz_to_face, xyz_to_lat_lon,
};

/// An S2CellId is a 64-bit unsigned integer that uniquely identifies a
/// cell in the S2 cell decomposition. It has the following format:
///
///   id = [face][face_pos]
///
///   face:     a 3-bit number (range 0..5) encoding the cube face.
///
///   face_pos: a 61-bit number encoding the position of the center of this
///             cell along the Hilbert curve over this face.
///
/// Sequentially increasing cell ids follow a continuous space-filling curve
/// over the entire sphere. The id of a cell at level k consists of a 3-bit
/// face number followed by k bit pairs that recursively select one of the
/// four children of each cell; the next bit is always 1 and all lower bits
/// are 0. The level of a cell is therefore determined by the position of
/// its lowest-numbered set bit.
///
/// This type is intended to be copied by value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct S2CellId(u64);

/// The following lookup tables are used to convert efficiently between an
/// (i,j) cell index and the corresponding position along the Hilbert curve.
/// "LOOKUP_POS" maps 4 bits of "i", 4 bits of "j", and 2 bits representing
/// the orientation of the current cell into 8 bits representing the order
/// in which that subcell is visited by the Hilbert curve, plus 2 bits
/// indicating the new orientation of the curve within that subcell.
/// (Orientations are a combination of `SWAP_MASK` and `INVERT_MASK`.)
///
/// "LOOKUP_IJ" is an inverted table used for mapping in the opposite
/// direction.
const LOOKUP_BITS: i32 = 4;
const LOOKUP_TABLE_SIZE: usize = 1 << (2 * LOOKUP_BITS + 2);

lazy_static! {
    static ref LOOKUP_TABLES: ([u16; LOOKUP_TABLE_SIZE], [u16; LOOKUP_TABLE_SIZE]) =
        init_lookup_tables();
    static ref LOOKUP_POS: &'static [u16; LOOKUP_TABLE_SIZE] = &LOOKUP_TABLES.0;
    static ref LOOKUP_IJ: &'static [u16; LOOKUP_TABLE_SIZE] = &LOOKUP_TABLES.1;
}

#[rustfmt::skip]
fn init_lookup_tables() -> ([u16; LOOKUP_TABLE_SIZE], [u16; LOOKUP_TABLE_SIZE]) {
    let mut lookup_pos = [0u16; LOOKUP_TABLE_SIZE];
    let mut lookup_ij = [0u16; LOOKUP_TABLE_SIZE];

    #[allow(clippy::too_many_arguments)]
    fn init_lookup_cell(
        level: i32, i: i32, j: i32, orig_orientation: i32, pos: i32, orientation: i32,
        lookup_pos: &mut [u16; LOOKUP_TABLE_SIZE], lookup_ij: &mut [u16; LOOKUP_TABLE_SIZE]
    ) {
        if level == LOOKUP_BITS {
            let ij: i32 = (i << LOOKUP_BITS) + j;
            lookup_pos[((ij << 2) + orig_orientation) as usize] = ((pos << 2) + orientation) as u16;
            lookup_ij[((pos << 2) + orig_orientation) as usize] = ((ij << 2) + orientation) as u16;
        } else {
            let level = level + 1;
            let i = i << 1;
            let j = j << 1;
            let pos = pos << 2;
            let r: [i32; 4] = POS_TO_IJ[orientation as usize];
            init_lookup_cell(level, i + (r[0] >> 1), j + (r[0] & 1), orig_orientation, pos,
                orientation ^ POS_TO_ORIENTATION[0], lookup_pos, lookup_ij);
            init_lookup_cell(level, i + (r[1] >> 1), j + (r[1] & 1), orig_orientation, pos + 1,
                orientation ^ POS_TO_ORIENTATION[1], lookup_pos, lookup_ij);
            init_lookup_cell(level, i + (r[2] >> 1), j + (r[2] & 1), orig_orientation, pos + 2,
                orientation ^ POS_TO_ORIENTATION[2], lookup_pos, lookup_ij);
            init_lookup_cell(level, i + (r[3] >> 1), j + (r[3] & 1), orig_orientation, pos + 3,
                orientation ^ POS_TO_ORIENTATION[3], lookup_pos, lookup_ij);
        }
    }

    init_lookup_cell(0, 0, 0, 0, 0, 0, &mut lookup_pos, &mut lookup_ij);
    init_lookup_cell(0, 0, 0, SWAP_MASK, 0, SWAP_MASK, &mut lookup_pos, &mut lookup_ij);
    init_lookup_cell(0, 0, 0, INVERT_MASK, 0, INVERT_MASK, &mut lookup_pos, &mut lookup_ij);
    init_lookup_cell(0, 0, 0, SWAP_MASK | INVERT_MASK, 0, SWAP_MASK | INVERT_MASK, &mut lookup_pos, &mut lookup_ij);

    (lookup_pos, lookup_ij)
}

impl S2CellId {
    pub const FACE_BITS: i32 = 3;
    pub const NUM_FACES: i32 = 6;
    pub const MAX_LEVEL: i32 = 30;
    pub const POS_BITS: i32 = 2 * S2CellId::MAX_LEVEL + 1;
    pub const MAX_SIZE: i32 = 1 << S2CellId::MAX_LEVEL;
    pub const MAX_SI_TI: i64 = 1 << (S2CellId::MAX_LEVEL + 1);
    pub const SWAP_MASK: u64 = 0x01;
    pub const INVERT_MASK: u64 = 0x02;
    pub const LOOKUP_BITS: i32 = LOOKUP_BITS;

    /// Mask of the bit positions at which a valid cell's trailing-1
    /// marker may sit: even positions in `[0, 60]`.
    const VALID_LSB_MASK: u64 = 0x1555555555555555;

    /// Creates a new S2CellId from a 64-bit unsigned integer. Does not
    /// validate the id; see [`S2CellId::is_valid`].
    pub fn new(id: u64) -> S2CellId {
        S2CellId(id)
    }

    /// The raw 64-bit id.
    pub fn id(&self) -> u64 {
        self.0
    }

    /// The zero cell id. Not a valid cell; only meaningful as the
    /// decoded value of the `'X'` token.
    pub fn none() -> S2CellId {
        S2CellId::new(0)
    }

    /// The cube face encoded by the top `FACE_BITS` bits.
    pub fn face(&self) -> i32 {
        (self.0 >> S2CellId::POS_BITS) as i32
    }

    /// The lowest-numbered bit that is set, i.e.
    /// `1 << (2 * (MAX_LEVEL - level))`. For a.lsb() <= b.lsb() iff
    /// a.level() >= b.level().
    pub fn lsb(&self) -> u64 {
        self.0 & self.0.wrapping_neg()
    }

    fn lsb_for_level(level: i32) -> u64 {
        1u64 << (2 * (S2CellId::MAX_LEVEL - level))
    }

    /// Returns true if this id represents a valid cell: non-zero, face
    /// in `0..=5`, and the trailing-1 marker at an even bit position
    /// `<= 60`.
    pub fn is_valid(&self) -> bool {
        self.face() < S2CellId::NUM_FACES && (self.lsb() & S2CellId::VALID_LSB_MASK) != 0
    }

    /// The subdivision level, `0` (a whole face) to `30` (a leaf cell).
    pub fn level(&self) -> Result<i32, S2Error> {
        if !self.is_valid() {
            return Err(S2Error::InvalidCellId(self.0));
        }
        let trailing_zeros = self.0.trailing_zeros() as i32;
        Ok(S2CellId::MAX_LEVEL - (trailing_zeros / 2))
    }

    /// The ancestor of this cell at `level`, defaulting to the direct
    /// parent (`current_level - 1`) when `level` is `None`.
    pub fn parent(&self, level: Option<i32>) -> Result<S2CellId, S2Error> {
        if !self.is_valid() {
            return Err(S2Error::InvalidCellId(self.0));
        }
        let current_level = self.level()?;

        let level = match level {
            Some(l) => l,
            None => {
                if current_level == 0 {
                    return Err(S2Error::InvalidLevel {
                        level: -1,
                        context: ": no level given and cell is already level 0",
                    });
                }
                current_level - 1
            }
        };

        if !(0..=S2CellId::MAX_LEVEL).contains(&level) {
            return Err(S2Error::InvalidLevel {
                level: level as i64,
                context: "",
            });
        }
        if level > current_level {
            return Err(S2Error::InvalidLevel {
                level: level as i64,
                context: ": greater than the cell's current level",
            });
        }
        if level == current_level {
            return Ok(*self);
        }

        let mask = S2CellId::lsb_for_level(level);
        Ok(S2CellId((self.0 & mask.wrapping_neg()) | mask))
    }

    /// Decode this cell ID into `(face, i, j)` leaf-cell coordinates of
    /// one of the two leaf cells diagonally bracketing the cell center.
    /// Fails with [`S2Error::InvalidFace`] if the face bits exceed 5.
    fn to_face_ij(&self) -> Result<(i32, i32, i32), S2Error> {
        let face = self.face();
        if face > 5 {
            return Err(S2Error::InvalidFace(face));
        }

        let mut bits = face & (S2CellId::SWAP_MASK as i32);
        let mut i = 0i32;
        let mut j = 0i32;

        for k in (0..8).rev() {
            let n_bits = if k == 7 {
                S2CellId::MAX_LEVEL - 7 * LOOKUP_BITS
            } else {
                LOOKUP_BITS
            };
            let extract_mask = (1u64 << (2 * n_bits)) - 1;
            bits += (((self.0 >> (k * 2 * LOOKUP_BITS + 1)) & extract_mask) as i32) << 2;
            bits = LOOKUP_IJ[bits as usize] as i32;
            let offset = k * LOOKUP_BITS;
            i += (bits >> (LOOKUP_BITS + 2)) << offset;
            j += ((bits >> 2) & 0xf) << offset;
            bits &= SWAP_MASK | INVERT_MASK;
        }

        Ok((face, i, j))
    }

    /// Encode `(face, i, j)` leaf-cell coordinates into a cell ID
    /// truncated to `level`.
    fn from_face_ij_level(face: i32, i: i32, j: i32, level: i32) -> S2CellId {
        let mut bits = face & (S2CellId::SWAP_MASK as i32);
        let mut id: u64 = (face as u64) << (S2CellId::POS_BITS - 1);

        let required_steps = if level > 0 { (level + 2 + 3) / 4 } else { 0 };
        for k in (8 - required_steps..=7).rev() {
            let offset = k * LOOKUP_BITS;
            bits += ((i >> offset) & 0xf) << (LOOKUP_BITS + 2);
            bits += ((j >> offset) & 0xf) << 2;
            bits = LOOKUP_POS[bits as usize] as i32;
            id |= ((bits >> 2) as u64) << (k * 2 * LOOKUP_BITS);
            bits &= SWAP_MASK | INVERT_MASK;
        }

        id <<= 1;
        let mask = S2CellId::lsb_for_level(level);
        id = (id & mask.wrapping_neg()) | mask;
        S2CellId(id)
    }

    /// Encode `(face, i, j)` leaf-cell coordinates into a cell ID
    /// truncated to `level`. Used by neighbor enumeration.
    pub(crate) fn from_face_ij(face: i32, i: i32, j: i32, level: i32) -> S2CellId {
        S2CellId::from_face_ij_level(face, i, j, level)
    }

    pub(crate) fn face_ij(&self) -> Result<(i32, i32, i32), S2Error> {
        self.to_face_ij()
    }

    /// Convert a lat/lon pair (degrees) to a cell ID at the given level.
    /// Fails with [`S2Error::InvalidLevel`] if `level` is not in
    /// `[0, 30]`.
    pub fn from_lat_lon(lat_deg: f64, lon_deg: f64, level: i32) -> Result<S2CellId, S2Error> {
        if !(0..=S2CellId::MAX_LEVEL).contains(&level) {
            return Err(S2Error::InvalidLevel {
                level: level as i64,
                context: "",
            });
        }

        let p = lat_lon_to_xyz(lat_deg, lon_deg);
        let face = xyz_to_face(&p);
        let (u, v) = face_xyz_to_uv(face, &p)?;
        let (s, t) = (uv_to_st(u), uv_to_st(v));
        let (i, j) = (st_to_ij(s), st_to_ij(t));

        Ok(S2CellId::from_face_ij_level(face, i, j, level))
    }

    /// Convert this cell ID back to a lat/lon pair in degrees, using the
    /// cell center. Fails with [`S2Error::InvalidCellId`] if the id is
    /// invalid.
    pub fn to_lat_lon(&self) -> Result<(f64, f64), S2Error> {
        if !self.is_valid() {
            return Err(S2Error::InvalidCellId(self.0));
        }

        let (face, i, j) = self.to_face_ij()?;

        // The recovered (i, j) is one of the two leaf cells diagonally
        // bracketing the cell center; resolve which by the trailing-1
        // marker position (see spec.md Sec 4.3).
        let is_leaf = (self.0 & 1) != 0;
        let apply_correction = !is_leaf && (((i as u64) ^ (self.0 >> 2)) & 1) != 0;
        let delta: i64 = if is_leaf {
            1
        } else if apply_correction {
            2
        } else {
            0
        };

        let si = ((i as i64) << 1) + delta;
        let ti = ((j as i64) << 1) + delta;
        let (s, t) = (si_ti_to_st(si), si_ti_to_st(ti));
        let (u, v) = (st_to_uv(s), st_to_uv(t));
        let p = face_uv_to_xyz(face, u, v)?;

        Ok(xyz_to_lat_lon(&p))
    }
}

impl std::fmt::Display for S2CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::s2::token::cell_id_to_token(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lsb_of_zero_is_zero() {
        assert_eq!(S2CellId::none().lsb(), 0);
        assert!(!S2CellId::none().is_valid());
    }

    #[test]
    fn face_extraction() {
        let id = S2CellId::new(0x466d319000000000);
        assert_eq!(id.face(), 2);
    }

    #[test]
    fn encode_decode_face_zero_level_zero() {
        let cell = S2CellId::from_lat_lon(0.0, 0.0, 0).unwrap();
        assert_eq!(cell.id(), 1152921504606846976);
    }

    #[test]
    fn encode_decode_leaf() {
        let cell = S2CellId::from_lat_lon(0.0, 0.0, 30).unwrap();
        assert_eq!(cell.id(), 1152921504606846977);
    }

    #[test]
    fn level_round_trip() {
        let cell = S2CellId::from_lat_lon(45.0, 45.0, 17).unwrap();
        assert_eq!(cell.level().unwrap(), 17);
    }

    #[test]
    fn parent_of_level_zero_without_level_errors() {
        let cell = S2CellId::from_lat_lon(0.0, 0.0, 0).unwrap();
        assert!(cell.parent(None).is_err());
    }

    #[test]
    fn parent_truncation_is_idempotent() {
        let cell = S2CellId::from_lat_lon(12.3, 45.6, 25).unwrap();
        let p = cell.parent(Some(10)).unwrap();
        let p2 = p.parent(Some(10)).unwrap();
        assert_eq!(p, p2);
    }
}
