//! Edge and corner neighbor enumeration.
//!
//! Neither the projection kernel nor the bit codec alone can name a
//! cell's neighbors: a same-level neighbor one step off the cell's
//! `(i, j)` grid may fall outside the current face entirely, in which
//! case it must be re-projected through `(u, v, x, y, z)` to land on
//! the correct adjacent face and orientation.

use crate::error::S2Error;
use crate::s2::{face_uv_to_xyz, face_xyz_to_uv, st_to_ij, st_to_uv, uv_to_st, xyz_to_face, S2CellId};

/// Side length, in leaf-cell units, of a cell at `level`.
fn get_size_ij(level: i32) -> i32 {
    1 << (S2CellId::MAX_LEVEL - level)
}

/// Linear (non-quadratic) conversion of an i/j leaf-cell index to its
/// cell-space coordinate. Used only as an intermediate when
/// re-projecting an out-of-range index across a face boundary; the
/// quadratic `st_to_ij`/`uv_to_st` pair is used for the final snap.
fn ij_to_st(i: i32) -> f64 {
    i as f64 / S2CellId::MAX_SIZE as f64
}

/// Re-project an `(i, j)` index that has walked off the edge of `face`
/// onto whichever face it actually lands on.
fn from_face_ij_wrap(face: i32, i: i32, j: i32, level: i32) -> Result<S2CellId, S2Error> {
    let i = i.clamp(-1, S2CellId::MAX_SIZE);
    let j = j.clamp(-1, S2CellId::MAX_SIZE);

    let u = st_to_uv(ij_to_st(i));
    let v = st_to_uv(ij_to_st(j));
    let p = face_uv_to_xyz(face, u, v)?;

    let new_face = xyz_to_face(&p);
    let (u, v) = face_xyz_to_uv(new_face, &p)?;
    let new_i = st_to_ij(uv_to_st(u));
    let new_j = st_to_ij(uv_to_st(v));

    Ok(S2CellId::from_face_ij(new_face, new_i, new_j, level))
}

fn from_face_ij_same(
    face: i32,
    i: i32,
    j: i32,
    same_face: bool,
    level: i32,
) -> Result<S2CellId, S2Error> {
    if same_face {
        Ok(S2CellId::from_face_ij(face, i, j, level))
    } else {
        from_face_ij_wrap(face, i, j, level)
    }
}

/// The four cells sharing an edge with `id`, in down, right, up, left
/// order (relative to the cell's own face orientation).
pub fn edge_neighbors(id: S2CellId) -> Result<Vec<S2CellId>, S2Error> {
    let level = id.level()?;
    let size = get_size_ij(level);
    let (face, i, j) = id.face_ij()?;
    let max = S2CellId::MAX_SIZE;

    Ok(vec![
        from_face_ij_same(face, i, j - size, j - size >= 0, level)?,
        from_face_ij_same(face, i + size, j, i + size < max, level)?,
        from_face_ij_same(face, i, j + size, j + size < max, level)?,
        from_face_ij_same(face, i - size, j, i - size >= 0, level)?,
    ])
}

/// The (up to four, deduplicated) cells sharing only a corner with
/// `id`, starting from the down-left diagonal and proceeding
/// clockwise.
pub fn corner_neighbors(id: S2CellId) -> Result<Vec<S2CellId>, S2Error> {
    let level = id.level()?;
    let size = get_size_ij(level);
    let (face, i, j) = id.face_ij()?;
    let max = S2CellId::MAX_SIZE;

    let mut result = Vec::with_capacity(4);
    for (di, dj) in [(-size, -size), (size, -size), (size, size), (-size, size)] {
        let ni = i + di;
        let nj = j + dj;
        let same_face = (0..max).contains(&ni) && (0..max).contains(&nj);
        let neighbor = from_face_ij_same(face, ni, nj, same_face, level)?;
        if !result.contains(&neighbor) {
            result.push(neighbor);
        }
    }
    Ok(result)
}

/// Enumerate the neighbors of `id`, selecting edge-adjacent,
/// corner-adjacent, or both per the given flags.
pub fn cell_id_to_neighbor_cell_ids(
    id: S2CellId,
    edge: bool,
    corner: bool,
) -> Result<Vec<S2CellId>, S2Error> {
    if !id.is_valid() {
        return Err(S2Error::InvalidCellId(id.id()));
    }

    let mut result = Vec::new();
    if edge {
        result.extend(edge_neighbors(id)?);
    }
    if corner {
        result.extend(corner_neighbors(id)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_neighbors_match_reference_vector() {
        let id = S2CellId::new(0x466d319000000000);
        let neighbors = edge_neighbors(id).unwrap();
        let ids: Vec<u64> = neighbors.iter().map(|n| n.id()).collect();
        assert_eq!(
            ids,
            vec![
                0x466d31b000000000,
                0x466d317000000000,
                0x466d323000000000,
                0x466d31f000000000,
            ]
        );
    }

    #[test]
    fn corner_neighbors_are_deduplicated() {
        let id = S2CellId::from_lat_lon(0.0, 0.0, 5).unwrap();
        let neighbors = corner_neighbors(id).unwrap();
        assert!(neighbors.len() <= 4);
        let mut seen = std::collections::HashSet::new();
        for n in &neighbors {
            assert!(seen.insert(n.id()));
        }
    }

    #[test]
    fn invalid_cell_errors() {
        assert!(cell_id_to_neighbor_cell_ids(S2CellId::none(), true, false).is_err());
    }
}
