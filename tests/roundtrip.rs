//! Property-based round-trip and structural invariants.

use proptest::prelude::*;
use s2cell::{
    cell_id_is_valid, cell_id_to_level, cell_id_to_parent, cell_id_to_token, lat_lon_to_cell_id,
    token_is_valid, token_to_canonical_token, token_to_cell_id,
};

proptest! {
    /// Every cell ID produced by the encode path is valid, and its
    /// level matches the level it was encoded at.
    #[test]
    fn encoded_cells_are_valid_at_the_requested_level(
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        level in 0u8..=30,
    ) {
        let id = lat_lon_to_cell_id(lat, lon, level).unwrap();
        prop_assert!(cell_id_is_valid(id));
        prop_assert_eq!(cell_id_to_level(id).unwrap(), level as i32);
    }

    /// Token encode/decode is a lossless round trip through the id.
    #[test]
    fn token_round_trips_through_cell_id(
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        level in 0u8..=30,
    ) {
        let id = lat_lon_to_cell_id(lat, lon, level).unwrap();
        let token = cell_id_to_token(id);
        prop_assert_eq!(token_to_cell_id(&token).unwrap(), id);
        prop_assert!(token_is_valid(&token));
    }

    /// Canonicalizing an already-canonical token is a no-op.
    #[test]
    fn canonical_token_is_a_fixed_point(
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        level in 0u8..=30,
    ) {
        let id = lat_lon_to_cell_id(lat, lon, level).unwrap();
        let token = cell_id_to_token(id);
        prop_assert_eq!(token_to_canonical_token(&token), token);
    }

    /// Truncating to a shallower level, then truncating again to the
    /// same level, is idempotent (cell IDs form a prefix hierarchy).
    #[test]
    fn parent_truncation_is_idempotent(
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        level in 5u8..=30,
        ancestor_level in 0u8..5,
    ) {
        let id = lat_lon_to_cell_id(lat, lon, level).unwrap();
        let parent = cell_id_to_parent(id, Some(ancestor_level)).unwrap();
        let parent_again = cell_id_to_parent(parent, Some(ancestor_level)).unwrap();
        prop_assert_eq!(parent, parent_again);
        prop_assert_eq!(cell_id_to_level(parent).unwrap(), ancestor_level as i32);
    }

    /// Direct-parent chaining one level at a time lands on the same
    /// cell as jumping straight to that level.
    #[test]
    fn direct_parent_matches_explicit_level_jump(
        lat in -90.0f64..90.0,
        lon in -180.0f64..180.0,
        level in 1u8..=30,
    ) {
        let id = lat_lon_to_cell_id(lat, lon, level).unwrap();
        let stepwise = cell_id_to_parent(id, None).unwrap();
        let direct = cell_id_to_parent(id, Some(level - 1)).unwrap();
        prop_assert_eq!(stepwise, direct);
    }
}
