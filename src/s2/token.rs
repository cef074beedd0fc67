//! Hex-string token codec for [`S2CellId`].
//!
//! A token is the canonical textual form of a cell ID: the 16-digit
//! lowercase hex encoding of the 64-bit id with trailing zeros elided,
//! and the special sentinel `"X"` for the zero (invalid) cell ID.

use crate::error::S2Error;
use crate::s2::S2CellId;

const TOKEN_LEN: usize = 16;

/// Encode a cell ID as its canonical token. Infallible: every `u64` has
/// a token representation, even if it is not a valid cell ID.
pub fn cell_id_to_token(id: S2CellId) -> String {
    if id.id() == 0 {
        return "X".to_string();
    }
    let hex = format!("{:016x}", id.id());
    let trimmed = hex.trim_end_matches('0');
    trimmed.to_string()
}

/// Decode a token back into a cell ID.
///
/// `"X"`/`"x"` decodes to the zero cell ID. Any other token must be
/// at most 16 hex digits (an empty string is allowed and decodes to
/// the zero cell ID); it is right-padded with zeros to 16 digits
/// before parsing. Longer strings or non-hex characters return
/// [`S2Error::InvalidToken`].
pub fn token_to_cell_id(token: &str) -> Result<S2CellId, S2Error> {
    if token.eq_ignore_ascii_case("x") {
        return Ok(S2CellId::none());
    }
    if token.len() > TOKEN_LEN || !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(S2Error::InvalidToken(token.to_string()));
    }

    let mut padded = token.to_string();
    padded.push_str(&"0".repeat(TOKEN_LEN - token.len()));

    let id = u64::from_str_radix(&padded, 16).map_err(|_| S2Error::InvalidToken(token.to_string()))?;
    Ok(S2CellId::new(id))
}

/// Normalize a token to its canonical lowercase, trailing-zero-elided
/// form, without requiring it to decode to a valid cell ID.
///
/// # Examples
/// ```
/// use s2cell::s2::token::token_to_canonical_token;
///
/// assert_eq!(token_to_canonical_token("1000000000000000"), "1");
/// assert_eq!(token_to_canonical_token(""), "X");
/// ```
pub fn token_to_canonical_token(token: &str) -> String {
    if token.eq_ignore_ascii_case("x") {
        return "X".to_string();
    }
    let lower = token.to_ascii_lowercase();
    let trimmed = lower.trim_end_matches('0');
    if trimmed.is_empty() {
        "X".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Returns true if `token` is syntactically well-formed (1-16 hex
/// digits, or the `"X"`/`"x"` sentinel) and decodes to a valid cell ID.
pub fn token_is_valid(token: &str) -> bool {
    match token_to_cell_id(token) {
        Ok(id) => id.is_valid(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cell_round_trips_through_x() {
        assert_eq!(cell_id_to_token(S2CellId::none()), "X");
        assert_eq!(token_to_cell_id("X").unwrap(), S2CellId::none());
        assert_eq!(token_to_cell_id("x").unwrap(), S2CellId::none());
    }

    #[test]
    fn trailing_zeros_are_elided() {
        let id = S2CellId::new(0x4054545155144101);
        assert_eq!(cell_id_to_token(id), "4054545155144101");

        let id = S2CellId::new(0x5000000000000001);
        assert_eq!(cell_id_to_token(id), "5000000000000001");

        let id = S2CellId::new(0x1000000000000000);
        assert_eq!(cell_id_to_token(id), "1");
    }

    #[test]
    fn empty_token_decodes_to_the_zero_cell_id() {
        assert_eq!(token_to_cell_id("").unwrap(), S2CellId::none());
    }

    #[test]
    fn invalid_tokens_are_rejected() {
        assert!(token_to_cell_id("z").is_err());
        assert!(token_to_cell_id("1").unwrap().id() == 0x1000000000000000);
        assert!(token_to_cell_id("00000000000000000").is_err());
    }

    #[test]
    fn canonicalization_is_case_and_padding_insensitive() {
        assert_eq!(token_to_canonical_token("4054545155144100"), "40545451551441");
        assert_eq!(token_to_canonical_token("BFABABAEAAEBBEFF"), "bfababaeaaebbeff");
        assert_eq!(token_to_canonical_token(""), "X");
    }
}
