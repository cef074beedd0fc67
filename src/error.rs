use thiserror::Error as DeriveError;

/// Errors that can be produced by the cell-ID / token / lat-lon conversions.
///
/// Every fallible operation in this crate returns one of these kinds;
/// there are no transient failure modes since the library performs no I/O.
#[derive(Debug, DeriveError, Clone, PartialEq)]
pub enum S2Error {
    /// A level was not an integer in `[0, 30]`, or (for `cell_id_to_parent`)
    /// was greater than the cell's current level.
    #[error("invalid S2 level {level}: must be 0..=30{context}")]
    InvalidLevel {
        level: i64,
        /// Extra context, e.g. " and <= current level 12".
        context: &'static str,
    },

    /// A cell ID is zero, has face bits greater than 5, or has its
    /// trailing-1 marker at a forbidden bit position.
    #[error("invalid S2 cell ID: {0:#x}")]
    InvalidCellId(u64),

    /// A token has non-hex characters, is longer than 16 characters, or
    /// decodes to an invalid cell ID.
    #[error("invalid S2 token: {0:?}")]
    InvalidToken(String),

    /// A face derived during decoding exceeded 5. Defensive: unreachable
    /// from a valid cell ID, but kept for parity with the projection
    /// kernel's own face validation.
    #[error("invalid S2 face: {0}")]
    InvalidFace(i32),

    /// Caller-provided value was not of the accepted primitive kind.
    ///
    /// Rust's type system rejects this at compile time for every operation
    /// in this crate; this variant exists only for parity with the
    /// reference implementation's dynamically-typed callers and is never
    /// constructed here.
    #[error("type mismatch")]
    TypeMismatch,
}
