//! Error types for the set containers.
//!
//! The containers have a deliberately narrow failure surface: the only thing
//! that can go wrong while growing a node graph is running out of memory.
//! The fallible `try_*` entry points report that as [`SetError::Allocation`]
//! and leave the container exactly as it was.

use std::collections::TryReserveError;

/// Represents errors raised by the fallible container operations.
///
/// # Examples
///
/// ```rust
/// use setkit::set::SetError;
///
/// let error = SetError::InvalidProbability(1.5);
/// assert_eq!(
///     format!("{error}"),
///     "promotion probability must lie within [0, 1], got 1.5"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SetError {
    /// Reserving room for new nodes or a new bucket array failed.
    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// A level-promotion probability outside `[0, 1]` (or NaN) was supplied.
    #[error("promotion probability must lie within [0, 1], got {0}")]
    InvalidProbability(f64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_allocation_error_from_try_reserve() {
        let mut buffer: Vec<u64> = Vec::new();
        let reserve_error = buffer.try_reserve(usize::MAX).unwrap_err();
        let error = SetError::from(reserve_error.clone());
        assert_eq!(error, SetError::Allocation(reserve_error));
        assert!(format!("{error}").starts_with("allocation failed: "));
    }

    #[rstest]
    #[case(-0.5)]
    #[case(2.0)]
    fn test_invalid_probability_display(#[case] probability: f64) {
        let message = SetError::InvalidProbability(probability).to_string();
        assert!(message.starts_with("promotion probability must lie within [0, 1]"));
        assert!(message.ends_with(&format!("got {probability}")));
    }
}
