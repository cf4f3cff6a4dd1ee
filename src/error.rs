//! Errors reported by [`Tree`][crate::Tree].
//!
//! Looking up or removing a missing value is not an error; those operations return `false` or
//! `None`. Only queries that have no sensible answer at all end up here.

use thiserror::Error;

/// Why a [`Tree`][crate::Tree] operation could not produce a result.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// `first`/`last` was asked of a set with no elements.
    #[error("the set is empty")]
    Empty,

    /// A range view was requested. The tree never provides these.
    #[error("`{operation}` is not supported: range views over the set are not provided")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

/// Shorthand for results carrying an [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(Error::Empty.to_string(), "the set is empty");

        let unsupported = Error::Unsupported {
            operation: "head_set",
        };
        assert!(unsupported.to_string().starts_with("`head_set` is not supported"));
    }
}
