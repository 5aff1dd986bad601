/// Errors returned by [`Tree`][crate::Tree] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// `remove` was asked for a value the tree doesn't hold. The tree is left untouched.
    #[error("value not found in the tree")]
    NotFound,
}

/// Shorthand for results carrying a [`TreeError`].
pub type Result<T> = std::result::Result<T, TreeError>;
