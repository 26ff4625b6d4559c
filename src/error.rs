use thiserror::Error;

/// Precondition violations reported by cursors and by [`split_key`].
///
/// Ordinary "not found" outcomes are not errors: the container reports those
/// through `bool` or `Option` return values and leaves itself untouched.
///
/// [`split_key`]: crate::split::split_key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A key or info was read through, or an advance attempted on, a cursor
    /// that does not reference a node.
    #[error("cursor does not reference a node")]
    InvalidCursorAccess,
    /// The anchor of a key-based split does not exist in the sequence.
    #[error("split anchor not found (occurrence {occurrence})")]
    AnchorNotFound {
        /// The occurrence of the anchor key that was requested.
        occurrence: usize,
    },
}
