#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

mod arena;
mod error;
pub mod sequence;
pub mod split;

extern crate alloc;

use core::num::NonZeroU32;

pub use error::SequenceError;
pub use sequence::Cursor;
pub use sequence::CursorMut;
pub use sequence::IntoIter;
pub use sequence::Iter;
pub use sequence::Sequence;
pub use split::SplitPattern;
pub use split::split_key;
pub use split::split_pos;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
/// An opaque handle identifying a node inside a [`Sequence`].
///
/// Handles are **non-generational**: once a node is removed its slot may be
/// reused by a later insertion. They are only exposed for debugging; use a
/// [`Cursor`] to read through one.
pub struct Ptr(NonZeroU32);

impl core::fmt::Debug for Ptr {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Ptr({})", self.0.get() - 1)
    }
}

impl Ptr {
    pub(crate) fn unchecked_from(index: usize) -> Self {
        debug_assert!(
            index < u32::MAX as usize,
            "Index too large to fit in Ptr: {index}"
        );
        Ptr(NonZeroU32::MIN.saturating_add(index as u32))
    }

    pub(crate) fn unchecked_get(self) -> usize {
        self.0.get() as usize - 1
    }
}
