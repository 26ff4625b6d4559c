use core::fmt;

use crate::Ptr;
use crate::error::SequenceError;
use crate::sequence::Sequence;

/// A read-only position inside a [`Sequence`].
///
/// A cursor either references one element or references nothing, in which
/// case it is the *empty* cursor returned by [`Sequence::empty`]. Reading
/// through or advancing the empty cursor is an error rather than a silent
/// no-op.
///
/// Cursors borrow their sequence, so the sequence cannot be structurally
/// modified while one is alive. Two cursors are equal when they reference the
/// same element of the same sequence, or are both empty. Empty cursors compare
/// equal regardless of which sequence produced them.
///
/// # Examples
///
/// ```
/// use keyed_sequence::Sequence;
/// use keyed_sequence::SequenceError;
///
/// let seq: Sequence<_, _> = [(1, 'a'), (2, 'b'), (3, 'c')].into_iter().collect();
///
/// let mut cursor = seq.begin();
/// let mut keys = Vec::new();
/// while cursor != seq.empty() {
///     keys.push(*cursor.key()?);
///     cursor.advance()?;
/// }
/// assert_eq!(keys, [1, 2, 3]);
///
/// assert_eq!(cursor.key(), Err(SequenceError::InvalidCursorAccess));
/// # Ok::<(), SequenceError>(())
/// ```
pub struct Cursor<'s, K, I> {
    seq: &'s Sequence<K, I>,
    ptr: Option<Ptr>,
}

impl<K, I> Clone for Cursor<'_, K, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, I> Copy for Cursor<'_, K, I> {}

impl<K, I> PartialEq for Cursor<'_, K, I> {
    fn eq(&self, other: &Self) -> bool {
        match (self.ptr, other.ptr) {
            (None, None) => true,
            // Arena indices are per sequence, so the same index in two
            // sequences is two different nodes.
            (Some(a), Some(b)) => a == b && core::ptr::eq(self.seq, other.seq),
            _ => false,
        }
    }
}

impl<K, I> Eq for Cursor<'_, K, I> {}

impl<K, I> fmt::Debug for Cursor<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("ptr", &self.ptr).finish()
    }
}

impl<'s, K, I> Cursor<'s, K, I> {
    pub(crate) fn new(seq: &'s Sequence<K, I>, ptr: Option<Ptr>) -> Self {
        Cursor { seq, ptr }
    }

    /// Returns the handle of the referenced element, if any.
    pub fn ptr(&self) -> Option<Ptr> {
        self.ptr
    }

    /// Returns `true` if the cursor references nothing.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    fn current(&self) -> Result<Ptr, SequenceError> {
        self.ptr.ok_or(SequenceError::InvalidCursorAccess)
    }

    /// Returns the key of the referenced element.
    pub fn key(&self) -> Result<&'s K, SequenceError> {
        let ptr = self.current()?;
        Ok(&self.seq.nodes[ptr].key)
    }

    /// Returns the info of the referenced element.
    pub fn info(&self) -> Result<&'s I, SequenceError> {
        let ptr = self.current()?;
        Ok(&self.seq.nodes[ptr].info)
    }

    /// Returns both the key and the info of the referenced element.
    pub fn entry(&self) -> Result<(&'s K, &'s I), SequenceError> {
        let ptr = self.current()?;
        let data = &self.seq.nodes[ptr];
        Ok((&data.key, &data.info))
    }

    /// Moves to the next element. Advancing from the last element yields the
    /// empty cursor.
    pub fn advance(&mut self) -> Result<(), SequenceError> {
        let ptr = self.current()?;
        self.ptr = self.seq.nodes.links(ptr).next();
        Ok(())
    }

    /// Moves to the next element and returns the position held before the
    /// move.
    pub fn post_advance(&mut self) -> Result<Self, SequenceError> {
        let before = *self;
        self.advance()?;
        Ok(before)
    }

    /// Returns a cursor `steps` elements further on. Walking off the end
    /// stops at the empty cursor instead of failing.
    ///
    /// Fails only if this cursor is itself empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_sequence::Sequence;
    ///
    /// let seq: Sequence<_, _> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    /// let begin = seq.begin();
    ///
    /// assert_eq!(begin.forward(2).unwrap(), seq.end());
    /// assert_eq!(begin.forward(10).unwrap(), seq.empty());
    /// assert!(seq.empty().forward(0).is_err());
    /// ```
    pub fn forward(&self, steps: usize) -> Result<Self, SequenceError> {
        self.current()?;

        let mut moved = *self;
        for _ in 0..steps {
            if moved.is_empty() {
                break;
            }
            moved.advance()?;
        }
        Ok(moved)
    }
}

/// A position inside a [`Sequence`] that can edit the referenced element in
/// place.
///
/// Created by [`Sequence::begin_mut`] and [`Sequence::find_mut`]. Like
/// [`Cursor`] it may reference nothing, and every access through an empty
/// `CursorMut` fails with [`SequenceError::InvalidCursorAccess`]. It holds
/// the sequence mutably, so only one exists at a time and no structural
/// change can happen while it is alive.
///
/// # Examples
///
/// ```
/// use keyed_sequence::Sequence;
/// use keyed_sequence::SequenceError;
///
/// let mut seq: Sequence<_, _> = [(1, 10), (2, 20), (1, 30)].into_iter().collect();
///
/// let mut cursor = seq.begin_mut();
/// while !cursor.is_empty() {
///     *cursor.info_mut()? += 1;
///     cursor.advance()?;
/// }
///
/// if let Some(mut second) = seq.find_mut(&1, 2) {
///     *second.key_mut()? = 3;
/// }
/// assert_eq!(seq.to_string(), "[(1, 11), (2, 21), (3, 31)]");
/// # Ok::<(), SequenceError>(())
/// ```
pub struct CursorMut<'s, K, I> {
    seq: &'s mut Sequence<K, I>,
    ptr: Option<Ptr>,
}

impl<K, I> fmt::Debug for CursorMut<'_, K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("ptr", &self.ptr).finish()
    }
}

impl<'s, K, I> CursorMut<'s, K, I> {
    pub(crate) fn new(seq: &'s mut Sequence<K, I>, ptr: Option<Ptr>) -> Self {
        CursorMut { seq, ptr }
    }

    /// Returns the handle of the referenced element, if any.
    pub fn ptr(&self) -> Option<Ptr> {
        self.ptr
    }

    /// Returns `true` if the cursor references nothing.
    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    fn current(&self) -> Result<Ptr, SequenceError> {
        self.ptr.ok_or(SequenceError::InvalidCursorAccess)
    }

    /// Returns the key of the referenced element.
    pub fn key(&self) -> Result<&K, SequenceError> {
        let ptr = self.current()?;
        Ok(&self.seq.nodes[ptr].key)
    }

    /// Returns the info of the referenced element.
    pub fn info(&self) -> Result<&I, SequenceError> {
        let ptr = self.current()?;
        Ok(&self.seq.nodes[ptr].info)
    }

    /// Returns a mutable reference to the key of the referenced element.
    ///
    /// Changing a key changes which occurrence later lookups find.
    pub fn key_mut(&mut self) -> Result<&mut K, SequenceError> {
        let ptr = self.current()?;
        Ok(&mut self.seq.nodes[ptr].key)
    }

    /// Returns a mutable reference to the info of the referenced element.
    pub fn info_mut(&mut self) -> Result<&mut I, SequenceError> {
        let ptr = self.current()?;
        Ok(&mut self.seq.nodes[ptr].info)
    }

    /// Moves to the next element. Advancing from the last element yields the
    /// empty cursor.
    pub fn advance(&mut self) -> Result<(), SequenceError> {
        let ptr = self.current()?;
        self.ptr = self.seq.nodes.links(ptr).next();
        Ok(())
    }

    /// Reborrows as a read-only [`Cursor`] at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, I> {
        Cursor::new(self.seq, self.ptr)
    }
}
