use core::iter::FusedIterator;

use crate::Ptr;
use crate::arena::Arena;
use crate::sequence::Sequence;

#[derive(Debug)]
/// An iterator over the entries of a `Sequence`.
///
/// This struct is created by the [`iter`] method on [`Sequence`]. See its
/// documentation for more.
///
/// [`iter`]: Sequence::iter
///
/// # Examples
///
/// ```
/// use keyed_sequence::Sequence;
///
/// let mut seq = Sequence::new();
/// seq.push_back("a", 1);
/// seq.push_back("b", 2);
///
/// for (key, info) in seq.iter() {
///     println!("{}: {}", key, info);
/// }
/// ```
pub struct Iter<'a, K, I> {
    pub(crate) next: Option<Ptr>,
    pub(crate) remaining: usize,
    pub(crate) nodes: &'a Arena<K, I>,
}

impl<K, I> Clone for Iter<'_, K, I> {
    fn clone(&self) -> Self {
        Iter {
            next: self.next,
            remaining: self.remaining,
            nodes: self.nodes,
        }
    }
}

impl<'a, K, I> Iterator for Iter<'a, K, I> {
    type Item = (&'a K, &'a I);

    fn next(&mut self) -> Option<Self::Item> {
        let ptr = self.next?;
        let slot = self.nodes.links(ptr);
        self.next = slot.next();
        self.remaining -= 1;

        let data = slot.data();
        Some((&data.key, &data.info))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, I> ExactSizeIterator for Iter<'_, K, I> {}

impl<K, I> FusedIterator for Iter<'_, K, I> {}

#[derive(Debug)]
/// An owning iterator over the entries of a `Sequence`.
///
/// This struct is created by the [`into_iter`] method on [`Sequence`]
/// (provided by the [`IntoIterator`] trait). Entries are yielded head to tail.
///
/// [`into_iter`]: IntoIterator::into_iter
/// [`IntoIterator`]: core::iter::IntoIterator
pub struct IntoIter<K, I> {
    pub(crate) seq: Sequence<K, I>,
}

impl<K, I> Iterator for IntoIter<K, I> {
    type Item = (K, I);

    fn next(&mut self) -> Option<Self::Item> {
        self.seq.remove_head()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.seq.len(), Some(self.seq.len()))
    }
}

impl<K, I> ExactSizeIterator for IntoIter<K, I> {}

impl<K, I> FusedIterator for IntoIter<K, I> {}
