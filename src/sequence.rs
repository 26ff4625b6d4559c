//! Singly-linked key/info sequence.
//!
//! This module provides the [`Sequence`] container together with its
//! [`Cursor`] and iterator types. A sequence keeps its elements in insertion
//! order and allows duplicate keys; elements sharing a key are told apart by
//! their *occurrence*, the 1-based rank of the element among those with the
//! same key when walking from the head.
//!
//! # Examples
//!
//! ```
//! use keyed_sequence::Sequence;
//!
//! let mut seq = Sequence::new();
//! seq.push_back(1, "one");
//! seq.push_back(2, "two");
//! seq.push_back(1, "uno");
//!
//! assert_eq!(seq.occurrences_of(&1), 2);
//! assert_eq!(seq.info(&1, 2), Some(&"uno"));
//! assert_eq!(seq.to_string(), "[(1, one), (2, two), (1, uno)]");
//! ```

mod cursor;
mod iter;

use alloc::vec::Vec;
use core::fmt;

pub use cursor::Cursor;
pub use cursor::CursorMut;
pub use iter::IntoIter;
pub use iter::Iter;

use crate::Ptr;
use crate::arena::Arena;

/// A singly-linked sequence of key/info pairs.
///
/// Nodes live in an internal arena and are linked by index, so the sequence
/// owns all of its elements outright and never hands out owning references.
/// The head, tail and length are cached: pushing at either end is O(1), while
/// anything that has to find a predecessor (including [`pop_back`]) is O(n).
///
/// Keys only need [`PartialEq`] for lookup. They are not required to be
/// unique.
///
/// [`pop_back`]: Sequence::pop_back
///
/// # Examples
///
/// ```
/// use keyed_sequence::Sequence;
///
/// let mut seq = Sequence::new();
/// seq.push_back("b", 2);
/// seq.push_front("a", 1);
/// seq.insert_after("c", 3, &"b", 1);
///
/// let entries: Vec<_> = seq.iter().collect();
/// assert_eq!(entries, [(&"a", &1), (&"b", &2), (&"c", &3)]);
/// ```
pub struct Sequence<K, I> {
    head: Option<Ptr>,
    tail: Option<Ptr>,
    len: usize,
    nodes: Arena<K, I>,
}

impl<K, I> Default for Sequence<K, I> {
    fn default() -> Self {
        Sequence::new()
    }
}

impl<K: Clone, I: Clone> Clone for Sequence<K, I> {
    fn clone(&self) -> Self {
        let mut copy = Sequence::with_capacity(self.len());
        copy.extend(self.iter());
        copy
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter());
    }
}

impl<K: fmt::Debug, I: fmt::Debug> fmt::Debug for Sequence<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct Entry<'a, K, I> {
            key: &'a K,
            info: &'a I,
        }

        let entries = self
            .iter()
            .map(|(key, info)| Entry { key, info })
            .collect::<Vec<_>>();

        f.debug_struct("Sequence")
            .field("len", &self.len)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("entries", &entries)
            .finish()
    }
}

/// Renders the sequence as `[(k1, i1), (k2, i2), ...]`.
impl<K: fmt::Display, I: fmt::Display> fmt::Display for Sequence<K, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, (key, info)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({key}, {info})")?;
        }
        f.write_str("]")
    }
}

impl<K, I> Sequence<K, I> {
    /// Creates an empty sequence. It will not allocate until the first
    /// element is inserted.
    pub fn new() -> Self {
        Sequence {
            head: None,
            tail: None,
            len: 0,
            nodes: Arena::new(),
        }
    }

    /// Creates an empty sequence able to hold `capacity` elements without
    /// reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Sequence {
            head: None,
            tail: None,
            len: 0,
            nodes: Arena::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_sequence::Sequence;
    ///
    /// let mut seq = Sequence::new();
    /// assert_eq!(seq.len(), 0);
    /// seq.push_back(1, 'a');
    /// assert_eq!(seq.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an element at the head of the sequence.
    pub fn push_front(&mut self, key: K, info: I) {
        let ptr = self.nodes.alloc(key, info, self.head);
        self.head = Some(ptr);
        if self.tail.is_none() {
            self.tail = Some(ptr);
        }
        self.len += 1;
    }

    /// Appends an element at the tail of the sequence.
    pub fn push_back(&mut self, key: K, info: I) {
        let ptr = self.nodes.alloc(key, info, None);
        match self.tail {
            Some(tail) => *self.nodes.links_mut(tail).next_mut() = Some(ptr),
            None => self.head = Some(ptr),
        }
        self.tail = Some(ptr);
        self.len += 1;
    }

    /// Removes the head element and returns it, or `None` if the sequence is
    /// empty.
    pub fn remove_head(&mut self) -> Option<(K, I)> {
        let head = self.head?;
        Some(self.unlink(None, head))
    }

    /// Removes the tail element and returns it, or `None` if the sequence is
    /// empty.
    ///
    /// There are no backward links, so this walks the whole sequence to find
    /// the new tail.
    pub fn remove_tail(&mut self) -> Option<(K, I)> {
        let tail = self.tail?;
        let prev = self.predecessor(tail);
        Some(self.unlink(prev, tail))
    }

    /// Removes the head element. Returns `false` if the sequence was empty.
    pub fn pop_front(&mut self) -> bool {
        self.remove_head().is_some()
    }

    /// Removes the tail element. Returns `false` if the sequence was empty.
    ///
    /// This is O(n), see [`remove_tail`](Sequence::remove_tail).
    pub fn pop_back(&mut self) -> bool {
        self.remove_tail().is_some()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a cursor to the first element, or the empty cursor if the
    /// sequence is empty.
    pub fn begin(&self) -> Cursor<'_, K, I> {
        Cursor::new(self, self.head)
    }

    /// Returns a cursor to the **last** element, or the empty cursor if the
    /// sequence is empty.
    ///
    /// Unlike the usual past-the-end convention this cursor can be
    /// dereferenced; [`empty`](Sequence::empty) is the sentinel that a
    /// forward walk ends on.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_sequence::Sequence;
    ///
    /// let seq: Sequence<_, _> = [(1, 10), (2, 20)].into_iter().collect();
    /// assert_eq!(seq.end().info(), Ok(&20));
    ///
    /// let mut cursor = seq.end();
    /// cursor.advance().unwrap();
    /// assert_eq!(cursor, seq.empty());
    /// ```
    pub fn end(&self) -> Cursor<'_, K, I> {
        Cursor::new(self, self.tail)
    }

    /// Returns the cursor that references nothing.
    pub fn empty(&self) -> Cursor<'_, K, I> {
        Cursor::new(self, None)
    }

    /// Returns an editing cursor at the first element, or an empty one if the
    /// sequence is empty.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, I> {
        let head = self.head;
        CursorMut::new(self, head)
    }

    /// Returns an iterator over the key/info pairs, head to tail.
    pub fn iter(&self) -> Iter<'_, K, I> {
        Iter {
            next: self.head,
            remaining: self.len,
            nodes: &self.nodes,
        }
    }

    /// Returns an iterator over the keys, head to tail.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the infos, head to tail.
    pub fn infos(&self) -> impl Iterator<Item = &I> {
        self.iter().map(|(_, info)| info)
    }

    fn predecessor(&self, target: Ptr) -> Option<Ptr> {
        let mut current = self.head?;
        loop {
            let next = self.nodes.links(current).next()?;
            if next == target {
                return Some(current);
            }
            current = next;
        }
    }

    /// `prev` must be the node directly before `target`, or `None` if
    /// `target` is the head.
    fn unlink(&mut self, prev: Option<Ptr>, target: Ptr) -> (K, I) {
        let slot = self.nodes.free(target);
        let next = slot.next();
        match prev {
            Some(prev) => *self.nodes.links_mut(prev).next_mut() = next,
            None => self.head = next,
        }
        if self.tail == Some(target) {
            self.tail = prev;
        }
        self.len -= 1;

        let data = slot.into_data();
        (data.key, data.info)
    }
}

impl<K: PartialEq, I> Sequence<K, I> {
    /// Finds the `occurrence`-th node with `key` in a single forward walk and
    /// returns it along with its predecessor.
    fn locate(&self, key: &K, occurrence: usize) -> Option<(Option<Ptr>, Ptr)> {
        let mut prev = None;
        let mut current = self.head;
        let mut count = 0;

        while let Some(ptr) = current {
            let slot = self.nodes.links(ptr);
            if slot.data().key == *key {
                count += 1;
                if count == occurrence {
                    return Some((prev, ptr));
                }
            }
            prev = current;
            current = slot.next();
        }

        None
    }

    /// Inserts a new element directly after the `occurrence`-th element
    /// whose key is `target_key`.
    ///
    /// Returns `false`, leaving the sequence unchanged, if there is no such
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_sequence::Sequence;
    ///
    /// let mut seq: Sequence<_, _> = [(1, 'a'), (1, 'b')].into_iter().collect();
    /// assert!(seq.insert_after(2, 'x', &1, 2));
    /// assert!(!seq.insert_after(2, 'y', &1, 3));
    /// assert_eq!(seq.to_string(), "[(1, a), (1, b), (2, x)]");
    /// ```
    pub fn insert_after(&mut self, key: K, info: I, target_key: &K, occurrence: usize) -> bool {
        let Some((_, target)) = self.locate(target_key, occurrence) else {
            return false;
        };

        let next = self.nodes.links(target).next();
        let ptr = self.nodes.alloc(key, info, next);
        *self.nodes.links_mut(target).next_mut() = Some(ptr);
        if self.tail == Some(target) {
            self.tail = Some(ptr);
        }
        self.len += 1;
        true
    }

    /// Inserts a new element directly before the `occurrence`-th element
    /// whose key is `target_key`.
    ///
    /// Returns `false`, leaving the sequence unchanged, if there is no such
    /// element.
    pub fn insert_before(&mut self, key: K, info: I, target_key: &K, occurrence: usize) -> bool {
        match self.locate(target_key, occurrence) {
            None => false,
            Some((None, _)) => {
                self.push_front(key, info);
                true
            }
            Some((Some(prev), target)) => {
                let ptr = self.nodes.alloc(key, info, Some(target));
                *self.nodes.links_mut(prev).next_mut() = Some(ptr);
                self.len += 1;
                true
            }
        }
    }

    /// Removes the `occurrence`-th element whose key is `key`.
    ///
    /// Returns `false` if there is no such element.
    pub fn remove(&mut self, key: &K, occurrence: usize) -> bool {
        match self.locate(key, occurrence) {
            Some((prev, target)) => {
                self.unlink(prev, target);
                true
            }
            None => false,
        }
    }

    /// Copies the info of the `occurrence`-th element with `key` into `info`.
    ///
    /// Returns `false`, without touching `info`, if there is no such element.
    pub fn get_info(&self, info: &mut I, key: &K, occurrence: usize) -> bool
    where
        I: Clone,
    {
        match self.info(key, occurrence) {
            Some(found) => {
                info.clone_from(found);
                true
            }
            None => false,
        }
    }

    /// Returns a reference to the info of the `occurrence`-th element with
    /// `key`.
    pub fn info(&self, key: &K, occurrence: usize) -> Option<&I> {
        self.locate(key, occurrence)
            .map(|(_, ptr)| &self.nodes[ptr].info)
    }

    /// Returns a mutable reference to the info of the `occurrence`-th element
    /// with `key`.
    pub fn info_mut(&mut self, key: &K, occurrence: usize) -> Option<&mut I> {
        let (_, ptr) = self.locate(key, occurrence)?;
        Some(&mut self.nodes[ptr].info)
    }

    /// Returns `true` if the sequence holds at least `occurrence` elements
    /// with `key`.
    ///
    /// Occurrences are 1-based, so `exists(key, 0)` is always `false`.
    pub fn exists(&self, key: &K, occurrence: usize) -> bool {
        self.locate(key, occurrence).is_some()
    }

    /// Counts the elements whose key is `key`.
    pub fn occurrences_of(&self, key: &K) -> usize {
        self.keys().filter(|candidate| *candidate == key).count()
    }

    /// Returns a cursor to the `occurrence`-th element with `key`.
    pub fn find(&self, key: &K, occurrence: usize) -> Option<Cursor<'_, K, I>> {
        self.locate(key, occurrence)
            .map(|(_, ptr)| Cursor::new(self, Some(ptr)))
    }

    /// Returns an editing cursor at the `occurrence`-th element with `key`.
    pub fn find_mut(&mut self, key: &K, occurrence: usize) -> Option<CursorMut<'_, K, I>> {
        let (_, ptr) = self.locate(key, occurrence)?;
        Some(CursorMut::new(self, Some(ptr)))
    }

    /// Returns a cursor to the element preceding the `occurrence`-th element
    /// with `key`.
    ///
    /// Returns `None` if the target does not exist or is the head.
    pub fn find_before(&self, key: &K, occurrence: usize) -> Option<Cursor<'_, K, I>> {
        let (prev, _) = self.locate(key, occurrence)?;
        prev.map(|ptr| Cursor::new(self, Some(ptr)))
    }

    /// Points `cursor` at the `occurrence`-th element with `key`.
    ///
    /// Returns `false`, leaving `cursor` untouched, if there is no such
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_sequence::Sequence;
    ///
    /// let seq: Sequence<_, _> = [(1, 1), (2, 2), (1, 11)].into_iter().collect();
    /// let mut cursor = seq.empty();
    ///
    /// assert!(seq.search(&mut cursor, &1, 2));
    /// assert_eq!(cursor.info(), Ok(&11));
    ///
    /// assert!(!seq.search(&mut cursor, &4, 1));
    /// assert_eq!(cursor.info(), Ok(&11));
    /// ```
    pub fn search<'s>(&'s self, cursor: &mut Cursor<'s, K, I>, key: &K, occurrence: usize) -> bool {
        match self.find(key, occurrence) {
            Some(found) => {
                *cursor = found;
                true
            }
            None => false,
        }
    }

    /// Points `cursor` at the element preceding the `occurrence`-th element
    /// with `key`.
    ///
    /// Returns `false`, leaving `cursor` untouched, if the target does not
    /// exist or is the head.
    pub fn search_before<'s>(
        &'s self,
        cursor: &mut Cursor<'s, K, I>,
        key: &K,
        occurrence: usize,
    ) -> bool {
        match self.find_before(key, occurrence) {
            Some(found) => {
                *cursor = found;
                true
            }
            None => false,
        }
    }
}

impl<K: PartialEq, I: PartialEq> PartialEq for Sequence<K, I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, I: Eq> Eq for Sequence<K, I> {}

impl<K, I> FromIterator<(K, I)> for Sequence<K, I> {
    fn from_iter<T: IntoIterator<Item = (K, I)>>(iter: T) -> Self {
        let mut seq = Sequence::new();
        seq.extend(iter);
        seq
    }
}

impl<K, I> Extend<(K, I)> for Sequence<K, I> {
    fn extend<T: IntoIterator<Item = (K, I)>>(&mut self, iter: T) {
        for (key, info) in iter {
            self.push_back(key, info);
        }
    }
}

impl<'a, K: Clone + 'a, I: Clone + 'a> Extend<(&'a K, &'a I)> for Sequence<K, I> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a I)>>(&mut self, iter: T) {
        for (key, info) in iter {
            self.push_back(key.clone(), info.clone());
        }
    }
}

impl<K, I> IntoIterator for Sequence<K, I> {
    type IntoIter = IntoIter<K, I>;
    type Item = (K, I);

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { seq: self }
    }
}

impl<'a, K, I> IntoIterator for &'a Sequence<K, I> {
    type IntoIter = Iter<'a, K, I>;
    type Item = (&'a K, &'a I);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use core::fmt;
    use core::marker::PhantomData;

    use serde::Deserialize;
    use serde::Deserializer;
    use serde::Serialize;
    use serde::Serializer;
    use serde::de::SeqAccess;
    use serde::de::Visitor;
    use serde::ser::SerializeSeq;

    use super::Sequence;

    const MAX_PREALLOCATION: usize = 4096;

    impl<K: Serialize, I: Serialize> Serialize for Sequence<K, I> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for entry in self.iter() {
                seq.serialize_element(&entry)?;
            }
            seq.end()
        }
    }

    struct SequenceVisitor<K, I> {
        marker: PhantomData<fn() -> Sequence<K, I>>,
    }

    impl<'de, K, I> Visitor<'de> for SequenceVisitor<K, I>
    where
        K: Deserialize<'de>,
        I: Deserialize<'de>,
    {
        type Value = Sequence<K, I>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of [key, info] pairs")
        }

        fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            // The hint comes from the input, so it only bounds preallocation.
            let capacity = access.size_hint().unwrap_or(0).min(MAX_PREALLOCATION);
            let mut seq = Sequence::with_capacity(capacity);
            while let Some((key, info)) = access.next_element()? {
                seq.push_back(key, info);
            }
            Ok(seq)
        }
    }

    impl<'de, K, I> Deserialize<'de> for Sequence<K, I>
    where
        K: Deserialize<'de>,
        I: Deserialize<'de>,
    {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_seq(SequenceVisitor {
                marker: PhantomData,
            })
        }
    }

}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::{
        String,
        ToString,
    };
    use alloc::vec;

    use super::*;

    type TestSeq = Sequence<i32, i32>;

    fn seq_of(pairs: &[(i32, i32)]) -> TestSeq {
        pairs.iter().copied().collect()
    }

    fn keys_of(seq: &TestSeq) -> Vec<i32> {
        seq.keys().copied().collect()
    }

    /// Walks the chain by hand and checks the cached head/tail/len agree
    /// with it.
    fn assert_consistent<K, I>(seq: &Sequence<K, I>) {
        assert_eq!(seq.head.is_none(), seq.len == 0);
        assert_eq!(seq.tail.is_none(), seq.len == 0);

        let mut count = 0;
        let mut last = None;
        let mut current = seq.head;
        while let Some(ptr) = current {
            count += 1;
            last = Some(ptr);
            current = seq.nodes.links(ptr).next();
        }
        assert_eq!(count, seq.len);
        assert_eq!(last, seq.tail);
    }

    #[test]
    fn test_empty_sequence() {
        let seq = TestSeq::new();
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        assert_eq!(seq.begin(), seq.empty());
        assert_eq!(seq.end(), seq.empty());
        assert_consistent(&seq);
    }

    #[test]
    fn test_default_and_with_capacity() {
        let seq: TestSeq = Sequence::default();
        assert!(seq.is_empty());

        let seq = TestSeq::with_capacity(16);
        assert!(seq.is_empty());
    }

    #[test]
    fn test_push_and_pop() {
        let mut seq = TestSeq::new();
        seq.push_front(1, 1);
        seq.push_front(2, 2);
        seq.push_front(3, 3);
        assert_eq!(seq.len(), 3);
        assert_eq!(keys_of(&seq), [3, 2, 1]);
        assert_consistent(&seq);

        assert!(seq.pop_front());
        assert!(seq.pop_front());
        assert!(seq.pop_front());
        assert_eq!(seq.len(), 0);
        assert!(!seq.pop_front());
        assert_consistent(&seq);

        seq.push_back(4, 4);
        seq.push_back(5, 5);
        seq.push_back(6, 6);
        assert_eq!(seq.len(), 3);
        assert!(seq.pop_back());
        assert!(seq.pop_back());
        assert_eq!(seq.len(), 1);
        assert_eq!(keys_of(&seq), [4]);
        assert_consistent(&seq);

        seq.clear();
        assert_eq!(seq.len(), 0);
        assert!(seq.is_empty());
        assert!(!seq.pop_back());
        assert_consistent(&seq);
    }

    #[test]
    fn test_remove_head_and_tail_return_pairs() {
        let mut seq = seq_of(&[(1, 10), (2, 20), (3, 30)]);
        assert_eq!(seq.remove_tail(), Some((3, 30)));
        assert_eq!(seq.remove_head(), Some((1, 10)));
        assert_eq!(seq.remove_tail(), Some((2, 20)));
        assert_eq!(seq.remove_tail(), None);
        assert_eq!(seq.remove_head(), None);
        assert_consistent(&seq);
    }

    #[test]
    fn test_push_after_clear_and_slot_reuse() {
        let mut seq = seq_of(&[(1, 1), (2, 2), (3, 3)]);
        assert!(seq.remove(&2, 1));
        seq.push_back(4, 4);
        seq.push_front(0, 0);
        assert_eq!(keys_of(&seq), [0, 1, 3, 4]);
        assert_consistent(&seq);

        seq.clear();
        seq.push_back(9, 9);
        assert_eq!(keys_of(&seq), [9]);
        assert_consistent(&seq);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut seq = seq_of(&[(1, 1), (2, 2), (3, 3)]);

        let copy = seq.clone();
        assert_eq!(copy.len(), seq.len());
        assert!(copy.exists(&1, 1));
        assert!(copy.exists(&2, 1));
        assert!(copy.exists(&3, 1));

        assert!(seq.remove(&2, 1));
        assert_eq!(seq.len(), 2);
        assert!(!seq.exists(&2, 1));

        assert_eq!(copy.len(), 3);
        assert!(copy.exists(&2, 1));
        assert_consistent(&copy);
    }

    #[test]
    fn test_clone_from_replaces_contents() {
        let mut seq = seq_of(&[(1, 1), (3, 3)]);
        let mut target = seq_of(&[(4, 4), (5, 5)]);

        target.clone_from(&seq);
        assert_eq!(target, seq);
        assert!(!target.exists(&4, 1));

        assert!(seq.remove(&1, 1));
        assert_eq!(seq.len(), 1);
        assert!(!seq.exists(&1, 1));
        assert_eq!(target.len(), 2);
        assert!(target.exists(&1, 1));
        assert_consistent(&target);
    }

    #[test]
    fn test_search_by_occurrence() {
        let seq = seq_of(&[(1, 1), (2, 2), (1, 11), (3, 3)]);

        let mut it = seq.empty();
        assert!(seq.search(&mut it, &1, 1));
        assert_eq!(it.key(), Ok(&1));
        assert_eq!(it.info(), Ok(&1));

        assert!(seq.search(&mut it, &1, 2));
        assert_eq!(it.key(), Ok(&1));
        assert_eq!(it.info(), Ok(&11));

        assert!(!seq.search(&mut it, &4, 1));
        assert!(!seq.search(&mut it, &1, 0));
        assert_eq!(it.info(), Ok(&11));

        let mut before = seq.empty();
        assert!(seq.search_before(&mut before, &2, 1));
        assert_eq!(before.key(), Ok(&1));
        assert_eq!(before.info(), Ok(&1));

        assert!(seq.search_before(&mut before, &1, 2));
        assert_eq!(before.key(), Ok(&2));

        assert!(!seq.search_before(&mut before, &1, 1));
        assert!(!seq.search_before(&mut before, &4, 1));
        assert_eq!(before.key(), Ok(&2));

        assert_eq!(seq.occurrences_of(&1), 2);
        assert_eq!(seq.occurrences_of(&2), 1);
        assert_eq!(seq.occurrences_of(&4), 0);
    }

    #[test]
    fn test_exists_checks_requested_occurrence() {
        let seq = seq_of(&[(1, 1), (2, 2), (1, 11)]);
        assert!(seq.exists(&1, 1));
        assert!(seq.exists(&1, 2));
        assert!(!seq.exists(&1, 3));
        assert!(!seq.exists(&1, 0));
        assert!(seq.exists(&2, 1));
        assert!(!seq.exists(&4, 1));
    }

    #[test]
    fn test_get_info() {
        let seq = seq_of(&[(1, 1), (2, 2), (1, 11)]);
        let mut info = -1;

        assert!(seq.get_info(&mut info, &1, 2));
        assert_eq!(info, 11);

        assert!(!seq.get_info(&mut info, &1, 3));
        assert!(!seq.get_info(&mut info, &7, 1));
        assert_eq!(info, 11);
    }

    #[test]
    fn test_info_mut() {
        let mut seq = seq_of(&[(1, 1), (1, 2)]);
        *seq.info_mut(&1, 2).unwrap() = 20;
        assert_eq!(seq.info(&1, 2), Some(&20));
        assert_eq!(seq.info(&1, 1), Some(&1));
        assert!(seq.info_mut(&3, 1).is_none());
    }

    #[test]
    fn test_remove_positions() {
        let mut seq = seq_of(&[(1, 1), (2, 2), (3, 3)]);

        assert!(seq.remove(&1, 1));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.begin().key(), Ok(&2));
        assert_eq!(seq.end().key(), Ok(&3));
        seq.push_front(1, 1);

        assert!(seq.remove(&2, 1));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.begin().key(), Ok(&1));
        assert_eq!(seq.end().key(), Ok(&3));

        assert!(seq.remove(&3, 1));
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.begin().key(), Ok(&1));
        assert_eq!(seq.end().key(), Ok(&1));

        assert!(seq.remove(&1, 1));
        assert!(seq.is_empty());
        assert!(!seq.remove(&1, 1));
        assert_consistent(&seq);

        seq.extend([(1, 1), (1, 11), (3, 3)]);
        assert!(seq.remove(&1, 2));
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.begin().info(), Ok(&1));
        assert_eq!(seq.end().key(), Ok(&3));
        assert_consistent(&seq);
    }

    #[test]
    fn test_remove_missing_occurrence_is_noop() {
        let mut seq = seq_of(&[(1, 1), (2, 2)]);
        assert!(!seq.remove(&1, 2));
        assert!(!seq.remove(&1, 0));
        assert_eq!(keys_of(&seq), [1, 2]);
    }

    #[test]
    fn test_insert_after() {
        let mut seq = seq_of(&[(1, 1), (3, 3)]);

        assert!(seq.insert_after(2, 2, &1, 1));
        assert_eq!(seq.len(), 3);
        assert_eq!(keys_of(&seq), [1, 2, 3]);
        assert_eq!(seq.end().key(), Ok(&3));

        assert!(seq.insert_after(4, 4, &2, 1));
        assert_eq!(keys_of(&seq), [1, 2, 4, 3]);
        assert_eq!(seq.end().key(), Ok(&3));

        assert!(seq.insert_after(5, 5, &3, 1));
        assert_eq!(keys_of(&seq), [1, 2, 4, 3, 5]);
        assert_eq!(seq.end().key(), Ok(&5));
        assert_eq!(seq.end().info(), Ok(&5));
        assert_consistent(&seq);

        let mut single = seq_of(&[(1, 1)]);
        assert!(single.insert_after(2, 2, &1, 1));
        assert_eq!(single.begin().key(), Ok(&1));
        assert_eq!(single.end().key(), Ok(&2));
        assert_consistent(&single);

        let mut empty = TestSeq::new();
        assert!(!empty.insert_after(1, 1, &1, 1));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_insert_before() {
        let mut seq = seq_of(&[(1, 1), (3, 3)]);

        assert!(seq.insert_before(2, 2, &1, 1));
        assert_eq!(keys_of(&seq), [2, 1, 3]);
        assert_eq!(seq.end().key(), Ok(&3));

        assert!(seq.insert_before(4, 4, &1, 1));
        assert_eq!(keys_of(&seq), [2, 4, 1, 3]);

        assert!(seq.insert_before(5, 5, &3, 1));
        assert_eq!(keys_of(&seq), [2, 4, 1, 5, 3]);
        assert_eq!(seq.end().key(), Ok(&3));
        assert_consistent(&seq);

        let mut single = seq_of(&[(1, 1)]);
        assert!(single.insert_before(2, 2, &1, 1));
        assert_eq!(keys_of(&single), [2, 1]);
        assert_consistent(&single);

        let mut empty = TestSeq::new();
        assert!(!empty.insert_before(1, 1, &1, 1));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_insert_before_missing_occurrence_is_noop() {
        let mut seq = seq_of(&[(1, 1), (2, 2)]);
        assert!(!seq.insert_before(9, 9, &1, 2));
        assert!(!seq.insert_after(9, 9, &2, 2));
        assert_eq!(keys_of(&seq), [1, 2]);
    }

    #[test]
    fn test_insert_by_later_occurrence() {
        let mut seq = seq_of(&[(7, 0), (1, 1), (7, 2)]);
        assert!(seq.insert_before(8, 8, &7, 2));
        assert!(seq.insert_after(9, 9, &7, 2));
        assert_eq!(keys_of(&seq), [7, 1, 8, 7, 9]);
        assert_eq!(seq.end().key(), Ok(&9));
        assert_consistent(&seq);
    }

    #[test]
    fn test_display() {
        let seq = seq_of(&[(1, 1), (2, 2), (3, 3)]);
        assert_eq!(seq.to_string(), "[(1, 1), (2, 2), (3, 3)]");
        assert_eq!(TestSeq::new().to_string(), "[]");
        assert_eq!(seq_of(&[(4, 5)]).to_string(), "[(4, 5)]");

        let mut named = Sequence::new();
        named.push_back(String::from("a"), 1.5);
        assert_eq!(format!("{named}"), "[(a, 1.5)]");
    }

    #[test]
    fn test_debug() {
        let seq = seq_of(&[(1, 2)]);
        assert_eq!(
            format!("{seq:?}"),
            "Sequence { len: 1, head: Some(Ptr(0)), tail: Some(Ptr(0)), entries: [Entry { key: 1, info: 2 }] }"
        );
    }

    #[test]
    fn test_equality() {
        assert_eq!(seq_of(&[(1, 1), (2, 2)]), seq_of(&[(1, 1), (2, 2)]));
        assert_ne!(seq_of(&[(1, 1), (2, 2)]), seq_of(&[(2, 2), (1, 1)]));
        assert_ne!(seq_of(&[(1, 1)]), seq_of(&[(1, 1), (1, 1)]));
        assert_ne!(seq_of(&[(1, 1)]), seq_of(&[(1, 2)]));
    }

    #[test]
    fn test_iterators() {
        let seq = seq_of(&[(1, 10), (2, 20), (3, 30)]);
        assert_eq!(seq.iter().len(), 3);
        assert_eq!(seq.infos().copied().collect::<Vec<_>>(), [10, 20, 30]);

        let borrowed: Vec<_> = (&seq).into_iter().map(|(k, i)| k + i).collect();
        assert_eq!(borrowed, [11, 22, 33]);

        let owned: Vec<_> = seq.into_iter().collect();
        assert_eq!(owned, vec![(1, 10), (2, 20), (3, 30)]);
    }

    #[test]
    fn test_extend_by_reference() {
        let source = seq_of(&[(1, 1), (2, 2)]);
        let mut target = seq_of(&[(0, 0)]);
        target.extend(source.iter());
        assert_eq!(keys_of(&target), [0, 1, 2]);
        assert_eq!(keys_of(&source), [1, 2]);
    }

    #[test]
    fn test_string_keys() {
        let mut seq = Sequence::new();
        seq.push_back("a".to_string(), 1);
        seq.push_back("b".to_string(), 2);
        seq.push_back("a".to_string(), 3);
        assert!(seq.remove(&"a".to_string(), 2));
        assert_eq!(seq.occurrences_of(&"a".to_string()), 1);
        assert_eq!(seq.end().key().map(String::as_str), Ok("b"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let seq = seq_of(&[(1, 1), (2, 2), (1, 11)]);
        let json = serde_json::to_string(&seq).unwrap();
        assert_eq!(json, "[[1,1],[2,2],[1,11]]");

        let back: TestSeq = serde_json::from_str(&json).unwrap();
        assert_eq!(back, seq);
        assert_consistent(&back);
    }
}
