//! Repeating two-way splits of a [`Sequence`].
//!
//! A split walks the source sequence from a start point and, `count` times,
//! moves a block of up to `len1` elements into a first destination followed
//! by a block of up to `len2` elements into a second one. Elements before the
//! start point and everything left over after the last block form the
//! *residual*, which replaces the source in place.
//!
//! Blocks are truncated silently when the source runs out. Destinations are
//! appended to, never cleared.
//!
//! # Examples
//!
//! ```
//! use keyed_sequence::Sequence;
//! use keyed_sequence::split_pos;
//!
//! let mut seq: Sequence<_, _> = (1..=10).map(|i| (i, ())).collect();
//! let mut odd = Sequence::new();
//! let mut even = Sequence::new();
//!
//! split_pos(&mut seq, 0, 1, 1, 5, &mut odd, &mut even);
//!
//! assert!(seq.is_empty());
//! assert_eq!(odd.keys().copied().collect::<Vec<_>>(), [1, 3, 5, 7, 9]);
//! assert_eq!(even.keys().copied().collect::<Vec<_>>(), [2, 4, 6, 8, 10]);
//! ```

use tracing::debug;
use tracing::trace;

use crate::error::SequenceError;
use crate::sequence::Sequence;

/// Block sizes and repeat count of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SplitPattern {
    /// Elements moved into the first destination per repeat.
    pub len1: usize,
    /// Elements moved into the second destination per repeat.
    pub len2: usize,
    /// How many times the pair of blocks is taken.
    pub count: usize,
}

impl SplitPattern {
    /// Creates a pattern of `count` repeats of a `len1` block followed by a
    /// `len2` block.
    pub const fn new(len1: usize, len2: usize, count: usize) -> Self {
        SplitPattern { len1, len2, count }
    }

    /// The most elements a split with this pattern can take out of its
    /// source.
    pub const fn span(&self) -> usize {
        self.len1
            .saturating_add(self.len2)
            .saturating_mul(self.count)
    }
}

/// Splits `seq` starting at the 0-based position `start_pos`.
///
/// The first `start_pos` elements stay in `seq`. From there, `count` times,
/// up to `len1` elements are moved to `seq1` and then up to `len2` elements
/// to `seq2`. Whatever follows stays in `seq` after the retained prefix.
///
/// If `start_pos` is at or past the end nothing is moved. This never fails.
pub fn split_pos<K, I>(
    seq: &mut Sequence<K, I>,
    start_pos: usize,
    len1: usize,
    len2: usize,
    count: usize,
    seq1: &mut Sequence<K, I>,
    seq2: &mut Sequence<K, I>,
) {
    split_pos_with(
        seq,
        start_pos,
        SplitPattern::new(len1, len2, count),
        seq1,
        seq2,
    );
}

/// [`split_pos`] with the block layout given as a [`SplitPattern`].
pub fn split_pos_with<K, I>(
    seq: &mut Sequence<K, I>,
    start_pos: usize,
    pattern: SplitPattern,
    seq1: &mut Sequence<K, I>,
    seq2: &mut Sequence<K, I>,
) {
    distribute(seq, start_pos, pattern, seq1, seq2);
}

/// Splits `seq` starting at the `start_occ`-th element whose key is
/// `start_key`.
///
/// Everything before that element stays in `seq`; the blocks are taken from
/// the element itself onwards exactly as in [`split_pos`].
///
/// # Errors
///
/// Returns [`SequenceError::AnchorNotFound`] if there is no such element. In
/// that case none of the sequences are modified.
///
/// # Examples
///
/// ```
/// use keyed_sequence::Sequence;
/// use keyed_sequence::SequenceError;
/// use keyed_sequence::split_key;
///
/// let mut seq: Sequence<_, _> = [(0, 'a'), (7, 'b'), (1, 'c'), (7, 'd'), (2, 'e')]
///     .into_iter()
///     .collect();
/// let mut first = Sequence::new();
/// let mut second = Sequence::new();
///
/// split_key(&mut seq, &7, 2, 1, 1, 1, &mut first, &mut second)?;
/// assert_eq!(seq.to_string(), "[(0, a), (7, b), (1, c)]");
/// assert_eq!(first.to_string(), "[(7, d)]");
/// assert_eq!(second.to_string(), "[(2, e)]");
///
/// let missing = split_key(&mut seq, &7, 2, 1, 1, 1, &mut first, &mut second);
/// assert_eq!(missing, Err(SequenceError::AnchorNotFound { occurrence: 2 }));
/// # Ok::<(), SequenceError>(())
/// ```
#[allow(clippy::too_many_arguments)]
pub fn split_key<K: PartialEq, I>(
    seq: &mut Sequence<K, I>,
    start_key: &K,
    start_occ: usize,
    len1: usize,
    len2: usize,
    count: usize,
    seq1: &mut Sequence<K, I>,
    seq2: &mut Sequence<K, I>,
) -> Result<(), SequenceError> {
    split_key_with(
        seq,
        start_key,
        start_occ,
        SplitPattern::new(len1, len2, count),
        seq1,
        seq2,
    )
}

/// [`split_key`] with the block layout given as a [`SplitPattern`].
pub fn split_key_with<K: PartialEq, I>(
    seq: &mut Sequence<K, I>,
    start_key: &K,
    start_occ: usize,
    pattern: SplitPattern,
    seq1: &mut Sequence<K, I>,
    seq2: &mut Sequence<K, I>,
) -> Result<(), SequenceError> {
    let Some(anchor) = seq.find(start_key, start_occ) else {
        debug!(start_occ, len = seq.len(), "split anchor not found");
        return Err(SequenceError::AnchorNotFound {
            occurrence: start_occ,
        });
    };

    let mut start_pos = 0;
    let mut cursor = seq.begin();
    while cursor != anchor {
        cursor.advance()?;
        start_pos += 1;
    }

    distribute(seq, start_pos, pattern, seq1, seq2);
    Ok(())
}

fn distribute<K, I>(
    seq: &mut Sequence<K, I>,
    start_pos: usize,
    pattern: SplitPattern,
    seq1: &mut Sequence<K, I>,
    seq2: &mut Sequence<K, I>,
) {
    let mut source = core::mem::take(seq).into_iter();
    seq.extend(source.by_ref().take(start_pos));

    // Zero-width blocks can never exhaust the source.
    let repeats = if pattern.len1 == 0 && pattern.len2 == 0 {
        0
    } else {
        pattern.count
    };

    let (mut moved1, mut moved2) = (0, 0);
    for repeat in 0..repeats {
        if source.len() == 0 {
            trace!(repeat, "split source exhausted");
            break;
        }

        let before = (seq1.len(), seq2.len());
        seq1.extend(source.by_ref().take(pattern.len1));
        seq2.extend(source.by_ref().take(pattern.len2));

        let block1 = seq1.len() - before.0;
        let block2 = seq2.len() - before.1;
        trace!(repeat, block1, block2, "split block");
        moved1 += block1;
        moved2 += block2;
    }

    seq.extend(source);

    debug!(
        start_pos,
        len1 = pattern.len1,
        len2 = pattern.len2,
        count = pattern.count,
        moved1,
        moved2,
        residual = seq.len(),
        "split sequence"
    );
}
