//! Random-access sequences - the size-measure instantiation of the tree.
//!
//! [`IndexedSeq`] binds [`FingerTree`](crate::FingerTree) to the
//! integer-sum monoid with a constant-1 measurement, so the accumulated
//! measure of a prefix is its length and the predicate `measure > index`
//! locates the element at `index`. That one binding turns the generic
//! split machinery into positional indexing: `get`, `set`, `insert` and
//! `remove` are all O(log n), and `concat` stays O(log(min(n, m))).

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::measure::{Measured, Size};
use crate::tree::{FingerTree, FingerTreeIterator, FingerTreeRevIterator};

/// Internal element wrapper carrying the constant-1 measurement.
struct Counted<T>(T);

impl<T: Clone> Clone for Counted<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T: PartialEq> PartialEq for Counted<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T: Eq> Eq for Counted<T> {}

impl<T> Measured for Counted<T> {
    type Measure = Size;

    fn measure(&self) -> Size {
        Size(1)
    }
}

/// A persistent random-access sequence.
///
/// Backed by a measured finger tree, giving amortized O(1) access at both
/// ends, O(log n) indexed reads and updates, and O(log(min(n, m)))
/// concatenation. All operations return new sequences; originals are
/// never modified.
///
/// # Examples
///
/// ```rust
/// use fingertree::IndexedSeq;
///
/// let seq: IndexedSeq<i32> = (1..=5).collect();
/// assert_eq!(seq.len(), 5);
/// assert_eq!(seq.get(2), Some(&3));
///
/// let updated = seq.set(2, 30).unwrap();
/// assert_eq!(updated.get(2), Some(&30));
/// assert_eq!(seq.get(2), Some(&3));
/// ```
pub struct IndexedSeq<T> {
    tree: FingerTree<Counted<T>>,
}

impl<T> Clone for IndexedSeq<T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }
}

impl<T> IndexedSeq<T> {
    /// Creates a new empty sequence.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tree: FingerTree::new(),
        }
    }

    /// Creates a sequence containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            tree: FingerTree::singleton(Counted(element)),
        }
    }

    /// Returns the number of elements. O(1), read from the cached
    /// measure.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.measure().0
    }

    /// Returns `true` if the sequence contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns a reference to the element at `index`, or `None` when out
    /// of bounds. O(log n).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.tree
            .find(|measure| measure.0 > index)
            .map(|counted| &counted.0)
    }

    /// Returns a reference to the first element, if any.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.front().map(|counted| &counted.0)
    }

    /// Returns a reference to the last element, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.back().map(|counted| &counted.0)
    }

    /// Prepends an element. Amortized O(1).
    #[must_use]
    pub fn push_front(&self, element: T) -> Self {
        Self {
            tree: self.tree.push_front(Counted(element)),
        }
    }

    /// Appends an element. Amortized O(1).
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        Self {
            tree: self.tree.push_back(Counted(element)),
        }
    }

    /// Concatenates two sequences. O(log(min(n, m))).
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            tree: self.tree.concat(&other.tree),
        }
    }

    /// Splits into the first `index` elements and the rest. An `index`
    /// at or beyond the length leaves the second half empty.
    #[must_use]
    pub fn split_at(&self, index: usize) -> (Self, Self) {
        let (left, right) = self.tree.split(|measure| measure.0 > index);
        (Self { tree: left }, Self { tree: right })
    }

    /// Returns the first `count` elements.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        self.split_at(count).0
    }

    /// Drops the first `count` elements.
    #[must_use]
    pub fn drop(&self, count: usize) -> Self {
        self.split_at(count).1
    }

    /// Maps every element, producing a sequence of the results.
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> IndexedSeq<U>
    where
        F: Fn(&T) -> U,
    {
        IndexedSeq {
            tree: self.tree.map(|counted| Counted(function(&counted.0))),
        }
    }

    /// Returns a new sequence with elements in reverse order. O(n).
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            tree: self.tree.reverse(),
        }
    }

    /// Creates an iterator over references to the elements in order.
    #[must_use]
    pub fn iter(&self) -> IndexedSeqIterator<'_, T> {
        IndexedSeqIterator {
            inner: self.tree.iter(),
        }
    }

    /// Creates an iterator over references to the elements, back to
    /// front.
    #[must_use]
    pub fn iter_rev(&self) -> IndexedSeqRevIterator<'_, T> {
        IndexedSeqRevIterator {
            inner: self.tree.iter_rev(),
        }
    }

    /// Folds the elements front to back.
    pub fn fold_left<B, F>(&self, initial: B, mut function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.tree
            .fold_left(initial, |accumulator, counted| {
                function(accumulator, &counted.0)
            })
    }
}

impl<T: Clone> IndexedSeq<T> {
    /// Replaces the element at `index`, or `None` when out of bounds.
    /// O(log n); the untouched halves are shared with the original.
    #[must_use]
    pub fn set(&self, index: usize, element: T) -> Option<Self> {
        let (left, _, right) = self.tree.split3(|measure| measure.0 > index)?;
        Some(Self {
            tree: left.concat_with([Counted(element)], &right),
        })
    }

    /// Inserts an element before position `index`. `index == len` appends;
    /// anything beyond is `None`. O(log n).
    #[must_use]
    pub fn insert(&self, index: usize, element: T) -> Option<Self> {
        if index > self.len() {
            return None;
        }
        let (left, right) = self.split_at(index);
        Some(Self {
            tree: left.tree.concat_with([Counted(element)], &right.tree),
        })
    }

    /// Removes the element at `index`, returning it with the remaining
    /// sequence. O(log n).
    #[must_use]
    pub fn remove(&self, index: usize) -> Option<(Self, T)> {
        let (left, removed, right) = self.tree.split3(|measure| measure.0 > index)?;
        Some((
            Self {
                tree: left.concat(&right),
            },
            removed.0,
        ))
    }

    /// Removes and returns the first element with the remainder.
    #[must_use]
    pub fn pop_front(&self) -> Option<(Self, T)> {
        self.tree
            .pop_front()
            .map(|(rest, counted)| (Self { tree: rest }, counted.0))
    }

    /// Removes and returns the last element with the remainder.
    #[must_use]
    pub fn pop_back(&self) -> Option<(Self, T)> {
        self.tree
            .pop_back()
            .map(|(rest, counted)| (Self { tree: rest }, counted.0))
    }
}

impl<T: PartialEq> IndexedSeq<T> {
    /// Returns the position of the first element equal to `target`.
    /// O(n).
    #[must_use]
    pub fn index_of(&self, target: &T) -> Option<usize> {
        self.iter().position(|element| element == target)
    }

    /// Returns the position of the last element equal to `target`,
    /// scanning from the back. O(n).
    #[must_use]
    pub fn last_index_of(&self, target: &T) -> Option<usize> {
        self.iter_rev()
            .position(|element| element == target)
            .map(|back_offset| self.len() - 1 - back_offset)
    }

    /// Whether any element equals `target`. O(n).
    #[must_use]
    pub fn contains(&self, target: &T) -> bool {
        self.index_of(target).is_some()
    }
}

impl<T> Default for IndexedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: PartialEq> PartialEq for IndexedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T: Eq> Eq for IndexedSeq<T> {}

impl<T: fmt::Debug> fmt::Debug for IndexedSeq<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Hash> Hash for IndexedSeq<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for element in self.iter() {
            element.hash(state);
        }
        self.len().hash(state);
    }
}

impl<T> FromIterator<T> for IndexedSeq<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        Self {
            tree: iterator.into_iter().map(Counted).collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a IndexedSeq<T> {
    type Item = &'a T;
    type IntoIter = IndexedSeqIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Front-to-back element iterator over an [`IndexedSeq`].
pub struct IndexedSeqIterator<'a, T> {
    inner: FingerTreeIterator<'a, Counted<T>>,
}

impl<'a, T> Iterator for IndexedSeqIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|counted| &counted.0)
    }
}

/// Back-to-front element iterator over an [`IndexedSeq`].
pub struct IndexedSeqRevIterator<'a, T> {
    inner: FingerTreeRevIterator<'a, Counted<T>>,
}

impl<'a, T> Iterator for IndexedSeqRevIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|counted| &counted.0)
    }
}
