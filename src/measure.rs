//! Monoidal measures - the algebraic contract driving tree annotations.
//!
//! Every subtree of a finger tree carries a cached *measure*: a summary
//! value combined from the measures of its elements with an associative
//! operation. This module provides the three pieces of that contract:
//!
//! 1. [`Semigroup`]: an associative binary operation `combine`
//! 2. [`Monoid`]: a semigroup with an identity element `empty`
//! 3. [`Measured`]: the measurement function from elements to measures
//!
//! # Laws
//!
//! For all `a`, `b`, `c` of a measure type:
//!
//! ```text
//! (a.combine(b)).combine(c) == a.combine(b.combine(c))   // associativity
//! Monoid::empty().combine(a) == a                        // left identity
//! a.combine(Monoid::empty()) == a                        // right identity
//! ```
//!
//! The laws are not enforced by the type system. A tree built over a
//! lawless monoid will cache inconsistent measures and return arbitrary
//! split positions; it will not corrupt memory or panic.
//!
//! # Examples
//!
//! ```rust
//! use fingertree::{Measured, Monoid, Semigroup, Size};
//!
//! // The integer-sum monoid with constant-1 measurement gives indexing.
//! struct Item(&'static str);
//!
//! impl Measured for Item {
//!     type Measure = Size;
//!
//!     fn measure(&self) -> Size {
//!         Size(1)
//!     }
//! }
//!
//! assert_eq!(Size(2).combine(Size(3)), Size(5));
//! assert_eq!(Size::empty(), Size(0));
//! ```

/// A type class for types with an associative binary operation.
///
/// # Laws
///
/// All implementations must satisfy:
///
/// ## Associativity
///
/// For all `a`, `b`, `c`:
/// ```text
/// (a.combine(b)).combine(c) == a.combine(b.combine(c))
/// ```
pub trait Semigroup {
    /// Combines two values into one.
    ///
    /// This operation must be associative.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fingertree::{Semigroup, Size};
    ///
    /// assert_eq!(Size(1).combine(Size(2)), Size(3));
    /// ```
    #[must_use]
    fn combine(self, other: Self) -> Self;

    /// Combines two values by reference, returning a new value.
    ///
    /// The default implementation clones both values and calls `combine`.
    /// Types can override this for more efficient implementations.
    #[must_use]
    fn combine_ref(&self, other: &Self) -> Self
    where
        Self: Clone,
    {
        self.clone().combine(other.clone())
    }
}

/// A type class for semigroups with an identity element.
///
/// # Laws
///
/// In addition to the Semigroup laws, for all `a`:
///
/// ```text
/// Self::empty().combine(a) == a
/// a.combine(Self::empty()) == a
/// ```
pub trait Monoid: Semigroup {
    /// Returns the identity element for this monoid.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fingertree::{Monoid, Size};
    ///
    /// assert_eq!(Size::empty(), Size(0));
    /// assert_eq!(String::empty(), "");
    /// ```
    fn empty() -> Self;

    /// Combines all elements in an iterator, starting from the identity
    /// element.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fingertree::{Monoid, Size};
    ///
    /// let total = Size::combine_all([Size(1), Size(2), Size(3)]);
    /// assert_eq!(total, Size(6));
    ///
    /// let none: [Size; 0] = [];
    /// assert_eq!(Size::combine_all(none), Size::empty());
    /// ```
    #[must_use]
    fn combine_all<I>(iterator: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iterator
            .into_iter()
            .fold(Self::empty(), Semigroup::combine)
    }
}

/// A type class for elements that can be summarized into a monoidal
/// measure.
///
/// This is the measurement function `T -> V` of the finger tree: the tree
/// caches, for every digit, node and deep spine, the `combine` of the
/// measures of the contained elements in left-to-right order.
///
/// The original formulation bound the monoid and the measurement function
/// together in a runtime factory object; here the binding is the impl pair
/// resolved at compile time, and the derived "node level" measurement (read
/// a node's cached aggregate) is supplied by the tree internals.
///
/// # Examples
///
/// ```rust
/// use fingertree::{Measured, Size};
///
/// // Constant-1 measurement: the prefix measure of an element is its
/// // 1-based position, which is exactly what positional indexing needs.
/// struct Line(String);
///
/// impl Measured for Line {
///     type Measure = Size;
///
///     fn measure(&self) -> Size {
///         Size(1)
///     }
/// }
/// ```
pub trait Measured {
    /// The monoidal measure type this element is summarized into.
    type Measure: Monoid + Clone;

    /// Returns the measure of this element.
    fn measure(&self) -> Self::Measure;
}

/// The integer-sum monoid.
///
/// With a constant-1 measurement this is the size/index measure: the
/// accumulated measure of a prefix of `n` elements is `Size(n)`, so the
/// predicate `|measure| measure.0 > index` locates the element at
/// `index`. [`IndexedSeq`](crate::IndexedSeq) is built on exactly this
/// binding.
///
/// # Examples
///
/// ```rust
/// use fingertree::{Monoid, Semigroup, Size};
///
/// assert_eq!(Size(2).combine(Size(3)), Size(5));
/// assert_eq!(Size::empty().combine(Size(7)), Size(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Size(pub usize);

impl Semigroup for Size {
    #[inline]
    fn combine(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Monoid for Size {
    #[inline]
    fn empty() -> Self {
        Self(0)
    }
}

impl Semigroup for String {
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}

impl Monoid for String {
    fn empty() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_size_combine() {
        assert_eq!(Size(1).combine(Size(2)), Size(3));
        assert_eq!(Size(0).combine(Size(0)), Size(0));
    }

    #[rstest]
    fn test_size_identity() {
        assert_eq!(Size::empty(), Size(0));
        assert_eq!(Size::empty().combine(Size(9)), Size(9));
        assert_eq!(Size(9).combine(Size::empty()), Size(9));
    }

    #[rstest]
    fn test_size_combine_ref() {
        let left = Size(4);
        let right = Size(5);
        assert_eq!(left.combine_ref(&right), Size(9));
        // Originals are still available
        assert_eq!(left, Size(4));
        assert_eq!(right, Size(5));
    }

    #[rstest]
    fn test_combine_all() {
        assert_eq!(Size::combine_all([Size(1), Size(2), Size(3)]), Size(6));
        assert_eq!(Size::combine_all(std::iter::empty()), Size(0));
    }

    #[rstest]
    fn test_string_monoid_is_not_commutative() {
        let forward = String::from("ab").combine(String::from("cd"));
        let backward = String::from("cd").combine(String::from("ab"));
        assert_eq!(forward, "abcd");
        assert_eq!(backward, "cdab");
        assert_ne!(forward, backward);
    }

    #[rstest]
    fn test_string_identity() {
        assert_eq!(String::empty().combine(String::from("x")), "x");
        assert_eq!(String::from("x").combine(String::empty()), "x");
    }
}
