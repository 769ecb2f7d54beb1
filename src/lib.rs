//! # fingertree
//!
//! Persistent 2-3 finger trees with monoidal measures, after Hinze &
//! Paterson's "Finger Trees: A Simple General-purpose Data Structure"
//! (2006).
//!
//! ## Overview
//!
//! A finger tree is one immutable structure that specializes into many
//! containers through a single parameter: the *measure*, a monoid
//! summarizing every subtree. The tree caches measures on every level,
//! which makes searching and splitting by any monotonic predicate over
//! accumulated measures an O(log n) operation. This crate provides:
//!
//! - **Type Classes**: [`Semigroup`], [`Monoid`] and [`Measured`], the
//!   algebraic contract between elements and their cached summaries
//! - **[`FingerTree`]**: the generic measured tree with amortized O(1)
//!   ends, O(log(min(n, m))) concatenation and O(log n) splitting
//! - **[`IndexedSeq`]**: a random-access sequence, the tree bound to the
//!   integer-sum monoid with a constant-1 measurement
//!
//! All operations are persistent: they return new values and share
//! structure with the originals instead of modifying them.
//!
//! ## Feature Flags
//!
//! - `arc`: share structure through `Arc` instead of `Rc`, making trees
//!   `Send + Sync` at the cost of atomic reference counting
//!
//! ## Example
//!
//! ```rust
//! use fingertree::IndexedSeq;
//!
//! let seq: IndexedSeq<i32> = (0..100).collect();
//!
//! assert_eq!(seq.get(42), Some(&42));
//!
//! let updated = seq.set(42, -1).unwrap();
//! assert_eq!(updated.get(42), Some(&-1));
//! assert_eq!(seq.get(42), Some(&42));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Shared ownership handle for tree structure.
///
/// `Rc` by default; the `arc` feature swaps in `Arc`, making every tree
/// type `Send + Sync` when its elements and measures are.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

/// Shared ownership handle for tree structure.
///
/// `Rc` by default; the `arc` feature swaps in `Arc`, making every tree
/// type `Send + Sync` when its elements and measures are.
#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod digit;
mod lazy;
mod node;

pub mod measure;
pub mod seq;
pub mod tree;

pub use measure::{Measured, Monoid, Semigroup, Size};
pub use seq::{IndexedSeq, IndexedSeqIterator, IndexedSeqRevIterator};
pub use tree::{
    FingerTree, FingerTreeIntoIterator, FingerTreeIterator, FingerTreeRevIterator, FingerTreeView,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_reexports_are_usable() {
        let seq: IndexedSeq<i32> = (0..4).collect();
        assert_eq!(seq.len(), 4);
        assert_eq!(Size(1).combine(Size(2)), Size(3));
    }
}
