//! Interior 2-3 nodes - the unit of storage inside a tree's middle.
//!
//! A [`Node`] is either a `Leaf` holding one element or a 2-3 branch
//! holding two or three child nodes plus a cached aggregate measure.
//! Folding the element level into the node type is what makes the
//! "tree of node-trees of node-trees" recursion expressible without
//! polymorphic recursion: the middle of a deep tree holds the same
//! `Node<T>` type, one construction level deeper. Depth uniformity (all
//! leaves at the same depth below a given tree) is a structural
//! invariant maintained by the tree operations.
//!
//! Branch nodes are only ever constructed by digit overflow and by
//! concatenation seam-merging; they are never exposed to clients.

use crate::ReferenceCounter;
use crate::measure::{Measured, Semigroup};

/// Shared handle to a node.
///
/// Multiple digits, trees and views may reference the same node
/// simultaneously; this sharing is the source of the structure's
/// persistence.
pub(crate) type NodeLink<T> = ReferenceCounter<Node<T>>;

/// A leaf element or a 2-3 branch with a cached aggregate measure.
pub(crate) enum Node<T: Measured> {
    Leaf(T),
    Node2 {
        measure: T::Measure,
        first: NodeLink<T>,
        second: NodeLink<T>,
    },
    Node3 {
        measure: T::Measure,
        first: NodeLink<T>,
        second: NodeLink<T>,
        third: NodeLink<T>,
    },
}

impl<T: Measured> Node<T> {
    /// Wraps an element into a shared leaf node.
    pub(crate) fn leaf(element: T) -> NodeLink<T> {
        ReferenceCounter::new(Self::Leaf(element))
    }

    /// Builds a 2-branch, caching `first ++ second`.
    pub(crate) fn node2(first: NodeLink<T>, second: NodeLink<T>) -> NodeLink<T> {
        let measure = first.measure().combine(second.measure());
        ReferenceCounter::new(Self::Node2 {
            measure,
            first,
            second,
        })
    }

    /// Builds a 3-branch, caching `first ++ second ++ third`.
    pub(crate) fn node3(
        first: NodeLink<T>,
        second: NodeLink<T>,
        third: NodeLink<T>,
    ) -> NodeLink<T> {
        let measure = first
            .measure()
            .combine(second.measure())
            .combine(third.measure());
        ReferenceCounter::new(Self::Node3 {
            measure,
            first,
            second,
            third,
        })
    }

    /// Returns the aggregate measure of this node.
    ///
    /// Branches return their cache; leaves delegate to the element's
    /// measurement function.
    pub(crate) fn measure(&self) -> T::Measure {
        match self {
            Self::Leaf(element) => element.measure(),
            Self::Node2 { measure, .. } | Self::Node3 { measure, .. } => measure.clone(),
        }
    }

    /// Reverses a node, recursively reversing child order.
    ///
    /// Leaves are shared unchanged. Branch caches are recombined in the
    /// reversed order, so a non-commutative monoid observes the reversed
    /// combine order rather than the original one.
    pub(crate) fn reverse(link: &NodeLink<T>) -> NodeLink<T> {
        match link.as_ref() {
            Self::Leaf(_) => link.clone(),
            Self::Node2 { first, second, .. } => {
                Self::node2(Self::reverse(second), Self::reverse(first))
            }
            Self::Node3 {
                first,
                second,
                third,
                ..
            } => Self::node3(
                Self::reverse(third),
                Self::reverse(second),
                Self::reverse(first),
            ),
        }
    }

    /// Maps a node into a different element/measure type, recomputing
    /// every cached measure through the target measurement function.
    pub(crate) fn map<U, F>(link: &NodeLink<T>, function: &F) -> NodeLink<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        match link.as_ref() {
            Self::Leaf(element) => Node::leaf(function(element)),
            Self::Node2 { first, second, .. } => {
                Node::node2(Self::map(first, function), Self::map(second, function))
            }
            Self::Node3 {
                first,
                second,
                third,
                ..
            } => Node::node3(
                Self::map(first, function),
                Self::map(second, function),
                Self::map(third, function),
            ),
        }
    }

    /// Single-pass combination of [`Node::reverse`] and [`Node::map`].
    pub(crate) fn reverse_map<U, F>(link: &NodeLink<T>, function: &F) -> NodeLink<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        match link.as_ref() {
            Self::Leaf(element) => Node::leaf(function(element)),
            Self::Node2 { first, second, .. } => Node::node2(
                Self::reverse_map(second, function),
                Self::reverse_map(first, function),
            ),
            Self::Node3 {
                first,
                second,
                third,
                ..
            } => Node::node3(
                Self::reverse_map(third, function),
                Self::reverse_map(second, function),
                Self::reverse_map(first, function),
            ),
        }
    }
}
