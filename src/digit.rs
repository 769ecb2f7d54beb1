//! Digits - the 1-4 entry groups forming a deep tree's fingers.
//!
//! A digit holds between one and four node links and gives O(1) access to
//! the outermost entries of a tree. `prepend`/`append` refuse a fifth
//! entry (`None`); the tree reacts by absorbing three entries into a
//! 3-node pushed one level down. `pop_front`/`pop_back` report digit
//! underflow by returning `None` for the remainder; the tree reacts by
//! borrowing a node back from its middle (a rotation).

use smallvec::SmallVec;

use crate::measure::{Measured, Semigroup};
use crate::node::{Node, NodeLink};

/// An ordered group of 1 to 4 node links.
pub(crate) enum Digit<T: Measured> {
    One(NodeLink<T>),
    Two(NodeLink<T>, NodeLink<T>),
    Three(NodeLink<T>, NodeLink<T>, NodeLink<T>),
    Four(NodeLink<T>, NodeLink<T>, NodeLink<T>, NodeLink<T>),
}

impl<T: Measured> Clone for Digit<T> {
    fn clone(&self) -> Self {
        match self {
            Self::One(first) => Self::One(first.clone()),
            Self::Two(first, second) => Self::Two(first.clone(), second.clone()),
            Self::Three(first, second, third) => {
                Self::Three(first.clone(), second.clone(), third.clone())
            }
            Self::Four(first, second, third, fourth) => {
                Self::Four(first.clone(), second.clone(), third.clone(), fourth.clone())
            }
        }
    }
}

impl<T: Measured> Digit<T> {
    pub(crate) const fn arity(&self) -> usize {
        match self {
            Self::One(_) => 1,
            Self::Two(..) => 2,
            Self::Three(..) => 3,
            Self::Four(..) => 4,
        }
    }

    pub(crate) const fn head(&self) -> &NodeLink<T> {
        match self {
            Self::One(first)
            | Self::Two(first, _)
            | Self::Three(first, _, _)
            | Self::Four(first, _, _, _) => first,
        }
    }

    pub(crate) const fn last(&self) -> &NodeLink<T> {
        match self {
            Self::One(first) => first,
            Self::Two(_, second) => second,
            Self::Three(_, _, third) => third,
            Self::Four(_, _, _, fourth) => fourth,
        }
    }

    /// Aggregate measure of the digit, left to right.
    ///
    /// Not cached: a digit has at most four entries, each with a cached
    /// measure of its own, and deep trees cache their own total.
    pub(crate) fn measure(&self) -> T::Measure {
        match self {
            Self::One(first) => first.measure(),
            Self::Two(first, second) => first.measure().combine(second.measure()),
            Self::Three(first, second, third) => first
                .measure()
                .combine(second.measure())
                .combine(third.measure()),
            Self::Four(first, second, third, fourth) => first
                .measure()
                .combine(second.measure())
                .combine(third.measure())
                .combine(fourth.measure()),
        }
    }

    /// Adds an entry at the front, or `None` when the digit is full.
    pub(crate) fn prepend(&self, entry: NodeLink<T>) -> Option<Self> {
        match self {
            Self::One(first) => Some(Self::Two(entry, first.clone())),
            Self::Two(first, second) => Some(Self::Three(entry, first.clone(), second.clone())),
            Self::Three(first, second, third) => Some(Self::Four(
                entry,
                first.clone(),
                second.clone(),
                third.clone(),
            )),
            Self::Four(..) => None,
        }
    }

    /// Adds an entry at the back, or `None` when the digit is full.
    pub(crate) fn append(&self, entry: NodeLink<T>) -> Option<Self> {
        match self {
            Self::One(first) => Some(Self::Two(first.clone(), entry)),
            Self::Two(first, second) => Some(Self::Three(first.clone(), second.clone(), entry)),
            Self::Three(first, second, third) => Some(Self::Four(
                first.clone(),
                second.clone(),
                third.clone(),
                entry,
            )),
            Self::Four(..) => None,
        }
    }

    /// Removes the first entry; the remainder is `None` when a `One` was
    /// drained.
    pub(crate) fn pop_front(&self) -> (Option<Self>, NodeLink<T>) {
        match self {
            Self::One(first) => (None, first.clone()),
            Self::Two(first, second) => (Some(Self::One(second.clone())), first.clone()),
            Self::Three(first, second, third) => (
                Some(Self::Two(second.clone(), third.clone())),
                first.clone(),
            ),
            Self::Four(first, second, third, fourth) => (
                Some(Self::Three(second.clone(), third.clone(), fourth.clone())),
                first.clone(),
            ),
        }
    }

    /// Removes the last entry; the remainder is `None` when a `One` was
    /// drained.
    pub(crate) fn pop_back(&self) -> (Option<Self>, NodeLink<T>) {
        match self {
            Self::One(first) => (None, first.clone()),
            Self::Two(first, second) => (Some(Self::One(first.clone())), second.clone()),
            Self::Three(first, second, third) => (
                Some(Self::Two(first.clone(), second.clone())),
                third.clone(),
            ),
            Self::Four(first, second, third, fourth) => (
                Some(Self::Three(first.clone(), second.clone(), third.clone())),
                fourth.clone(),
            ),
        }
    }

    /// Borrowed entries in order, for scanning without cloning.
    pub(crate) fn entries(&self) -> SmallVec<[&NodeLink<T>; 4]> {
        match self {
            Self::One(first) => SmallVec::from_buf_and_len([first, first, first, first], 1),
            Self::Two(first, second) => {
                SmallVec::from_buf_and_len([first, second, second, second], 2)
            }
            Self::Three(first, second, third) => {
                SmallVec::from_buf_and_len([first, second, third, third], 3)
            }
            Self::Four(first, second, third, fourth) => {
                SmallVec::from_buf_and_len([first, second, third, fourth], 4)
            }
        }
    }

    /// Cloned entries in order.
    pub(crate) fn to_vec(&self) -> SmallVec<[NodeLink<T>; 4]> {
        self.entries().into_iter().cloned().collect()
    }

    /// Rebuilds a digit from 1 to 4 entries.
    pub(crate) fn from_nodes(nodes: &[NodeLink<T>]) -> Self {
        match nodes {
            [first] => Self::One(first.clone()),
            [first, second] => Self::Two(first.clone(), second.clone()),
            [first, second, third] => Self::Three(first.clone(), second.clone(), third.clone()),
            [first, second, third, fourth] => Self::Four(
                first.clone(),
                second.clone(),
                third.clone(),
                fourth.clone(),
            ),
            _ => unreachable!("digit holds 1 to 4 entries"),
        }
    }

    /// Widens a node into a digit, used when a rotation promotes a node
    /// from the middle back up to finger position.
    pub(crate) fn from_node(link: &NodeLink<T>) -> Self {
        match link.as_ref() {
            Node::Leaf(_) => Self::One(link.clone()),
            Node::Node2 { first, second, .. } => Self::Two(first.clone(), second.clone()),
            Node::Node3 {
                first,
                second,
                third,
                ..
            } => Self::Three(first.clone(), second.clone(), third.clone()),
        }
    }

    /// Locates the entry at which `predicate` flips from false to true
    /// over the accumulated measure, scanning left to right.
    ///
    /// Falls back to the last entry when the predicate never flips; the
    /// tree-level caller only descends here after establishing that the
    /// flip happens within this digit.
    pub(crate) fn split<P>(
        &self,
        predicate: &P,
        accumulated: T::Measure,
    ) -> (Option<Self>, NodeLink<T>, Option<Self>)
    where
        P: Fn(&T::Measure) -> bool,
    {
        let nodes = self.to_vec();
        let mut accumulated = accumulated;
        let mut pivot_index = nodes.len() - 1;
        for (index, node) in nodes[..nodes.len() - 1].iter().enumerate() {
            let through = accumulated.combine(node.measure());
            if predicate(&through) {
                pivot_index = index;
                break;
            }
            accumulated = through;
        }
        let left = (pivot_index > 0).then(|| Self::from_nodes(&nodes[..pivot_index]));
        let right =
            (pivot_index < nodes.len() - 1).then(|| Self::from_nodes(&nodes[pivot_index + 1..]));
        (left, nodes[pivot_index].clone(), right)
    }

    /// Like [`Digit::split`], but only reports the entry where the
    /// predicate flips (with the measure accumulated before it), without
    /// rebuilding the surroundings. `None` when the predicate never
    /// flips within this digit.
    pub(crate) fn find<'a, P>(
        &'a self,
        predicate: &P,
        accumulated: T::Measure,
    ) -> Option<(T::Measure, &'a NodeLink<T>)>
    where
        P: Fn(&T::Measure) -> bool,
    {
        let mut accumulated = accumulated;
        for entry in self.entries() {
            let through = accumulated.clone().combine(entry.measure());
            if predicate(&through) {
                return Some((accumulated, entry));
            }
            accumulated = through;
        }
        None
    }

    /// Reverses entry order, recursively reversing each node.
    pub(crate) fn reverse(&self) -> Self {
        match self {
            Self::One(first) => Self::One(Node::reverse(first)),
            Self::Two(first, second) => Self::Two(Node::reverse(second), Node::reverse(first)),
            Self::Three(first, second, third) => Self::Three(
                Node::reverse(third),
                Node::reverse(second),
                Node::reverse(first),
            ),
            Self::Four(first, second, third, fourth) => Self::Four(
                Node::reverse(fourth),
                Node::reverse(third),
                Node::reverse(second),
                Node::reverse(first),
            ),
        }
    }

    /// Maps every entry through [`Node::map`].
    pub(crate) fn map<U, F>(&self, function: &F) -> Digit<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        match self {
            Self::One(first) => Digit::One(Node::map(first, function)),
            Self::Two(first, second) => {
                Digit::Two(Node::map(first, function), Node::map(second, function))
            }
            Self::Three(first, second, third) => Digit::Three(
                Node::map(first, function),
                Node::map(second, function),
                Node::map(third, function),
            ),
            Self::Four(first, second, third, fourth) => Digit::Four(
                Node::map(first, function),
                Node::map(second, function),
                Node::map(third, function),
                Node::map(fourth, function),
            ),
        }
    }

    /// Single-pass combination of [`Digit::reverse`] and [`Digit::map`].
    pub(crate) fn reverse_map<U, F>(&self, function: &F) -> Digit<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        match self {
            Self::One(first) => Digit::One(Node::reverse_map(first, function)),
            Self::Two(first, second) => Digit::Two(
                Node::reverse_map(second, function),
                Node::reverse_map(first, function),
            ),
            Self::Three(first, second, third) => Digit::Three(
                Node::reverse_map(third, function),
                Node::reverse_map(second, function),
                Node::reverse_map(first, function),
            ),
            Self::Four(first, second, third, fourth) => Digit::Four(
                Node::reverse_map(fourth, function),
                Node::reverse_map(third, function),
                Node::reverse_map(second, function),
                Node::reverse_map(first, function),
            ),
        }
    }
}
