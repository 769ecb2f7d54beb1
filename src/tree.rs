//! Persistent (immutable) 2-3 finger tree with monoidal measures.
//!
//! This module provides the measured finger tree described in Hinze &
//! Paterson's "Finger Trees: A Simple General-purpose Data Structure"
//! (2006): a persistent ordered sequence annotated with a caller-supplied
//! monoid, giving
//!
//! - amortized O(1) `push_front` / `push_back` / views at both ends
//! - O(log(min(n, m))) concatenation
//! - O(log n) search and splitting by any monotonic predicate over
//!   accumulated prefix measures
//!
//! All operations return new trees without modifying the original;
//! structural sharing keeps incremental updates at O(log n) allocation.
//!
//! # Structure
//!
//! A tree is `Empty`, `Single` (one entry), or `Deep`: a left digit of
//! 1-4 entries, a middle tree whose entries are 2-3 nodes one level
//! deeper, and a right digit. The digits are the "fingers" giving O(1)
//! access at the ends; pushing onto a full digit overflows three entries
//! into a node pushed one level down, which happens geometrically less
//! often at deeper levels - that decay is the amortized O(1) argument.
//! Removing from a drained digit borrows a node back from the middle (a
//! rotation), deferred and memoized through [`crate::lazy::LazyTree`] so
//! a view that never inspects its tail never pays for it.
//!
//! # Measures
//!
//! Every digit, node and deep spine caches the `combine` of its elements'
//! measures in left-to-right order. The cached total of a deep tree always
//! equals `left ++ middle ++ right`. Splitting walks this cache three ways
//! (left digit / middle / right digit) and touches only a logarithmic
//! number of spine nodes.
//!
//! # Examples
//!
//! ```rust
//! use fingertree::{FingerTree, Measured, Size};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Item(i32);
//!
//! impl Measured for Item {
//!     type Measure = Size;
//!
//!     fn measure(&self) -> Size {
//!         Size(1)
//!     }
//! }
//!
//! let tree: FingerTree<Item> = (1..=10).map(Item).collect();
//! assert_eq!(tree.measure(), Size(10));
//!
//! let (left, pivot, right) = tree.split3(|measure| measure.0 > 5).unwrap();
//! assert_eq!(left.measure(), Size(5));
//! assert_eq!(pivot, Item(6));
//! assert_eq!(right.measure(), Size(4));
//! ```
//!
//! # References
//!
//! - Hinze & Paterson, "Finger Trees: A Simple General-purpose Data
//!   Structure" (2006)
//! - Okasaki, "Purely Functional Data Structures" (1998)

use std::fmt;
use std::fmt::Write as _;
use std::hash::{Hash, Hasher};

use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::ReferenceCounter;
use crate::digit::Digit;
use crate::lazy::LazyTree;
use crate::measure::{Measured, Monoid, Semigroup};
use crate::node::{Node, NodeLink};

/// Shared handle to a middle subtree.
pub(crate) type TreeLink<T> = ReferenceCounter<Tree<T>>;

/// The recursive tree representation.
///
/// A `Deep` middle holds entries one node-construction level deeper than
/// its digits; the depth-uniformity invariant is maintained by every
/// operation below, not by the types.
pub(crate) enum Tree<T: Measured> {
    Empty,
    Single(NodeLink<T>),
    Deep {
        measure: T::Measure,
        left: Digit<T>,
        middle: TreeLink<T>,
        right: Digit<T>,
    },
}

impl<T: Measured> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Single(node) => Self::Single(node.clone()),
            Self::Deep {
                measure,
                left,
                middle,
                right,
            } => Self::Deep {
                measure: measure.clone(),
                left: left.clone(),
                middle: middle.clone(),
                right: right.clone(),
            },
        }
    }
}

impl<T: Measured> Tree<T> {
    pub(crate) const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub(crate) fn link(tree: Self) -> TreeLink<T> {
        ReferenceCounter::new(tree)
    }

    pub(crate) fn measure(&self) -> T::Measure {
        match self {
            Self::Empty => Monoid::empty(),
            Self::Single(node) => node.measure(),
            Self::Deep { measure, .. } => measure.clone(),
        }
    }

    /// Builds a deep tree, computing the cached total from its parts.
    fn deep(left: Digit<T>, middle: TreeLink<T>, right: Digit<T>) -> Self {
        let measure = left
            .measure()
            .combine(middle.measure())
            .combine(right.measure());
        Self::Deep {
            measure,
            left,
            middle,
            right,
        }
    }

    /// Degrades a lone digit into a tree of the same entries.
    fn from_digit(digit: &Digit<T>) -> Self {
        let nodes = digit.to_vec();
        match nodes.as_slice() {
            [single] => Self::Single(single.clone()),
            [first, second] => Self::deep(
                Digit::One(first.clone()),
                Self::link(Self::Empty),
                Digit::One(second.clone()),
            ),
            [first, second, third] => Self::deep(
                Digit::Two(first.clone(), second.clone()),
                Self::link(Self::Empty),
                Digit::One(third.clone()),
            ),
            [first, second, third, fourth] => Self::deep(
                Digit::Two(first.clone(), second.clone()),
                Self::link(Self::Empty),
                Digit::Two(third.clone(), fourth.clone()),
            ),
            _ => unreachable!("digit holds 1 to 4 entries"),
        }
    }

    pub(crate) fn push_front_node(&self, entry: NodeLink<T>) -> Self {
        match self {
            Self::Empty => Self::Single(entry),
            Self::Single(existing) => Self::deep(
                Digit::One(entry),
                Self::link(Self::Empty),
                Digit::One(existing.clone()),
            ),
            Self::Deep {
                measure,
                left,
                middle,
                right,
            } => {
                let measure = entry.measure().combine(measure.clone());
                match left.prepend(entry.clone()) {
                    Some(widened) => Self::Deep {
                        measure,
                        left: widened,
                        middle: middle.clone(),
                        right: right.clone(),
                    },
                    None => {
                        let Digit::Four(first, second, third, fourth) = left else {
                            unreachable!("prepend refused a digit below four")
                        };
                        let overflow = Node::node3(second.clone(), third.clone(), fourth.clone());
                        Self::Deep {
                            measure,
                            left: Digit::Two(entry, first.clone()),
                            middle: Self::link(middle.push_front_node(overflow)),
                            right: right.clone(),
                        }
                    }
                }
            }
        }
    }

    pub(crate) fn push_back_node(&self, entry: NodeLink<T>) -> Self {
        match self {
            Self::Empty => Self::Single(entry),
            Self::Single(existing) => Self::deep(
                Digit::One(existing.clone()),
                Self::link(Self::Empty),
                Digit::One(entry),
            ),
            Self::Deep {
                measure,
                left,
                middle,
                right,
            } => {
                let measure = measure.clone().combine(entry.measure());
                match right.append(entry.clone()) {
                    Some(widened) => Self::Deep {
                        measure,
                        left: left.clone(),
                        middle: middle.clone(),
                        right: widened,
                    },
                    None => {
                        let Digit::Four(first, second, third, fourth) = right else {
                            unreachable!("append refused a digit below four")
                        };
                        let overflow = Node::node3(first.clone(), second.clone(), third.clone());
                        Self::Deep {
                            measure,
                            left: left.clone(),
                            middle: Self::link(middle.push_back_node(overflow)),
                            right: Digit::Two(fourth.clone(), entry),
                        }
                    }
                }
            }
        }
    }

    /// Removes the first entry; the remainder is deferred.
    pub(crate) fn view_left(&self) -> Option<(NodeLink<T>, LazyTree<T>)> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some((node.clone(), LazyTree::ready(Self::Empty))),
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => {
                let (rest, head) = left.pop_front();
                Some((
                    head,
                    LazyTree::rotate_left(rest, middle.clone(), right.clone()),
                ))
            }
        }
    }

    /// Removes the last entry; the remainder is deferred.
    pub(crate) fn view_right(&self) -> Option<(NodeLink<T>, LazyTree<T>)> {
        match self {
            Self::Empty => None,
            Self::Single(node) => Some((node.clone(), LazyTree::ready(Self::Empty))),
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => {
                let (rest, last) = right.pop_back();
                Some((
                    last,
                    LazyTree::rotate_right(left.clone(), middle.clone(), rest),
                ))
            }
        }
    }

    /// Rebuilds a deep tree whose left digit may have been drained,
    /// borrowing the leftmost node from the middle when necessary.
    pub(crate) fn deep_left(
        rest: Option<Digit<T>>,
        middle: &TreeLink<T>,
        right: &Digit<T>,
    ) -> Self {
        match rest {
            Some(digit) => Self::deep(digit, middle.clone(), right.clone()),
            None => match middle.view_left() {
                None => Self::from_digit(right),
                Some((borrowed, remainder)) => Self::deep(
                    Digit::from_node(&borrowed),
                    Self::link(remainder.force().clone()),
                    right.clone(),
                ),
            },
        }
    }

    /// Mirror of [`Tree::deep_left`] for a drained right digit.
    pub(crate) fn deep_right(
        left: &Digit<T>,
        middle: &TreeLink<T>,
        rest: Option<Digit<T>>,
    ) -> Self {
        match rest {
            Some(digit) => Self::deep(left.clone(), middle.clone(), digit),
            None => match middle.view_right() {
                None => Self::from_digit(left),
                Some((borrowed, remainder)) => Self::deep(
                    left.clone(),
                    Self::link(remainder.force().clone()),
                    Digit::from_node(&borrowed),
                ),
            },
        }
    }

    /// Three-way descent locating the entry at which `predicate` flips.
    ///
    /// Requires a non-empty tree; callers establish that the flip happens
    /// within `self` given `accumulated`.
    fn split_tree<P>(&self, predicate: &P, accumulated: T::Measure) -> (Self, NodeLink<T>, Self)
    where
        P: Fn(&T::Measure) -> bool,
    {
        match self {
            Self::Empty => unreachable!("split requires a non-empty tree"),
            Self::Single(node) => (Self::Empty, node.clone(), Self::Empty),
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => {
                let through_left = accumulated.clone().combine(left.measure());
                if predicate(&through_left) {
                    let (before, pivot, after) = left.split(predicate, accumulated);
                    let left_tree = before.map_or(Self::Empty, |digit| Self::from_digit(&digit));
                    return (left_tree, pivot, Self::deep_left(after, middle, right));
                }
                let through_middle = through_left.clone().combine(middle.measure());
                if predicate(&through_middle) {
                    let (middle_left, pivot_node, middle_right) =
                        middle.split_tree(predicate, through_left.clone());
                    let before_pivot = through_left.combine(middle_left.measure());
                    let (before, pivot, after) =
                        Digit::from_node(&pivot_node).split(predicate, before_pivot);
                    return (
                        Self::deep_right(left, &Self::link(middle_left), before),
                        pivot,
                        Self::deep_left(after, &Self::link(middle_right), right),
                    );
                }
                let (before, pivot, after) = right.split(predicate, through_middle);
                let right_tree = after.map_or(Self::Empty, |digit| Self::from_digit(&digit));
                (Self::deep_right(left, middle, before), pivot, right_tree)
            }
        }
    }

    /// Same three-way descent as splitting, but only extracts the first
    /// element whose accumulated prefix measure satisfies `predicate`.
    fn find<P>(&self, predicate: &P, accumulated: T::Measure) -> Option<&T>
    where
        P: Fn(&T::Measure) -> bool,
    {
        match self {
            Self::Empty => None,
            Self::Single(node) => {
                let through = accumulated.clone().combine(node.measure());
                predicate(&through).then(|| descend_node(node, accumulated, predicate))
            }
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => {
                if let Some((before, entry)) = left.find(predicate, accumulated.clone()) {
                    return Some(descend_node(entry, before, predicate));
                }
                let through_left = accumulated.combine(left.measure());
                let through_middle = through_left.clone().combine(middle.measure());
                if predicate(&through_middle) {
                    return middle.find(predicate, through_left);
                }
                right
                    .find(predicate, through_middle)
                    .map(|(before, entry)| descend_node(entry, before, predicate))
            }
        }
    }

    /// Concatenation with up to four glue entries absorbed into the seam.
    ///
    /// The two seam digits plus the glue contribute 2 to 12 entries,
    /// regrouped into 2-3 nodes that become the glue of the recursive
    /// middle concatenation. Each recursion level works one node level
    /// deeper, so the cost is logarithmic in the smaller operand.
    pub(crate) fn concat_glue(&self, glue: &[NodeLink<T>], other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) => glue
                .iter()
                .rev()
                .fold(other.clone(), |tree, entry| {
                    tree.push_front_node(entry.clone())
                }),
            (_, Self::Empty) => glue.iter().fold(self.clone(), |tree, entry| {
                tree.push_back_node(entry.clone())
            }),
            (Self::Single(node), _) => glue
                .iter()
                .rev()
                .fold(other.clone(), |tree, entry| {
                    tree.push_front_node(entry.clone())
                })
                .push_front_node(node.clone()),
            (_, Self::Single(node)) => glue
                .iter()
                .fold(self.clone(), |tree, entry| {
                    tree.push_back_node(entry.clone())
                })
                .push_back_node(node.clone()),
            (
                Self::Deep {
                    left: left1,
                    middle: middle1,
                    right: right1,
                    ..
                },
                Self::Deep {
                    left: left2,
                    middle: middle2,
                    right: right2,
                    ..
                },
            ) => {
                let mut seam: ArrayVec<NodeLink<T>, 12> = ArrayVec::new();
                seam.extend(right1.to_vec());
                seam.extend(glue.iter().cloned());
                seam.extend(left2.to_vec());
                let packed = Self::pack_nodes(&seam);
                let middle = middle1.concat_glue(&packed, middle2);
                Self::deep(left1.clone(), Self::link(middle), right2.clone())
            }
        }
    }

    /// Regroups 2-12 seam entries into 2-3 nodes, greedily from the left:
    /// 3s while more than four entries remain, then 2 / 3 / 2+2. At most
    /// four nodes come out, so they fit the glue slot of the next level.
    fn pack_nodes(seam: &[NodeLink<T>]) -> ArrayVec<NodeLink<T>, 4> {
        let mut packed = ArrayVec::new();
        let mut rest = seam;
        loop {
            match rest.len() {
                0 | 1 => unreachable!("seam carries at least two entries"),
                2 => {
                    packed.push(Node::node2(rest[0].clone(), rest[1].clone()));
                    break;
                }
                3 => {
                    packed.push(Node::node3(rest[0].clone(), rest[1].clone(), rest[2].clone()));
                    break;
                }
                4 => {
                    packed.push(Node::node2(rest[0].clone(), rest[1].clone()));
                    packed.push(Node::node2(rest[2].clone(), rest[3].clone()));
                    break;
                }
                _ => {
                    packed.push(Node::node3(rest[0].clone(), rest[1].clone(), rest[2].clone()));
                    rest = &rest[3..];
                }
            }
        }
        packed
    }

    pub(crate) fn reverse(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Single(node) => Self::Single(Node::reverse(node)),
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => Self::deep(
                right.reverse(),
                Self::link(middle.reverse()),
                left.reverse(),
            ),
        }
    }

    pub(crate) fn reverse_map<U, F>(&self, function: &F) -> Tree<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        match self {
            Self::Empty => Tree::Empty,
            Self::Single(node) => Tree::Single(Node::reverse_map(node, function)),
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => Tree::deep(
                right.reverse_map(function),
                Tree::link(middle.reverse_map(function)),
                left.reverse_map(function),
            ),
        }
    }

    pub(crate) fn map<U, F>(&self, function: &F) -> Tree<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        match self {
            Self::Empty => Tree::Empty,
            Self::Single(node) => Tree::Single(Node::map(node, function)),
            Self::Deep {
                left,
                middle,
                right,
                ..
            } => Tree::deep(
                left.map(function),
                Tree::link(middle.map(function)),
                right.map(function),
            ),
        }
    }

    /// Shape-aligned structural comparison.
    ///
    /// `Some(result)` when the two trees share enough shape to decide
    /// directly; `None` when digit arities diverge, in which case only an
    /// element-by-element comparison can decide (the representation is
    /// not canonical: equal sequences built through different edit
    /// histories may carry different digit splits).
    fn structural_eq(&self, other: &Self) -> Option<bool>
    where
        T: PartialEq,
    {
        match (self, other) {
            (Self::Empty, Self::Empty) => Some(true),
            (Self::Empty, _) | (_, Self::Empty) => Some(false),
            (Self::Single(mine), Self::Single(theirs)) => node_structural_eq(mine, theirs),
            (
                Self::Deep {
                    left: left1,
                    middle: middle1,
                    right: right1,
                    ..
                },
                Self::Deep {
                    left: left2,
                    middle: middle2,
                    right: right2,
                    ..
                },
            ) => {
                if left1.arity() != left2.arity() || right1.arity() != right2.arity() {
                    return None;
                }
                decided(digit_structural_eq(left1, left2), || {
                    decided(middle1.structural_eq(middle2), || {
                        digit_structural_eq(right1, right2)
                    })
                })
            }
            // A Single can denote the same leaf sequence as a shallow Deep
            // two levels down; only iteration can tell.
            _ => None,
        }
    }
}

/// Chains structural comparisons: continue only while decidedly equal.
fn decided(first: Option<bool>, rest: impl FnOnce() -> Option<bool>) -> Option<bool> {
    match first {
        Some(true) => rest(),
        undecided_or_false => undecided_or_false,
    }
}

fn node_structural_eq<T>(mine: &NodeLink<T>, theirs: &NodeLink<T>) -> Option<bool>
where
    T: Measured + PartialEq,
{
    if ReferenceCounter::ptr_eq(mine, theirs) {
        return Some(true);
    }
    match (mine.as_ref(), theirs.as_ref()) {
        (Node::Leaf(left), Node::Leaf(right)) => Some(left == right),
        (
            Node::Node2 {
                first: first1,
                second: second1,
                ..
            },
            Node::Node2 {
                first: first2,
                second: second2,
                ..
            },
        ) => decided(node_structural_eq(first1, first2), || {
            node_structural_eq(second1, second2)
        }),
        (
            Node::Node3 {
                first: first1,
                second: second1,
                third: third1,
                ..
            },
            Node::Node3 {
                first: first2,
                second: second2,
                third: third2,
                ..
            },
        ) => decided(node_structural_eq(first1, first2), || {
            decided(node_structural_eq(second1, second2), || {
                node_structural_eq(third1, third2)
            })
        }),
        _ => None,
    }
}

fn digit_structural_eq<T>(mine: &Digit<T>, theirs: &Digit<T>) -> Option<bool>
where
    T: Measured + PartialEq,
{
    let my_entries = mine.entries();
    let their_entries = theirs.entries();
    debug_assert_eq!(my_entries.len(), their_entries.len());
    my_entries
        .into_iter()
        .zip(their_entries)
        .fold(Some(true), |outcome, (left, right)| {
            decided(outcome, || node_structural_eq(left, right))
        })
}

/// Walks from a node down to the leaf at which `predicate` first flips.
fn descend_node<'a, T, P>(node: &'a NodeLink<T>, accumulated: T::Measure, predicate: &P) -> &'a T
where
    T: Measured,
    P: Fn(&T::Measure) -> bool,
{
    let mut node = node;
    let mut accumulated = accumulated;
    loop {
        match node.as_ref() {
            Node::Leaf(element) => return element,
            Node::Node2 { first, second, .. } => {
                let through_first = accumulated.clone().combine(first.measure());
                if predicate(&through_first) {
                    node = first;
                } else {
                    accumulated = through_first;
                    node = second;
                }
            }
            Node::Node3 {
                first,
                second,
                third,
                ..
            } => {
                let through_first = accumulated.clone().combine(first.measure());
                if predicate(&through_first) {
                    node = first;
                    continue;
                }
                let through_second = through_first.clone().combine(second.measure());
                if predicate(&through_second) {
                    accumulated = through_first;
                    node = second;
                } else {
                    accumulated = through_second;
                    node = third;
                }
            }
        }
    }
}

fn leaf_element<T: Measured>(node: &Node<T>) -> &T {
    match node {
        Node::Leaf(element) => element,
        _ => unreachable!("top-level entries are leaves"),
    }
}

/// A persistent sequence annotated with a monoidal measure.
///
/// See the [module documentation](self) for the structure and complexity
/// guarantees. Elements supply their measure through [`Measured`]; the
/// cached aggregate of the whole tree is available in O(1) through
/// [`FingerTree::measure`].
///
/// # Examples
///
/// ```rust
/// use fingertree::{FingerTree, Measured, Size};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Item(&'static str);
///
/// impl Measured for Item {
///     type Measure = Size;
///
///     fn measure(&self) -> Size {
///         Size(1)
///     }
/// }
///
/// let tree = FingerTree::new()
///     .push_back(Item("a"))
///     .push_back(Item("b"));
///
/// assert_eq!(tree.front(), Some(&Item("a")));
/// assert_eq!(tree.back(), Some(&Item("b")));
///
/// // Structural sharing: the original tree is preserved
/// let extended = tree.push_back(Item("c"));
/// assert_eq!(tree.measure(), Size(2));
/// assert_eq!(extended.measure(), Size(3));
/// ```
pub struct FingerTree<T: Measured> {
    root: Tree<T>,
}

impl<T: Measured> Clone for FingerTree<T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<T: Measured> FingerTree<T> {
    /// Creates a new empty tree.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { root: Tree::Empty }
    }

    /// Creates a tree containing a single element.
    #[inline]
    #[must_use]
    pub fn singleton(element: T) -> Self {
        Self {
            root: Tree::Single(Node::leaf(element)),
        }
    }

    /// Returns `true` if the tree contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the cached aggregate measure of the whole sequence: the
    /// `combine` of every element's measure in order, or the monoid
    /// identity for an empty tree. O(1).
    #[must_use]
    pub fn measure(&self) -> T::Measure {
        self.root.measure()
    }

    /// Returns a reference to the first element, if any.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        match &self.root {
            Tree::Empty => None,
            Tree::Single(node) => Some(leaf_element(node)),
            Tree::Deep { left, .. } => Some(leaf_element(left.head())),
        }
    }

    /// Returns a reference to the last element, if any.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        match &self.root {
            Tree::Empty => None,
            Tree::Single(node) => Some(leaf_element(node)),
            Tree::Deep { right, .. } => Some(leaf_element(right.last())),
        }
    }

    /// Prepends an element. Amortized O(1).
    #[must_use]
    pub fn push_front(&self, element: T) -> Self {
        Self {
            root: self.root.push_front_node(Node::leaf(element)),
        }
    }

    /// Appends an element. Amortized O(1).
    #[must_use]
    pub fn push_back(&self, element: T) -> Self {
        Self {
            root: self.root.push_back_node(Node::leaf(element)),
        }
    }

    /// Removes and returns the first element together with the remainder.
    ///
    /// This forces the remainder immediately; use [`FingerTree::view_left`]
    /// to defer it.
    #[must_use]
    pub fn pop_front(&self) -> Option<(Self, T)>
    where
        T: Clone,
    {
        self.root.view_left().map(|(node, rest)| {
            (
                Self {
                    root: rest.force().clone(),
                },
                leaf_element(&node).clone(),
            )
        })
    }

    /// Removes and returns the last element together with the remainder.
    #[must_use]
    pub fn pop_back(&self) -> Option<(Self, T)>
    where
        T: Clone,
    {
        self.root.view_right().map(|(node, rest)| {
            (
                Self {
                    root: rest.force().clone(),
                },
                leaf_element(&node).clone(),
            )
        })
    }

    /// Splits off the first element, deferring the remainder.
    ///
    /// The returned view's tail is computed at most once, on first
    /// access, and the result is shared between clones of the view.
    #[must_use]
    pub fn view_left(&self) -> Option<FingerTreeView<T>> {
        self.root
            .view_left()
            .map(|(node, rest)| FingerTreeView { node, rest })
    }

    /// Splits off the last element, deferring the remainder.
    #[must_use]
    pub fn view_right(&self) -> Option<FingerTreeView<T>> {
        self.root
            .view_right()
            .map(|(node, rest)| FingerTreeView { node, rest })
    }

    /// Concatenates this tree with another. O(log(min(n, m))).
    #[must_use]
    pub fn concat(&self, other: &Self) -> Self {
        Self {
            root: self.root.concat_glue(&[], &other.root),
        }
    }

    /// Concatenates with extra elements inserted at the seam.
    ///
    /// Up to four glue elements ride the concatenation seam for free:
    /// they are regrouped into the same nodes the seam digits already
    /// pay for. Longer glue sequences degrade gracefully to repeated
    /// appends before the concatenation.
    ///
    /// ```rust
    /// # use fingertree::{FingerTree, Measured, Size};
    /// # #[derive(Clone, Debug, PartialEq)]
    /// # struct Item(i32);
    /// # impl Measured for Item {
    /// #     type Measure = Size;
    /// #     fn measure(&self) -> Size { Size(1) }
    /// # }
    /// let left: FingerTree<Item> = (1..=3).map(Item).collect();
    /// let right: FingerTree<Item> = (4..=6).map(Item).collect();
    ///
    /// let spliced = left.concat_with([Item(100), Item(101)], &right);
    /// let values: Vec<i32> = spliced.iter().map(|item| item.0).collect();
    /// assert_eq!(values, vec![1, 2, 3, 100, 101, 4, 5, 6]);
    /// ```
    #[must_use]
    pub fn concat_with<I>(&self, glue: I, other: &Self) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let entries: SmallVec<[NodeLink<T>; 4]> = glue.into_iter().map(Node::leaf).collect();
        if entries.len() <= 4 {
            return Self {
                root: self.root.concat_glue(&entries, &other.root),
            };
        }
        let extended = entries
            .into_iter()
            .fold(self.root.clone(), |tree, entry| tree.push_back_node(entry));
        Self {
            root: extended.concat_glue(&[], &other.root),
        }
    }

    /// Partitions the sequence around the point where `predicate` flips
    /// from false to true over accumulated prefix measures.
    ///
    /// The predicate must be monotonic. The left tree holds the longest
    /// prefix whose accumulated measure fails the predicate; the right
    /// tree holds everything from the flip point on. When the predicate
    /// never flips, the partition is `(everything, empty)`.
    #[must_use]
    pub fn split<P>(&self, predicate: P) -> (Self, Self)
    where
        P: Fn(&T::Measure) -> bool,
    {
        if self.root.is_empty() {
            return (Self::new(), Self::new());
        }
        if !predicate(&self.root.measure()) {
            return (self.clone(), Self::new());
        }
        let (left, pivot, right) = self.root.split_tree(&predicate, T::Measure::empty());
        (
            Self { root: left },
            Self {
                root: right.push_front_node(pivot),
            },
        )
    }

    /// Locates the single element at which `predicate` flips, returning
    /// `(left, pivot, right)` with `left ++ [pivot] ++ right` equal to
    /// the original sequence.
    ///
    /// Returns `None` when the tree is empty or the predicate never
    /// flips (both precondition violations of the three-way split).
    ///
    /// ```rust
    /// # use fingertree::{FingerTree, Measured, Size};
    /// # #[derive(Clone, Debug, PartialEq)]
    /// # struct Item(i32);
    /// # impl Measured for Item {
    /// #     type Measure = Size;
    /// #     fn measure(&self) -> Size { Size(1) }
    /// # }
    /// let tree: FingerTree<Item> = (1..=10).map(Item).collect();
    /// let (left, pivot, right) = tree.split3(|measure| measure.0 > 5).unwrap();
    ///
    /// assert_eq!(left.iter().map(|item| item.0).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// assert_eq!(pivot, Item(6));
    /// assert_eq!(right.iter().map(|item| item.0).collect::<Vec<_>>(), vec![7, 8, 9, 10]);
    /// ```
    #[must_use]
    pub fn split3<P>(&self, predicate: P) -> Option<(Self, T, Self)>
    where
        T: Clone,
        P: Fn(&T::Measure) -> bool,
    {
        self.split3_from(predicate, T::Measure::empty())
    }

    /// Like [`FingerTree::split3`], with the measure accumulation seeded
    /// by `accumulated` instead of the monoid identity.
    #[must_use]
    pub fn split3_from<P>(&self, predicate: P, accumulated: T::Measure) -> Option<(Self, T, Self)>
    where
        T: Clone,
        P: Fn(&T::Measure) -> bool,
    {
        if self.root.is_empty() {
            return None;
        }
        let total = accumulated.clone().combine(self.root.measure());
        if !predicate(&total) {
            return None;
        }
        let (left, pivot, right) = self.root.split_tree(&predicate, accumulated);
        Some((
            Self { root: left },
            leaf_element(&pivot).clone(),
            Self { root: right },
        ))
    }

    /// The prefix whose accumulated measure fails `predicate`.
    #[must_use]
    pub fn take_until<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T::Measure) -> bool,
    {
        self.split(predicate).0
    }

    /// Everything from the point where `predicate` flips on.
    #[must_use]
    pub fn drop_until<P>(&self, predicate: P) -> Self
    where
        P: Fn(&T::Measure) -> bool,
    {
        self.split(predicate).1
    }

    /// Returns the first element whose accumulated prefix measure
    /// satisfies `predicate`, without rebuilding any trees. O(log n).
    #[must_use]
    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T::Measure) -> bool,
    {
        self.root.find(&predicate, T::Measure::empty())
    }

    /// Returns a new tree with elements in reverse order. O(n).
    ///
    /// Cached measures are recombined in the reversed order; under a
    /// non-commutative monoid the reversed tree's measure is the combine
    /// of the reversed sequence, which may differ from the original.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            root: self.root.reverse(),
        }
    }

    /// Single-pass reverse and map into another element/measure type.
    #[must_use]
    pub fn reverse_map<U, F>(&self, function: F) -> FingerTree<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        FingerTree {
            root: self.root.reverse_map(&function),
        }
    }

    /// Maps every element into another element/measure type, recomputing
    /// all cached measures through the target measurement function.
    #[must_use]
    pub fn map<U, F>(&self, function: F) -> FingerTree<U>
    where
        U: Measured,
        F: Fn(&T) -> U,
    {
        FingerTree {
            root: self.root.map(&function),
        }
    }

    /// Creates an iterator over references to the elements, front to
    /// back.
    #[must_use]
    pub fn iter(&self) -> FingerTreeIterator<'_, T> {
        FingerTreeIterator {
            stack: vec![Frame::Tree(&self.root)],
        }
    }

    /// Creates an iterator over references to the elements, back to
    /// front.
    #[must_use]
    pub fn iter_rev(&self) -> FingerTreeRevIterator<'_, T> {
        FingerTreeRevIterator {
            stack: vec![Frame::Tree(&self.root)],
        }
    }

    /// Folds the elements front to back.
    pub fn fold_left<B, F>(&self, initial: B, function: F) -> B
    where
        F: FnMut(B, &T) -> B,
    {
        self.iter().fold(initial, function)
    }

    /// Renders the internal structure using a caller-supplied element
    /// renderer, one line per spine level. Diagnostics only; the output
    /// shape is not a stable interface.
    #[must_use]
    pub fn pretty<F>(&self, render: F) -> String
    where
        F: Fn(&T) -> String,
    {
        let mut output = String::new();
        pretty_tree(&self.root, 0, &mut output, &render);
        output
    }
}

impl<T: Measured> Default for FingerTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Measured + PartialEq> PartialEq for FingerTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.root
            .structural_eq(&other.root)
            .unwrap_or_else(|| self.iter().eq(other.iter()))
    }
}

impl<T: Measured + Eq> Eq for FingerTree<T> {}

impl<T: Measured + fmt::Debug> fmt::Debug for FingerTree<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Measured + Hash> Hash for FingerTree<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut length = 0_usize;
        for element in self {
            element.hash(state);
            length += 1;
        }
        length.hash(state);
    }
}

impl<T: Measured> FromIterator<T> for FingerTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterator: I) -> Self {
        let mut root = Tree::Empty;
        for element in iterator {
            root = root.push_back_node(Node::leaf(element));
        }
        Self { root }
    }
}

impl<'a, T: Measured> IntoIterator for &'a FingerTree<T> {
    type Item = &'a T;
    type IntoIter = FingerTreeIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Measured + Clone> IntoIterator for FingerTree<T> {
    type Item = T;
    type IntoIter = FingerTreeIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        FingerTreeIntoIterator { tree: self }
    }
}

/// The result of removing one element at an end of the tree.
///
/// The head is available immediately; the remainder is a memoized
/// suspension evaluated on first access and shared between clones.
pub struct FingerTreeView<T: Measured> {
    node: NodeLink<T>,
    rest: LazyTree<T>,
}

impl<T: Measured> Clone for FingerTreeView<T> {
    fn clone(&self) -> Self {
        Self {
            node: self.node.clone(),
            rest: self.rest.clone(),
        }
    }
}

impl<T: Measured> FingerTreeView<T> {
    /// The removed element.
    #[must_use]
    pub fn element(&self) -> &T {
        leaf_element(&self.node)
    }

    /// The remaining tree, forcing the deferred rebalancing if this is
    /// the first access through any clone of this view.
    #[must_use]
    pub fn rest(&self) -> FingerTree<T> {
        FingerTree {
            root: self.rest.force().clone(),
        }
    }
}

enum Frame<'a, T: Measured> {
    Tree(&'a Tree<T>),
    Node(&'a Node<T>),
}

/// Front-to-back element iterator. Heap-allocated frame stack, depth
/// O(log n).
pub struct FingerTreeIterator<'a, T: Measured> {
    stack: Vec<Frame<'a, T>>,
}

impl<'a, T: Measured> FingerTreeIterator<'a, T> {
    fn push_digit(&mut self, digit: &'a Digit<T>) {
        for entry in digit.entries().into_iter().rev() {
            self.stack.push(Frame::Node(entry.as_ref()));
        }
    }
}

impl<'a, T: Measured> Iterator for FingerTreeIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Tree(Tree::Empty) => {}
                Frame::Tree(Tree::Single(node)) => self.stack.push(Frame::Node(node.as_ref())),
                Frame::Tree(Tree::Deep {
                    left,
                    middle,
                    right,
                    ..
                }) => {
                    self.push_digit(right);
                    self.stack.push(Frame::Tree(middle.as_ref()));
                    self.push_digit(left);
                }
                Frame::Node(Node::Leaf(element)) => return Some(element),
                Frame::Node(Node::Node2 { first, second, .. }) => {
                    self.stack.push(Frame::Node(second.as_ref()));
                    self.stack.push(Frame::Node(first.as_ref()));
                }
                Frame::Node(Node::Node3 {
                    first,
                    second,
                    third,
                    ..
                }) => {
                    self.stack.push(Frame::Node(third.as_ref()));
                    self.stack.push(Frame::Node(second.as_ref()));
                    self.stack.push(Frame::Node(first.as_ref()));
                }
            }
        }
        None
    }
}

/// Back-to-front element iterator.
pub struct FingerTreeRevIterator<'a, T: Measured> {
    stack: Vec<Frame<'a, T>>,
}

impl<'a, T: Measured> FingerTreeRevIterator<'a, T> {
    fn push_digit(&mut self, digit: &'a Digit<T>) {
        for entry in digit.entries() {
            self.stack.push(Frame::Node(entry.as_ref()));
        }
    }
}

impl<'a, T: Measured> Iterator for FingerTreeRevIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Tree(Tree::Empty) => {}
                Frame::Tree(Tree::Single(node)) => self.stack.push(Frame::Node(node.as_ref())),
                Frame::Tree(Tree::Deep {
                    left,
                    middle,
                    right,
                    ..
                }) => {
                    self.push_digit(left);
                    self.stack.push(Frame::Tree(middle.as_ref()));
                    self.push_digit(right);
                }
                Frame::Node(Node::Leaf(element)) => return Some(element),
                Frame::Node(Node::Node2 { first, second, .. }) => {
                    self.stack.push(Frame::Node(first.as_ref()));
                    self.stack.push(Frame::Node(second.as_ref()));
                }
                Frame::Node(Node::Node3 {
                    first,
                    second,
                    third,
                    ..
                }) => {
                    self.stack.push(Frame::Node(first.as_ref()));
                    self.stack.push(Frame::Node(second.as_ref()));
                    self.stack.push(Frame::Node(third.as_ref()));
                }
            }
        }
        None
    }
}

/// Owning iterator, popping from the front.
pub struct FingerTreeIntoIterator<T: Measured> {
    tree: FingerTree<T>,
}

impl<T: Measured + Clone> Iterator for FingerTreeIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let (rest, element) = self.tree.pop_front()?;
        self.tree = rest;
        Some(element)
    }
}

fn pretty_tree<T, F>(tree: &Tree<T>, depth: usize, output: &mut String, render: &F)
where
    T: Measured,
    F: Fn(&T) -> String,
{
    let indent = "  ".repeat(depth);
    match tree {
        Tree::Empty => {
            let _ = writeln!(output, "{indent}empty");
        }
        Tree::Single(node) => {
            let _ = writeln!(output, "{indent}single {}", pretty_node(node, render));
        }
        Tree::Deep {
            left,
            middle,
            right,
            ..
        } => {
            let _ = writeln!(output, "{indent}deep");
            let _ = writeln!(output, "{indent}  left: {}", pretty_digit(left, render));
            let _ = writeln!(output, "{indent}  middle:");
            pretty_tree(middle, depth + 2, output, render);
            let _ = writeln!(output, "{indent}  right: {}", pretty_digit(right, render));
        }
    }
}

fn pretty_node<T, F>(node: &Node<T>, render: &F) -> String
where
    T: Measured,
    F: Fn(&T) -> String,
{
    match node {
        Node::Leaf(element) => render(element),
        Node::Node2 { first, second, .. } => format!(
            "({} {})",
            pretty_node(first, render),
            pretty_node(second, render)
        ),
        Node::Node3 {
            first,
            second,
            third,
            ..
        } => format!(
            "({} {} {})",
            pretty_node(first, render),
            pretty_node(second, render),
            pretty_node(third, render)
        ),
    }
}

fn pretty_digit<T, F>(digit: &Digit<T>, render: &F) -> String
where
    T: Measured,
    F: Fn(&T) -> String,
{
    let rendered: Vec<String> = digit
        .entries()
        .into_iter()
        .map(|entry| pretty_node(entry, render))
        .collect();
    format!("[{}]", rendered.join(" "))
}
