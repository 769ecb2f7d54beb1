//! Memoized lazy tree tails for view results.
//!
//! Removing the first or last element of a deep tree whose outer digit is
//! down to one entry requires a rotation: borrowing a node back from the
//! middle subtree. [`LazyTree`] defers that rebalancing until the view's
//! remainder is actually needed. The suspension is defunctionalized - it
//! captures the rotation operands directly instead of boxing a closure -
//! so the cell stays `Send + Sync` under the `arc` feature without extra
//! bounds.
//!
//! Forcing is synchronized through `OnceLock::get_or_init`: concurrent
//! forcers observe exactly one evaluation, and the shared result is
//! cached for every holder of the same cell. Chains of views that never
//! force their tails never pay the rotation cost; chains that do pay it
//! exactly once per cell.

use std::sync::OnceLock;

use crate::ReferenceCounter;
use crate::digit::Digit;
use crate::measure::Measured;
use crate::tree::{Tree, TreeLink};

/// A memoizing handle to a not-yet-built tree.
///
/// Cloning shares the memo cell: whichever clone forces first fills it
/// for all of them.
pub(crate) struct LazyTree<T: Measured> {
    cell: ReferenceCounter<LazyCell<T>>,
}

struct LazyCell<T: Measured> {
    memo: OnceLock<Tree<T>>,
    suspension: Suspension<T>,
}

/// The deferred rebalancing step, captured as data.
enum Suspension<T: Measured> {
    /// The memo was filled at construction time; nothing to run.
    Done,
    /// Rebuild a deep tree after its left digit lost its head.
    RotateLeft {
        rest: Option<Digit<T>>,
        middle: TreeLink<T>,
        right: Digit<T>,
    },
    /// Rebuild a deep tree after its right digit lost its last entry.
    RotateRight {
        left: Digit<T>,
        middle: TreeLink<T>,
        rest: Option<Digit<T>>,
    },
}

impl<T: Measured> Clone for LazyTree<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
        }
    }
}

impl<T: Measured> LazyTree<T> {
    /// Wraps an already-built tree; forcing is a cache read.
    pub(crate) fn ready(tree: Tree<T>) -> Self {
        let memo = OnceLock::new();
        let _ = memo.set(tree);
        Self {
            cell: ReferenceCounter::new(LazyCell {
                memo,
                suspension: Suspension::Done,
            }),
        }
    }

    /// Defers `deep_left(rest, middle, right)`.
    pub(crate) fn rotate_left(
        rest: Option<Digit<T>>,
        middle: TreeLink<T>,
        right: Digit<T>,
    ) -> Self {
        Self {
            cell: ReferenceCounter::new(LazyCell {
                memo: OnceLock::new(),
                suspension: Suspension::RotateLeft {
                    rest,
                    middle,
                    right,
                },
            }),
        }
    }

    /// Defers `deep_right(left, middle, rest)`.
    pub(crate) fn rotate_right(
        left: Digit<T>,
        middle: TreeLink<T>,
        rest: Option<Digit<T>>,
    ) -> Self {
        Self {
            cell: ReferenceCounter::new(LazyCell {
                memo: OnceLock::new(),
                suspension: Suspension::RotateRight {
                    left,
                    middle,
                    rest,
                },
            }),
        }
    }

    /// Evaluates the suspension at most once and returns the shared tree.
    pub(crate) fn force(&self) -> &Tree<T> {
        self.cell
            .memo
            .get_or_init(|| match &self.cell.suspension {
                Suspension::Done => unreachable!("ready cell carries its tree"),
                Suspension::RotateLeft {
                    rest,
                    middle,
                    right,
                } => Tree::deep_left(rest.clone(), middle, right),
                Suspension::RotateRight {
                    left,
                    middle,
                    rest,
                } => Tree::deep_right(left, middle, rest.clone()),
            })
    }

    /// Whether the suspension has already been evaluated.
    #[cfg(test)]
    pub(crate) fn is_forced(&self) -> bool {
        self.cell.memo.get().is_some()
    }
}
