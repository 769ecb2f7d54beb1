//! Property-based tests for FingerTree laws.
//!
//! Verifies the sequence semantics, measure accounting and persistence
//! invariants of the measured tree against a plain `Vec` model using
//! proptest.

use fingertree::{FingerTree, Measured, Monoid, Semigroup, Size};
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Item(i32);

impl Measured for Item {
    type Measure = Size;

    fn measure(&self) -> Size {
        Size(1)
    }
}

/// A token measured by the string-concatenation monoid, which is not
/// commutative: measure order observably matches element order.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Token(char);

impl Measured for Token {
    type Measure = String;

    fn measure(&self) -> String {
        self.0.to_string()
    }
}

fn build(elements: &[i32]) -> FingerTree<Item> {
    elements.iter().copied().map(Item).collect()
}

fn drain(tree: &FingerTree<Item>) -> Vec<i32> {
    tree.iter().map(|item| item.0).collect()
}

// =============================================================================
// Monoid Laws
// =============================================================================

proptest! {
    /// Associativity and two-sided identity for the integer-sum monoid.
    #[test]
    fn prop_size_monoid_laws(
        a in 0_usize..1_000_000,
        b in 0_usize..1_000_000,
        c in 0_usize..1_000_000
    ) {
        let (a, b, c) = (Size(a), Size(b), Size(c));
        prop_assert_eq!(a.combine(b).combine(c), a.combine(b.combine(c)));
        prop_assert_eq!(Size::empty().combine(a), a);
        prop_assert_eq!(a.combine(Size::empty()), a);
    }

    /// Associativity and two-sided identity for the string-concatenation
    /// monoid, which is associative without being commutative.
    #[test]
    fn prop_string_monoid_laws(
        a in ".{0,16}",
        b in ".{0,16}",
        c in ".{0,16}"
    ) {
        prop_assert_eq!(
            a.clone().combine(b.clone()).combine(c.clone()),
            a.clone().combine(b.combine(c))
        );
        prop_assert_eq!(String::empty().combine(a.clone()), a.clone());
        prop_assert_eq!(a.clone().combine(String::empty()), a);
    }
}

// =============================================================================
// Sequence Model Laws
// =============================================================================

proptest! {
    /// Round-trip law: collecting and iterating preserves the sequence.
    #[test]
    fn prop_from_iter_iter_round_trip(
        elements in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        prop_assert_eq!(drain(&build(&elements)), elements);
    }

    /// Measure law: the cached total is the combine of all element
    /// measures, here the element count.
    #[test]
    fn prop_measure_counts_elements(
        elements in prop::collection::vec(any::<i32>(), 0..200)
    ) {
        prop_assert_eq!(build(&elements).measure(), Size(elements.len()));
    }

    /// Push-pop front law: push_front and pop_front are inverses.
    #[test]
    fn prop_push_pop_front(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        new_element: i32
    ) {
        let tree = build(&elements);
        let with_element = tree.push_front(Item(new_element));
        let (remaining, popped) = with_element.pop_front().unwrap();
        prop_assert_eq!(popped, Item(new_element));
        prop_assert_eq!(remaining, tree);
    }

    /// Push-pop back law: push_back and pop_back are inverses.
    #[test]
    fn prop_push_pop_back(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        new_element: i32
    ) {
        let tree = build(&elements);
        let with_element = tree.push_back(Item(new_element));
        let (remaining, popped) = with_element.pop_back().unwrap();
        prop_assert_eq!(popped, Item(new_element));
        prop_assert_eq!(remaining, tree);
    }

    /// View chain law: repeatedly taking the left view walks the whole
    /// sequence in order.
    #[test]
    fn prop_view_chain_matches_iteration(
        elements in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let mut current = build(&elements);
        let mut walked = Vec::new();
        while let Some(view) = current.view_left() {
            walked.push(view.element().0);
            current = view.rest();
        }
        prop_assert_eq!(walked, elements);
    }
}

// =============================================================================
// Concatenation Laws
// =============================================================================

proptest! {
    /// Concat law: the result is the left sequence followed by the right.
    #[test]
    fn prop_concat_matches_vec_concat(
        left in prop::collection::vec(any::<i32>(), 0..100),
        right in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let combined = build(&left).concat(&build(&right));
        let mut expected = left;
        expected.extend(right);
        prop_assert_eq!(drain(&combined), expected);
    }

    /// Associativity: (a ++ b) ++ c == a ++ (b ++ c).
    #[test]
    fn prop_concat_associative(
        first in prop::collection::vec(any::<i32>(), 0..50),
        second in prop::collection::vec(any::<i32>(), 0..50),
        third in prop::collection::vec(any::<i32>(), 0..50)
    ) {
        let (a, b, c) = (build(&first), build(&second), build(&third));
        prop_assert_eq!(a.concat(&b).concat(&c), a.concat(&b.concat(&c)));
    }

    /// Identity: concatenation with the empty tree changes nothing.
    #[test]
    fn prop_concat_identity(
        elements in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let tree = build(&elements);
        let empty = FingerTree::new();
        prop_assert_eq!(empty.concat(&tree), tree.clone());
        prop_assert_eq!(tree.concat(&empty), tree);
    }

    /// Measure additivity: measure(a ++ b) == measure(a) ++ measure(b).
    #[test]
    fn prop_concat_measure_additive(
        left in prop::collection::vec(any::<i32>(), 0..100),
        right in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let left_tree = build(&left);
        let right_tree = build(&right);
        prop_assert_eq!(
            left_tree.concat(&right_tree).measure(),
            left_tree.measure().combine(right_tree.measure())
        );
    }

    /// Glue law: concat_with splices the glue between the operands.
    #[test]
    fn prop_concat_with_glue(
        left in prop::collection::vec(any::<i32>(), 0..40),
        glue in prop::collection::vec(any::<i32>(), 0..8),
        right in prop::collection::vec(any::<i32>(), 0..40)
    ) {
        let spliced = build(&left).concat_with(glue.iter().copied().map(Item), &build(&right));
        let mut expected = left;
        expected.extend(glue);
        expected.extend(right);
        prop_assert_eq!(drain(&spliced), expected);
    }
}

// =============================================================================
// Split and Search Laws
// =============================================================================

proptest! {
    /// Partition law: split reassembles into the original sequence, and
    /// the boundary falls exactly where the predicate flips.
    #[test]
    fn prop_split_partitions(
        elements in prop::collection::vec(any::<i32>(), 0..150),
        boundary in 0_usize..200
    ) {
        let tree = build(&elements);
        let (left, right) = tree.split(|measure| measure.0 > boundary);

        prop_assert_eq!(drain(&left).len(), boundary.min(elements.len()));
        let mut reassembled = drain(&left);
        reassembled.extend(drain(&right));
        prop_assert_eq!(reassembled, elements);
    }

    /// Three-way split law: left ++ [pivot] ++ right is the original,
    /// with the pivot at the flip position.
    #[test]
    fn prop_split3_pivot_position(
        elements in prop::collection::vec(any::<i32>(), 1..150),
        position in 0_usize..150
    ) {
        let position = position % elements.len();
        let tree = build(&elements);
        let (left, pivot, right) = tree.split3(|measure| measure.0 > position).unwrap();

        prop_assert_eq!(pivot, Item(elements[position]));
        prop_assert_eq!(drain(&left), elements[..position].to_vec());
        prop_assert_eq!(drain(&right), elements[position + 1..].to_vec());
    }

    /// take_until and drop_until are the two halves of split.
    #[test]
    fn prop_take_drop_complement(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        boundary in 0_usize..120
    ) {
        let tree = build(&elements);
        let taken = tree.take_until(|measure| measure.0 > boundary);
        let dropped = tree.drop_until(|measure| measure.0 > boundary);
        let mut reassembled = drain(&taken);
        reassembled.extend(drain(&dropped));
        prop_assert_eq!(reassembled, elements);
    }

    /// find agrees with a linear scan over accumulated measures.
    #[test]
    fn prop_find_matches_linear_scan(
        elements in prop::collection::vec(any::<i32>(), 0..150),
        boundary in 0_usize..200
    ) {
        let tree = build(&elements);
        let found = tree.find(|measure| measure.0 > boundary).map(|item| item.0);
        let expected = elements.get(boundary).copied();
        prop_assert_eq!(found, expected);
    }
}

// =============================================================================
// Transformation Laws
// =============================================================================

proptest! {
    /// Reverse is an involution.
    #[test]
    fn prop_reverse_involution(
        elements in prop::collection::vec(any::<i32>(), 0..150)
    ) {
        let tree = build(&elements);
        prop_assert_eq!(tree.reverse().reverse(), tree);
    }

    /// Reverse matches the model.
    #[test]
    fn prop_reverse_matches_vec(
        elements in prop::collection::vec(any::<i32>(), 0..150)
    ) {
        let mut expected = elements.clone();
        expected.reverse();
        prop_assert_eq!(drain(&build(&elements).reverse()), expected);
    }

    /// Map commutes with the model map.
    #[test]
    fn prop_map_matches_vec_map(
        elements in prop::collection::vec(any::<i32>(), 0..150)
    ) {
        let mapped: FingerTree<Item> = build(&elements).map(|item| Item(item.0.wrapping_mul(3)));
        let expected: Vec<i32> = elements.iter().map(|value| value.wrapping_mul(3)).collect();
        prop_assert_eq!(drain(&mapped), expected);
    }

    /// reverse_map equals reverse followed by map.
    #[test]
    fn prop_reverse_map_composition(
        elements in prop::collection::vec(any::<i32>(), 0..100)
    ) {
        let tree = build(&elements);
        let fused: FingerTree<Item> = tree.reverse_map(|item| Item(item.0.wrapping_add(1)));
        let staged: FingerTree<Item> = tree.reverse().map(|item| Item(item.0.wrapping_add(1)));
        prop_assert_eq!(fused, staged);
    }
}

// =============================================================================
// Equality and Persistence Laws
// =============================================================================

proptest! {
    /// Equality ignores construction history: the same sequence built
    /// through appends, prepends or concatenation compares equal.
    #[test]
    fn prop_equality_is_extensional(
        elements in prop::collection::vec(any::<i32>(), 0..120),
        cut in 0_usize..120
    ) {
        let appended = build(&elements);

        let mut prepended = FingerTree::new();
        for value in elements.iter().rev() {
            prepended = prepended.push_front(Item(*value));
        }

        let cut = cut.min(elements.len());
        let concatenated = build(&elements[..cut]).concat(&build(&elements[cut..]));

        prop_assert_eq!(&appended, &prepended);
        prop_assert_eq!(&appended, &concatenated);
    }

    /// Persistence law: operations on a derived tree never disturb the
    /// original.
    #[test]
    fn prop_originals_are_untouched(
        elements in prop::collection::vec(any::<i32>(), 0..100),
        new_element: i32
    ) {
        let original = build(&elements);
        let snapshot = drain(&original);

        let _extended = original.push_back(Item(new_element));
        let _shrunk = original.pop_front();
        let _halves = original.split(|measure| measure.0 > elements.len() / 2);
        let _reversed = original.reverse();

        prop_assert_eq!(drain(&original), snapshot);
    }
}

// =============================================================================
// Non-commutative Measure Laws
// =============================================================================

proptest! {
    /// The cached total under string concatenation spells the sequence,
    /// confirming measures combine strictly left to right.
    #[test]
    fn prop_noncommutative_measure_order(
        characters in prop::collection::vec(any::<char>(), 0..60)
    ) {
        let tree: FingerTree<Token> = characters.iter().copied().map(Token).collect();
        let expected: String = characters.iter().collect();
        prop_assert_eq!(tree.measure(), expected);
    }

    /// Splitting by prefix length under the string monoid cuts at the
    /// same point as positional splitting.
    #[test]
    fn prop_noncommutative_split(
        characters in prop::collection::vec(any::<char>(), 1..60),
        cut in 1_usize..60
    ) {
        let cut = cut.min(characters.len());
        let tree: FingerTree<Token> = characters.iter().copied().map(Token).collect();
        let (left, _) = tree.split(|measure| measure.chars().count() >= cut);
        let expected: String = characters[..cut - 1].iter().collect();
        prop_assert_eq!(left.measure(), expected);
    }

    /// Reversing recombines caches in reversed order.
    #[test]
    fn prop_noncommutative_reverse_measure(
        characters in prop::collection::vec(any::<char>(), 0..60)
    ) {
        let tree: FingerTree<Token> = characters.iter().copied().map(Token).collect();
        let expected: String = characters.iter().rev().collect();
        prop_assert_eq!(tree.reverse().measure(), expected);
    }

}

/// The monoid identity law observed through the empty tree.
#[test]
fn empty_tree_measures_identity() {
    let tree: FingerTree<Token> = FingerTree::new();
    assert_eq!(tree.measure(), String::empty());
}
