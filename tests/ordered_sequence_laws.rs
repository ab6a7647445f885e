//! Property-based tests for OrderedSequence.
//!
//! These tests verify that the chain bookkeeping (length, cached tail) and
//! the whole-sequence operations obey their laws for arbitrary inputs.

use chainseq::OrderedSequence;
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

/// Generates an `OrderedSequence<i32>` with up to `max_size` elements.
fn ordered_sequence_strategy(max_size: usize) -> impl Strategy<Value = OrderedSequence<i32>> {
    prop::collection::vec(any::<i32>(), 0..max_size).prop_map(OrderedSequence::from)
}

/// Generates a small `OrderedSequence<i32>` for faster tests.
fn small_sequence() -> impl Strategy<Value = OrderedSequence<i32>> {
    ordered_sequence_strategy(20)
}

#[derive(Debug, Clone)]
enum Operation {
    Add(i32),
    Insert(usize, i32),
    Remove(usize),
    Pop,
    Resize(usize, i32),
    Truncate(usize),
    Clear,
    Reverse,
    Sort,
}

fn operation_strategy() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => any::<i32>().prop_map(Operation::Add),
        3 => (0..25usize, any::<i32>()).prop_map(|(index, value)| Operation::Insert(index, value)),
        3 => (0..25usize).prop_map(Operation::Remove),
        1 => Just(Operation::Pop),
        1 => (0..25usize, any::<i32>()).prop_map(|(length, value)| Operation::Resize(length, value)),
        1 => (0..25usize).prop_map(Operation::Truncate),
        1 => Just(Operation::Clear),
        1 => Just(Operation::Reverse),
        1 => Just(Operation::Sort),
    ]
}

/// Applies `operation` to both the sequence and a `Vec` model.
fn apply(sequence: &mut OrderedSequence<i32>, model: &mut Vec<i32>, operation: &Operation) {
    match *operation {
        Operation::Add(value) => {
            sequence.add(value);
            model.push(value);
        }
        Operation::Insert(index, value) => {
            let result = sequence.insert(index, value);
            if index <= model.len() {
                assert!(result.is_ok());
                model.insert(index, value);
            } else {
                assert!(result.is_err());
            }
        }
        Operation::Remove(index) => {
            let result = sequence.remove(index);
            if index < model.len() {
                assert_eq!(result, Ok(model.remove(index)));
            } else {
                assert!(result.is_err());
            }
        }
        Operation::Pop => {
            assert_eq!(sequence.pop(), model.pop());
        }
        Operation::Resize(length, value) => {
            sequence.resize(length, value);
            model.resize(length, value);
        }
        Operation::Truncate(length) => {
            sequence.truncate(length);
            model.truncate(length);
        }
        Operation::Clear => {
            sequence.clear();
            model.clear();
        }
        Operation::Reverse => {
            sequence.reverse();
            model.reverse();
        }
        Operation::Sort => {
            sequence.sort();
            model.sort();
        }
    }
}

proptest! {
    // =========================================================================
    // Bookkeeping
    // =========================================================================

    #[test]
    fn prop_len_matches_iter_count(sequence in small_sequence()) {
        prop_assert_eq!(sequence.len(), sequence.iter().count());
        prop_assert!(sequence.check_last());
    }

    #[test]
    fn prop_operations_agree_with_vec_model(
        initial in prop::collection::vec(any::<i32>(), 0..10),
        operations in prop::collection::vec(operation_strategy(), 0..40),
    ) {
        let mut sequence: OrderedSequence<i32> = initial.clone().into();
        let mut model = initial;
        for operation in &operations {
            apply(&mut sequence, &mut model, operation);
            prop_assert_eq!(sequence.len(), sequence.iter().count());
            prop_assert_eq!(sequence.back(), model.last());
            prop_assert!(sequence.check_last());
        }
        prop_assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), model);
    }

    #[test]
    fn prop_back_is_last_reachable_element(sequence in small_sequence()) {
        match sequence.len().checked_sub(1) {
            Some(last) => prop_assert_eq!(sequence.back(), sequence.get(last)),
            None => prop_assert_eq!(sequence.back(), None),
        }
    }

    // =========================================================================
    // Boundaries
    // =========================================================================

    #[test]
    fn prop_insert_at_len_equals_add(sequence in small_sequence(), value: i32) {
        let mut inserted = sequence.clone();
        let mut added = sequence;
        let length = inserted.len();
        prop_assert!(inserted.insert(length, value).is_ok());
        added.add(value);
        prop_assert_eq!(inserted, added);
    }

    #[test]
    fn prop_at_len_is_out_of_range(sequence in small_sequence()) {
        let mut sequence = sequence;
        let length = sequence.len();
        prop_assert!(sequence.at(length).is_err());
        prop_assert!(sequence.remove(length).is_err());
        prop_assert_eq!(sequence.len(), length);
    }

    // =========================================================================
    // Deep copy and transfer
    // =========================================================================

    #[test]
    fn prop_clone_is_equal_and_independent(sequence in small_sequence(), value: i32) {
        let mut copy = sequence.clone();
        prop_assert_eq!(&copy, &sequence);
        let length = sequence.len();
        copy.add(value);
        prop_assert_eq!(sequence.len(), length);
        prop_assert_eq!(copy.len(), length + 1);
    }

    #[test]
    fn prop_clone_from_mirrors_source(
        destination in small_sequence(),
        source in small_sequence(),
    ) {
        let mut destination = destination;
        destination.clone_from(&source);
        prop_assert_eq!(&destination, &source);
        prop_assert!(destination.check_last());
    }

    #[test]
    fn prop_transfer_moves_contents(source in small_sequence(), destination in small_sequence()) {
        let expected = source.clone();
        let mut source = source;
        let mut destination = destination;
        source.transfer_to(&mut destination);
        prop_assert_eq!(destination, expected);
        prop_assert!(source.is_empty());
        prop_assert!(source.check_last());
    }

    // =========================================================================
    // Reverse and sort
    // =========================================================================

    #[test]
    fn prop_reverse_is_involution(sequence in small_sequence()) {
        let mut twice = sequence.clone();
        twice.reverse();
        twice.reverse();
        prop_assert_eq!(twice, sequence);
    }

    #[test]
    fn prop_sort_orders_adjacent_pairs(sequence in ordered_sequence_strategy(64)) {
        let mut sorted = sequence;
        sorted.sort_with(|a, b| a < b);
        let elements: Vec<i32> = sorted.iter().copied().collect();
        for pair in elements.windows(2) {
            prop_assert!(!(pair[1] < pair[0]));
        }
        prop_assert!(sorted.check_last());
    }

    #[test]
    fn prop_sort_matches_stable_slice_sort(pairs in prop::collection::vec((0..5i32, any::<u16>()), 0..64)) {
        let mut sequence: OrderedSequence<(i32, u16)> = pairs.clone().into();
        sequence.sort_by_key(|&(key, _)| key);
        let mut expected = pairs;
        expected.sort_by_key(|&(key, _)| key);
        prop_assert_eq!(sequence.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn prop_retain_matches_vec_retain(sequence in small_sequence()) {
        let mut expected: Vec<i32> = sequence.iter().copied().collect();
        expected.retain(|value| value % 3 != 0);
        let mut retained = sequence;
        retained.retain(|value| value % 3 != 0);
        prop_assert_eq!(retained.iter().copied().collect::<Vec<_>>(), expected);
        prop_assert!(retained.check_last());
    }
}
