//! Link-based merge sort over a node chain.
//!
//! The sort only rewrites successor links: node keys and the elements they
//! own stay where they are in the arena, so no element is moved or cloned.
//!
//! # Algorithm
//!
//! - **Split**: a slow/fast two-pointer scan. `fast` starts one link ahead of
//!   `slow` and moves two links per step; when it runs off the chain, the
//!   back half starts right after `slow`.
//! - **Merge**: repeatedly detach whichever head comes first. When neither
//!   element is `before` the other the left head wins, which keeps equal
//!   elements in their original relative order.
//!
//! The recursion of the textbook formulation is replaced by an explicit work
//! stack, so arbitrarily long chains sort without growing the call stack.
//! Pending work is bounded by the split depth, O(log n).

use super::node::{Arena, NodeKey, next_of};

enum Task {
    /// Sort the chain starting at this key and push its new head.
    Sort(Option<NodeKey>),
    /// Pop two sorted chains (right on top) and push their merge.
    Merge,
}

/// Sorts the chain starting at `head` and returns its new head.
///
/// `before(a, b)` must define a strict weak order: `true` when `a` has to
/// come before `b`. The caller owns re-deriving any cached tail.
pub(crate) fn merge_sort<T, F>(
    arena: &mut Arena<T>,
    head: Option<NodeKey>,
    before: &mut F,
) -> Option<NodeKey>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut tasks = vec![Task::Sort(head)];
    let mut sorted: Vec<Option<NodeKey>> = Vec::new();

    while let Some(task) = tasks.pop() {
        match task {
            Task::Sort(Some(front)) if next_of(arena, front).is_some() => {
                let back = split(arena, front);
                tasks.push(Task::Merge);
                tasks.push(Task::Sort(back));
                tasks.push(Task::Sort(Some(front)));
            }
            Task::Sort(chain) => sorted.push(chain),
            Task::Merge => {
                let right = sorted.pop().flatten();
                let left = sorted.pop().flatten();
                sorted.push(merge(arena, left, right, before));
            }
        }
    }

    sorted.pop().flatten()
}

/// Cuts the chain starting at `source` in two and returns the back half.
///
/// The front half keeps `source` as its head and holds the extra node when
/// the length is odd.
fn split<T>(arena: &mut Arena<T>, source: NodeKey) -> Option<NodeKey> {
    let mut slow = source;
    let mut fast = next_of(arena, source);

    while let Some(key) = fast {
        fast = next_of(arena, key);
        if let Some(key) = fast {
            if let Some(next) = next_of(arena, slow) {
                slow = next;
            }
            fast = next_of(arena, key);
        }
    }

    arena[slow].next.take()
}

/// Merges two sorted chains into one, favoring `left` on ties.
fn merge<T, F>(
    arena: &mut Arena<T>,
    mut left: Option<NodeKey>,
    mut right: Option<NodeKey>,
    before: &mut F,
) -> Option<NodeKey>
where
    F: FnMut(&T, &T) -> bool,
{
    let mut head = None;
    let mut last: Option<NodeKey> = None;

    let rest = loop {
        let (left_key, right_key) = match (left, right) {
            (Some(left_key), Some(right_key)) => (left_key, right_key),
            (rest, None) | (None, rest) => break rest,
        };

        let taken = if before(&arena[right_key].element, &arena[left_key].element) {
            right = arena[right_key].next;
            right_key
        } else {
            left = arena[left_key].next;
            left_key
        };

        match last {
            Some(last_key) => arena[last_key].next = Some(taken),
            None => head = Some(taken),
        }
        last = Some(taken);
    };

    match last {
        Some(last_key) => arena[last_key].next = rest,
        None => head = rest,
    }
    head
}
