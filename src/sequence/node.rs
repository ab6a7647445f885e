//! Chain nodes and the arena that owns them.
//!
//! Every node of an [`OrderedSequence`](super::OrderedSequence) lives in a
//! [`slab::Slab`] owned by that sequence. Links between nodes are slab keys,
//! so a node is referenced by exactly one predecessor link (or by the
//! sequence's head) and is freed exactly once, when its key is removed from
//! the arena.
//!
//! ```text
//! head ──► [k3: a | next=k0] ──► [k0: b | next=k5] ──► [k5: c | next=∅] ◄── tail
//! ```

use slab::Slab;

/// Key of a node inside a sequence's arena.
pub(crate) type NodeKey = usize;

/// A single link of the chain.
#[derive(Debug)]
pub(crate) struct Node<T> {
    /// The element owned by this node.
    pub(crate) element: T,
    /// Key of the successor, `None` for the terminal node.
    pub(crate) next: Option<NodeKey>,
}

impl<T> Node<T> {
    #[inline]
    pub(crate) const fn new(element: T, next: Option<NodeKey>) -> Self {
        Self { element, next }
    }
}

/// Arena owning every node of one sequence.
pub(crate) type Arena<T> = Slab<Node<T>>;

/// Returns the successor key of `key`.
#[inline]
pub(crate) fn next_of<T>(arena: &Arena<T>, key: NodeKey) -> Option<NodeKey> {
    arena.get(key).and_then(|node| node.next)
}

/// Follows `hops` successor links from `start`.
///
/// Returns `None` if the chain ends first.
pub(crate) fn walk<T>(arena: &Arena<T>, start: Option<NodeKey>, hops: usize) -> Option<NodeKey> {
    let mut current = start;
    for _ in 0..hops {
        current = next_of(arena, current?);
    }
    current
}

/// Follows successor links from `start` until the terminal node.
pub(crate) fn terminal_of<T>(arena: &Arena<T>, start: Option<NodeKey>) -> Option<NodeKey> {
    let mut current = start?;
    while let Some(next) = next_of(arena, current) {
        current = next;
    }
    Some(current)
}

/// Collects the keys of the chain starting at `start`, in link order.
pub(crate) fn chain_keys<T>(arena: &Arena<T>, start: Option<NodeKey>) -> Vec<NodeKey> {
    let mut keys = Vec::with_capacity(arena.len());
    let mut current = start;
    while let Some(key) = current {
        keys.push(key);
        current = next_of(arena, key);
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Builds `0 -> 1 -> ... -> count-1` and returns the arena and head key.
    fn build_chain(count: usize) -> (Arena<usize>, Option<NodeKey>) {
        let mut arena = Arena::new();
        let mut head = None;
        for element in (0..count).rev() {
            head = Some(arena.insert(Node::new(element, head)));
        }
        (arena, head)
    }

    #[rstest]
    #[case(0, 0, None)]
    #[case(3, 0, Some(0))]
    #[case(3, 2, Some(2))]
    #[case(3, 3, None)]
    #[case(3, 7, None)]
    fn test_walk(#[case] count: usize, #[case] hops: usize, #[case] expected: Option<usize>) {
        let (arena, head) = build_chain(count);
        let reached = walk(&arena, head, hops).map(|key| arena[key].element);
        assert_eq!(reached, expected);
    }

    #[rstest]
    fn test_terminal_of_empty_chain() {
        let (arena, head) = build_chain(0);
        assert_eq!(terminal_of(&arena, head), None);
    }

    #[rstest]
    fn test_terminal_of_reaches_last_node() {
        let (arena, head) = build_chain(4);
        let terminal = terminal_of(&arena, head).map(|key| arena[key].element);
        assert_eq!(terminal, Some(3));
    }

    #[rstest]
    fn test_chain_keys_follow_link_order() {
        let (arena, head) = build_chain(5);
        let elements: Vec<usize> = chain_keys(&arena, head)
            .into_iter()
            .map(|key| arena[key].element)
            .collect();
        assert_eq!(elements, vec![0, 1, 2, 3, 4]);
    }
}
