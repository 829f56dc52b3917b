use super::{Entry, NodeKind, QuadNode};
use std::slice;

/// Depth-first iterator over the objects stored under a node.
///
/// Yields leaf entries in insertion order and visits children in quadrant
/// order, so it produces exactly the sequence of [`QuadNode::collect`].
pub struct Iter<'a, T> {
    stack: Vec<&'a QuadNode<T>>,
    entries: slice::Iter<'a, Entry<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(node: &'a QuadNode<T>) -> Self {
        Self {
            stack: vec![node],
            entries: Default::default(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.entries.next() {
                return Some(&entry.object);
            }

            let node = self.stack.pop()?;
            match &node.kind {
                NodeKind::Leaf(entries) => self.entries = entries.iter(),
                // Reversed so quadrant 0 is popped first.
                NodeKind::Internal(children) => self.stack.extend(children.iter().rev()),
            }
        }
    }
}
