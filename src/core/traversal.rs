//! Lazy in-order traversal over the binary tree indexes
//!
//! The iterator keeps an explicit stack of pending ancestors instead of
//! recursing, so degenerate (list-shaped) trees do not grow the call stack.

use crate::core::traits::BinaryNode;
use crate::types::Record;

/// In-order iterator over any [`BinaryNode`] tree
pub struct InOrder<'a, N> {
    stack: Vec<&'a N>,
}

impl<'a, N: BinaryNode> InOrder<'a, N> {
    pub fn new(root: Option<&'a N>) -> Self {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a N>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, N: BinaryNode> Iterator for InOrder<'a, N> {
    type Item = &'a Record;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.record())
    }
}

/// Height of a tree, computed level by level
pub fn tree_height<N: BinaryNode>(root: Option<&N>) -> usize {
    let mut level: Vec<&N> = root.into_iter().collect();
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|node| node.left().into_iter().chain(node.right()))
            .collect();
    }
    height
}
