//! Builder utilities for ergonomic tree construction.
//!
//! Instead of writing nested `Node::Branch { .. }` literals with explicit
//! boxing, hand-authored trees can be written as `branch(q, yes, no)`.

use crate::Node;

/// Creates a branch node.
///
/// Shorthand for `Node::Branch { question, on_true: Box::new(..), on_false: Box::new(..) }`.
#[inline]
pub fn branch<Q, L>(question: Q, on_true: Node<Q, L>, on_false: Node<Q, L>) -> Node<Q, L> {
    Node::Branch {
        question,
        on_true: Box::new(on_true),
        on_false: Box::new(on_false),
    }
}

/// Creates a leaf node.
///
/// Shorthand for `Node::Leaf(label)`.
#[inline]
pub fn leaf<Q, L>(label: L) -> Node<Q, L> {
    Node::Leaf(label)
}

/// Creates a leaf from anything convertible into the label type.
///
/// Handy when leaves mix several source types (e.g. actions and directives)
/// that all convert into one label enum.
#[inline]
pub fn leaf_from<Q, L, T: Into<L>>(label: T) -> Node<Q, L> {
    Node::Leaf(label.into())
}
