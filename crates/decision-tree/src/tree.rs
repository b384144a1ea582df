//! Tree representation and traversal.
//!
//! A [`DecisionTree`] owns a single root [`Node`]. Every internal node has
//! exactly two children keyed by the boolean answer to its question.

use std::fmt;

use crate::{Answers, TreeError};

/// A node of a binary question tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node<Q, L> {
    /// Internal node: ask `question`, then descend into the matching child.
    Branch {
        question: Q,
        on_true: Box<Node<Q, L>>,
        on_false: Box<Node<Q, L>>,
    },

    /// Terminal node carrying the label returned by traversal.
    Leaf(L),
}

impl<Q, L> Node<Q, L> {
    /// Returns `true` if this node is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    fn depth(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Branch {
                on_true, on_false, ..
            } => 1 + on_true.depth().max(on_false.depth()),
        }
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a L>) {
        match self {
            Node::Leaf(label) => out.push(label),
            Node::Branch {
                on_true, on_false, ..
            } => {
                on_true.collect_leaves(out);
                on_false.collect_leaves(out);
            }
        }
    }
}

/// A rooted binary decision tree with question keys `Q` and leaf labels `L`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DecisionTree<Q, L> {
    root: Node<Q, L>,
}

impl<Q, L> DecisionTree<Q, L> {
    /// Creates a tree from its root node.
    pub fn new(root: Node<Q, L>) -> Self {
        Self { root }
    }

    /// Creates a tree that always returns `label`.
    pub fn constant(label: L) -> Self {
        Self::new(Node::Leaf(label))
    }

    /// Returns the root node.
    pub fn root(&self) -> &Node<Q, L> {
        &self.root
    }

    /// Number of questions on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// All leaf labels, true branches before false branches.
    pub fn leaves(&self) -> Vec<&L> {
        let mut out = Vec::new();
        self.root.collect_leaves(&mut out);
        out
    }

    /// Walks from the root to a leaf and returns its label.
    ///
    /// At each branch the question is answered by `answers`; traversal stops
    /// at the first leaf reached.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingAnswer`] when `answers` has no answer for
    /// a question on the walked path.
    pub fn find_action<A>(&self, answers: &A) -> Result<&L, TreeError>
    where
        A: Answers<Q> + ?Sized,
        Q: fmt::Debug,
    {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf(label) => return Ok(label),
                Node::Branch {
                    question,
                    on_true,
                    on_false,
                } => {
                    node = match answers.answer(question) {
                        Some(true) => on_true,
                        Some(false) => on_false,
                        None => {
                            return Err(TreeError::MissingAnswer {
                                question: format!("{question:?}"),
                            });
                        }
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::builder::{branch, leaf};

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Q {
        Hungry,
        HasFood,
    }

    fn lunch_tree() -> DecisionTree<Q, &'static str> {
        DecisionTree::new(branch(
            Q::Hungry,
            branch(Q::HasFood, leaf("eat"), leaf("shop")),
            leaf("nap"),
        ))
    }

    #[test]
    fn walks_to_matching_leaf() {
        let tree = lunch_tree();
        let answers = HashMap::from([(Q::Hungry, true), (Q::HasFood, false)]);

        assert_eq!(tree.find_action(&answers), Ok(&"shop"));
    }

    #[test]
    fn stops_at_first_leaf_without_asking_deeper_questions() {
        let tree = lunch_tree();
        // HasFood is never asked on the false branch of Hungry
        let answers = HashMap::from([(Q::Hungry, false)]);

        assert_eq!(tree.find_action(&answers), Ok(&"nap"));
    }

    #[test]
    fn missing_answer_is_an_error() {
        let tree = lunch_tree();
        let answers = HashMap::from([(Q::Hungry, true)]);

        assert_eq!(
            tree.find_action(&answers),
            Err(TreeError::MissingAnswer {
                question: "HasFood".to_string()
            })
        );
    }

    #[test]
    fn shape_queries() {
        let tree = lunch_tree();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.leaves(), vec![&"eat", &"shop", &"nap"]);
        assert!(DecisionTree::<Q, u8>::constant(7).root().is_leaf());
    }
}
