//! Answer sources for tree traversal.
//!
//! This module defines the [`Answers`] trait. The tree asks questions of
//! type `Q`; an answer source replies with `Some(bool)` or `None` when it has
//! nothing to say about that question.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Something that can answer the boolean questions a tree asks.
pub trait Answers<Q> {
    /// Returns the answer to `question`, or `None` if it is unknown.
    fn answer(&self, question: &Q) -> Option<bool>;
}

impl<Q, S> Answers<Q> for HashMap<Q, bool, S>
where
    Q: Eq + Hash,
    S: BuildHasher,
{
    #[inline]
    fn answer(&self, question: &Q) -> Option<bool> {
        self.get(question).copied()
    }
}

impl<Q: Ord> Answers<Q> for BTreeMap<Q, bool> {
    #[inline]
    fn answer(&self, question: &Q) -> Option<bool> {
        self.get(question).copied()
    }
}

/// Blanket implementation for references, so `&A` works wherever `A` does.
impl<Q, A: Answers<Q> + ?Sized> Answers<Q> for &A {
    #[inline]
    fn answer(&self, question: &Q) -> Option<bool> {
        (**self).answer(question)
    }
}
