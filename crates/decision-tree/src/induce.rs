//! ID3 induction over boolean features.
//!
//! Examples are parallel arrays: one boolean feature row per example and one
//! label per example. `questions[i]` names the feature in column `i` and
//! becomes the question key of any branch that splits on it.
//!
//! # Algorithm
//!
//! 1. If every example shares one label, emit a leaf.
//! 2. If no usable question remains, emit a leaf with the majority label.
//! 3. Otherwise split on the question with the highest information gain and
//!    recurse on both halves; an empty half gets the parent's majority label.
//!
//! Ties are broken by order: the earliest question wins a gain tie and the
//! first-seen label wins a majority tie, so induction is deterministic.

use crate::{DecisionTree, InductionError, Node};

/// Builds a tree from labelled boolean examples.
///
/// # Errors
///
/// Fails if there are no examples, if `features` and `labels` differ in
/// length, or if a row's width differs from `questions.len()`.
pub fn induce<Q, L>(
    features: &[Vec<bool>],
    labels: &[L],
    questions: &[Q],
) -> Result<DecisionTree<Q, L>, InductionError>
where
    Q: Clone,
    L: Clone + PartialEq,
{
    if features.is_empty() {
        return Err(InductionError::NoExamples);
    }
    if features.len() != labels.len() {
        return Err(InductionError::LengthMismatch {
            features: features.len(),
            labels: labels.len(),
        });
    }
    if let Some((row, found)) = features
        .iter()
        .map(Vec::len)
        .enumerate()
        .find(|&(_, width)| width != questions.len())
    {
        return Err(InductionError::WidthMismatch {
            row,
            expected: questions.len(),
            found,
        });
    }

    let examples: Vec<usize> = (0..features.len()).collect();
    let available: Vec<usize> = (0..questions.len()).collect();
    let fallback = majority(&examples, labels);

    let ctx = Examples {
        features,
        labels,
        questions,
    };
    Ok(DecisionTree::new(ctx.grow(&examples, &available, fallback)))
}

struct Examples<'a, Q, L> {
    features: &'a [Vec<bool>],
    labels: &'a [L],
    questions: &'a [Q],
}

impl<Q: Clone, L: Clone + PartialEq> Examples<'_, Q, L> {
    fn grow(&self, examples: &[usize], available: &[usize], fallback: L) -> Node<Q, L> {
        if examples.is_empty() {
            return Node::Leaf(fallback);
        }

        let counts = label_counts(examples, self.labels);
        let local_majority = majority_of(&counts);
        if counts.len() == 1 {
            return Node::Leaf(local_majority);
        }

        let Some(best) = self.best_split(examples, available) else {
            return Node::Leaf(local_majority);
        };

        let (yes, no): (Vec<usize>, Vec<usize>) = examples
            .iter()
            .copied()
            .partition(|&example| self.features[example][best]);
        let remaining: Vec<usize> = available.iter().copied().filter(|&q| q != best).collect();

        Node::Branch {
            question: self.questions[best].clone(),
            on_true: Box::new(self.grow(&yes, &remaining, local_majority.clone())),
            on_false: Box::new(self.grow(&no, &remaining, local_majority)),
        }
    }

    /// Picks the column with the highest information gain among those that
    /// actually separate the examples. Zero-gain splits are still taken so
    /// that parity-like labellings can be learned.
    fn best_split(&self, examples: &[usize], available: &[usize]) -> Option<usize> {
        let base = entropy(&label_counts(examples, self.labels), examples.len());
        let mut best: Option<(usize, f64)> = None;

        for &column in available {
            let (yes, no): (Vec<usize>, Vec<usize>) = examples
                .iter()
                .copied()
                .partition(|&example| self.features[example][column]);
            if yes.is_empty() || no.is_empty() {
                continue;
            }

            let total = examples.len() as f64;
            let remainder = (yes.len() as f64 / total)
                * entropy(&label_counts(&yes, self.labels), yes.len())
                + (no.len() as f64 / total) * entropy(&label_counts(&no, self.labels), no.len());
            let gain = base - remainder;

            if best.is_none_or(|(_, best_gain)| gain > best_gain + f64::EPSILON) {
                best = Some((column, gain));
            }
        }

        best.map(|(column, _)| column)
    }
}

/// Label frequencies in first-seen order.
fn label_counts<L: Clone + PartialEq>(examples: &[usize], labels: &[L]) -> Vec<(L, usize)> {
    let mut counts: Vec<(L, usize)> = Vec::new();
    for &example in examples {
        let label = &labels[example];
        match counts.iter_mut().find(|(seen, _)| seen == label) {
            Some((_, count)) => *count += 1,
            None => counts.push((label.clone(), 1)),
        }
    }
    counts
}

fn majority<L: Clone + PartialEq>(examples: &[usize], labels: &[L]) -> L {
    majority_of(&label_counts(examples, labels))
}

fn majority_of<L: Clone>(counts: &[(L, usize)]) -> L {
    let mut best = &counts[0];
    for entry in &counts[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best.0.clone()
}

fn entropy<L>(counts: &[(L, usize)], total: usize) -> f64 {
    let total = total as f64;
    counts
        .iter()
        .map(|(_, count)| {
            let p = *count as f64 / total;
            -p * p.log2()
        })
        .sum()
}
