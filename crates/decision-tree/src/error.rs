//! Errors produced by traversal and induction.

/// Traversal failed before reaching a leaf.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The answer source has no entry for a question asked by the tree.
    ///
    /// Trees have no implicit default branch: callers must answer every
    /// question that appears on the path being walked.
    #[error("no answer supplied for question `{question}`")]
    MissingAnswer { question: String },
}

/// Induction could not build a tree from the supplied examples.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InductionError {
    #[error("cannot induce a tree without examples")]
    NoExamples,

    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },

    #[error("example {row} has {found} features, expected {expected}")]
    WidthMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}
