use thiserror::Error;

/// Unified fault type. Every failure aborts the compilation; there is no
/// partial output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported construct: {0}")]
    UnsupportedConstruct(String),

    #[error("Can only assign one target at a time, got {0}")]
    MultipleAssignmentTargets(usize),

    #[error("Literal {0} does not fit in a 4-bit operand")]
    LiteralOutOfRange(i64),

    #[error("Undefined variable: `{0}`")]
    UndefinedVariable(String),

    #[error("Unsupported operator: {0} (only addition compiles)")]
    UnsupportedOperator(String),

    #[error("Unsupported comparison: {0}")]
    UnsupportedComparison(String),

    #[error("Unsupported callable: {0} (only single-argument print)")]
    UnsupportedCallable(String),

    #[error("Undefined label: `{0}`")]
    UnresolvedLabel(String),

    #[error(
        "{listing}\nProgram does not fit into memory: \
         {code} instructions + {vars} variables over {} words",
        arch::MEM_WORDS
    )]
    CapacityExceeded {
        /// The full listing, so the overflow can be diagnosed without
        /// recompiling.
        listing: String,
        code: usize,
        vars: usize,
    },

    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed syntax tree: {0}")]
    Tree(#[from] serde_yaml::Error),
}
