use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConlluError {
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid {column} '{value}'")]
    InvalidField {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: token id {found} out of sequence (expected {expected})")]
    OutOfSequence {
        line: usize,
        expected: u32,
        found: u32,
    },

    #[error("line {line}: head {head} out of range for a sentence of {len} tokens")]
    HeadOutOfRange { line: usize, head: u32, len: usize },
}
