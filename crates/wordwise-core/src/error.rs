#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Nothing to study yet. Look up some words first.")]
    EmptyPool,

    #[error("Need at least {required} words to start a quiz, found {available}.")]
    InsufficientPool { required: usize, available: usize },

    #[error("Please select a valid word: {0:?}")]
    InvalidWord(String),
}
