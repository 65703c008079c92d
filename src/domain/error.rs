// ============================================================
// Layer 3 — Reader Errors
// ============================================================
// Only the request-level failures live here. A passage whose
// model call fails is logged and dropped by the reader; it
// never becomes an error for the whole request.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error(
        "question needs {question_tokens} tokens plus {specials} special tokens, \
         which exceeds the model maximum of {max_seq_len}"
    )]
    Configuration {
        question_tokens: usize,
        specials:        usize,
        max_seq_len:     usize,
    },

    #[error("invalid reader configuration: {0}")]
    InvalidConfig(String),

    #[error("span model failed on passage '{passage_id}': {source}")]
    ModelCall {
        passage_id: String,
        #[source]
        source:     anyhow::Error,
    },

    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    #[error("request cancelled")]
    Cancelled,
}

pub type ReaderResult<T> = std::result::Result<T, ReaderError>;
