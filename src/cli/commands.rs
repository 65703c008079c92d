// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Three subcommands:
//   chunk → print the model inputs for a question + passages
//   ask   → answer a question from recorded chunk scores
//   vocab → build a word-level tokenizer from passages

use clap::{Args, Subcommand, ValueEnum};

use extractive_reader::application::reader_config::{QaType, ReaderConfig};
use extractive_reader::infra::tokenizer_store::SpecialTokenNames;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the chunks the span model must score, as JSON
    Chunk(ChunkArgs),

    /// Answer a question using recorded span scores
    Ask(AskArgs),

    /// Build a word-level tokenizer.json from passage texts
    Vocab(VocabArgs),
}

/// Tokenizer location and the model inputs it defines.
#[derive(Args, Debug, Clone)]
pub struct TokenizerArgs {
    /// Directory containing tokenizer.json
    #[arg(long, default_value = "model")]
    pub tokenizer_dir: String,

    /// Maximum model sequence length, used when tokenizer.json sets none
    #[arg(long, default_value_t = 512)]
    pub max_seq_len: usize,

    /// Leading marker token (also the null-answer placeholder)
    #[arg(long, default_value = "[CLS]")]
    pub cls_token: String,

    /// Separator token
    #[arg(long, default_value = "[SEP]")]
    pub sep_token: String,
}

impl From<&TokenizerArgs> for SpecialTokenNames {
    fn from(a: &TokenizerArgs) -> Self {
        SpecialTokenNames { cls: a.cls_token.clone(), sep: a.sep_token.clone() }
    }
}

#[derive(Args, Debug)]
pub struct ChunkArgs {
    /// The natural language question
    #[arg(long)]
    pub question: String,

    /// JSON file with an array of {"id", "text"} passages
    #[arg(long)]
    pub passages: String,

    #[command(flatten)]
    pub tokenizer: TokenizerArgs,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[value(rename_all = "snake_case")]
pub enum QaTypeArg {
    ScoredAnswer,
    SimpleAnswer,
}

impl From<QaTypeArg> for QaType {
    fn from(a: QaTypeArg) -> Self {
        match a {
            QaTypeArg::ScoredAnswer => QaType::ScoredAnswer,
            QaTypeArg::SimpleAnswer => QaType::SimpleAnswer,
        }
    }
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The natural language question
    #[arg(long)]
    pub question: String,

    /// JSON file with an array of {"id", "text"} passages
    #[arg(long)]
    pub passages: String,

    /// JSON file of recorded {"token_ids", "start_logits", "end_logits"} records
    #[arg(long)]
    pub scores: String,

    /// Directory holding reader_config.json (defaults apply when absent)
    #[arg(long)]
    pub config_dir: Option<String>,

    /// Extraction mode, overrides the config file
    #[arg(long, value_enum)]
    pub qa_type: Option<QaTypeArg>,

    /// Candidates kept per chunk, overrides the config file
    #[arg(long)]
    pub nbest: Option<usize>,

    /// Null-score threshold, overrides the config file
    #[arg(long, allow_hyphen_values = true)]
    pub null_threshold: Option<f32>,

    /// Longest answer span in tokens, overrides the config file
    #[arg(long)]
    pub max_answer_len: Option<usize>,

    #[command(flatten)]
    pub tokenizer: TokenizerArgs,
}

impl AskArgs {
    /// Apply command-line overrides on top of a loaded config.
    pub fn apply_overrides(&self, mut cfg: ReaderConfig) -> ReaderConfig {
        if let Some(qa_type) = self.qa_type {
            cfg.qa_type = qa_type.into();
        }
        if let Some(nbest) = self.nbest {
            cfg.nbest = nbest;
        }
        if let Some(t) = self.null_threshold {
            cfg.null_threshold = t;
        }
        if self.max_answer_len.is_some() {
            cfg.max_answer_len = self.max_answer_len;
        }
        cfg
    }
}

#[derive(Args, Debug)]
pub struct VocabArgs {
    /// JSON file with an array of {"id", "text"} passages
    #[arg(long)]
    pub passages: String,

    /// Directory to write tokenizer.json into
    #[arg(long, default_value = "model")]
    pub out_dir: String,

    /// Total vocabulary size including special tokens
    #[arg(long, default_value_t = 30522)]
    pub vocab_size: usize,
}
