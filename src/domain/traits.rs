// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The reader never owns a model or a tokenizer; it talks to
// them through these two traits:
//   - TokenCodec → HfTokenizer (infra), WordCodec (tests)
//   - SpanModel  → ReplaySpanModel (infra), PhraseModel (tests)

use anyhow::Result;

use crate::domain::chunk::SpanScores;

/// Special token ids and the reserved non-answer placeholder.
///
/// Passed explicitly to every component that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Leading marker; position 0 is the model's no-answer slot
    pub cls: u32,

    /// Separator between question and passage, and after the passage
    pub sep: u32,

    /// Text form of the reserved non-answer token, e.g. "[CLS]"
    pub null_token: String,
}

// ─── TokenCodec ───────────────────────────────────────────────────────────────
/// Text ↔ token-id conversion for one model vocabulary.
pub trait TokenCodec {
    /// Encode text into token ids, without special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decode token ids into text.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String>;

    fn special_tokens(&self) -> &SpecialTokens;

    /// Maximum sequence length the span model accepts.
    fn max_seq_len(&self) -> usize;
}

// ─── SpanModel ────────────────────────────────────────────────────────────────
/// An extractive span-prediction model, treated as a pure function.
///
/// Implementations must return one start and one end score per
/// input token.
pub trait SpanModel {
    fn score(&self, token_ids: &[u32]) -> Result<SpanScores>;
}

impl<T: TokenCodec + ?Sized> TokenCodec for &T {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        (**self).encode(text)
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        (**self).decode(ids, skip_special_tokens)
    }

    fn special_tokens(&self) -> &SpecialTokens {
        (**self).special_tokens()
    }

    fn max_seq_len(&self) -> usize {
        (**self).max_seq_len()
    }
}

impl<T: SpanModel + ?Sized> SpanModel for &T {
    fn score(&self, token_ids: &[u32]) -> Result<SpanScores> {
        (**self).score(token_ids)
    }
}
