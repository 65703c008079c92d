// ============================================================
// Layer 2 — Chunk Plan
// ============================================================
// Question encoding and passage chunking, shared by the reader
// and the `chunk` command so both produce the exact same model
// inputs for the same question and passages.

use serde::Serialize;

use crate::data::question::{Question, QuestionNormalizer};
use crate::data::token_window::{TokenWindow, SPECIALS};
use crate::domain::chunk::Chunk;
use crate::domain::error::{ReaderError, ReaderResult};
use crate::domain::passage::Passage;
use crate::domain::traits::TokenCodec;

/// The chunks of one passage, as fed to the span model.
#[derive(Debug, Clone, Serialize)]
pub struct PassageChunks {
    pub passage_id: String,
    pub chunks:     Vec<Chunk>,
}

/// Encode a normalised question, failing fast when it cannot fit the model.
pub fn encode_question<C: TokenCodec>(codec: &C, question: &Question) -> ReaderResult<Vec<u32>> {
    let q_tokens = codec
        .encode(question.as_str())
        .map_err(|e| ReaderError::Tokenizer(e.to_string()))?;

    let max_len = codec.max_seq_len();
    if q_tokens.len() + SPECIALS > max_len {
        return Err(ReaderError::Configuration {
            question_tokens: q_tokens.len(),
            specials:        SPECIALS,
            max_seq_len:     max_len,
        });
    }
    Ok(q_tokens)
}

/// Tokenise one passage and split it into chunks.
pub fn chunk_passage<C: TokenCodec>(
    codec:    &C,
    q_tokens: &[u32],
    passage:  &Passage,
) -> ReaderResult<Vec<Chunk>> {
    let p_tokens = codec
        .encode(&passage.text)
        .map_err(|e| ReaderError::Tokenizer(e.to_string()))?;

    TokenWindow::new(codec.special_tokens()).split(q_tokens, &p_tokens, codec.max_seq_len())
}

/// Chunk every passage for `question`. Any failure aborts the plan.
pub fn plan<C: TokenCodec>(
    codec:    &C,
    question: &str,
    passages: &[Passage],
) -> ReaderResult<Vec<PassageChunks>> {
    let question = QuestionNormalizer::new().normalize(question);
    let q_tokens = encode_question(codec, &question)?;

    passages
        .iter()
        .map(|p| {
            Ok(PassageChunks {
                passage_id: p.id.clone(),
                chunks:     chunk_passage(codec, &q_tokens, p)?,
            })
        })
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::WordCodec;

    #[test]
    fn test_plan_chunks_each_passage() {
        let codec = WordCodec::from_texts(&["when is it", "a b c d e f g h"]).with_max_seq_len(9);
        let plans = plan(
            &codec,
            "When is it?",
            &[Passage::new("one", "a b c"), Passage::new("two", "a b c d e f g h")],
        )
        .unwrap();

        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].chunks.len(), 1);
        // budget = 9 - 3 - 3 = 3 → 8 tokens need 3 chunks
        assert_eq!(plans[1].chunks.len(), 3);
        assert_eq!(plans[1].passage_id, "two");
    }

    #[test]
    fn test_plan_fails_for_oversized_question() {
        let codec = WordCodec::from_texts(&["when is it"]).with_max_seq_len(5);
        assert!(plan(&codec, "when is it", &[]).is_err());
    }
}
