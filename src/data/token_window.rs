// ============================================================
// Layer 4 — Token Window
// ============================================================
// Splits a passage into model-sized chunks, repeating the full
// question in every chunk.
//
// Budget per chunk:
//   passage tokens = max_len - question tokens - SPECIALS
//
// Example with max_len=8, question=[q1 q2], passage=[a b c d e]:
//   budget = 8 - 2 - 3 = 3
//   Chunk 0: [CLS] q1 q2 [SEP] a b c [SEP]
//   Chunk 1: [CLS] q1 q2 [SEP] d e            ← last chunk, no closing [SEP]
//
// Chunks never overlap: concatenating their passage slices in
// order gives back the original passage tokens.

use crate::domain::chunk::Chunk;
use crate::domain::error::{ReaderError, ReaderResult};
use crate::domain::traits::SpecialTokens;

/// Marker + separator after the question + closing separator.
pub const SPECIALS: usize = 3;

pub struct TokenWindow {
    cls: u32,
    sep: u32,
}

impl TokenWindow {
    pub fn new(special: &SpecialTokens) -> Self {
        Self { cls: special.cls, sep: special.sep }
    }

    /// Split `passage` into chunks of at most `max_len` tokens.
    ///
    /// # Errors
    /// `ReaderError::Configuration` when the question and special
    /// tokens alone leave no room for passage tokens.
    pub fn split(
        &self,
        question: &[u32],
        passage:  &[u32],
        max_len:  usize,
    ) -> ReaderResult<Vec<Chunk>> {
        let fixed = question.len() + SPECIALS;
        if fixed > max_len {
            return Err(self.too_long(question, max_len));
        }

        // Whole passage fits (covers the empty passage too)
        if fixed + passage.len() <= max_len {
            return Ok(vec![self.build(0, question, passage, 0, true)]);
        }

        let budget = max_len - fixed;
        if budget == 0 {
            return Err(self.too_long(question, max_len));
        }

        let slices: Vec<&[u32]> = passage.chunks(budget).collect();
        let last = slices.len() - 1;

        let chunks = slices
            .into_iter()
            .enumerate()
            .map(|(i, slice)| self.build(i, question, slice, i * budget, i != last))
            .collect::<Vec<_>>();

        tracing::debug!(
            "Split {} passage tokens into {} chunks (budget {})",
            passage.len(),
            chunks.len(),
            budget,
        );

        Ok(chunks)
    }

    fn build(
        &self,
        index:          usize,
        question:       &[u32],
        slice:          &[u32],
        passage_offset: usize,
        closing_sep:    bool,
    ) -> Chunk {
        let mut token_ids = Vec::with_capacity(question.len() + slice.len() + SPECIALS);
        token_ids.push(self.cls);
        token_ids.extend_from_slice(question);
        token_ids.push(self.sep);

        let context_start = token_ids.len();
        token_ids.extend_from_slice(slice);
        let context_end = token_ids.len();

        if closing_sep {
            token_ids.push(self.sep);
        }

        Chunk {
            index,
            token_ids,
            question_span: 1..1 + question.len(),
            context_span:  context_start..context_end,
            passage_offset,
        }
    }

    fn too_long(&self, question: &[u32], max_len: usize) -> ReaderError {
        ReaderError::Configuration {
            question_tokens: question.len(),
            specials:        SPECIALS,
            max_seq_len:     max_len,
        }
    }
}
