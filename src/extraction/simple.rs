// ============================================================
// Layer 5 — Simple Extractor
// ============================================================
// The ungated alternative to the scored path: decode the tokens
// from argmax(start) through argmax(end) and return that text.
// No nbest list, no threshold.
//
// If the decoded text begins with the null token (the span
// starts on the [CLS] slot) the answer is "".

use anyhow::Result;

use crate::domain::chunk::{Chunk, SpanScores};
use crate::domain::traits::TokenCodec;
use crate::extraction::candidate_generator::top_k;

pub struct SimpleExtractor<'a, C: TokenCodec> {
    codec: &'a C,
}

impl<'a, C: TokenCodec> SimpleExtractor<'a, C> {
    pub fn new(codec: &'a C) -> Self {
        Self { codec }
    }

    pub fn extract(&self, scores: &SpanScores, chunk: &Chunk) -> Result<String> {
        let best_start = top_k(&scores.start_logits, 1);
        let best_end   = top_k(&scores.end_logits, 1);
        let (Some(&start), Some(&end)) = (best_start.first(), best_end.first()) else {
            return Ok(String::new());
        };

        if end < start || end >= chunk.len() {
            return Ok(String::new());
        }

        let text = self.codec.decode(&chunk.token_ids[start..=end], false)?;
        let text = text.trim();

        if text.starts_with(self.codec.special_tokens().null_token.as_str()) {
            Ok(String::new())
        } else {
            Ok(text.to_string())
        }
    }
}
