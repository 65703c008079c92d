// ============================================================
// Layer 5 — Answer Ranker
// ============================================================
// Turns preliminary pairs into a chunk's nbest list:
//   - skip pairs starting at position 0 (the null slot)
//   - decode each remaining span to text
//   - keep the first occurrence of each text, up to n_best
//   - always finish with exactly one null entry ("")
//
// Output length = min(n_best, distinct non-null texts) + 1

use anyhow::Result;

use crate::domain::answer::{BestPrediction, PreliminaryPrediction};
use crate::domain::chunk::{Chunk, SpanScores};
use crate::domain::traits::TokenCodec;

pub struct AnswerRanker<'a, C: TokenCodec> {
    codec:  &'a C,
    n_best: usize,
}

impl<'a, C: TokenCodec> AnswerRanker<'a, C> {
    pub fn new(codec: &'a C, n_best: usize) -> Self {
        Self { codec, n_best }
    }

    pub fn rank(
        &self,
        preliminary: &[PreliminaryPrediction],
        chunk:       &Chunk,
        scores:      &SpanScores,
    ) -> Result<Vec<BestPrediction>> {
        let mut best: Vec<BestPrediction> = Vec::with_capacity(self.n_best + 1);

        for pred in preliminary {
            if best.len() >= self.n_best {
                break;
            }
            if pred.start_index == 0 {
                continue;
            }
            if pred.end_index >= chunk.len() {
                tracing::warn!(
                    "Discarding span [{}, {}] outside chunk {} of length {}",
                    pred.start_index,
                    pred.end_index,
                    chunk.index,
                    chunk.len(),
                );
                continue;
            }

            let ids  = &chunk.token_ids[pred.start_index..=pred.end_index];
            let text = self.codec.decode(ids, true)?.trim().to_string();

            // Spans covering only special tokens decode to "" and would clash with the null entry
            if text.is_empty() || best.iter().any(|b| b.text == text) {
                continue;
            }

            best.push(BestPrediction {
                text,
                start_score: pred.start_score,
                end_score:   pred.end_score,
            });
        }

        let (null_start, null_end) = scores.null_score();
        best.push(BestPrediction::null(null_start, null_end));
        Ok(best)
    }
}
