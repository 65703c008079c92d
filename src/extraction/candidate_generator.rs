// ============================================================
// Layer 5 — Candidate Generator
// ============================================================
// Builds preliminary (start, end) pairs for one chunk:
//
//   1. Take the n_best highest start positions and, separately,
//      the n_best highest end positions (ties → lower index first)
//   2. Cross them (≤ n_best² pairs)
//   3. Drop pairs touching the question or running backwards
//   4. Sort by start_score + end_score, highest first
//
// Nothing is truncated here; the ranker decides how many survive.

use crate::domain::answer::PreliminaryPrediction;
use crate::domain::chunk::{Chunk, SpanScores};

pub struct CandidateGenerator {
    n_best:         usize,
    /// Inclusive span length limit in tokens; None = unlimited
    max_answer_len: Option<usize>,
}

impl CandidateGenerator {
    pub fn new(n_best: usize, max_answer_len: Option<usize>) -> Self {
        Self { n_best, max_answer_len }
    }

    pub fn generate(&self, scores: &SpanScores, chunk: &Chunk) -> Vec<PreliminaryPrediction> {
        let starts = top_k(&scores.start_logits, self.n_best);
        let ends   = top_k(&scores.end_logits, self.n_best);

        let mut candidates = Vec::with_capacity(starts.len() * ends.len());
        for &start in &starts {
            for &end in &ends {
                if chunk.in_question(start) || chunk.in_question(end) || end < start {
                    continue;
                }
                if let Some(limit) = self.max_answer_len {
                    if end - start + 1 > limit {
                        continue;
                    }
                }
                candidates.push(PreliminaryPrediction {
                    start_index: start,
                    end_index:   end,
                    start_score: scores.start_logits[start],
                    end_score:   scores.end_logits[end],
                });
            }
        }

        // Stable sort keeps cross-product order among equal scores
        candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
        candidates
    }
}

/// Indices of the `k` largest values, largest first; ties keep index order.
pub fn top_k(values: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| values[b].total_cmp(&values[a]));
    indices.truncate(k);
    indices
}
