// ============================================================
// Layer 5 — Confidence Gate
// ============================================================
// Decides, per chunk, whether the best span is more trustworthy
// than the null answer:
//
//   score_non_null = score of nbest[0]
//   score_null     = score of the trailing null entry
//   diff           = score_null - score_non_null
//
//   diff <  null_threshold → Passed
//   diff >= null_threshold → Failed
//
// The returned text is nbest[0]'s text either way; callers read
// `status` / `null_score_diff` to tell a rejected span apart.

use crate::domain::answer::{AnswerStatus, BestPrediction, ChunkAnswer};

pub struct ConfidenceGate {
    null_threshold: f32,
}

impl ConfidenceGate {
    pub fn new(null_threshold: f32) -> Self {
        Self { null_threshold }
    }

    /// `best` must be an AnswerRanker output (null entry last, never empty).
    pub fn decide(&self, best: &[BestPrediction], passage_id: &str) -> Option<ChunkAnswer> {
        let top  = best.first()?;
        let null = best.last()?;

        let null_score_diff = null.score() - top.score();
        let status = if null_score_diff < self.null_threshold {
            AnswerStatus::Passed
        } else {
            AnswerStatus::Failed
        };

        let probabilities = softmax(&best.iter().map(BestPrediction::score).collect::<Vec<_>>());

        Some(ChunkAnswer {
            text:        top.text.clone(),
            probability: probabilities[0],
            null_score_diff,
            status,
            passage_id:  passage_id.to_string(),
        })
    }
}

/// Max-subtracted softmax; display only.
pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    if !max.is_finite() {
        return vec![1.0 / scores.len().max(1) as f32; scores.len()];
    }
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32     = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, score: f32) -> BestPrediction {
        BestPrediction { text: text.to_string(), start_score: score, end_score: 0.0 }
    }

    fn gate() -> ConfidenceGate {
        ConfidenceGate::new(-3.0)
    }

    #[test]
    fn test_clear_winner_passes() {
        let best = [entry("July 1", 10.0), entry("", 6.5)];
        let ans  = gate().decide(&best, "p1").unwrap();

        assert_eq!(ans.status, AnswerStatus::Passed);
        assert_eq!(ans.null_score_diff, -3.5);
        assert_eq!(ans.text, "July 1");
        assert_eq!(ans.passage_id, "p1");
    }

    #[test]
    fn test_diff_equal_to_threshold_fails() {
        let best = [entry("July 1", 10.0), entry("", 7.0)];
        let ans  = gate().decide(&best, "p1").unwrap();

        assert_eq!(ans.null_score_diff, -3.0);
        assert_eq!(ans.status, AnswerStatus::Failed);
    }

    #[test]
    fn test_failed_answer_keeps_span_text() {
        let best = [entry("July 1", 1.0), entry("", 5.0)];
        let ans  = gate().decide(&best, "p1").unwrap();

        assert_eq!(ans.status, AnswerStatus::Failed);
        assert_eq!(ans.text, "July 1");
        assert_eq!(ans.null_score_diff, 4.0);
    }

    #[test]
    fn test_null_only_list() {
        let ans = gate().decide(&[entry("", 2.0)], "p1").unwrap();

        assert_eq!(ans.text, "");
        assert_eq!(ans.null_score_diff, 0.0);
        assert_eq!(ans.status, AnswerStatus::Failed);
        assert!((ans.probability - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_list_gives_none() {
        assert!(gate().decide(&[], "p1").is_none());
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let p = softmax(&[1000.0, 999.0, -5.0]);
        let total: f32 = p.iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!(p[0] > p[1] && p[1] > p[2]);
    }
}
