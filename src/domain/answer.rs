// ============================================================
// Layer 3 — Answer Domain Types
// ============================================================
// The values that flow through one `answer()` call, in order:
//
//   PreliminaryPrediction  → raw (start, end) pair from the logits
//   BestPrediction         → decoded, deduplicated nbest entry
//   ChunkAnswer            → one gated decision per chunk
//   FinalAnswer            → what the caller receives
//
// Everything except FinalAnswer / SimpleAnswer is discarded
// before `answer()` returns.

use serde::{Deserialize, Serialize};

/// A candidate span in chunk-local positions.
/// Invariant: `end_index >= start_index`, neither inside the question span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreliminaryPrediction {
    pub start_index: usize,
    pub end_index:   usize,
    pub start_score: f32,
    pub end_score:   f32,
}

impl PreliminaryPrediction {
    pub fn score(&self) -> f32 {
        self.start_score + self.end_score
    }
}

/// One entry of a chunk's nbest list. The null entry has `text == ""`.
#[derive(Debug, Clone, PartialEq)]
pub struct BestPrediction {
    pub text:        String,
    pub start_score: f32,
    pub end_score:   f32,
}

impl BestPrediction {
    pub fn null(start_score: f32, end_score: f32) -> Self {
        Self { text: String::new(), start_score, end_score }
    }

    pub fn score(&self) -> f32 {
        self.start_score + self.end_score
    }

    pub fn is_null(&self) -> bool {
        self.text.is_empty()
    }
}

/// Outcome of the null-threshold gate for one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    /// The best span beat the null answer by more than the threshold
    Passed,
    /// The null answer is at least as trustworthy as the best span
    Failed,
}

/// The gated decision for a single chunk.
///
/// `text` is the best entry's text whatever the status, so a
/// `Failed` answer may still carry a non-empty span.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkAnswer {
    pub text:            String,
    pub probability:     f32,
    pub null_score_diff: f32,
    pub status:          AnswerStatus,
    pub passage_id:      String,
}

/// A ranked answer returned in scored mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalAnswer {
    /// Answer span text ("" when the null answer won outright)
    pub text: String,

    /// Text of the passage the answer came from
    pub context: String,

    /// Id of the passage the answer came from
    pub id: String,

    /// null score minus best span score; more negative = more confident
    pub null_score_diff: f32,

    /// Softmax share of the entry within its chunk's nbest list
    pub probability: f32,

    pub status: AnswerStatus,
}

/// An answer returned in simple mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleAnswer {
    pub text:       String,
    pub context_id: String,
}

/// Reader output; the variant follows the configured mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answers {
    Scored(Vec<FinalAnswer>),
    Simple(Vec<SimpleAnswer>),
}

impl Answers {
    pub fn len(&self) -> usize {
        match self {
            Answers::Scored(list) => list.len(),
            Answers::Simple(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_entry_is_empty_text() {
        let n = BestPrediction::null(1.5, 2.0);
        assert!(n.is_null());
        assert_eq!(n.score(), 3.5);
    }

    #[test]
    fn test_status_serialises_lowercase() {
        let json = serde_json::to_string(&AnswerStatus::Passed).unwrap();
        assert_eq!(json, "\"passed\"");
    }

    #[test]
    fn test_answers_len_follows_variant() {
        let answers = Answers::Simple(vec![SimpleAnswer {
            text:       "July 1".to_string(),
            context_id: "a".to_string(),
        }]);
        assert_eq!(answers.len(), 1);
        assert!(Answers::Scored(Vec::new()).is_empty());
    }
}
