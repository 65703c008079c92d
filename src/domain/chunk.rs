// ============================================================
// Layer 3 — Chunk Domain Type
// ============================================================
// A chunk is exactly what the span model sees:
//
//   [CLS] q1 q2 … qn [SEP] p_k … p_m [SEP]
//    0    └ question_span ┘ └ context_span ┘
//
// The closing [SEP] is left off the final chunk of a split
// passage. All indices are chunk-local positions.

use std::ops::Range;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Position of this chunk within its passage (0-based)
    pub index: usize,

    /// Full model input for this chunk
    pub token_ids: Vec<u32>,

    /// Chunk positions holding question tokens
    pub question_span: Range<usize>,

    /// Chunk positions holding passage tokens
    pub context_span: Range<usize>,

    /// Offset of `context_span.start` within the passage token sequence
    pub passage_offset: usize,
}

impl Chunk {
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    /// The passage tokens carried by this chunk.
    pub fn passage_tokens(&self) -> &[u32] {
        &self.token_ids[self.context_span.clone()]
    }

    /// True when `position` points at a question token.
    pub fn in_question(&self, position: usize) -> bool {
        self.question_span.contains(&position)
    }
}

/// Start/end scores returned by the span model for one chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanScores {
    pub start_logits: Vec<f32>,
    pub end_logits:   Vec<f32>,
}

impl SpanScores {
    pub fn new(start_logits: Vec<f32>, end_logits: Vec<f32>) -> Self {
        Self { start_logits, end_logits }
    }

    /// Both vectors must line up with the chunk's tokens.
    pub fn matches(&self, chunk: &Chunk) -> bool {
        self.start_logits.len() == chunk.len() && self.end_logits.len() == chunk.len()
    }

    /// Summed score of the reserved no-answer position (index 0).
    pub fn null_score(&self) -> (f32, f32) {
        (
            self.start_logits.first().copied().unwrap_or(f32::NEG_INFINITY),
            self.end_logits.first().copied().unwrap_or(f32::NEG_INFINITY),
        )
    }
}
