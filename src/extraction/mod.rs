// ============================================================
// Layer 5 — Span Extraction
// ============================================================
// Everything between the span model's raw logits and a single
// decision for one chunk:
//
//   start/end logits
//       │
//       ▼
//   CandidateGenerator → (start, end) pairs, best first
//       │
//       ▼
//   AnswerRanker       → decoded nbest list + null entry
//       │
//       ▼
//   ConfidenceGate     → ChunkAnswer (passed / failed)
//
// SimpleExtractor is the alternative, ungated path: argmax
// start to argmax end, decoded directly.

pub mod candidate_generator;
pub mod answer_ranker;
pub mod confidence_gate;
pub mod simple;
