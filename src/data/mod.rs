// ============================================================
// Layer 4 — Input Preparation
// ============================================================
// Turns the caller's raw inputs into model-ready sequences:
//
//   raw question ──► QuestionNormalizer ──► Question
//                                              │
//   passage text ──► TokenCodec::encode ──────►│
//                                              ▼
//                                         TokenWindow ──► [Chunk]

/// Contraction expansion and question clean-up
pub mod question;

/// Splits passages into model-sized chunks
pub mod token_window;
