// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Concrete collaborators and file formats:
//
//   tokenizer_store.rs : HuggingFace tokenizer.json as a TokenCodec,
//                        plus a word-level vocabulary builder
//
//   config_store.rs    : ReaderConfig as JSON on disk
//
//   score_replay.rs    : SpanModel backed by recorded chunk scores

/// Tokenizer loading and vocabulary building
pub mod tokenizer_store;

/// Reader configuration persistence
pub mod config_store;

/// Recorded span-model scores
pub mod score_replay;
