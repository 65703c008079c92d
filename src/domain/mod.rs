// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain structs, enums and traits that describe the reader:
// what a passage is, what a chunk is, what an answer looks like,
// and which collaborators (tokenizer, span model) it talks to.
//
// Rules for this layer:
//   - NO file I/O
//   - NO tokenizer or model implementations
//   - Only data types and the traits other layers implement

// A caller-supplied passage
pub mod passage;

// A model-sized window over question + passage tokens
pub mod chunk;

// Candidate spans, per-chunk answers and final answers
pub mod answer;

// Collaborator traits (tokenizer, span model)
pub mod traits;

// Library error type
pub mod error;
