// ============================================================
// Layer 3 — Passage Domain Type
// ============================================================
// A passage is one piece of text the caller wants searched for
// an answer. The `id` travels with every answer extracted from
// it so callers can trace an answer back to its source.

use serde::{Deserialize, Serialize};

/// A passage supplied by the caller for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Caller-chosen identifier, echoed back on every answer
    pub id: String,

    /// Raw passage text
    pub text: String,
}

impl Passage {
    /// Create a new Passage.
    ///
    /// Example:
    ///   let p = Passage::new("doc-1", "Marijuana will be legal on July 1");
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id:   id.into(),
            text: text.into(),
        }
    }
}
