// ============================================================
// Layer 2 — Reader Configuration
// ============================================================
// The options a reader is built with. Serialisable so it can be
// kept next to a model as JSON:
//
//   {
//     "qa_type": "scored_answer",
//     "nbest": 10,
//     "null_threshold": -3.0
//   }
//
// `qa_type` picks the extraction mode once, at construction.

use serde::{Deserialize, Serialize};

use crate::domain::error::{ReaderError, ReaderResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QaType {
    /// nbest list + null-threshold gate, ranked output
    ScoredAnswer,
    /// argmax span per chunk, no gate
    SimpleAnswer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub qa_type:        QaType,
    pub nbest:          usize,
    pub null_threshold: f32,
    /// Longest span (in tokens) a candidate may cover; unlimited when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_answer_len: Option<usize>,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            qa_type:        QaType::ScoredAnswer,
            nbest:          10,
            null_threshold: -3.0,
            max_answer_len: None,
        }
    }
}

/// The tagged mode a reader runs in, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractionMode {
    Scored {
        nbest:          usize,
        null_threshold: f32,
        max_answer_len: Option<usize>,
    },
    Simple,
}

impl ReaderConfig {
    pub fn validate(&self) -> ReaderResult<()> {
        if self.nbest == 0 {
            return Err(ReaderError::InvalidConfig("nbest must be at least 1".into()));
        }
        if !self.null_threshold.is_finite() {
            return Err(ReaderError::InvalidConfig("null_threshold must be finite".into()));
        }
        if self.max_answer_len == Some(0) {
            return Err(ReaderError::InvalidConfig("max_answer_len must be at least 1".into()));
        }
        Ok(())
    }

    pub fn mode(&self) -> ExtractionMode {
        match self.qa_type {
            QaType::ScoredAnswer => ExtractionMode::Scored {
                nbest:          self.nbest,
                null_threshold: self.null_threshold,
                max_answer_len: self.max_answer_len,
            },
            QaType::SimpleAnswer => ExtractionMode::Simple,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_recognised_options() {
        let cfg: ReaderConfig = serde_json::from_str(
            r#"{"qa_type": "simple_answer", "nbest": 4, "null_threshold": -1.5}"#,
        ).unwrap();

        assert_eq!(cfg.qa_type, QaType::SimpleAnswer);
        assert_eq!(cfg.nbest, 4);
        assert_eq!(cfg.null_threshold, -1.5);
        assert_eq!(cfg.mode(), ExtractionMode::Simple);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let cfg: ReaderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, ReaderConfig::default());
    }

    #[test]
    fn test_unknown_qa_type_is_rejected() {
        let res = serde_json::from_str::<ReaderConfig>(r#"{"qa_type": "fuzzy"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_validate() {
        assert!(ReaderConfig::default().validate().is_ok());
        let zero = ReaderConfig { nbest: 0, ..ReaderConfig::default() };
        assert!(zero.validate().is_err());
        let nan = ReaderConfig { null_threshold: f32::NAN, ..ReaderConfig::default() };
        assert!(nan.validate().is_err());
    }
}
