// ============================================================
// Layer 6 — Recorded Span Scores
// ============================================================
// A SpanModel that replays scores recorded from an external
// model run. The `chunk` command prints the exact token ids of
// every chunk; score them with the real model and save:
//
//   [
//     { "token_ids": [101, 2043, ...],
//       "start_logits": [...], "end_logits": [...] },
//     ...
//   ]
//
// Lookups are by exact token sequence. A chunk with no recording
// is a model-call failure for its passage.

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::Path};

use crate::domain::chunk::SpanScores;
use crate::domain::traits::SpanModel;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub token_ids:    Vec<u32>,
    pub start_logits: Vec<f32>,
    pub end_logits:   Vec<f32>,
}

pub struct ReplaySpanModel {
    records: HashMap<Vec<u32>, SpanScores>,
}

impl ReplaySpanModel {
    pub fn from_records(records: Vec<ScoreRecord>) -> Result<Self> {
        let mut map = HashMap::with_capacity(records.len());
        for (i, r) in records.into_iter().enumerate() {
            if r.start_logits.len() != r.token_ids.len() || r.end_logits.len() != r.token_ids.len() {
                bail!(
                    "record {i}: {} tokens but {} start / {} end scores",
                    r.token_ids.len(),
                    r.start_logits.len(),
                    r.end_logits.len(),
                );
            }
            map.insert(r.token_ids, SpanScores::new(r.start_logits, r.end_logits));
        }
        Ok(Self { records: map })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read scores from '{}'", path.display()))?;
        let records: Vec<ScoreRecord> = serde_json::from_str(&json)
            .with_context(|| format!("Invalid score file '{}'", path.display()))?;

        tracing::info!("Loaded {} recorded chunk scores", records.len());
        Self::from_records(records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SpanModel for ReplaySpanModel {
    fn score(&self, token_ids: &[u32]) -> Result<SpanScores> {
        self.records
            .get(token_ids)
            .cloned()
            .ok_or_else(|| anyhow!("no recorded scores for a chunk of {} tokens", token_ids.len()))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn record(ids: Vec<u32>) -> ScoreRecord {
        let n = ids.len();
        ScoreRecord { token_ids: ids, start_logits: vec![0.5; n], end_logits: vec![-0.5; n] }
    }

    #[test]
    fn test_replays_by_exact_tokens() {
        let model = ReplaySpanModel::from_records(vec![record(vec![101, 5, 102])]).unwrap();
        let s     = model.score(&[101, 5, 102]).unwrap();
        assert_eq!(s.start_logits, vec![0.5; 3]);
        assert!(model.score(&[101, 6, 102]).is_err());
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        let bad = ScoreRecord { token_ids: vec![1, 2], start_logits: vec![0.0], end_logits: vec![0.0, 0.0] };
        assert!(ReplaySpanModel::from_records(vec![bad]).is_err());
    }

    #[test]
    fn test_loads_from_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, serde_json::to_string(&vec![record(vec![101, 102])]).unwrap()).unwrap();

        let model = ReplaySpanModel::from_file(&path).unwrap();
        assert_eq!(model.len(), 1);
    }
}
