// ============================================================
// Test fixtures
// ============================================================
// Deterministic stand-ins for the tokenizer and span model so
// the reader can be tested without a trained network.
//
//   WordCodec   → case-preserving whitespace tokenizer
//   PhraseModel → scores spans that match a target phrase
//   FailingModel → errors on any chunk containing a poison token
//   ShortModel  → returns truncated score vectors for some chunks

use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::data::token_window::TokenWindow;
use crate::domain::chunk::{Chunk, SpanScores};
use crate::domain::traits::{SpanModel, SpecialTokens, TokenCodec};

pub const CLS: u32 = 101;
pub const SEP: u32 = 102;
pub const UNK: u32 = 100;

/// Whitespace tokenizer over a vocabulary built from sample texts.
pub struct WordCodec {
    vocab:       HashMap<String, u32>,
    words:       HashMap<u32, String>,
    special:     SpecialTokens,
    max_seq_len: usize,
}

impl WordCodec {
    pub fn from_texts(texts: &[&str]) -> Self {
        let mut vocab = HashMap::new();
        let mut words = HashMap::new();
        words.insert(CLS, "[CLS]".to_string());
        words.insert(SEP, "[SEP]".to_string());
        words.insert(UNK, "[UNK]".to_string());

        let mut next_id = 1000u32;
        for text in texts {
            for word in text.split_whitespace() {
                if !vocab.contains_key(word) {
                    vocab.insert(word.to_string(), next_id);
                    words.insert(next_id, word.to_string());
                    next_id += 1;
                }
            }
        }

        Self {
            vocab,
            words,
            special: SpecialTokens { cls: CLS, sep: SEP, null_token: "[CLS]".to_string() },
            max_seq_len: 512,
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn encode_str(&self, text: &str) -> Vec<u32> {
        self.encode(text).unwrap()
    }

    /// One chunk holding the whole passage.
    pub fn single_chunk(&self, question: &[u32], passage: &[u32]) -> Chunk {
        let max = question.len() + passage.len() + 3;
        TokenWindow::new(&self.special)
            .split(question, passage, max)
            .unwrap()
            .remove(0)
    }
}

impl TokenCodec for WordCodec {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        Ok(text
            .split_whitespace()
            .map(|w| self.vocab.get(w).copied().unwrap_or(UNK))
            .collect())
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        let words: Vec<&str> = ids
            .iter()
            .filter(|&&id| !(skip_special_tokens && (id == CLS || id == SEP)))
            .map(|id| self.words.get(id).map(String::as_str).unwrap_or("[UNK]"))
            .collect();
        Ok(words.join(" "))
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }
}

/// Puts a strong start/end peak on every occurrence of `target`
/// found after the question. Chunks without the phrase favour
/// the null slot, then the question, with context positions
/// sloped so no forward span ranks well.
pub struct PhraseModel {
    target: Vec<u32>,
    peak:   f32,
}

impl PhraseModel {
    pub fn new(target: Vec<u32>) -> Self {
        Self { target, peak: 10.0 }
    }
}

impl SpanModel for PhraseModel {
    fn score(&self, token_ids: &[u32]) -> Result<SpanScores> {
        let n         = token_ids.len();
        let first_sep = token_ids.iter().position(|&t| t == SEP).unwrap_or(n);

        let mut start = vec![0.0f32; n];
        let mut end   = vec![0.0f32; n];
        for i in 1..n {
            if i <= first_sep {
                start[i] = -1.0;
                end[i]   = -1.0;
            } else {
                // Later positions start well, earlier positions end well
                start[i] = -10.0 + 0.01 * i as f32;
                end[i]   = -10.0 - 0.01 * i as f32;
            }
        }

        let t = self.target.len();
        if t > 0 && n > first_sep + t {
            for s in first_sep + 1..=n - t {
                if token_ids[s..s + t] == self.target[..] {
                    start[s]       = self.peak;
                    end[s + t - 1] = self.peak;
                }
            }
        }

        Ok(SpanScores::new(start, end))
    }
}

/// Fails for any chunk containing `poison`, delegating otherwise.
pub struct FailingModel<M> {
    pub inner:  M,
    pub poison: u32,
}

impl<M: SpanModel> SpanModel for FailingModel<M> {
    fn score(&self, token_ids: &[u32]) -> Result<SpanScores> {
        if token_ids.contains(&self.poison) {
            return Err(anyhow!("model backend unavailable"));
        }
        self.inner.score(token_ids)
    }
}

/// Returns one score too few for any chunk containing `trigger`.
pub struct ShortModel<M> {
    pub inner:   M,
    pub trigger: u32,
}

impl<M: SpanModel> SpanModel for ShortModel<M> {
    fn score(&self, token_ids: &[u32]) -> Result<SpanScores> {
        let mut scores = self.inner.score(token_ids)?;
        if token_ids.contains(&self.trigger) {
            scores.start_logits.pop();
            scores.end_logits.pop();
        }
        Ok(scores)
    }
}
