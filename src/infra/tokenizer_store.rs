// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads a HuggingFace tokenizer.json and exposes it to the
// reader as a TokenCodec (`HfTokenizer`).
//
// The marker / separator ids are looked up once, at load time,
// from their token strings ("[CLS]" / "[SEP]" by default) and
// then passed explicitly to every component that needs them.
//
// The store can also write a small word-level vocabulary built
// from passage texts, which is enough to exercise the reader
// end-to-end without a pretrained vocabulary.

use anyhow::{anyhow, Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tokenizers::Tokenizer;

use crate::domain::traits::{SpecialTokens, TokenCodec};

pub const TOKENIZER_FILE: &str = "tokenizer.json";

/// Token strings naming the marker and separator.
#[derive(Debug, Clone)]
pub struct SpecialTokenNames {
    pub cls: String,
    pub sep: String,
}

impl Default for SpecialTokenNames {
    fn default() -> Self {
        Self { cls: "[CLS]".to_string(), sep: "[SEP]".to_string() }
    }
}

/// A HuggingFace tokenizer bound to one model's special tokens and length limit.
pub struct HfTokenizer {
    inner:       Tokenizer,
    special:     SpecialTokens,
    max_seq_len: usize,
}

impl HfTokenizer {
    /// Wrap a loaded tokenizer. If the tokenizer carries a truncation
    /// length, that wins over `max_seq_len`.
    ///
    /// Truncation and padding are then switched off: passages are cut
    /// by TokenWindow, never by the tokenizer.
    pub fn new(mut inner: Tokenizer, names: &SpecialTokenNames, max_seq_len: usize) -> Result<Self> {
        let lookup = |name: &str| {
            inner
                .token_to_id(name)
                .ok_or_else(|| anyhow!("tokenizer has no '{name}' token"))
        };
        let special = SpecialTokens {
            cls:        lookup(&names.cls)?,
            sep:        lookup(&names.sep)?,
            null_token: names.cls.clone(),
        };

        let max_seq_len = inner
            .get_truncation()
            .map(|t| t.max_length)
            .unwrap_or(max_seq_len);

        inner
            .with_truncation(None)
            .map_err(|e| anyhow!("Cannot disable truncation: {e}"))?;
        inner.with_padding(None);

        Ok(Self { inner, special, max_seq_len })
    }
}

impl TokenCodec for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let enc = self
            .inner
            .encode(text, false)
            .map_err(|e| anyhow!("Tokenise: {e}"))?;
        Ok(enc.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> Result<String> {
        self.inner
            .decode(ids, skip_special_tokens)
            .map_err(|e| anyhow!("Decode: {e}"))
    }

    fn special_tokens(&self) -> &SpecialTokens {
        &self.special
    }

    fn max_seq_len(&self) -> usize {
        self.max_seq_len
    }
}

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(TOKENIZER_FILE)
    }

    /// Load `tokenizer.json` and bind it to the given special tokens.
    pub fn load(&self, names: &SpecialTokenNames, max_seq_len: usize) -> Result<HfTokenizer> {
        let path  = self.path();
        let inner = Tokenizer::from_file(&path).map_err(|e| {
            anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })?;
        tracing::info!("Loaded tokenizer from '{}'", path.display());
        HfTokenizer::new(inner, names, max_seq_len)
    }

    /// Write a case-preserving word-level tokenizer built from `texts`,
    /// keeping at most `vocab_size` entries including special tokens.
    pub fn build_and_save(&self, texts: &[String], vocab_size: usize) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create '{}'", self.dir.display()))?;

        // ── Step 1: Word frequencies ──────────────────────────────────────────
        let mut freq: HashMap<&str, usize> = HashMap::new();
        for text in texts {
            for word in text.split_whitespace() {
                // Whitespace pre-tokenizer splits punctuation off, so match it here
                for piece in split_punctuation(word) {
                    *freq.entry(piece).or_insert(0) += 1;
                }
            }
        }

        // Most frequent first, then alphabetical so the ids are reproducible
        let mut words: Vec<(&str, usize)> = freq.into_iter().collect();
        words.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        words.truncate(vocab_size.saturating_sub(5));

        // ── Step 2: Vocab with BERT-style special ids ─────────────────────────
        let mut vocab = serde_json::json!({
            "[PAD]":  0,
            "[UNK]":  100,
            "[CLS]":  101,
            "[SEP]":  102,
            "[MASK]": 103,
        });
        let mut next_id = 104usize;
        for (word, _) in &words {
            if vocab.get(*word).is_none() {
                vocab[*word] = serde_json::json!(next_id);
                next_id += 1;
            }
        }

        // ── Step 3: HuggingFace tokenizer JSON ────────────────────────────────
        let special = |id: u32, content: &str| serde_json::json!({
            "id": id, "content": content, "single_word": false, "lstrip": false,
            "rstrip": false, "normalized": false, "special": true
        });
        let tokenizer_json = serde_json::json!({
            "version": "1.0",
            "truncation": null,
            "padding": null,
            "added_tokens": [
                special(0, "[PAD]"),
                special(100, "[UNK]"),
                special(101, "[CLS]"),
                special(102, "[SEP]"),
                special(103, "[MASK]")
            ],
            "normalizer": null,
            "pre_tokenizer": { "type": "Whitespace" },
            "post_processor": null,
            "decoder": null,
            "model": {
                "type": "WordLevel",
                "vocab": vocab,
                "unk_token": "[UNK]"
            }
        });

        let path = self.path();
        std::fs::write(&path, serde_json::to_string_pretty(&tokenizer_json)?)
            .with_context(|| format!("Cannot write tokenizer JSON to '{}'", path.display()))?;

        tracing::info!("Tokenizer built with {} entries, saved to '{}'", next_id, path.display());
        Ok(path)
    }
}

/// Split a whitespace-free word into runs of word characters and runs
/// of punctuation, as the Whitespace pre-tokenizer (`\w+|[^\w\s]+`) does.
fn split_punctuation(word: &str) -> Vec<&str> {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let mut pieces = Vec::new();
    let mut start  = 0usize;
    let mut kind   = None;
    for (i, c) in word.char_indices() {
        let k = is_word(c);
        if kind.is_some_and(|prev| prev != k) {
            pieces.push(&word[start..i]);
            start = i;
        }
        kind = Some(k);
    }
    if start < word.len() {
        pieces.push(&word[start..]);
    }
    pieces
}
