// ============================================================
// Layer 4 — Question Normalizer
// ============================================================
// Cleans the caller's question before tokenisation so the span
// model sees a consistent form:
//
//   1. Expand contracted interrogatives ("what's" → "what is")
//   2. Lowercase a question written entirely in capitals
//   3. Strip trailing "?" characters
//   4. Collapse runs of whitespace
//
// Example:
//   "WHAT'S THE CAPITAL OF ASSYRIA??"  →  "what is the capital of assyria"

/// Contracted interrogatives and their expansions.
/// Keys are lowercase with a straight apostrophe.
/// `'s` always reads as "is". `'d` forms (did / would / had) are left alone.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("what's",   "what is"),
    ("what're",  "what are"),
    ("what'll",  "what will"),
    ("who's",    "who is"),
    ("who're",   "who are"),
    ("who'll",   "who will"),
    ("where's",  "where is"),
    ("where're", "where are"),
    ("when's",   "when is"),
    ("when're",  "when are"),
    ("why's",    "why is"),
    ("why're",   "why are"),
    ("how's",    "how is"),
    ("how're",   "how are"),
    ("which's",  "which is"),
    ("there's",  "there is"),
];

/// A question after normalisation. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question(String);

impl Question {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct QuestionNormalizer;

impl QuestionNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, raw: &str) -> Question {
        // Capitals check runs on the raw text so "WHAT'S" is seen as all-caps
        let all_caps = is_all_upper(raw);

        let expanded: Vec<String> = raw
            .split_whitespace()
            .map(expand_word)
            .collect();
        let mut text = expanded.join(" ");

        if all_caps {
            text = text.to_lowercase();
        }

        let trimmed = text.trim_end_matches(|c: char| c == '?' || c.is_whitespace());
        Question(trimmed.to_string())
    }
}

impl Default for QuestionNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Expand one whitespace-delimited word if it is a known contraction.
/// Trailing punctuation ("what's?") and the typographic apostrophe are handled.
fn expand_word(word: &str) -> String {
    let core = word.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '\'');
    let tail = &word[core.len()..];
    let key  = core.replace('\u{2019}', "'").to_lowercase();

    match CONTRACTIONS.iter().find(|(short, _)| *short == key) {
        Some((_, long)) => format!("{}{}", match_case(core, long), tail),
        None            => word.to_string(),
    }
}

/// Keep a leading capital ("What's" → "What is").
fn match_case(original: &str, expansion: &str) -> String {
    let starts_upper = original.chars().next().is_some_and(char::is_uppercase);
    if starts_upper && !is_all_upper(original) {
        let mut chars = expansion.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None        => String::new(),
        }
    } else if is_all_upper(original) {
        expansion.to_uppercase()
    } else {
        expansion.to_string()
    }
}

/// True when the text has at least one cased letter and none are lowercase.
fn is_all_upper(text: &str) -> bool {
    let mut saw_upper = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            saw_upper = true;
        }
    }
    saw_upper
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> String {
        QuestionNormalizer::new().normalize(s).as_str().to_string()
    }

    #[test]
    fn test_expands_contractions() {
        assert_eq!(norm("what's the capital of Assyria"), "what is the capital of Assyria");
        assert_eq!(norm("who're they"), "who are they");
    }

    #[test]
    fn test_ambiguous_d_contraction_is_kept() {
        assert_eq!(norm("who'd win the race"), "who'd win the race");
        assert_eq!(norm("how'd it end?"), "how'd it end");
    }

    #[test]
    fn test_expansion_keeps_leading_capital() {
        assert_eq!(norm("What's up"), "What is up");
    }

    #[test]
    fn test_typographic_apostrophe() {
        assert_eq!(norm("where\u{2019}s the park"), "where is the park");
    }

    #[test]
    fn test_all_caps_is_lowercased() {
        assert_eq!(norm("WHAT'S THE CAPITAL OF ASSYRIA?"), "what is the capital of assyria");
    }

    #[test]
    fn test_mixed_case_is_kept() {
        assert_eq!(norm("When is NASA launching"), "When is NASA launching");
    }

    #[test]
    fn test_strips_trailing_question_marks() {
        assert_eq!(norm("when is marijuana legalized?? "), "when is marijuana legalized");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(norm("  when   is  it "), "when is it");
    }

    #[test]
    fn test_empty_question() {
        assert_eq!(norm(""), "");
        assert_eq!(norm("?"), "");
    }
}
