// ============================================================
// Layer 2 — Answer Aggregator
// ============================================================
// Collects ChunkAnswers from every chunk of every passage, then:
//   1. sorts ascending by null_score_diff (most confident first)
//   2. drops entries whose text is the model's null placeholder
//
// Identical texts from different passages are all kept, each
// with its own context and id.

use crate::domain::answer::{ChunkAnswer, FinalAnswer};
use crate::domain::passage::Passage;

pub struct AnswerAggregator<'p> {
    null_token: String,
    collected:  Vec<(ChunkAnswer, &'p Passage)>,
}

impl<'p> AnswerAggregator<'p> {
    pub fn new(null_token: impl Into<String>) -> Self {
        Self { null_token: null_token.into(), collected: Vec::new() }
    }

    /// Add the answers of one passage.
    pub fn add_passage(&mut self, passage: &'p Passage, answers: Vec<ChunkAnswer>) {
        self.collected.extend(answers.into_iter().map(|a| (a, passage)));
    }

    pub fn finish(mut self) -> Vec<FinalAnswer> {
        // Stable: equal diffs keep passage then chunk order
        self.collected
            .sort_by(|a, b| a.0.null_score_diff.total_cmp(&b.0.null_score_diff));

        let null_token = self.null_token;
        self.collected
            .into_iter()
            .filter(|(answer, _)| answer.text.trim() != null_token)
            .map(|(answer, passage)| FinalAnswer {
                text:            answer.text,
                context:         passage.text.clone(),
                id:              answer.passage_id,
                null_score_diff: answer.null_score_diff,
                probability:     answer.probability,
                status:          answer.status,
            })
            .collect()
    }
}
