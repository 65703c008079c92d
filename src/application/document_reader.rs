// ============================================================
// Layer 2 — Document Reader
// ============================================================
// Runs one question against an ordered list of passages:
//
//   Step 1: Normalise the question           (Layer 4 - data)
//   Step 2: Tokenise question and passage    (TokenCodec)
//   Step 3: Split passage into chunks        (Layer 4 - data)
//   Step 4: Score each chunk                 (SpanModel)
//   Step 5: Extract an answer per chunk      (Layer 5 - extraction)
//   Step 6: Rank all chunk answers           (AnswerAggregator)
//
// A passage whose model call or tokenisation fails contributes
// nothing; the remaining passages still answer. Only a question
// that cannot fit the model at all fails the whole request.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::anyhow;

use crate::application::answer_aggregator::AnswerAggregator;
use crate::application::chunk_plan::{chunk_passage, encode_question};
use crate::application::reader_config::{ExtractionMode, ReaderConfig};
use crate::data::question::QuestionNormalizer;
use crate::domain::answer::{Answers, ChunkAnswer, SimpleAnswer};
use crate::domain::chunk::{Chunk, SpanScores};
use crate::domain::error::{ReaderError, ReaderResult};
use crate::domain::passage::Passage;
use crate::domain::traits::{SpanModel, TokenCodec};
use crate::extraction::{
    answer_ranker::AnswerRanker,
    candidate_generator::CandidateGenerator,
    confidence_gate::ConfidenceGate,
    simple::SimpleExtractor,
};

pub struct DocumentReader<M: SpanModel, C: TokenCodec> {
    model:      M,
    codec:      C,
    mode:       ExtractionMode,
    normalizer: QuestionNormalizer,
}

impl<M: SpanModel, C: TokenCodec> DocumentReader<M, C> {
    pub fn new(model: M, codec: C, config: &ReaderConfig) -> ReaderResult<Self> {
        config.validate()?;
        Ok(Self {
            model,
            codec,
            mode: config.mode(),
            normalizer: QuestionNormalizer::new(),
        })
    }

    /// Answer `question` from `passages`, in caller order.
    pub fn answer(&self, question: &str, passages: &[Passage]) -> ReaderResult<Answers> {
        self.answer_cancellable(question, passages, &AtomicBool::new(false))
    }

    /// Like `answer`, but checks `cancel` before every model call and
    /// returns `ReaderError::Cancelled` once it is raised.
    pub fn answer_cancellable(
        &self,
        question: &str,
        passages: &[Passage],
        cancel:   &AtomicBool,
    ) -> ReaderResult<Answers> {
        let question = self.normalizer.normalize(question);
        let q_tokens = encode_question(&self.codec, &question)?;

        tracing::info!(
            "Answering '{}' over {} passages ({} question tokens)",
            question,
            passages.len(),
            q_tokens.len(),
        );

        match &self.mode {
            ExtractionMode::Scored { nbest, null_threshold, max_answer_len } => {
                let generator = CandidateGenerator::new(*nbest, *max_answer_len);
                let ranker    = AnswerRanker::new(&self.codec, *nbest);
                let gate      = ConfidenceGate::new(*null_threshold);
                let mut aggregator = AnswerAggregator::new(
                    self.codec.special_tokens().null_token.clone(),
                );

                for passage in passages {
                    let mut answers: Vec<ChunkAnswer> = Vec::new();
                    let outcome = self.for_each_chunk(&q_tokens, passage, cancel, |chunk, scores| {
                        let preliminary = generator.generate(scores, chunk);
                        let best = ranker
                            .rank(&preliminary, chunk, scores)
                            .map_err(|e| ReaderError::Tokenizer(e.to_string()))?;
                        if let Some(answer) = gate.decide(&best, &passage.id) {
                            tracing::debug!(
                                "Passage '{}' chunk {}: '{}' diff={:.4} {:?}",
                                passage.id,
                                chunk.index,
                                answer.text,
                                answer.null_score_diff,
                                answer.status,
                            );
                            answers.push(answer);
                        }
                        Ok(())
                    });

                    if self.keep_passage(passage, outcome)? {
                        aggregator.add_passage(passage, answers);
                    }
                }

                let ranked = aggregator.finish();
                tracing::info!("Returning {} ranked answers", ranked.len());
                Ok(Answers::Scored(ranked))
            }

            ExtractionMode::Simple => {
                let extractor = SimpleExtractor::new(&self.codec);
                let mut results = Vec::new();

                for passage in passages {
                    let mut answers: Vec<SimpleAnswer> = Vec::new();
                    let outcome = self.for_each_chunk(&q_tokens, passage, cancel, |chunk, scores| {
                        let text = extractor
                            .extract(scores, chunk)
                            .map_err(|e| ReaderError::Tokenizer(e.to_string()))?;
                        answers.push(SimpleAnswer { text, context_id: passage.id.clone() });
                        Ok(())
                    });

                    if self.keep_passage(passage, outcome)? {
                        results.extend(answers);
                    }
                }

                tracing::info!("Returning {} simple answers", results.len());
                Ok(Answers::Simple(results))
            }
        }
    }

    /// Tokenise and chunk one passage, then score every chunk and
    /// hand it to `on_chunk`. Stops at the first failure.
    fn for_each_chunk<F>(
        &self,
        q_tokens: &[u32],
        passage:  &Passage,
        cancel:   &AtomicBool,
        mut on_chunk: F,
    ) -> ReaderResult<()>
    where
        F: FnMut(&Chunk, &SpanScores) -> ReaderResult<()>,
    {
        let chunks = chunk_passage(&self.codec, q_tokens, passage)?;

        for chunk in &chunks {
            if cancel.load(Ordering::Relaxed) {
                return Err(ReaderError::Cancelled);
            }

            let scores = self
                .model
                .score(&chunk.token_ids)
                .map_err(|source| ReaderError::ModelCall {
                    passage_id: passage.id.clone(),
                    source,
                })?;

            if !scores.matches(chunk) {
                return Err(ReaderError::ModelCall {
                    passage_id: passage.id.clone(),
                    source: anyhow!(
                        "expected {} scores per vector, got {} start / {} end",
                        chunk.len(),
                        scores.start_logits.len(),
                        scores.end_logits.len(),
                    ),
                });
            }

            on_chunk(chunk, &scores)?;
        }
        Ok(())
    }

    /// Decide what a passage failure means for the request:
    /// model and tokenizer failures drop the passage, anything else aborts.
    fn keep_passage(&self, passage: &Passage, outcome: ReaderResult<()>) -> ReaderResult<bool> {
        match outcome {
            Ok(()) => Ok(true),
            Err(e @ (ReaderError::ModelCall { .. } | ReaderError::Tokenizer(_))) => {
                tracing::warn!("Dropping passage '{}': {e}", passage.id);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
