//! Answer-span extraction for document question answering.
//!
//! Given a question and a list of passages, [`DocumentReader`] chunks each
//! passage to fit the span model, scores every chunk, gates each chunk's best
//! span against the model's null answer, and returns one ranked list.

pub mod application;
pub mod data;
pub mod domain;
pub mod extraction;
pub mod infra;

#[cfg(test)]
pub(crate) mod testing;

pub use application::document_reader::DocumentReader;
pub use application::reader_config::{ExtractionMode, QaType, ReaderConfig};
pub use domain::answer::{AnswerStatus, Answers, FinalAnswer, SimpleAnswer};
pub use domain::error::{ReaderError, ReaderResult};
pub use domain::passage::Passage;
pub use domain::traits::{SpanModel, SpecialTokens, TokenCodec};
