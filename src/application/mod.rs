// ============================================================
// Layer 2 — Application
// ============================================================
// Wires the other layers into the reader workflow. Nothing in
// here touches logits or token ids directly; it only decides
// what runs, in which order, and what a failure means.

// Reader options and the extraction mode they select
pub mod reader_config;

// Question encoding and passage chunking
pub mod chunk_plan;

// Cross-chunk, cross-passage ranking
pub mod answer_aggregator;

// The question → answers façade
pub mod document_reader;
