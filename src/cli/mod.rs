// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments, builds the collaborators, and prints JSON.
// All answering logic lives in the library.

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AskArgs, ChunkArgs, Commands, TokenizerArgs, VocabArgs};
use std::fs;

use extractive_reader::application::chunk_plan;
use extractive_reader::infra::{
    config_store::ConfigStore,
    score_replay::ReplaySpanModel,
    tokenizer_store::{HfTokenizer, TokenizerStore},
};
use extractive_reader::{DocumentReader, Passage, ReaderConfig};

#[derive(Parser, Debug)]
#[command(
    name = "extractive-reader",
    version,
    about = "Extract answer spans for a question from a set of passages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Chunk(args) => run_chunk(args),
            Commands::Ask(args)   => run_ask(args),
            Commands::Vocab(args) => run_vocab(args),
        }
    }
}

fn run_chunk(args: ChunkArgs) -> Result<()> {
    let tokenizer = load_tokenizer(&args.tokenizer)?;
    let passages  = read_passages(&args.passages)?;

    let plans = chunk_plan::plan(&tokenizer, &args.question, &passages)?;
    println!("{}", serde_json::to_string_pretty(&plans)?);
    Ok(())
}

fn run_ask(args: AskArgs) -> Result<()> {
    let cfg = match &args.config_dir {
        Some(dir) => ConfigStore::new(dir).load_or_default()?,
        None      => ReaderConfig::default(),
    };
    let cfg = args.apply_overrides(cfg);

    let tokenizer = load_tokenizer(&args.tokenizer)?;
    let model     = ReplaySpanModel::from_file(&args.scores)?;
    let passages  = read_passages(&args.passages)?;

    let reader  = DocumentReader::new(model, tokenizer, &cfg)?;
    let answers = reader.answer(&args.question, &passages)?;

    println!("{}", serde_json::to_string_pretty(&answers)?);
    Ok(())
}

fn run_vocab(args: VocabArgs) -> Result<()> {
    let passages = read_passages(&args.passages)?;
    let texts: Vec<String> = passages.into_iter().map(|p| p.text).collect();

    let path = TokenizerStore::new(&args.out_dir).build_and_save(&texts, args.vocab_size)?;
    println!("Tokenizer written to {}", path.display());
    Ok(())
}

fn load_tokenizer(args: &TokenizerArgs) -> Result<HfTokenizer> {
    TokenizerStore::new(&args.tokenizer_dir).load(&args.into(), args.max_seq_len)
}

fn read_passages(path: &str) -> Result<Vec<Passage>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read passages from '{path}'"))?;
    let passages: Vec<Passage> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid passages file '{path}'"))?;
    tracing::info!("Loaded {} passages from '{}'", passages.len(), path);
    Ok(passages)
}
