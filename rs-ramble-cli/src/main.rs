use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rs_ramble_core::corpus::DirectoryArchive;
use rs_ramble_core::model::combined::Weights;
use rs_ramble_core::model::generator::Generator;
use rs_ramble_core::model::sampler::SamplerConfig;
use rs_ramble_core::model::table::DEFAULT_STATE_SIZE;
use rs_ramble_core::tokenize::{Lexicon, RuleTagger};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "rs-ramble", version, about = "Rambles one sentence from a transcript blended with three Shakespeare plays")]
struct Args {
    /// Primary corpus (plain text transcript).
    #[arg(default_value = "tns.txt")]
    path: PathBuf,

    /// Weight of the primary corpus.
    #[arg(short = 'p', long, default_value_t = 1.0)]
    primary_weight: f64,

    /// Weight of the classical corpus.
    #[arg(short = 'c', long, default_value_t = 1.0)]
    classic_weight: f64,

    /// Number of tagged words in a chain state.
    #[arg(short = 'n', long, default_value_t = DEFAULT_STATE_SIZE)]
    state_size: usize,

    /// Directory holding shakespeare-{hamlet,macbeth,caesar}.txt.
    #[arg(short = 'a', long, default_value = "./data/gutenberg")]
    archive: PathBuf,

    /// JSON object of word -> tag overrides for the tagger.
    #[arg(short = 'l', long)]
    lexicon: Option<PathBuf>,

    /// Sampling attempts before falling back to a direct walk.
    #[arg(long, default_value_t = 10)]
    tries: usize,

    /// Longest sentence, in words.
    #[arg(long, default_value_t = 100)]
    max_tokens: usize,

    /// Seed for reproducible output.
    #[arg(short = 's', long)]
    seed: Option<u64>,

    /// Logs to stderr (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout carries the sentence only
    let default_filter = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with_writer(std::io::stderr)
        .init();

    let weights = Weights::new(args.primary_weight, args.classic_weight)?;

    let mut config = SamplerConfig::default();
    config.set_tries(args.tries)?;
    config.set_max_tokens(args.max_tokens)?;

    let tagger = match &args.lexicon {
        Some(path) => RuleTagger::with_lexicon(
            Lexicon::from_path(path).with_context(|| format!("loading lexicon {}", path.display()))?,
        ),
        None => RuleTagger::new(),
    };

    let archive = DirectoryArchive::new(&args.archive);
    let generator = Generator::from_sources(&args.path, &archive, weights, args.state_size, tagger, config)
        .with_context(|| format!("building model from {}", args.path.display()))?;
    info!(states = generator.model().len(), "model built");

    let sentence = match args.seed {
        Some(seed) => generator.generate(&mut StdRng::seed_from_u64(seed)),
        None => generator.generate(&mut rand::rng()),
    }
    .context("no sentence could be generated")?;

    println!("{sentence}");
    Ok(())
}
