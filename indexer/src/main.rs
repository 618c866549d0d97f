use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use jobmatch_core::ingest::load_catalog;
use jobmatch_core::persist::{save_model_dir, ModelPaths};
use jobmatch_core::{IdfWeighting, Recommender, VectorizerConfig};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "jobmatch-indexer")]
#[command(about = "Fit and persist the job title TF-IDF model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model from a CSV catalog file or a directory of CSV files
    Build {
        /// Catalog path (file or directory)
        #[arg(long, env = "JOBMATCH_CSV")]
        input: PathBuf,
        /// Output model directory
        #[arg(long, env = "JOBMATCH_MODEL", default_value = "./model")]
        output: PathBuf,
        #[command(flatten)]
        fit: FitArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct FitArgs {
    /// Use ln(n/df) + 1 instead of the smoothed ln((1+n)/(1+df)) + 1
    #[arg(long, default_value_t = false)]
    plain_idf: bool,
    /// Use 1 + ln(tf) instead of raw term counts
    #[arg(long, default_value_t = false)]
    sublinear_tf: bool,
    /// Stem terms with the English Snowball stemmer
    #[arg(long, default_value_t = false)]
    stem: bool,
    /// Shortest token kept as a term
    #[arg(long, default_value_t = 2)]
    min_token_chars: usize,
}

impl From<FitArgs> for VectorizerConfig {
    fn from(args: FitArgs) -> Self {
        Self {
            idf: if args.plain_idf { IdfWeighting::Plain } else { IdfWeighting::Smooth },
            sublinear_tf: args.sublinear_tf,
            stem: args.stem,
            min_token_chars: args.min_token_chars,
        }
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output, fit } => build_model(&input, &output, fit.into()),
    }
}

fn build_model(input: &Path, output: &Path, config: VectorizerConfig) -> Result<()> {
    let corpus = load_catalog(input)?;
    tracing::info!(postings = corpus.len(), ?config, "ingested catalog");

    let recommender = Recommender::new(corpus, &config)?;
    let meta = save_model_dir(&ModelPaths::new(output), &recommender)?;

    tracing::info!(output = %output.display(), num_docs = meta.num_docs, num_terms = meta.num_terms, "model build complete");
    Ok(())
}
