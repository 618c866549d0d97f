use anyhow::Result;
use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use jobmatch::{render_results, run_interactive, ModelSource};
use jobmatch_core::DEFAULT_TOP_N;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "jobmatch")]
#[command(about = "Recommend job postings for a set of skills", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single query
    Recommend {
        #[command(flatten)]
        source: ModelSource,
        /// Your skills, comma or space separated
        #[arg(long)]
        skills: String,
        /// Skills the job should require
        #[arg(long)]
        required: String,
        #[arg(long, env = "JOBMATCH_TOP_N", default_value_t = DEFAULT_TOP_N, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        top_n: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Prompt for queries until told to stop
    Interactive {
        #[command(flatten)]
        source: ModelSource,
        #[arg(long, env = "JOBMATCH_TOP_N", default_value_t = DEFAULT_TOP_N, value_parser = RangedU64ValueParser::<usize>::new().range(1..))]
        top_n: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend { source, skills, required, top_n, json } => {
            let recommender = source.open()?;
            let results = recommender.recommend(
                &jobmatch::normalize_skill_input(&skills),
                &jobmatch::normalize_skill_input(&required),
                top_n,
            )?;
            render_results(&mut io::stdout().lock(), &results, json)?;
        }
        Commands::Interactive { source, top_n } => {
            let recommender = source.open()?;
            run_interactive(&recommender, top_n, io::stdin().lock(), io::stdout())?;
        }
    }
    Ok(())
}
