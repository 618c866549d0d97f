use anyhow::{bail, Result};
use clap::Args;
use jobmatch_core::ingest::load_catalog;
use jobmatch_core::persist::{load_model_dir, ModelPaths};
use jobmatch_core::{MatchError, RankedResult, Recommender, VectorizerConfig};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Where the recommender comes from: a persisted model directory, or a
/// catalog fitted on the spot with default settings. `--model` wins when both are set.
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = true)]
pub struct ModelSource {
    /// Model directory written by `jobmatch-indexer build`
    #[arg(long, env = "JOBMATCH_MODEL")]
    pub model: Option<PathBuf>,
    /// CSV catalog (file or directory) to fit in memory
    #[arg(long, env = "JOBMATCH_CSV")]
    pub csv: Option<PathBuf>,
}

impl ModelSource {
    pub fn open(&self) -> Result<Recommender> {
        match (&self.model, &self.csv) {
            (Some(dir), _) => load_model_dir(&ModelPaths::new(dir)),
            (None, Some(csv)) => {
                let corpus = load_catalog(csv)?;
                tracing::info!(postings = corpus.len(), "fitting model from catalog");
                Ok(Recommender::new(corpus, &VectorizerConfig::default())?)
            }
            (None, None) => bail!("either --model or --csv is required"),
        }
    }
}

/// "python, sql,docker" -> "python  sql docker"
pub fn normalize_skill_input(raw: &str) -> String {
    raw.split(',').collect::<Vec<_>>().join(" ").trim().to_string()
}

pub fn write_results<W: Write>(out: &mut W, results: &RankedResult<'_>) -> std::io::Result<()> {
    if results.is_empty() {
        writeln!(out, "No jobs found matching your input.")?;
        return Ok(());
    }
    writeln!(out, "\nRecommended Jobs:")?;
    for hit in results.iter() {
        writeln!(out, "Title: {}", hit.posting.title)?;
        writeln!(out, "Link: {}\n", hit.posting.url)?;
    }
    Ok(())
}

/// Plain `Title:`/`Link:` listing, or the ranked postings as pretty JSON.
pub fn render_results<W: Write>(out: &mut W, results: &RankedResult<'_>, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
    } else {
        write_results(out, results)?;
    }
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Prompt for skills until the user declines another search or input ends.
pub fn run_interactive<R: BufRead, W: Write>(recommender: &Recommender, top_n: usize, mut input: R, mut output: W) -> Result<()> {
    // fixed for the whole session, so asking again would never help
    if top_n == 0 {
        return Err(MatchError::InvalidTopN.into());
    }
    loop {
        let Some(user) = prompt(&mut input, &mut output, "Enter your skills (comma-separated): ")? else { break };
        let Some(required) = prompt(&mut input, &mut output, "Enter the required skills for the job (comma-separated): ")? else { break };

        match recommender.recommend(&normalize_skill_input(&user), &normalize_skill_input(&required), top_n) {
            Ok(results) => write_results(&mut output, &results)?,
            Err(err @ MatchError::EmptyQuery { .. }) => {
                tracing::debug!(%err, "rejected query");
                writeln!(output, "Error: {err}. Please try again.\n")?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        let Some(choice) = prompt(&mut input, &mut output, "\nDo you want to make another search? (yes/no): ")? else { break };
        if !matches!(choice.trim().to_lowercase().as_str(), "yes" | "y") {
            break;
        }
    }
    writeln!(output, "Thank you for using the Job Recommendation System. Goodbye!")?;
    Ok(())
}
