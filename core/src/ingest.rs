use crate::index::{Corpus, JobPosting};
use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const REQUIRED_COLUMNS: [&str; 4] = ["Title", "Required_Skills", "Job_Description", "URL"];

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Required_Skills")]
    required_skills: Option<String>,
    #[serde(rename = "Job_Description")]
    description: Option<String>,
    #[serde(rename = "URL")]
    url: Option<String>,
}

/// Parse a catalog table. Row order becomes corpus order.
pub fn read_csv<R: Read>(reader: R) -> Result<Corpus> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let headers = rdr.headers().context("reading catalog header")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            bail!("catalog is missing the {col} column");
        }
    }

    let mut postings = Vec::new();
    for (i, row) in rdr.deserialize::<CatalogRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = row.with_context(|| format!("malformed catalog row at line {line}"))?;
        let title = row
            .title
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("catalog row at line {line} has no title"))?;
        postings.push(JobPosting::new(
            title,
            row.required_skills,
            row.description.unwrap_or_default(),
            row.url.unwrap_or_default(),
        ));
    }

    if postings.is_empty() {
        bail!("empty catalog: no job postings found");
    }
    Ok(Corpus::new(postings))
}

pub fn load_csv(path: &Path) -> Result<Corpus> {
    let file = std::fs::File::open(path).with_context(|| format!("opening catalog {}", path.display()))?;
    read_csv(file).with_context(|| format!("loading catalog {}", path.display()))
}

/// Load a single CSV file, or every `*.csv` under a directory in sorted path order.
pub fn load_catalog(path: &Path) -> Result<Corpus> {
    if path.is_file() {
        return load_csv(path);
    }
    if !path.is_dir() {
        bail!("catalog {} not found", path.display());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("csv"))
        .collect();
    files.sort();
    if files.is_empty() {
        bail!("no .csv files under {}", path.display());
    }

    let mut postings = Vec::new();
    for file in &files {
        let corpus = load_csv(file)?;
        tracing::debug!(file = %file.display(), rows = corpus.len(), "read catalog file");
        postings.extend(corpus.postings().iter().cloned());
    }
    tracing::info!(files = files.len(), postings = postings.len(), "loaded catalog directory");
    Ok(Corpus::new(postings))
}
