use crate::matcher::Recommender;
use anyhow::{bail, Context, Result};
use bincode;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn for_recommender(recommender: &Recommender) -> Self {
        let created_at = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_default();
        Self {
            num_docs: recommender.model().num_docs(),
            num_terms: recommender.model().num_terms(),
            created_at,
            version: FORMAT_VERSION,
        }
    }
}

pub struct ModelPaths {
    pub root: PathBuf,
}

impl ModelPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    fn model(&self) -> PathBuf { self.root.join("model.bin") }
    fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

pub fn save_recommender(paths: &ModelPaths, recommender: &Recommender) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.model()).with_context(|| format!("creating {}", paths.model().display()))?;
    let bytes = bincode::serialize(recommender)?;
    f.write_all(&bytes)?;
    Ok(())
}

pub fn load_recommender(paths: &ModelPaths) -> Result<Recommender> {
    let mut f = File::open(paths.model()).with_context(|| format!("opening {}", paths.model().display()))?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let recommender: Recommender = bincode::deserialize(&buf).context("decoding model blob")?;
    recommender.validate()?;
    Ok(recommender)
}

pub fn save_meta(paths: &ModelPaths, meta: &MetaFile) -> Result<()> {
    create_dir_all(&paths.root)?;
    let mut f = File::create(paths.meta())?;
    let json = serde_json::to_string_pretty(meta)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_meta(paths: &ModelPaths) -> Result<MetaFile> {
    let mut f = File::open(paths.meta()).with_context(|| format!("opening {}", paths.meta().display()))?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

/// Write the model blob and its metadata side by side.
pub fn save_model_dir(paths: &ModelPaths, recommender: &Recommender) -> Result<MetaFile> {
    save_recommender(paths, recommender)?;
    let meta = MetaFile::for_recommender(recommender);
    save_meta(paths, &meta)?;
    Ok(meta)
}

/// Reload a fitted recommender without refitting. The metadata must match
/// the current format version and the decoded model.
pub fn load_model_dir(paths: &ModelPaths) -> Result<Recommender> {
    let meta = load_meta(paths)?;
    if meta.version != FORMAT_VERSION {
        bail!("model format version {} is not supported (expected {FORMAT_VERSION})", meta.version);
    }
    let recommender = load_recommender(paths)?;
    if recommender.model().num_docs() != meta.num_docs || recommender.model().num_terms() != meta.num_terms {
        bail!(
            "model blob does not match meta.json ({} docs / {} terms vs {} / {})",
            recommender.model().num_docs(),
            recommender.model().num_terms(),
            meta.num_docs,
            meta.num_terms
        );
    }
    tracing::info!(num_docs = meta.num_docs, num_terms = meta.num_terms, created_at = %meta.created_at, "loaded model");
    Ok(recommender)
}
