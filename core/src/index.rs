use crate::config::VectorizerConfig;
use crate::error::MatchError;
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type TermId = u32;
pub type DocId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    /// Never absent once the posting is part of a corpus; missing values become "".
    pub required_skills: String,
    pub description: String,
    pub url: String,
}

impl JobPosting {
    pub fn new(
        title: impl Into<String>,
        required_skills: Option<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            required_skills: required_skills.unwrap_or_default(),
            description: description.into(),
            url: url.into(),
        }
    }
}

/// Ordered catalog. A posting's position is its `DocId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    postings: Vec<JobPosting>,
}

impl Corpus {
    pub fn new(postings: Vec<JobPosting>) -> Self { Self { postings } }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn get(&self, doc_id: DocId) -> Option<&JobPosting> { self.postings.get(doc_id as usize) }

    /// Postings past `DocId::MAX` are not addressable and are not yielded; `build` rejects such corpora.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &JobPosting)> {
        self.postings
            .iter()
            .enumerate()
            .map_while(|(i, p)| DocId::try_from(i).ok().map(|id| (id, p)))
    }

    pub fn postings(&self) -> &[JobPosting] { &self.postings }
}

impl FromIterator<JobPosting> for Corpus {
    fn from_iter<I: IntoIterator<Item = JobPosting>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: DocId,
    pub weight: f32, // normalized tf-idf weight
}

/// Fitted tf-idf space over job titles. Frozen once `build` returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermWeightModel {
    config: VectorizerConfig,
    dictionary: HashMap<String, TermId>,
    df: Vec<u32>,
    idf: Vec<f32>,
    postings: Vec<Vec<Posting>>, // indexed by term id, each sorted by doc_id
    num_docs: u32,
}

impl TermWeightModel {
    pub fn config(&self) -> &VectorizerConfig { &self.config }

    pub fn num_docs(&self) -> u32 { self.num_docs }

    pub fn num_terms(&self) -> usize { self.dictionary.len() }

    pub fn term_id(&self, term: &str) -> Option<TermId> { self.dictionary.get(term).copied() }

    pub fn df(&self, term_id: TermId) -> u32 { self.df.get(term_id as usize).copied().unwrap_or(0) }

    pub fn idf(&self, term_id: TermId) -> f32 { self.idf.get(term_id as usize).copied().unwrap_or(0.0) }

    pub fn postings(&self, term_id: TermId) -> &[Posting] {
        self.postings.get(term_id as usize).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Weight of `term` in the unit-normalized vector of `doc_id`; 0 when absent.
    pub fn title_weight(&self, doc_id: DocId, term: &str) -> f32 {
        let Some(tid) = self.term_id(term) else { return 0.0 };
        let plist = self.postings(tid);
        match plist.binary_search_by_key(&doc_id, |p| p.doc_id) {
            Ok(i) => plist[i].weight,
            Err(_) => 0.0,
        }
    }
}

fn doc_count(postings: usize) -> Result<u32, MatchError> {
    u32::try_from(postings).map_err(|_| MatchError::CorpusTooLarge { postings })
}

/// Fit the vocabulary and tf-idf weights on the titles of `corpus`.
pub fn build(corpus: &Corpus, config: &VectorizerConfig) -> Result<TermWeightModel, MatchError> {
    if corpus.is_empty() {
        return Err(MatchError::EmptyCorpus);
    }
    let num_docs = doc_count(corpus.len())?;

    let mut dictionary: HashMap<String, TermId> = HashMap::new();
    let mut df: Vec<u32> = Vec::new();
    // (term, raw tf) per title, terms in first-seen order
    let mut doc_terms: Vec<Vec<(TermId, u32)>> = Vec::with_capacity(corpus.len());

    for (_, posting) in corpus.iter() {
        let mut tf_counts: Vec<(TermId, u32)> = Vec::new();
        for term in tokenize(&posting.title, config) {
            let next_id = dictionary.len() as TermId;
            let tid = *dictionary.entry(term).or_insert_with(|| {
                df.push(0);
                next_id
            });
            match tf_counts.iter_mut().find(|(t, _)| *t == tid) {
                Some((_, c)) => *c += 1,
                None => {
                    df[tid as usize] += 1;
                    tf_counts.push((tid, 1));
                }
            }
        }
        doc_terms.push(tf_counts);
    }

    let idf: Vec<f32> = df.iter().map(|&d| config.idf.idf(num_docs, d)).collect();

    let mut postings: Vec<Vec<Posting>> = vec![Vec::new(); dictionary.len()];
    for (doc_id, terms) in (0..num_docs).zip(doc_terms) {
        let weights: Vec<(TermId, f32)> = terms
            .into_iter()
            .map(|(tid, raw)| (tid, config.tf(raw) * idf[tid as usize]))
            .collect();
        let norm = weights.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm == 0.0 {
            tracing::debug!(doc_id, "title has no indexable terms");
            continue;
        }
        // doc ids are visited in ascending order, so each list stays sorted
        for (tid, w) in weights {
            postings[tid as usize].push(Posting { doc_id, weight: w / norm });
        }
    }

    tracing::info!(num_docs, num_terms = dictionary.len(), "fitted term weight model");
    Ok(TermWeightModel { config: config.clone(), dictionary, df, idf, postings, num_docs })
}
