use crate::config::VectorizerConfig;
use crate::error::{MatchError, QueryField};
use crate::index::{build, Corpus, DocId, JobPosting, TermId, TermWeightModel};
use crate::tokenizer::tokenize;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 5;

/// Query text projected into a model's term space, unit-normalized and sorted by term id.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    entries: Vec<(TermId, f32)>,
}

impl QueryVector {
    /// Terms outside the fitted vocabulary are dropped.
    pub fn project(model: &TermWeightModel, text: &str) -> Self {
        let mut tf_raw: Vec<(TermId, u32)> = Vec::new();
        for term in tokenize(text, model.config()) {
            let Some(tid) = model.term_id(&term) else { continue };
            match tf_raw.iter_mut().find(|(t, _)| *t == tid) {
                Some((_, c)) => *c += 1,
                None => tf_raw.push((tid, 1)),
            }
        }
        tf_raw.sort_by_key(|(tid, _)| *tid);

        let config = model.config();
        let mut entries: Vec<(TermId, f32)> = tf_raw
            .into_iter()
            .map(|(tid, raw)| (tid, config.tf(raw) * model.idf(tid)))
            .collect();
        let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, w) in entries.iter_mut() { *w /= norm; }
        }
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }

    pub fn is_zero(&self) -> bool { self.entries.iter().all(|(_, w)| *w == 0.0) }

    /// Cosine similarity against every title, indexed by `DocId`.
    /// Both sides are unit length, so the dot product is the cosine; an
    /// all-zero vector on either side scores 0.
    pub fn cosine_scores(&self, model: &TermWeightModel) -> Vec<f32> {
        let mut scores = vec![0.0f32; model.num_docs() as usize];
        for &(tid, q_w) in &self.entries {
            for p in model.postings(tid) {
                scores[p.doc_id as usize] += p.weight * q_w;
            }
        }
        scores
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<'a> {
    pub doc_id: DocId,
    pub score: f32,
    #[serde(flatten)]
    pub posting: &'a JobPosting,
}

/// Postings in descending score order; ties keep corpus order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult<'a> {
    hits: Vec<Recommendation<'a>>,
}

impl<'a> RankedResult<'a> {
    pub fn len(&self) -> usize { self.hits.len() }

    pub fn is_empty(&self) -> bool { self.hits.is_empty() }

    pub fn iter(&self) -> std::slice::Iter<'_, Recommendation<'a>> { self.hits.iter() }

    pub fn titles(&self) -> Vec<&'a str> { self.hits.iter().map(|h| h.posting.title.as_str()).collect() }
}

impl<'a> IntoIterator for RankedResult<'a> {
    type Item = Recommendation<'a>;
    type IntoIter = std::vec::IntoIter<Recommendation<'a>>;

    fn into_iter(self) -> Self::IntoIter { self.hits.into_iter() }
}

fn require_text(text: &str, field: QueryField) -> Result<&str, MatchError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(MatchError::EmptyQuery { field });
    }
    Ok(trimmed)
}

/// Rank `corpus` against the combined skills query.
///
/// Returns at most `top_n` postings. When no title shares a term with the
/// query the result is empty; otherwise every posting competes, so a
/// `top_n` larger than the corpus yields the whole corpus in ranked order.
pub fn recommend<'c>(
    model: &TermWeightModel,
    corpus: &'c Corpus,
    user_skills: &str,
    required_skills: &str,
    top_n: usize,
) -> Result<RankedResult<'c>, MatchError> {
    let user_skills = require_text(user_skills, QueryField::UserSkills)?;
    let required_skills = require_text(required_skills, QueryField::RequiredSkills)?;
    if top_n == 0 {
        return Err(MatchError::InvalidTopN);
    }
    check_fit(model, corpus)?;

    let query = format!("{user_skills} {required_skills}");
    let qv = QueryVector::project(model, &query);
    if qv.is_zero() {
        tracing::debug!(%query, "query shares no terms with the vocabulary");
        return Ok(RankedResult::default());
    }

    let scores = qv.cosine_scores(model);
    if scores.iter().all(|s| *s <= 0.0) {
        return Ok(RankedResult::default());
    }

    let mut scored: Vec<(DocId, f32)> = (0..model.num_docs()).zip(scores).collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.truncate(top_n);

    let hits = scored
        .into_iter()
        .filter_map(|(doc_id, score)| corpus.get(doc_id).map(|posting| Recommendation { doc_id, score, posting }))
        .collect();
    Ok(RankedResult { hits })
}

fn check_fit(model: &TermWeightModel, corpus: &Corpus) -> Result<(), MatchError> {
    if model.num_docs() as usize != corpus.len() {
        return Err(MatchError::ModelMismatch { model_docs: model.num_docs(), corpus_docs: corpus.len() });
    }
    Ok(())
}

/// A corpus together with the model fitted on it. This is the unit that is
/// persisted and reloaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommender {
    corpus: Corpus,
    model: TermWeightModel,
}

impl Recommender {
    pub fn new(corpus: Corpus, config: &VectorizerConfig) -> Result<Self, MatchError> {
        let model = build(&corpus, config)?;
        Ok(Self { corpus, model })
    }

    pub fn from_parts(corpus: Corpus, model: TermWeightModel) -> Result<Self, MatchError> {
        check_fit(&model, &corpus)?;
        Ok(Self { corpus, model })
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    pub fn model(&self) -> &TermWeightModel { &self.model }

    pub fn validate(&self) -> Result<(), MatchError> { check_fit(&self.model, &self.corpus) }

    pub fn recommend(&self, user_skills: &str, required_skills: &str, top_n: usize) -> Result<RankedResult<'_>, MatchError> {
        recommend(&self.model, &self.corpus, user_skills, required_skills, top_n)
    }
}
