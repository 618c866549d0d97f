use std::fmt;
use thiserror::Error;

/// Which of the two query inputs was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    UserSkills,
    RequiredSkills,
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryField::UserSkills => f.write_str("user skills"),
            QueryField::RequiredSkills => f.write_str("required skills"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("cannot build a model from an empty corpus")]
    EmptyCorpus,

    #[error("{field} input is empty")]
    EmptyQuery { field: QueryField },

    #[error("corpus has {postings} postings, more than a model can address")]
    CorpusTooLarge { postings: usize },

    #[error("top_n must be at least 1")]
    InvalidTopN,

    #[error("model was fitted on {model_docs} postings but the corpus has {corpus_docs}")]
    ModelMismatch { model_docs: u32, corpus_docs: usize },
}

impl MatchError {
    /// Per-query failures; the caller should collect input again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, MatchError::EmptyQuery { .. } | MatchError::InvalidTopN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_names_field() {
        let err = MatchError::EmptyQuery { field: QueryField::RequiredSkills };
        assert_eq!(err.to_string(), "required skills input is empty");
        assert!(err.is_recoverable());
        assert!(!MatchError::EmptyCorpus.is_recoverable());
    }
}
