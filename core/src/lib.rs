pub mod config;
pub mod error;
pub mod index;
pub mod ingest;
pub mod matcher;
pub mod persist;
pub mod tokenizer;

pub use config::{IdfWeighting, VectorizerConfig};
pub use error::{MatchError, QueryField};
pub use index::*;
pub use matcher::{recommend, QueryVector, RankedResult, Recommendation, Recommender, DEFAULT_TOP_N};
