use serde::{Deserialize, Serialize};

/// How document frequency turns into a term weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdfWeighting {
    /// ln((1 + n) / (1 + df)) + 1. A term present in every title still carries weight.
    #[default]
    Smooth,
    /// ln(n / df) + 1
    Plain,
}

impl IdfWeighting {
    pub fn idf(self, num_docs: u32, df: u32) -> f32 {
        let n = num_docs as f32;
        let df = df.max(1) as f32;
        match self {
            IdfWeighting::Smooth => ((1.0 + n) / (1.0 + df)).ln() + 1.0,
            IdfWeighting::Plain => (n / df).ln() + 1.0,
        }
    }
}

/// Fitting options. Stored inside the model so queries are tokenized and
/// weighted exactly like the titles were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    pub idf: IdfWeighting,
    /// Use 1 + ln(tf) instead of the raw count.
    pub sublinear_tf: bool,
    pub stem: bool,
    pub min_token_chars: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self { idf: IdfWeighting::Smooth, sublinear_tf: false, stem: false, min_token_chars: 2 }
    }
}

impl VectorizerConfig {
    pub fn tf(&self, raw: u32) -> f32 {
        if raw == 0 {
            0.0
        } else if self.sublinear_tf {
            1.0 + (raw as f32).ln()
        } else {
            raw as f32
        }
    }
}
