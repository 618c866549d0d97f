use criterion::{criterion_group, criterion_main, Criterion};
use jobmatch_core::tokenizer::tokenize;
use jobmatch_core::{JobPosting, Recommender, VectorizerConfig};

const TITLES: &[&str] = &[
    "Senior Python Developer",
    "Data Scientist",
    "Java Backend Engineer",
    "Frontend Developer (React)",
    "Machine Learning Engineer",
    "DevOps / Site Reliability Engineer",
    "Product Data Analyst",
    "Full Stack Engineer, Node.js",
];

fn bench_tokenize(c: &mut Criterion) {
    let config = VectorizerConfig::default();
    let text = TITLES.join(", ");
    c.bench_function("tokenize_titles", |b| b.iter(|| tokenize(&text, &config)));
}

fn bench_recommend(c: &mut Criterion) {
    let corpus = (0..2_000)
        .map(|i| JobPosting::new(format!("{} {i}", TITLES[i % TITLES.len()]), None, "", ""))
        .collect();
    let recommender = Recommender::new(corpus, &VectorizerConfig::default()).expect("non-empty corpus");
    c.bench_function("recommend_2k", |b| b.iter(|| recommender.recommend("python, sql", "engineer", 5)));
}

criterion_group!(benches, bench_tokenize, bench_recommend);
criterion_main!(benches);
