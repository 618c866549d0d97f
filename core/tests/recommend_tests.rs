use jobmatch_core::{build, recommend, Corpus, JobPosting, MatchError, QueryField, VectorizerConfig, DEFAULT_TOP_N};

fn corpus(titles: &[&str]) -> Corpus {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| JobPosting::new(*t, Some(format!("skills {i}")), format!("description {i}"), format!("https://jobs.example/{i}")))
        .collect()
}

fn three_titles() -> Corpus {
    corpus(&["Python Developer", "Data Scientist", "Java Backend Engineer"])
}

#[test]
fn shared_terms_rank_first() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    let res = recommend(&m, &c, "python, sql", "developer", DEFAULT_TOP_N).unwrap();
    let titles = res.titles();
    assert_eq!(titles[0], "Python Developer");
    let scores: Vec<f32> = res.iter().map(|h| h.score).collect();
    assert!(scores[0] > scores[1]);
    assert!(scores[0] > scores[2]);
}

#[test]
fn no_shared_vocabulary_is_an_empty_result() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    let res = recommend(&m, &c, "xyzzy", "plugh", DEFAULT_TOP_N).unwrap();
    assert!(res.is_empty());
}

#[test]
fn empty_user_skills_fail_regardless_of_other_input() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    for other in ["", "   ", "python", "xyzzy"] {
        let err = recommend(&m, &c, "", other, DEFAULT_TOP_N).unwrap_err();
        assert_eq!(err, MatchError::EmptyQuery { field: QueryField::UserSkills });
        let err = recommend(&m, &c, " \t ", other, DEFAULT_TOP_N).unwrap_err();
        assert_eq!(err, MatchError::EmptyQuery { field: QueryField::UserSkills });
    }
}

#[test]
fn empty_required_skills_fail_symmetrically() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    for other in ["python", "xyzzy"] {
        let err = recommend(&m, &c, other, "  ", DEFAULT_TOP_N).unwrap_err();
        assert_eq!(err, MatchError::EmptyQuery { field: QueryField::RequiredSkills });
        assert!(err.is_recoverable());
    }
}

#[test]
fn results_are_bounded_and_sorted() {
    let c = corpus(&[
        "Senior Python Developer",
        "Python Developer",
        "Data Engineer",
        "Python Data Engineer",
        "Frontend Developer",
        "Data Analyst",
        "Machine Learning Engineer",
    ]);
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    for top_n in 1..=10 {
        let res = recommend(&m, &c, "python data", "engineer developer", top_n).unwrap();
        assert!(res.len() <= top_n);
        let hits: Vec<_> = res.iter().collect();
        for pair in hits.windows(2) {
            assert!(pair[0].score > pair[1].score || (pair[0].score == pair[1].score && pair[0].doc_id < pair[1].doc_id));
        }
    }
}

#[test]
fn top_n_beyond_corpus_returns_everything_ranked() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    let res = recommend(&m, &c, "data", "engineer", 50).unwrap();
    assert_eq!(res.len(), c.len());
    let mut ids: Vec<u32> = res.iter().map(|h| h.doc_id).collect();
    // the two zero-score titles trail in corpus order
    assert_eq!(ids[2], 0);
    ids.sort();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn repeated_queries_are_identical() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    let model_before = m.clone();
    let corpus_before = c.clone();
    let first = serde_json::to_string(&recommend(&m, &c, "python", "backend engineer", 3).unwrap()).unwrap();
    for _ in 0..5 {
        let again = serde_json::to_string(&recommend(&m, &c, "python", "backend engineer", 3).unwrap()).unwrap();
        assert_eq!(first, again);
    }
    assert_eq!(m, model_before);
    assert_eq!(c, corpus_before);
}

#[test]
fn independent_builds_score_alike() {
    let c = three_titles();
    let a = build(&c, &VectorizerConfig::default()).unwrap();
    let b = build(&c, &VectorizerConfig::default()).unwrap();
    let ra = recommend(&a, &c, "java", "backend", 3).unwrap();
    let rb = recommend(&b, &c, "java", "backend", 3).unwrap();
    assert_eq!(ra, rb);
}

#[test]
fn json_output_flattens_posting() {
    let c = three_titles();
    let m = build(&c, &VectorizerConfig::default()).unwrap();
    let res = recommend(&m, &c, "java", "engineer", 1).unwrap();
    let json: serde_json::Value = serde_json::to_value(&res).unwrap();
    let first = &json.as_array().unwrap()[0];
    assert_eq!(first["title"], "Java Backend Engineer");
    assert_eq!(first["url"], "https://jobs.example/2");
    assert_eq!(first["doc_id"], 2);
}

#[test]
fn alternative_weightings_still_rank_overlap_first() {
    let c = three_titles();
    let config = VectorizerConfig {
        idf: jobmatch_core::IdfWeighting::Plain,
        sublinear_tf: true,
        stem: true,
        ..Default::default()
    };
    let m = build(&c, &config).unwrap();
    let res = recommend(&m, &c, "python", "developers", 3).unwrap();
    assert_eq!(res.titles()[0], "Python Developer");
}
