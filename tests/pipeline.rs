// End-to-end tests for the scoring pipeline.
//
// Uses an in-memory vector table where every keyword's first token lies on
// its specialty's own axis, plus a few synonyms placed near those axes.
// No model files, network or filesystem access.

use std::sync::Arc;

use triage::analysis::analyzer::SymptomAnalyzer;
use triage::analysis::normalizer::TextNormalizer;
use triage::specialty::registry::{Specialty, SpecialtyRegistry};
use triage::vectors::table::StaticWordVectors;

const DIM: usize = Specialty::COUNT + 1;

/// Unit vector along a specialty's axis.
fn axis(specialty: Specialty) -> Vec<f64> {
    let mut v = vec![0.0; DIM];
    v[specialty.index()] = 1.0;
    v
}

/// Vector with cosine `cos` to the specialty axis, the rest on the spare axis.
fn near(specialty: Specialty, cos: f64) -> Vec<f64> {
    let mut v = vec![0.0; DIM];
    v[specialty.index()] = cos;
    v[DIM - 1] = (1.0 - cos * cos).sqrt();
    v
}

fn table_with(extra: Vec<(&str, Vec<f64>)>) -> StaticWordVectors {
    let registry = SpecialtyRegistry::default();
    let mut pairs: Vec<(String, Vec<f64>)> = Vec::new();
    for profile in registry.all_specialties() {
        for keyword in profile.keywords {
            let first = keyword.split_whitespace().next().unwrap();
            pairs.push((first.to_string(), axis(profile.specialty)));
        }
    }
    for (word, v) in extra {
        pairs.push((word.to_string(), v));
    }
    StaticWordVectors::from_pairs(pairs).unwrap()
}

fn normalizer() -> TextNormalizer {
    TextNormalizer::with_stop_words(["i", "have", "a", "and", "my", "is", "with", "the", "of"])
}

fn analyzer() -> SymptomAnalyzer {
    analyzer_with(table_with(vec![
        ("cephalalgia", near(Specialty::Neurologist, 0.8)),
        ("dizzy", near(Specialty::Neurologist, 0.6)),
    ]))
}

fn analyzer_with(vectors: StaticWordVectors) -> SymptomAnalyzer {
    SymptomAnalyzer::with_normalizer(Arc::new(vectors), normalizer()).unwrap()
}

// ============================================================
// Scenarios
// ============================================================

#[test]
fn headache_and_migraine_is_neurologist() {
    let rec = analyzer()
        .analyze("I have a severe headache and migraine")
        .unwrap();
    assert_eq!(rec.specialty, Specialty::Neurologist);
    assert_eq!(
        rec.message,
        "Based on your symptoms, I recommend consulting a Neurologist."
    );
}

#[test]
fn empty_input_is_general_physician() {
    let rec = analyzer().analyze("").unwrap();
    assert_eq!(rec.specialty, Specialty::GeneralPhysician);
}

#[test]
fn itchy_rash_is_dermatologist() {
    let rec = analyzer().analyze("my skin is itching with a rash").unwrap();
    assert_eq!(rec.specialty, Specialty::Dermatologist);
}

#[test]
fn nonsense_is_general_physician() {
    let analyzer = analyzer();
    let table = analyzer.score("asdf qwer zxcv unrelated nonsense").unwrap();
    assert!(table.max() < 1.0);
    let rec = analyzer
        .analyze("asdf qwer zxcv unrelated nonsense")
        .unwrap();
    assert_eq!(rec.specialty, Specialty::GeneralPhysician);
}

// ============================================================
// Properties
// ============================================================

#[test]
fn repeated_calls_are_deterministic() {
    let analyzer = analyzer();
    let inputs = [
        "my ear and eye hurt",
        "cephalalgia with fever",
        "chest pain, heart racing!",
        "",
    ];
    for input in inputs {
        let first = analyzer.analyze(input).unwrap();
        for _ in 0..5 {
            assert_eq!(analyzer.analyze(input).unwrap(), first, "input: {input:?}");
        }
    }
}

#[test]
fn keyword_contributes_two_regardless_of_repetition() {
    // No vectors at all: only substring matching contributes
    let analyzer = analyzer_with(StaticWordVectors::default());
    let once = analyzer.score("seizure").unwrap();
    let many = analyzer.score("seizure seizure seizure, seizure").unwrap();
    assert!((once.get(Specialty::Neurologist) - 2.0).abs() < 1e-12);
    assert_eq!(once, many);
}

#[test]
fn similarity_contribution_is_the_cosine() {
    // "cephalalgia" is not a keyword substring; it sits at cos 0.8 from
    // the neurology axis shared by all five neurology keywords.
    let table = analyzer().score("cephalalgia").unwrap();
    let neuro = table.get(Specialty::Neurologist);
    assert!((neuro - 5.0 * 0.8).abs() < 1e-9, "got {neuro}");
    for (specialty, score) in table.iter() {
        if specialty != Specialty::Neurologist {
            assert_eq!(score, 0.0, "{specialty} should not score");
        }
    }
}

#[test]
fn similarity_at_or_below_threshold_adds_nothing() {
    let table = analyzer().score("dizzy").unwrap();
    assert_eq!(table.max(), 0.0);
}

#[test]
fn single_weak_similarity_falls_back() {
    // Only "headache" carries a vector, so one hit of 0.75 is the maximum
    let vectors = StaticWordVectors::from_pairs([
        ("headache", axis(Specialty::Neurologist)),
        ("cephalalgia", near(Specialty::Neurologist, 0.75)),
    ])
    .unwrap();
    let analyzer = analyzer_with(vectors);

    let table = analyzer.score("cephalalgia").unwrap();
    let neuro = table.get(Specialty::Neurologist);
    assert!(neuro > 0.7 && neuro < 1.0, "got {neuro}");
    assert_eq!(
        analyzer.analyze("cephalalgia").unwrap().specialty,
        Specialty::GeneralPhysician
    );
}

#[test]
fn tie_goes_to_earlier_registry_entry() {
    // "ear" and "eye" each match once verbatim and five times by vector
    let analyzer = analyzer();
    let table = analyzer.score("ear eye").unwrap();
    assert!(
        (table.get(Specialty::Ent) - table.get(Specialty::Ophthalmologist)).abs() < 1e-12,
        "expected a tie, got {table:?}"
    );
    assert_eq!(analyzer.analyze("ear eye").unwrap().specialty, Specialty::Ent);
    assert_eq!(analyzer.analyze("eye ear").unwrap().specialty, Specialty::Ent);
}

#[test]
fn multi_word_keyword_uses_first_token_vector() {
    // "thorax" lands on the cardiology axis via "chest" (from "chest pain")
    let analyzer = analyzer_with(table_with(vec![("thorax", axis(Specialty::Cardiologist))]));
    let rec = analyzer.analyze("thorax").unwrap();
    assert_eq!(rec.specialty, Specialty::Cardiologist);
}

#[test]
fn stopwords_and_punctuation_do_not_score_by_similarity() {
    // "the" is given a neurology vector but is a stop word
    let analyzer = analyzer_with(table_with(vec![
        ("the", axis(Specialty::Neurologist)),
        ("!", axis(Specialty::Neurologist)),
    ]));
    let table = analyzer.score("the !").unwrap();
    assert_eq!(table.max(), 0.0);
}

#[test]
fn all_scores_nonnegative() {
    let mut opposite = vec![0.0; DIM];
    opposite[Specialty::Neurologist.index()] = -1.0;
    let analyzer = analyzer_with(table_with(vec![("opposite", opposite)]));

    let table = analyzer.score("opposite feelings, unknown").unwrap();
    assert!(table.iter().all(|(_, s)| s >= 0.0 && s.is_finite()));
}

#[test]
fn unicode_input_is_accepted() {
    let rec = analyzer().analyze("Kopfschmerzen 頭痛 🤕 HEADACHE").unwrap();
    assert_eq!(rec.specialty, Specialty::Neurologist);
}

#[test]
fn concurrent_requests_share_one_analyzer() {
    let analyzer = Arc::new(analyzer());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let analyzer = Arc::clone(&analyzer);
            std::thread::spawn(move || {
                let text = if i % 2 == 0 { "migraine" } else { "rash" };
                analyzer.analyze(text).unwrap().specialty
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 {
            Specialty::Neurologist
        } else {
            Specialty::Dermatologist
        };
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn everyday_words_are_not_dropped_as_stop_words() {
    // "general" shares the General Physician axis with "general health"
    let analyzer =
        SymptomAnalyzer::new(Arc::new(table_with(Vec::new()))).unwrap();
    let table = analyzer.score("general").unwrap();
    assert!(table.get(Specialty::GeneralPhysician) >= 1.0, "got {table:?}");
    assert_eq!(
        analyzer.analyze("general").unwrap().specialty,
        Specialty::GeneralPhysician
    );
}
