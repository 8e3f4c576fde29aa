use std::{
    fs,
    path::{Path, PathBuf},
};

use diagnosis::{
    AppConfig, Disease, Label, LoadFailureKind, ModelRegistry, Outcome, PageRouter,
    PredictionResult,
};
use serde_json::{Value, json};

fn scratch_dir(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "diagnosis-flow-{}-{test}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn keys(disease: Disease) -> Vec<&'static str> {
    disease.fields().iter().map(|f| f.key).collect()
}

/// Positive once glucose goes above 140.
fn diabetes_artifact() -> Value {
    let mut coefficients = vec![0.0; 8];
    coefficients[1] = 0.05;

    json!({
        "format_version": 1,
        "name": "diabetes",
        "features": keys(Disease::Diabetes),
        "n_features": 8,
        "model": {
            "kind": "logistic_regression",
            "coefficients": coefficients,
            "intercept": -7.0
        }
    })
}

/// Positive once cholesterol goes above 240.
fn heart_artifact() -> Value {
    json!({
        "format_version": 1,
        "name": "heart_disease",
        "n_features": 14,
        "model": {
            "kind": "random_forest",
            "trees": [{
                "children_left": [1, -1, -1],
                "children_right": [2, -1, -1],
                "feature": [4, -2, -2],
                "threshold": [240.0, -2.0, -2.0],
                "value": [[10.0, 10.0], [9.0, 1.0], [1.0, 9.0]]
            }]
        }
    })
}

/// Positive once PPE goes above 0.2.
fn parkinsons_artifact() -> Value {
    let mut weights = vec![0.0; 22];
    weights[21] = 10.0;

    json!({
        "format_version": 1,
        "name": "parkinsons",
        "features": keys(Disease::Parkinsons),
        "n_features": 22,
        "model": { "kind": "svm", "kernel": "linear", "weights": weights, "intercept": -2.0 }
    })
}

fn write(dir: &Path, disease: Disease, artifact: &Value) {
    fs::write(
        dir.join(disease.artifact_file()),
        serde_json::to_string_pretty(artifact).unwrap(),
    )
    .unwrap();
}

fn router_with(dir: PathBuf) -> PageRouter {
    let config = AppConfig {
        models_dir: dir,
        ..AppConfig::default()
    };
    PageRouter::new(ModelRegistry::from_config(&config))
}

fn verdict(outcome: &Outcome) -> PredictionResult {
    match outcome {
        Outcome::Verdict(result) => *result,
        other => panic!("expected a verdict, got {other:?}"),
    }
}

#[test]
fn every_page_reaches_both_verdicts() {
    let dir = scratch_dir("verdicts");
    write(&dir, Disease::Diabetes, &diabetes_artifact());
    write(&dir, Disease::HeartDisease, &heart_artifact());
    write(&dir, Disease::Parkinsons, &parkinsons_artifact());

    let mut router = router_with(dir);
    assert!(router.registry().failures().is_empty());
    assert_eq!(router.registry().len(), 3);

    // diabetes
    router.select(Disease::Diabetes);
    for f in Disease::Diabetes.fields() {
        router.page_mut().form.set(f.key, 1.).unwrap();
    }
    router.page_mut().form.set("Glucose", 180.).unwrap();
    let result = verdict(router.submit());
    assert_eq!(result.label, Label::Positive);
    assert_eq!(result.message(), "You have Diabetes");

    router.page_mut().form.set("Glucose", 90.).unwrap();
    assert_eq!(
        verdict(router.submit()).message(),
        "You don't have Diabetes"
    );

    // heart disease
    router.select(Disease::HeartDisease);
    router.page_mut().form.set_text("chol", "286.5").unwrap();
    assert_eq!(verdict(router.submit()).message(), "You have Heart Disease");

    router.page_mut().form.set("chol", 180.).unwrap();
    assert_eq!(
        verdict(router.submit()).message(),
        "You don't have Heart Disease"
    );

    // parkinson's
    router.select(Disease::Parkinsons);
    router.page_mut().form.set("PPE", 0.41).unwrap();
    assert_eq!(
        verdict(router.submit()).message(),
        "You have Parkinson's Disease"
    );

    router.page_mut().form.set("PPE", 0.05).unwrap();
    assert_eq!(verdict(router.submit()).label, Label::Negative);
}

#[test]
fn diabetes_page_warns_on_untouched_fields() {
    let dir = scratch_dir("diabetes-warning");
    write(&dir, Disease::Diabetes, &diabetes_artifact());

    let mut router = router_with(dir);
    router.page_mut().form.set("Glucose", 180.).unwrap();

    assert_eq!(
        router.submit(),
        &Outcome::Warning("Please fill in all fields".into())
    );
}

#[test]
fn default_heart_and_parkinsons_forms_are_classified() {
    let dir = scratch_dir("defaults");
    write(&dir, Disease::HeartDisease, &heart_artifact());
    write(&dir, Disease::Parkinsons, &parkinsons_artifact());

    let mut router = router_with(dir);

    router.select(Disease::HeartDisease);
    assert_eq!(verdict(router.submit()).label, Label::Negative);

    router.select(Disease::Parkinsons);
    assert_eq!(verdict(router.submit()).label, Label::Negative);
}

#[test]
fn missing_artifact_leaves_only_that_page_unavailable() {
    let dir = scratch_dir("missing");
    write(&dir, Disease::Diabetes, &diabetes_artifact());
    write(&dir, Disease::Parkinsons, &parkinsons_artifact());

    let mut router = router_with(dir.clone());

    let failures = router.registry().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].name, "heart_disease");
    assert_eq!(failures[0].kind, LoadFailureKind::Missing);
    assert_eq!(
        failures[0].path,
        dir.join("heart-disease-prediction-model.json")
    );

    router.select(Disease::HeartDisease);
    assert!(!router.is_available());
    assert!(matches!(router.submit(), Outcome::Error(msg) if msg.contains("unavailable")));

    router.select(Disease::Parkinsons);
    assert!(router.is_available());
    assert!(matches!(router.submit(), Outcome::Verdict(_)));
}

#[test]
fn corrupt_and_mismatched_artifacts_are_load_failures() {
    let dir = scratch_dir("corrupt");
    fs::write(
        dir.join(Disease::Diabetes.artifact_file()),
        b"\x80\x04\x95 not json",
    )
    .unwrap();

    let mut short = parkinsons_artifact();
    short["n_features"] = json!(21);
    short["features"] = json!(keys(Disease::Parkinsons)[..21].to_vec());
    short["model"]["weights"] = json!(vec![0.0; 21]);
    write(&dir, Disease::Parkinsons, &short);

    let router = router_with(dir);
    let kinds: Vec<_> = router
        .registry()
        .failures()
        .iter()
        .map(|f| (f.name.as_str(), f.kind))
        .collect();

    assert_eq!(
        kinds,
        [
            ("diabetes", LoadFailureKind::Corrupt),
            ("heart_disease", LoadFailureKind::Missing),
            ("parkinsons", LoadFailureKind::SchemaMismatch),
        ]
    );
    assert!(router.registry().is_empty());
}
