use std::{fs, path::PathBuf};

use classifier::{Classifier, ClassifierErr};
use ndarray::array;

fn scratch(name: &str, content: Option<&str>) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("classifier-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    let path = dir.join(name);
    match content {
        Some(content) => fs::write(&path, content).unwrap(),
        None => {
            let _ = fs::remove_file(&path);
        }
    }

    path
}

#[test]
fn loads_an_rbf_svm_from_disk() {
    let path = scratch(
        "rbf.json",
        Some(
            r#"{
                "format_version": 1,
                "name": "voice",
                "features": ["x", "y"],
                "n_features": 2,
                "model": {
                    "kind": "svm",
                    "kernel": "rbf",
                    "gamma": 0.5,
                    "dual_coef": [1.0, -1.0],
                    "support_vectors": [[0.0, 0.0], [4.0, 4.0]],
                    "intercept": 0.0
                }
            }"#,
        ),
    );

    let model = classifier::load(&path).unwrap();

    assert_eq!(model.name(), "voice");
    assert_eq!(model.n_features(), 2);
    assert_eq!(
        model.predict(array![[0.2, 0.1], [3.8, 4.1]].view()).unwrap(),
        vec![1, 0]
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let path = scratch("absent.json", None);

    let err = classifier::load(&path).unwrap_err();
    assert!(matches!(err, ClassifierErr::Io(_)));
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let path = scratch("corrupt.json", Some("\u{80}\u{2}not an artifact"));

    let err = classifier::load(&path).unwrap_err();
    assert!(matches!(err, ClassifierErr::Parse(_)));
    assert!(err.to_string().starts_with("invalid artifact"));
}
