use mrz_synth::core::verify::verify_lines;
use mrz_synth::domain::model::GroundTruth;
use mrz_synth::{BatchEngine, LocalStorage, PassportPipeline, TomlConfig};
use tempfile::TempDir;

fn toml_config(output_path: &str, count: usize, formats: &str) -> TomlConfig {
    let content = format!(
        r#"
[batch]
name = "integration"

[generator]
count = {count}
seed = 99
as_of = "2025-06-01"

[mrz]
overflow = "reject"

[output]
path = "{output_path}"
formats = [{formats}]
"#
    );
    TomlConfig::from_toml_str(&content).unwrap()
}

#[test]
fn test_end_to_end_batch_writes_verified_ground_truth() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let config = toml_config(&output_path, 20, r#""json", "csv""#);
    let storage = LocalStorage::new(output_path.clone());
    let pipeline = PassportPipeline::new(storage, config).unwrap();
    let engine = BatchEngine::new(pipeline);

    let result = engine.run().unwrap();
    assert!(result.ends_with("groundtruth.json"));

    let json_path = temp_dir.path().join("groundtruth.json");
    let ground_truth: GroundTruth =
        serde_json::from_slice(&std::fs::read(&json_path).unwrap()).unwrap();
    assert_eq!(ground_truth.len(), 20);

    for (id, entry) in &ground_truth {
        assert!(id.starts_with("passport_"));
        assert!(entry.date_of_birth < entry.date_of_issue);
        assert!(entry.date_of_issue < entry.date_of_expiry);
        let report = verify_lines(&entry.mrz()).unwrap();
        assert!(report.is_valid(), "{} failed verification", id);
        assert!(entry.mrz_line1.starts_with(&format!("P<{}", entry.nationality_code)));
        assert_eq!(&entry.mrz_line2[10..13], entry.nationality_code);
    }

    let mut reader = csv::Reader::from_path(temp_dir.path().join("groundtruth.csv")).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(&headers[0], "document_id");
    assert_eq!(&headers[11], "mrz_line2");
    assert_eq!(reader.records().count(), 20);
}

#[test]
fn test_same_seed_produces_identical_datasets() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for dir in [&first, &second] {
        let path = dir.path().to_str().unwrap().to_string();
        let pipeline =
            PassportPipeline::new(LocalStorage::new(path.clone()), toml_config(&path, 5, r#""json""#))
                .unwrap();
        BatchEngine::new(pipeline).run().unwrap();
    }

    let a = std::fs::read(first.path().join("groundtruth.json")).unwrap();
    let b = std::fs::read(second.path().join("groundtruth.json")).unwrap();
    assert_eq!(a, b);
    assert!(!second.path().join("groundtruth.csv").exists());
}
