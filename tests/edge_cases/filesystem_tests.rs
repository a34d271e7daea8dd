//! Edge case tests for filesystem scenarios

use crate::common::{assertions, sample_data, CliTestRunner};
use keymerge::KeymergeError;

#[test]
fn test_missing_left_file() {
    let runner = CliTestRunner::new().unwrap();
    let right = runner.fixture().create_xlsx("right.xlsx", &sample_data::right_employees());
    let missing = runner.fixture().root().join("nope.xlsx");

    let error = runner.expect_failure(&[
        "--left", missing.to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--output", runner.fixture().output_path("out.xlsx").to_str().unwrap(),
    ]);

    match error {
        KeymergeError::FileNotFound { path } => assert_eq!(path, missing),
        other => panic!("Expected FileNotFound, got {:?}", other),
    }
}

#[test]
fn test_missing_right_file() {
    let runner = CliTestRunner::new().unwrap();
    let left = runner.fixture().create_xlsx("left.xlsx", &sample_data::left_employees());
    let missing = runner.fixture().root().join("nope.xlsx");

    let error = runner.expect_failure(&[
        "--left", left.to_str().unwrap(),
        "--right", missing.to_str().unwrap(),
        "--output", runner.fixture().output_path("out.xlsx").to_str().unwrap(),
    ]);

    assert!(matches!(error, KeymergeError::FileNotFound { .. }));
    assert!(error.to_string().contains("nope.xlsx"));
}

#[test]
fn test_directory_as_input_is_rejected() {
    let runner = CliTestRunner::new().unwrap();
    let right = runner.fixture().create_xlsx("right.xlsx", &sample_data::right_employees());

    let error = runner.expect_failure(&[
        "--left", runner.fixture().root().to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--output", runner.fixture().output_path("out.xlsx").to_str().unwrap(),
    ]);

    assert!(matches!(error, KeymergeError::Read { .. }));
}

#[test]
fn test_output_directories_are_created() {
    let runner = CliTestRunner::new().unwrap();
    let left = runner.fixture().create_xlsx("left.xlsx", &sample_data::left_employees());
    let right = runner.fixture().create_xlsx("right.xlsx", &sample_data::right_employees());
    let output = runner
        .fixture()
        .root()
        .join("resultados")
        .join("2024")
        .join("merge_result.xlsx");

    runner.expect_success(&[
        "--left", left.to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--output", output.to_str().unwrap(),
    ]);

    assertions::assert_file_exists_and_not_empty(&output);
}

#[test]
fn test_output_path_occupied_by_directory() {
    let runner = CliTestRunner::new().unwrap();
    let left = runner.fixture().create_xlsx("left.xlsx", &sample_data::left_employees());
    let right = runner.fixture().create_xlsx("right.xlsx", &sample_data::right_employees());
    let output = runner.fixture().output_path("occupied.xlsx");
    std::fs::create_dir(&output).unwrap();

    let error = runner.expect_failure(&[
        "--left", left.to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--output", output.to_str().unwrap(),
    ]);

    assert!(matches!(error, KeymergeError::Write { .. }));
    assert!(error.to_string().contains("occupied.xlsx"));
}

#[test]
fn test_existing_output_is_overwritten() {
    let runner = CliTestRunner::new().unwrap();
    let left = runner.fixture().create_xlsx("left.xlsx", &sample_data::left_employees());
    let right = runner.fixture().create_xlsx("right.xlsx", &sample_data::right_employees());
    let output = runner.fixture().output_path("out.xlsx");
    std::fs::write(&output, b"stale").unwrap();

    let report = runner.expect_success(&[
        "--left", left.to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--output", output.to_str().unwrap(),
    ]);

    assert_eq!(report.rows, 3);
    assert!(std::fs::metadata(&output).unwrap().len() > 100);
}
