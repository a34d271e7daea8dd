//! Integration tests for reading named sheets

use crate::common::{read_sheet, CliTestRunner};
use keymerge::KeymergeError;

fn two_sheet_workbook(runner: &CliTestRunner, name: &str) -> std::path::PathBuf {
    runner.fixture().create_xlsx_sheets(
        name,
        &[
            ("Resumo", vec![vec!["Relatorio"], vec!["gerado em 2024"]]),
            (
                "Funcionarios",
                vec![vec!["MATRICULA", "NOME"], vec!["1", "Ana"], vec!["2", "Bia"]],
            ),
        ],
        false,
    )
}

#[test]
fn test_named_sheet_is_loaded() {
    let runner = CliTestRunner::new().unwrap();
    let left = two_sheet_workbook(&runner, "left.xlsx");
    let right = runner.fixture().create_xlsx("right.xlsx", &[vec!["MATRICULA", "SETOR"], vec!["1", "TI"]]);
    let output = runner.fixture().output_path("out.xlsx");

    let report = runner.expect_success(&[
        "--left", left.to_str().unwrap(),
        "--left-sheet", "Funcionarios",
        "--right", right.to_str().unwrap(),
        "--output", output.to_str().unwrap(),
    ]);

    assert_eq!(report.rows, 2);
    let merge = read_sheet(&output, "merge");
    assert_eq!(merge[1], vec!["1", "Ana", "TI", "both"]);
}

#[test]
fn test_default_sheet_is_first_sheet() {
    let runner = CliTestRunner::new().unwrap();
    let left = two_sheet_workbook(&runner, "left.xlsx");
    let right = runner.fixture().create_xlsx("right.xlsx", &[vec!["MATRICULA"], vec!["1"]]);

    // The first sheet has no MATRICULA column
    let error = runner.expect_failure(&[
        "--left", left.to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--output", runner.fixture().output_path("out.xlsx").to_str().unwrap(),
    ]);

    match error {
        KeymergeError::MissingKeyColumn { side, available, .. } => {
            assert_eq!(side, "left");
            assert_eq!(available, "Relatorio");
        }
        other => panic!("Expected MissingKeyColumn, got {:?}", other),
    }
}

#[test]
fn test_unknown_sheet_is_read_error() {
    let runner = CliTestRunner::new().unwrap();
    let left = two_sheet_workbook(&runner, "left.xlsx");
    let right = runner.fixture().create_xlsx("right.xlsx", &[vec!["MATRICULA"], vec!["1"]]);

    let error = runner.expect_failure(&[
        "--left", left.to_str().unwrap(),
        "--right", right.to_str().unwrap(),
        "--right-sheet", "Inexistente",
        "--output", runner.fixture().output_path("out.xlsx").to_str().unwrap(),
    ]);

    assert!(matches!(error, KeymergeError::Read { .. }));
    let message = error.to_string();
    assert!(message.contains("right.xlsx"));
    assert!(message.contains("Inexistente"));
}
