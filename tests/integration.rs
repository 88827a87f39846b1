//! Integration tests for the liquidation engine.
//!
//! This test suite covers:
//! - CTS and gratificación period segmentation
//! - BCRP statutory interest
//! - Per-worker liquidation from the bundled configuration
//! - Transcription into an in-memory sheet
//! - A full batch run over real `.xlsx` files
//! - Error cases

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use liquidation_engine::batch::BatchRunner;
use liquidation_engine::calculation::{
    bcrp_interest, cts_periods, gratificacion_periods, interest_report_at, liquidate_worker,
};
use liquidation_engine::config::{ConfigLoader, EngineConfig, RunConfig};
use liquidation_engine::error::LiquidationError;
use liquidation_engine::models::{MISSING_CODE, PeriodResult, WorkerRecord};
use liquidation_engine::roster::RosterReader;
use liquidation_engine::template::MemorySheet;

// =============================================================================
// Test Helpers
// =============================================================================

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn load_config() -> EngineConfig {
    ConfigLoader::load("./config/pe_liquidacion")
        .expect("Failed to load config")
        .into_config()
        .with_settlement_date(date(2025, 7, 23))
}

fn summary(periods: &[PeriodResult]) -> Vec<(String, u32, u32)> {
    periods
        .iter()
        .map(|p| (p.label(), p.months, p.days))
        .collect()
}

fn create_worker(name: &str, hire: Option<NaiveDate>, termination: Option<NaiveDate>) -> WorkerRecord {
    WorkerRecord {
        code: "40123456".to_string(),
        name: name.to_string(),
        position: "AUXILIAR".to_string(),
        hire_date: hire,
        termination_date: termination,
        base_salary: dec("1500"),
    }
}

fn scratch_dir(label: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("liquidar-it-{}-{}", label, uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

// =============================================================================
// SECTION 1: Period segmentation
// =============================================================================

#[test]
fn test_cts_periods_for_long_employment() {
    let periods = cts_periods(date(2021, 3, 15), date(2025, 7, 23));
    let rows = summary(&periods);

    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0], ("2020-11-01 al 2021-04-30".to_string(), 1, 16));
    for row in &rows[1..9] {
        assert_eq!((row.1, row.2), (6, 0), "{} should be a full semester", row.0);
    }
    assert_eq!(rows[9], ("2025-05-01 al 2025-10-31".to_string(), 2, 23));
}

#[test]
fn test_gratificacion_periods_for_long_employment() {
    let rows = summary(&gratificacion_periods(date(2021, 3, 15), date(2025, 7, 23)));

    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0], ("2021-01-01 al 2021-06-30".to_string(), 3, 16));
    assert_eq!(rows[9], ("2025-07-01 al 2025-12-31".to_string(), 0, 23));
}

#[test]
fn test_gratificacion_periods_mid_semester_hire() {
    let rows = summary(&gratificacion_periods(date(2022, 8, 10), date(2025, 7, 23)));

    assert_eq!(rows.len(), 7);
    assert_eq!(rows[0], ("2022-07-01 al 2022-12-31".to_string(), 4, 22));
}

#[test]
fn test_end_of_month_clamping() {
    let rows = summary(&cts_periods(date(2024, 1, 31), date(2024, 3, 30)));
    assert_eq!(rows, vec![("2023-11-01 al 2024-04-30".to_string(), 2, 0)]);
}

#[test]
fn test_single_day_employment() {
    let rows = summary(&cts_periods(date(2025, 10, 31), date(2025, 10, 31)));
    assert_eq!(rows, vec![("2025-05-01 al 2025-10-31".to_string(), 0, 1)]);
}

#[test]
fn test_cutoff_before_hire_yields_nothing() {
    assert!(cts_periods(date(2025, 8, 1), date(2025, 7, 31)).is_empty());
    assert!(gratificacion_periods(date(2025, 8, 1), date(2025, 7, 31)).is_empty());
}

// =============================================================================
// SECTION 2: Statutory interest
// =============================================================================

#[test]
fn test_interest_full_year() {
    assert_eq!(bcrp_interest(dec("1000.00"), "2023-01-01", "2023-12-31"), dec("27.11"));
}

#[test]
fn test_interest_inverted_range() {
    assert_eq!(bcrp_interest(dec("1000.00"), "2023-12-31", "2023-01-01"), dec("0.00"));
}

#[test]
fn test_interest_report_json_shape() {
    let report = interest_report_at(dec("1000.00"), "2023-01-01", Some("2023-12-31"), date(2030, 1, 1));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["elapsed_days"], 364);
    assert_eq!(json["interest"], "27.11");
    assert_eq!(json["total"], "1027.11");
    assert_eq!(json["end_date"], "2023-12-31");
}

// =============================================================================
// SECTION 3: Liquidation with the bundled configuration
// =============================================================================

#[test]
fn test_liquidation_terminated_worker() {
    let config = load_config();
    let worker = create_worker("QUISPE MAMANI ROSA", Some(date(2024, 11, 1)), Some(date(2025, 7, 23)));

    let liquidation = liquidate_worker(&worker, &config, date(2025, 7, 23));

    assert_eq!(liquidation.totals.cts, dec("435.29"));
    assert_eq!(liquidation.totals.gratificacion, dec("875.94"));
    assert_eq!(liquidation.totals.interest, dec("5.79"));
    assert_eq!(liquidation.totals.grand_total, dec("1317.02"));
}

#[test]
fn test_liquidation_serializes_amounts_as_strings() {
    let config = load_config();
    let worker = create_worker("QUISPE MAMANI ROSA", Some(date(2024, 11, 1)), Some(date(2025, 7, 23)));

    let liquidation = liquidate_worker(&worker, &config, date(2025, 7, 23));
    let json = serde_json::to_value(&liquidation).unwrap();

    assert_eq!(json["totals"]["grand_total"], "1317.02");
    assert_eq!(json["period_basis"], "legacy");
    assert_eq!(json["worker"]["hire_date"], "2024-11-01");
    assert_eq!(json["cts"][0]["period"]["months"], 6);
    assert_eq!(json["audit_trace"]["steps"][1]["rule_id"], "cts_accrual");
}

#[test]
fn test_liquidation_without_hire_date() {
    let config = load_config();
    let worker = create_worker("SIN FECHA", None, None);

    let liquidation = liquidate_worker(&worker, &config, date(2025, 7, 23));

    assert!(liquidation.cts.is_empty());
    assert!(liquidation.gratificaciones.is_empty());
    assert_eq!(liquidation.audit_trace.warnings[0].code, "MISSING_HIRE_DATE");
}

// =============================================================================
// SECTION 4: Roster to in-memory template
// =============================================================================

#[test]
fn test_roster_grid_to_memory_sheet() {
    let config = load_config();
    let run = config.run();

    let grid: Vec<Vec<String>> = vec![
        vec!["EMPRESA DEMO S.A.C."],
        vec!["PLANILLA"],
        vec![""],
        vec!["Cod. Trab.", "Apellidos y Nombres", "Cargo", "Fec. Ing.", "Fecha Cese", "Basico"],
        vec!["40123456.0", "QUISPE MAMANI ROSA", "AUXILIAR", "45597", "45861", "1500"],
        vec!["", "", "", "", "", ""],
        vec!["", "LUNA PEREZ ANA", "OPERARIA", "", "", "1200"],
    ]
    .into_iter()
    .map(|row| row.into_iter().map(String::from).collect())
    .collect();

    let workers = RosterReader::new(&run.columns, run.header_rows)
        .parse_rows(&grid)
        .unwrap();
    assert_eq!(workers.len(), 2);
    assert_eq!(workers[1].code, MISSING_CODE);

    let runner = BatchRunner::new(config.clone());

    let mut sheet = MemorySheet::new();
    let (liquidation, report) = runner.process_worker(&workers[0], &mut sheet).unwrap();
    assert!(report.is_complete());
    assert_eq!(liquidation.totals.grand_total, dec("1317.02"));
    assert_eq!(sheet.text("J17"), Some("DNI N°: 40123456"));
    assert_eq!(sheet.text("J22"), Some("del 01/11/2024 al 23/07/2025"));
    assert_eq!(sheet.number("S109"), Some(dec("297.92")));
    assert_eq!(sheet.text("M183"), Some("del 2024.07.01 al 2024.12.31"));

    let mut sheet = MemorySheet::new();
    let (liquidation, _) = runner.process_worker(&workers[1], &mut sheet).unwrap();
    assert_eq!(liquidation.totals.grand_total, Decimal::ZERO);
    assert_eq!(sheet.text("J17"), Some("DNI N°: SIN_CODIGO"));
    assert_eq!(sheet.text("J19"), Some("-"));
    assert_eq!(sheet.text("D105"), None);
}

// =============================================================================
// SECTION 5: Batch run over real workbooks
// =============================================================================

fn write_template(path: &Path) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();
    sheet.get_cell_mut("B2").set_value_string("LIQUIDACION DE BENEFICIOS SOCIALES");
    sheet.add_merge_cells("C106:G106");
    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

fn write_roster(path: &Path) {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();
    sheet.get_cell_mut((1, 1)).set_value_string("EMPRESA DEMO S.A.C.");

    let header = ["Cod. Trab.", "Apellidos y Nombres", "Cargo", "Fec. Ing.", "Fecha Cese", "Basico"];
    for (i, name) in header.iter().enumerate() {
        sheet.get_cell_mut((i as u32 + 1, 4)).set_value_string(*name);
    }

    let rows: [(f64, &str, &str, f64, Option<f64>, f64); 2] = [
        (40123456.0, "QUISPE MAMANI ROSA", "AUXILIAR", 45597.0, Some(45861.0), 1500.0),
        (40999888.0, "LUNA PEREZ ANA", "OPERARIA", 45658.0, None, 1200.0),
    ];
    for (offset, (code, name, position, hire, termination, salary)) in rows.iter().enumerate() {
        let row = 5 + offset as u32;
        sheet.get_cell_mut((1, row)).set_value_number(*code);
        sheet.get_cell_mut((2, row)).set_value_string(*name);
        sheet.get_cell_mut((3, row)).set_value_string(*position);
        sheet.get_cell_mut((4, row)).set_value_number(*hire);
        if let Some(termination) = termination {
            sheet.get_cell_mut((5, row)).set_value_number(*termination);
        }
        sheet.get_cell_mut((6, row)).set_value_number(*salary);
    }

    umya_spreadsheet::writer::xlsx::write(&book, path).unwrap();
}

fn xlsx_run_config(dir: &Path) -> EngineConfig {
    let base = load_config();
    let mut run = RunConfig::new(
        dir.join("planilla.xlsx"),
        dir.join("plantilla.xlsx"),
        dir.join("output"),
    );
    run.settlement_date = Some(date(2025, 7, 23));
    EngineConfig::new(run, base.remuneration().clone(), base.layout().clone())
}

#[test]
fn test_batch_run_writes_one_workbook_per_worker() {
    let dir = scratch_dir("batch");
    write_template(&dir.join("plantilla.xlsx"));
    write_roster(&dir.join("planilla.xlsx"));

    let summary = BatchRunner::new(xlsx_run_config(&dir)).run().unwrap();

    assert!(summary.is_success(), "failures: {:?}", summary.failures);
    assert_eq!(summary.generated.len(), 2);
    assert_eq!(summary.skipped_writes(), 2);

    let output = dir.join("output").join("Liquidacion_QUISPE_MAMANI_ROSA.xlsx");
    assert!(output.is_file());

    let book = umya_spreadsheet::reader::xlsx::read(&output).unwrap();
    let sheet = book.get_active_sheet();
    assert_eq!(sheet.get_value("B2"), "LIQUIDACION DE BENEFICIOS SOCIALES");
    assert_eq!(sheet.get_value("J16"), "QUISPE MAMANI ROSA");
    assert_eq!(sheet.get_value("J17"), "DNI N°: 40123456");
    assert_eq!(sheet.get_value("J20"), "23/07/2025");
    assert_eq!(sheet.get_value("D105"), "Por Meses Completos: 1 mer Tramo");
    assert_eq!(sheet.get_value("D106"), "");
    assert_eq!(dec(&sheet.get_value("S109")), dec("297.92"));
    assert_eq!(sheet.get_value("M183"), "del 2024.07.01 al 2024.12.31");

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_unwritable_output_fails_only_that_worker() {
    let dir = scratch_dir("locked");
    write_template(&dir.join("plantilla.xlsx"));
    write_roster(&dir.join("planilla.xlsx"));

    // A directory where the workbook should go makes the save fail
    std::fs::create_dir_all(dir.join("output").join("Liquidacion_LUNA_PEREZ_ANA.xlsx")).unwrap();

    let summary = BatchRunner::new(xlsx_run_config(&dir)).run().unwrap();

    assert_eq!(summary.generated.len(), 1);
    assert_eq!(summary.generated[0].worker, "QUISPE MAMANI ROSA");
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].worker, "LUNA PEREZ ANA");
    assert!(!summary.is_success());

    std::fs::remove_dir_all(dir).ok();
}

// =============================================================================
// SECTION 6: Error cases
// =============================================================================

#[test]
fn test_missing_column_aborts_run() {
    let dir = scratch_dir("column");
    write_template(&dir.join("plantilla.xlsx"));
    write_roster(&dir.join("planilla.xlsx"));

    let base = xlsx_run_config(&dir);
    let mut run = base.run().clone();
    run.columns.base_salary = "Sueldo Basico".to_string();
    let config = EngineConfig::new(run, base.remuneration().clone(), base.layout().clone());

    match BatchRunner::new(config).run() {
        Err(LiquidationError::MissingColumn { column }) => assert_eq!(column, "Sueldo Basico"),
        other => panic!("Expected MissingColumn, got {:?}", other.map(|s| s.generated.len())),
    }
    assert!(!dir.join("output").exists());

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_template_aborts_run() {
    let dir = scratch_dir("template");
    write_roster(&dir.join("planilla.xlsx"));

    assert!(matches!(
        BatchRunner::new(xlsx_run_config(&dir)).run(),
        Err(LiquidationError::TemplateNotFound { .. })
    ));

    std::fs::remove_dir_all(dir).ok();
}

#[test]
fn test_missing_config_dir() {
    assert!(matches!(
        ConfigLoader::load("./config/does_not_exist"),
        Err(LiquidationError::ConfigNotFound { .. })
    ));
}
