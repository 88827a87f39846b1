//! Roster-to-template transcription.
//!
//! Writes a [`WorkerLiquidation`] into a liquidation template: the two
//! header blocks at fixed cells, then one CTS block and one gratificación
//! block per period, each advancing by the configured row stride.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{BlockLayout, HeaderLayout, LayoutConfig};
use crate::error::LiquidationResult;
use crate::models::{CtsAccrual, GratificacionAccrual, Remuneration, WorkerLiquidation};

use super::cell::CellRef;
use super::sink::CellSink;
use super::writer::{SheetWriter, WriteReport};

/// Date format used for every date written to the sheet.
pub const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

/// Written in place of a missing date.
pub const MISSING_DATE: &str = "-";

const COL_D: u32 = 4;
const COL_F: u32 = 6;
const COL_H: u32 = 8;
const COL_J: u32 = 10;
const COL_K: u32 = 11;
const COL_L: u32 = 12;
const COL_M: u32 = 13;
const COL_S: u32 = 19;

fn at(col: u32, row: u32) -> CellRef {
    CellRef { col, row }
}

fn sheet_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(SHEET_DATE_FORMAT).to_string())
        .unwrap_or_else(|| MISSING_DATE.to_string())
}

fn money(value: Decimal) -> Decimal {
    value.round_dp(2)
}

/// Static text shared by a transcription run.
#[derive(Debug, Clone)]
pub struct TranscriptionContext<'a> {
    /// Template layout.
    pub layout: &'a LayoutConfig,
    /// Reason the employment ended.
    pub termination_reason: &'a str,
    /// Extraordinary bonus rate, shown as a percentage.
    pub extraordinary_bonus_rate: Decimal,
}

/// Writes the whole liquidation of one worker into `sink`.
///
/// Returns the report of every write; cells covered by merged ranges are
/// listed there instead of being written.
pub fn transcribe<S: CellSink + ?Sized>(
    liquidation: &WorkerLiquidation,
    context: &TranscriptionContext<'_>,
    sink: &mut S,
) -> LiquidationResult<WriteReport> {
    let layout = context.layout;
    let mut writer = SheetWriter::new(sink, layout.font.clone());

    write_header(
        &mut writer,
        &layout.current_header,
        liquidation,
        &liquidation.current_pay,
        context.termination_reason,
    )?;
    write_header(
        &mut writer,
        &layout.legacy_header,
        liquidation,
        &liquidation.legacy_pay,
        context.termination_reason,
    )?;

    for (index, accrual) in liquidation.cts.iter().enumerate() {
        write_cts_block(&mut writer, &layout.cts, index, accrual)?;
    }

    let bonus_percent = (context.extraordinary_bonus_rate * Decimal::ONE_HUNDRED).normalize();
    for (index, accrual) in liquidation.gratificaciones.iter().enumerate() {
        write_gratificacion_block(&mut writer, &layout.gratificacion, index, accrual, bonus_percent)?;
    }

    Ok(writer.finish())
}

fn write_header<S: CellSink + ?Sized>(
    writer: &mut SheetWriter<'_, S>,
    header: &HeaderLayout,
    liquidation: &WorkerLiquidation,
    pay: &Remuneration,
    termination_reason: &str,
) -> LiquidationResult<()> {
    let worker = &liquidation.worker;
    let hire = sheet_date(worker.hire_date);
    let termination = sheet_date(worker.termination_date);

    writer.write(header.name, worker.name.as_str())?;
    writer.write(header.document, format!("DNI N°: {}", worker.code))?;
    writer.write(header.position, worker.position.as_str())?;
    writer.write(header.hire_date, hire.as_str())?;
    writer.write(header.termination_date, termination.as_str())?;
    writer.write(header.termination_reason, termination_reason)?;
    writer.write(header.service_period, format!("del {} al {}", hire, termination))?;

    writer.write(header.salary, money(pay.salary))?;
    writer.write(header.bonus, money(pay.bonus))?;
    writer.write(header.bonus_sixth, money(pay.bonus_sixth()))?;
    writer.write(header.computable, money(pay.computable()))?;
    if let Some(summary) = header.computable_summary {
        writer.write(summary, money(pay.computable()))?;
    }

    Ok(())
}

fn write_cts_block<S: CellSink + ?Sized>(
    writer: &mut SheetWriter<'_, S>,
    block: &BlockLayout,
    index: usize,
    accrual: &CtsAccrual,
) -> LiquidationResult<()> {
    let r = block.row_for(index);
    let period = &accrual.period;

    writer.write(at(COL_D, r), format!("Por Meses Completos: {} mer Tramo", index + 1))?;

    writer.write(at(COL_D, r + 1), format!("{} / 12", accrual.half_computable.trunc()))?;
    writer.write(at(COL_H, r + 1), money(accrual.monthly_rate))?;
    writer.write(at(COL_J, r + 1), format!("{} meses", period.months))?;
    writer.write(at(COL_S, r + 1), money(accrual.months_amount))?;

    writer.write(at(COL_D, r + 2), "Por Días")?;

    writer.write(at(COL_D, r + 3), format!("{:.1} / 30", accrual.monthly_rate.round_dp(1)))?;
    writer.write(at(COL_H, r + 3), money(accrual.daily_rate))?;
    writer.write(at(COL_J, r + 3), format!("{} días", period.days))?;
    writer.write(at(COL_S, r + 3), money(accrual.days_amount))?;

    writer.write(at(COL_M, r + 4), "TOTAL CTS")?;
    writer.write(at(COL_S, r + 4), accrual.total)?;
    writer.write(at(COL_M, r + 5), "INTERES LABORAL")?;
    writer.write(at(COL_S, r + 5), accrual.interest)?;
    writer.write(at(COL_M, r + 6), "Total CTS, Interes Laboral")?;
    writer.write(at(COL_S, r + 6), accrual.total_with_interest)?;

    Ok(())
}

fn write_gratificacion_block<S: CellSink + ?Sized>(
    writer: &mut SheetWriter<'_, S>,
    block: &BlockLayout,
    index: usize,
    accrual: &GratificacionAccrual,
    bonus_percent: Decimal,
) -> LiquidationResult<()> {
    let r = block.row_for(index);
    let period = &accrual.period;

    writer.write(at(COL_M, r), format!("del {}", period.label().replace('-', ".")))?;
    writer.write(at(COL_D, r), format!("Por Meses Completos: {} mer Tramo", index + 1))?;

    writer.write(
        at(COL_D, r + 1),
        format!("{} / 6", accrual.gratification.round_dp(2).normalize()),
    )?;
    writer.write(at(COL_H, r + 1), money(accrual.monthly_rate))?;
    writer.write(at(COL_J, r + 1), format!("{} meses", period.months))?;
    writer.write(at(COL_S, r + 1), money(accrual.months_amount))?;

    writer.write(at(COL_D, r + 2), "Por Días")?;

    writer.write(at(COL_D, r + 3), format!("{:.1} / 30", accrual.monthly_rate.round_dp(1)))?;
    writer.write(at(COL_H, r + 3), money(accrual.daily_rate))?;
    writer.write(at(COL_J, r + 3), format!("{} días", period.days))?;
    writer.write(at(COL_S, r + 3), money(accrual.days_amount))?;

    writer.write(at(COL_M, r + 4), "TOTAL GRATIFICACION")?;
    writer.write(at(COL_S, r + 4), accrual.total)?;

    writer.write(at(COL_D, r + 5), "BONIFICACION EXTRAORDINARIA:")?;
    writer.write(at(COL_F, r + 6), "Ley Nº 29351")?;
    writer.write(at(COL_J, r + 6), "*")?;
    writer.write(at(COL_K, r + 6), bonus_percent.to_string())?;
    writer.write(at(COL_L, r + 6), "%")?;
    writer.write(at(COL_M, r + 6), "TOTAL BONIF. EXTRAORD.")?;
    writer.write(at(COL_S, r + 6), accrual.extraordinary_bonus)?;

    writer.write(at(COL_M, r + 7), "TOT GRATIF, MAS BONIF")?;
    writer.write(at(COL_S, r + 7), accrual.total_with_bonus)?;
    writer.write(at(COL_M, r + 8), "INTERES LABORAL")?;
    writer.write(at(COL_S, r + 8), accrual.interest)?;
    writer.write(at(COL_M, r + 9), "SUMATORIA TOTAL DE GRATIF. INTERES LABORAL")?;
    writer.write(at(COL_S, r + 9), accrual.grand_total)?;

    Ok(())
}

/// The output file name for a worker: `Liquidacion_<name>.xlsx`.
///
/// Spaces become underscores and characters that are not valid in file
/// names are dropped.
///
/// # Example
///
/// ```
/// use liquidation_engine::template::output_file_name;
///
/// assert_eq!(
///     output_file_name("QUISPE MAMANI, ROSA"),
///     "Liquidacion_QUISPE_MAMANI,_ROSA.xlsx"
/// );
/// assert_eq!(output_file_name("A/B: C"), "Liquidacion_AB_C.xlsx");
/// ```
pub fn output_file_name(worker_name: &str) -> String {
    let sanitized: String = worker_name
        .trim()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .filter(|c| !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    format!("Liquidacion_{}.xlsx", sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::liquidate_worker;
    use crate::config::{EngineConfig, RemunerationConfig, RunConfig};
    use crate::models::WorkerRecord;
    use crate::template::MemorySheet;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_config() -> EngineConfig {
        EngineConfig::new(
            RunConfig::new("planilla.xlsx", "plantilla.xlsx", "salida"),
            RemunerationConfig::default(),
            LayoutConfig::default(),
        )
    }

    fn create_liquidation(termination: Option<NaiveDate>) -> WorkerLiquidation {
        let worker = WorkerRecord {
            code: "40123456".to_string(),
            name: "QUISPE MAMANI ROSA".to_string(),
            position: "AUXILIAR".to_string(),
            hire_date: Some(date(2024, 11, 1)),
            termination_date: termination,
            base_salary: dec("1500"),
        };
        liquidate_worker(&worker, &create_config(), date(2025, 7, 23))
    }

    fn transcribe_into(sheet: &mut MemorySheet, liquidation: &WorkerLiquidation) -> WriteReport {
        let config = create_config();
        let context = TranscriptionContext {
            layout: config.layout(),
            termination_reason: &config.run().termination_reason,
            extraordinary_bonus_rate: config.remuneration().extraordinary_bonus_rate,
        };
        transcribe(liquidation, &context, sheet).unwrap()
    }

    /// TR-001: header blocks
    #[test]
    fn test_tr_001_header_blocks() {
        let mut sheet = MemorySheet::new();
        let report = transcribe_into(&mut sheet, &create_liquidation(Some(date(2025, 7, 23))));
        assert!(report.is_complete());

        assert_eq!(sheet.text("J16"), Some("QUISPE MAMANI ROSA"));
        assert_eq!(sheet.text("J17"), Some("DNI N°: 40123456"));
        assert_eq!(sheet.text("J18"), Some("AUXILIAR"));
        assert_eq!(sheet.text("J19"), Some("01/11/2024"));
        assert_eq!(sheet.text("J20"), Some("23/07/2025"));
        assert_eq!(sheet.text("J21"), Some("EXTINCIÓN O LIQUIDACIÓN DEL EMPLEADOR"));
        assert_eq!(sheet.text("J22"), Some("del 01/11/2024 al 23/07/2025"));
        assert_eq!(sheet.number("K23"), Some(dec("1500")));
        assert_eq!(sheet.number("K24"), Some(dec("520")));
        assert_eq!(sheet.number("P24"), Some(dec("86.67")));
        assert_eq!(sheet.number("K25"), Some(dec("1586.67")));

        assert_eq!(sheet.text("J93"), Some("QUISPE MAMANI ROSA"));
        assert_eq!(sheet.number("K100"), Some(dec("1100")));
        assert_eq!(sheet.number("K101"), Some(dec("550")));
        assert_eq!(sheet.number("P101"), Some(dec("91.67")));
        assert_eq!(sheet.number("K102"), Some(dec("1191.67")));
        assert_eq!(sheet.number("K95"), Some(dec("1191.67")));
    }

    /// TR-002: CTS blocks advance by seven rows
    #[test]
    fn test_tr_002_cts_blocks() {
        let mut sheet = MemorySheet::new();
        transcribe_into(&mut sheet, &create_liquidation(Some(date(2025, 7, 23))));

        assert_eq!(sheet.text("D105"), Some("Por Meses Completos: 1 mer Tramo"));
        assert_eq!(sheet.text("D106"), Some("595 / 12"));
        assert_eq!(sheet.number("H106"), Some(dec("49.65")));
        assert_eq!(sheet.text("J106"), Some("6 meses"));
        assert_eq!(sheet.text("D107"), Some("Por Días"));
        assert_eq!(sheet.text("D108"), Some("49.7 / 30"));
        assert_eq!(sheet.text("J108"), Some("0 días"));
        assert_eq!(sheet.number("S109"), Some(dec("297.92")));
        assert_eq!(sheet.text("M109"), Some("TOTAL CTS"));
        assert_eq!(sheet.number("S110"), Some(dec("1.82")));
        assert_eq!(sheet.number("S111"), Some(dec("299.74")));

        assert_eq!(sheet.text("D112"), Some("Por Meses Completos: 2 mer Tramo"));
        assert_eq!(sheet.text("J113"), Some("2 meses"));
        assert_eq!(sheet.text("J115"), Some("23 días"));
        assert_eq!(sheet.number("S116"), Some(dec("137.37")));
        assert_eq!(sheet.text("D119"), None);
    }

    /// TR-003: gratificación blocks advance by eleven rows
    #[test]
    fn test_tr_003_gratificacion_blocks() {
        let mut sheet = MemorySheet::new();
        transcribe_into(&mut sheet, &create_liquidation(Some(date(2025, 7, 23))));

        assert_eq!(sheet.text("M183"), Some("del 2024.07.01 al 2024.12.31"));
        assert_eq!(sheet.text("D184"), Some("550 / 6"));
        assert_eq!(sheet.number("H184"), Some(dec("91.67")));
        assert_eq!(sheet.text("J184"), Some("2 meses"));
        assert_eq!(sheet.number("S187"), Some(dec("183.33")));
        assert_eq!(sheet.text("D188"), Some("BONIFICACION EXTRAORDINARIA:"));
        assert_eq!(sheet.text("F189"), Some("Ley Nº 29351"));
        assert_eq!(sheet.text("K189"), Some("9"));
        assert_eq!(sheet.number("S189"), Some(dec("16.50")));
        assert_eq!(sheet.number("S190"), Some(dec("199.83")));
        assert_eq!(sheet.number("S191"), Some(dec("3.00")));
        assert_eq!(sheet.number("S192"), Some(dec("202.83")));

        assert_eq!(sheet.text("M194"), Some("del 2025.01.01 al 2025.06.30"));
        assert_eq!(sheet.text("M205"), Some("del 2025.07.01 al 2025.12.31"));
        assert_eq!(sheet.text("J208"), Some("23 días"));
        assert_eq!(sheet.text("M216"), None);
    }

    /// TR-004: merged targets are reported, the rest still lands
    #[test]
    fn test_tr_004_merged_cells_reported() {
        let mut sheet = MemorySheet::with_merged(&["D105:G105", "C106:G106", "M109:R109"]).unwrap();
        let report = transcribe_into(&mut sheet, &create_liquidation(Some(date(2025, 7, 23))));

        let skipped: Vec<_> = report.skipped.iter().map(|s| s.cell.as_str()).collect();
        assert_eq!(skipped, vec!["D106"]);
        assert_eq!(report.skipped[0].range, "C106:G106");
        assert_eq!(sheet.text("D105"), Some("Por Meses Completos: 1 mer Tramo"));
        assert_eq!(sheet.text("D106"), None);
        assert_eq!(sheet.text("M109"), Some("TOTAL CTS"));
    }

    #[test]
    fn test_missing_termination_date_written_as_dash() {
        let mut sheet = MemorySheet::new();
        transcribe_into(&mut sheet, &create_liquidation(None));

        assert_eq!(sheet.text("J20"), Some("-"));
        assert_eq!(sheet.text("J22"), Some("del 01/11/2024 al -"));
    }

    #[test]
    fn test_written_cells_use_layout_font() {
        let mut sheet = MemorySheet::new();
        transcribe_into(&mut sheet, &create_liquidation(None));

        let font = sheet.font("S109").unwrap();
        assert_eq!(font.name, "Arial Narrow");
        assert_eq!(font.size, 8.0);
    }

    #[test]
    fn test_output_file_name_replaces_spaces() {
        assert_eq!(
            output_file_name("QUISPE MAMANI ROSA"),
            "Liquidacion_QUISPE_MAMANI_ROSA.xlsx"
        );
        assert_eq!(output_file_name("  SIN_NOMBRE "), "Liquidacion_SIN_NOMBRE.xlsx");
    }
}
