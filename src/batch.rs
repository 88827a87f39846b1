//! Batch liquidation of a roster.
//!
//! A run loads the roster once, then for every worker opens a fresh copy of
//! the template, writes the liquidation into it and saves it under the
//! output directory. Configuration, roster and template problems abort the
//! run; a worker whose file cannot be saved is recorded and the run goes on.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::liquidate_worker;
use crate::config::EngineConfig;
use crate::error::{LiquidationError, LiquidationResult};
use crate::models::{LiquidationTotals, WorkerLiquidation, WorkerRecord};
use crate::roster::RosterReader;
use crate::template::{
    CellSink, TranscriptionContext, WriteReport, XlsxSheet, output_file_name, transcribe,
};

/// A workbook written for one worker.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedFile {
    /// Worker name.
    pub worker: String,
    /// Where the workbook was saved.
    pub path: PathBuf,
    /// The worker's totals.
    pub totals: LiquidationTotals,
    /// Writes that landed or were skipped.
    pub report: WriteReport,
}

/// A worker whose workbook could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerFailure {
    /// Worker name.
    pub worker: String,
    /// What went wrong.
    pub message: String,
}

/// The outcome of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    /// Correlation id of the run.
    pub run_id: Uuid,
    /// The date interest ran up to.
    pub settlement_date: NaiveDate,
    /// Workbooks written.
    pub generated: Vec<GeneratedFile>,
    /// Workers that failed.
    pub failures: Vec<WorkerFailure>,
}

impl BatchSummary {
    /// Returns true if every worker produced a workbook.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of skipped cell writes across all workbooks.
    pub fn skipped_writes(&self) -> usize {
        self.generated.iter().map(|g| g.report.skipped.len()).sum()
    }
}

/// Runs a liquidation batch for one configuration.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: EngineConfig,
    run_id: Uuid,
    settlement_date: NaiveDate,
}

impl BatchRunner {
    /// Creates a runner. The settlement date is the configured one, or today.
    pub fn new(config: EngineConfig) -> Self {
        let settlement_date = config
            .run()
            .settlement_date
            .unwrap_or_else(|| Local::now().date_naive());
        Self {
            config,
            run_id: Uuid::new_v4(),
            settlement_date,
        }
    }

    /// The correlation id of this run.
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// The date interest runs up to.
    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    /// Reads the roster and writes one workbook per worker.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if the roster or template is missing,
    /// a roster column is missing, or the output directory cannot be created.
    pub fn run(&self) -> LiquidationResult<BatchSummary> {
        let run = self.config.run();
        info!(run_id = %self.run_id, roster = %run.roster.display(), "Starting liquidation run");

        let workers = RosterReader::new(&run.columns, run.header_rows).read_path(&run.roster)?;
        info!(run_id = %self.run_id, workers = workers.len(), "Roster loaded");

        self.run_workers(&workers)
    }

    /// Writes one workbook per worker in `workers`.
    pub fn run_workers(&self, workers: &[WorkerRecord]) -> LiquidationResult<BatchSummary> {
        let run = self.config.run();

        if !run.template.is_file() {
            return Err(LiquidationError::TemplateNotFound {
                path: run.template.display().to_string(),
            });
        }

        fs::create_dir_all(&run.output_dir).map_err(|e| LiquidationError::OutputDirectory {
            path: run.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut summary = BatchSummary {
            run_id: self.run_id,
            settlement_date: self.settlement_date,
            generated: Vec::new(),
            failures: Vec::new(),
        };

        for worker in workers {
            match self.write_workbook(worker) {
                Ok(generated) => {
                    info!(
                        run_id = %self.run_id,
                        worker = %worker.name,
                        file = %generated.path.display(),
                        grand_total = %generated.totals.grand_total,
                        "Workbook generated"
                    );
                    summary.generated.push(generated);
                }
                Err(err) => {
                    error!(run_id = %self.run_id, worker = %worker.name, error = %err, "Workbook not saved");
                    summary.failures.push(WorkerFailure {
                        worker: worker.name.clone(),
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            run_id = %self.run_id,
            generated = summary.generated.len(),
            failed = summary.failures.len(),
            "Liquidation run finished"
        );
        Ok(summary)
    }

    /// Liquidates `worker` and writes it into `sink`.
    pub fn process_worker<S: CellSink + ?Sized>(
        &self,
        worker: &WorkerRecord,
        sink: &mut S,
    ) -> LiquidationResult<(WorkerLiquidation, WriteReport)> {
        let liquidation = liquidate_worker(worker, &self.config, self.settlement_date);

        let context = TranscriptionContext {
            layout: self.config.layout(),
            termination_reason: &self.config.run().termination_reason,
            extraordinary_bonus_rate: self.config.remuneration().extraordinary_bonus_rate,
        };
        let report = transcribe(&liquidation, &context, sink)?;

        for skipped in &report.skipped {
            warn!(
                run_id = %self.run_id,
                worker = %worker.name,
                cell = %skipped.cell,
                range = %skipped.range,
                "Cell inside merged range not written"
            );
        }

        Ok((liquidation, report))
    }

    fn write_workbook(&self, worker: &WorkerRecord) -> LiquidationResult<GeneratedFile> {
        let run = self.config.run();
        let mut sheet = XlsxSheet::open(&run.template)?;

        let (liquidation, report) = self.process_worker(worker, &mut sheet)?;

        let path = run.output_dir.join(output_file_name(&worker.name));
        sheet.save(&path)?;

        Ok(GeneratedFile {
            worker: worker.name.clone(),
            path,
            totals: liquidation.totals,
            report,
        })
    }
}
