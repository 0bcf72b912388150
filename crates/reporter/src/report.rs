use mailmind_core::{
    export::{export_pdf, ReportSummary},
    logs::{load_period, PeriodMode, PeriodSelector},
};
use slog::{info, Logger};
use std::path::PathBuf;
use time::Date;

use crate::Error;

/// A summary ready to be mailed
pub struct BuiltReport {
    pub summary: ReportSummary,
    pub pdf: Vec<u8>,
}

/// Load the logs of the period around `today` and render the PDF summary.
pub async fn build_report(
    logger: &Logger,
    logs_dir: PathBuf,
    mode: PeriodMode,
    today: Date,
) -> Result<BuiltReport, Error> {
    let selector = PeriodSelector::new(mode, today);
    let report = tokio::task::spawn_blocking(move || {
        let table = load_period(&logs_dir, &selector);
        let summary = ReportSummary::new(today, &selector, &table.records);
        let pdf = export_pdf(&summary)?;
        Ok::<_, Error>(BuiltReport { summary, pdf })
    })
    .await??;

    info!(
        logger,
        "built report for {}: {} emails, {} complaints",
        report.summary.period_label,
        report.summary.summary.total,
        report.summary.summary.complaints
    );
    Ok(report)
}
