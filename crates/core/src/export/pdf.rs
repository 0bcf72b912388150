use printpdf::{BuiltinFont, Mm, PdfDocument};
use time::Date;

use super::Error;
use crate::logs::{LogRecord, PeriodSelector};
use crate::stats::Summary;

pub const PDF_FILE_NAME: &str = "rapport.pdf";
pub const REPORT_TITLE: &str = "MailMind Rapport";

/// Everything printed on the summary report
#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub generated_on: Date,
    pub period_label: String,
    pub summary: Summary,
}

impl ReportSummary {
    pub fn new(generated_on: Date, selector: &PeriodSelector, records: &[LogRecord]) -> Self {
        Self {
            generated_on,
            period_label: selector.report_label(),
            summary: Summary::from_records(records),
        }
    }

    /// Body lines below the title, in print order
    pub fn lines(&self) -> Vec<String> {
        let s = &self.summary;
        let mut lines = vec![
            format!("Datum: {}", self.generated_on),
            format!("Periode: {}", self.period_label),
            String::new(),
            format!("Totaal e-mails: {}", s.total),
            format!("AI beantwoord: {} ({:.0}%)", s.ai_count(), s.answered_pct),
            format!("Fallbacks: {} ({:.0}%)", s.fallbacks, s.fallback_pct),
            format!("Klachten: {}", s.complaints),
        ];
        let alerts = s.alerts();
        if !alerts.is_empty() {
            lines.push(String::new());
            lines.extend(alerts.iter().map(|a| format!("Let op: {}", a.report_message())));
        }
        lines
    }

    pub fn email_subject(&self) -> String {
        format!("{} - {}", REPORT_TITLE, self.generated_on)
    }
}

/// Render a one-page A4 summary.
pub fn export_pdf(report: &ReportSummary) -> Result<Vec<u8>, Error> {
    let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page).get_layer(layer);

    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Pdf(e.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Pdf(e.to_string()))?;

    // Helvetica bold at 16pt is roughly 3mm per glyph
    let title_width = REPORT_TITLE.len() as f32 * 3.0;
    layer.use_text(
        REPORT_TITLE,
        16.0,
        Mm((210.0 - title_width) / 2.0),
        Mm(277.0),
        &bold,
    );

    let mut y = 262.0;
    for line in report.lines() {
        if !line.is_empty() {
            layer.use_text(line, 12.0, Mm(20.0), Mm(y), &regular);
        }
        y -= 8.0;
    }

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}
