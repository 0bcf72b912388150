//! Report artifacts: filtered spreadsheet, PDF summary, charts and the chart bundle.

mod bundle;
mod charts;
mod pdf;
mod xlsx;

pub use bundle::{chart_bundle, BUNDLE_FILE_NAME};
pub use charts::{bar_chart, line_chart, pie_chart, render_all, svg_to_png, ChartKind};
pub use pdf::{export_pdf, ReportSummary, PDF_FILE_NAME, REPORT_TITLE};
pub use xlsx::{export_xlsx, XLSX_CONTENT_TYPE, XLSX_FILE_NAME};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Failed to write spreadsheet: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error("Failed to write PDF: {0}")]
    Pdf(String),
    #[error("Invalid chart SVG: {0}")]
    Svg(String),
    #[error("Failed to render chart: {0}")]
    Render(String),
    #[error("Failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
