//! SVG charts for the dashboard and PNG rendering for downloads.

use std::fmt::Write;
use std::sync::{Arc, OnceLock};

use resvg::usvg::{self, fontdb};

use super::Error;
use crate::logs::{LogRecord, ReplyStatus};
use crate::stats::{
    category_counts, daily_complaints, daily_counts, fallback_reason_counts, hourly_counts,
    reply_status_counts, Summary,
};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 90.0;

const BLUE: &str = "#4e79a7";
const ORANGE: &str = "#f28e2b";
const RED: &str = "#e15759";
const GREEN: &str = "#59a14f";
const PALETTE: [&str; 10] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#ff9da7",
    "#9c755f", "#bab0ac",
];

/// Every chart the dashboard can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    CategoryBar,
    CategoryPie,
    ReplyStatus,
    AiVsFallback,
    Hourly,
    FallbackReasons,
    Daily,
    DailyComplaints,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::CategoryBar,
        ChartKind::CategoryPie,
        ChartKind::ReplyStatus,
        ChartKind::AiVsFallback,
        ChartKind::Hourly,
        ChartKind::FallbackReasons,
        ChartKind::Daily,
        ChartKind::DailyComplaints,
    ];

    /// Stable name used in URLs and download file names
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::CategoryBar => "categorie_balk",
            ChartKind::CategoryPie => "categorie_taart",
            ChartKind::ReplyStatus => "beantwoord_status",
            ChartKind::AiVsFallback => "ai_vs_fallback",
            ChartKind::Hourly => "tijdlijn_per_uur",
            ChartKind::FallbackReasons => "fallback_redenen",
            ChartKind::Daily => "dagelijks",
            ChartKind::DailyComplaints => "klachten_per_dag",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::CategoryBar => "Emails per category",
            ChartKind::CategoryPie => "Category share",
            ChartKind::ReplyStatus => "Reply status",
            ChartKind::AiVsFallback => "AI vs fallback",
            ChartKind::Hourly => "Emails per hour",
            ChartKind::FallbackReasons => "Fallbacks per reason",
            ChartKind::Daily => "Emails per day",
            ChartKind::DailyComplaints => "Complaints per day",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn png_file_name(&self) -> String {
        format!("{}.png", self.name())
    }

    /// Draw this chart for `records`, or None when there is nothing to plot.
    pub fn render(&self, records: &[LogRecord]) -> Option<String> {
        let title = self.title();
        match self {
            ChartKind::CategoryBar => bar_chart(title, &category_counts(records), &[BLUE]),
            ChartKind::CategoryPie => pie_chart(title, &category_counts(records)),
            ChartKind::ReplyStatus => {
                let series = reply_status_counts(records);
                let colors: Vec<&str> = series
                    .iter()
                    .map(|(label, _)| {
                        if ReplyStatus::parse(label).is_answered() {
                            GREEN
                        } else {
                            RED
                        }
                    })
                    .collect();
                bar_chart(title, &series, &colors)
            }
            ChartKind::AiVsFallback => {
                if records.is_empty() {
                    return None;
                }
                let summary = Summary::from_records(records);
                let series = vec![
                    ("AI".to_string(), summary.ai_count()),
                    ("Fallback".to_string(), summary.fallbacks),
                ];
                bar_chart(title, &series, &[GREEN, ORANGE])
            }
            ChartKind::Hourly => {
                let series: Vec<(String, usize)> = hourly_counts(records)
                    .into_iter()
                    .map(|(hour, count)| (format!("{:02}", hour), count))
                    .collect();
                bar_chart(title, &series, &[ORANGE])
            }
            ChartKind::FallbackReasons => {
                bar_chart(title, &fallback_reason_counts(records), &[RED])
            }
            ChartKind::Daily => line_chart(title, &dated(daily_counts(records)), BLUE),
            ChartKind::DailyComplaints => {
                line_chart(title, &dated(daily_complaints(records)), RED)
            }
        }
    }
}

fn dated(series: Vec<(time::Date, usize)>) -> Vec<(String, usize)> {
    series
        .into_iter()
        .map(|(date, count)| (date.to_string(), count))
        .collect()
}

/// All charts that have data, in display order
pub fn render_all(records: &[LogRecord]) -> Vec<(ChartKind, String)> {
    ChartKind::ALL
        .into_iter()
        .filter_map(|kind| kind.render(records).map(|svg| (kind, svg)))
        .collect()
}

/// Bar chart, one bar per entry. Colours cycle through `colors`.
pub fn bar_chart(title: &str, series: &[(String, usize)], colors: &[&str]) -> Option<String> {
    if series.is_empty() {
        return None;
    }
    let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let y_max = nice_max(max);
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let slot = plot_w / series.len() as f64;
    let bar_w = slot * 0.7;

    let mut svg = svg_open(title);
    draw_axes(&mut svg, y_max);

    for (i, (label, value)) in series.iter().enumerate() {
        let color = colors.get(i % colors.len().max(1)).copied().unwrap_or(BLUE);
        let h = *value as f64 / y_max as f64 * plot_h;
        let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_w) / 2.0;
        let y = MARGIN_TOP + plot_h - h;
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, bar_w, h, color
        );
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle">{}</text>"#,
            x + bar_w / 2.0,
            y - 4.0,
            value
        );
        x_label(&mut svg, x + bar_w / 2.0, label);
    }

    svg.push_str("</svg>");
    Some(svg)
}

/// Pie chart with percentage labels, first slice starting at 12 o'clock.
pub fn pie_chart(title: &str, series: &[(String, usize)]) -> Option<String> {
    let total: usize = series.iter().map(|(_, v)| *v).sum();
    if total == 0 {
        return None;
    }
    let cx = WIDTH / 2.0 - 100.0;
    let cy = HEIGHT / 2.0 + 10.0;
    let r = 170.0;

    let mut svg = svg_open(title);
    let mut angle = -std::f64::consts::FRAC_PI_2;

    for (i, (label, value)) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let fraction = *value as f64 / total as f64;
        let sweep = fraction * std::f64::consts::TAU;

        if fraction >= 1.0 {
            let _ = write!(
                svg,
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                cx, cy, r, color
            );
        } else if fraction > 0.0 {
            let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
            let end = angle + sweep;
            let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
            let large_arc = if sweep > std::f64::consts::PI { 1 } else { 0 };
            let _ = write!(
                svg,
                r#"<path d="M{:.1},{:.1} L{:.1},{:.1} A{:.1},{:.1} 0 {} 1 {:.1},{:.1} Z" fill="{}" stroke="white"/>"#,
                cx, cy, x1, y1, r, r, large_arc, x2, y2, color
            );
        }

        let mid = angle + sweep / 2.0;
        let _ = write!(
            svg,
            r#"<text x="{:.1}" y="{:.1}" font-size="12" text-anchor="middle" fill="white">{:.1}%</text>"#,
            cx + r * 0.65 * mid.cos(),
            cy + r * 0.65 * mid.sin() + 4.0,
            fraction * 100.0
        );

        // legend
        let ly = MARGIN_TOP + 20.0 + i as f64 * 22.0;
        let _ = write!(
            svg,
            r#"<rect x="{:.1}" y="{:.1}" width="14" height="14" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="13">{}</text>"#,
            WIDTH - 230.0,
            ly,
            color,
            WIDTH - 210.0,
            ly + 12.0,
            escape(label)
        );
        angle += sweep;
    }

    svg.push_str("</svg>");
    Some(svg)
}

/// Line chart over ordered labels.
pub fn line_chart(title: &str, series: &[(String, usize)], color: &str) -> Option<String> {
    if series.is_empty() {
        return None;
    }
    let max = series.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let y_max = nice_max(max);
    let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let step = if series.len() > 1 {
        plot_w / (series.len() - 1) as f64
    } else {
        0.0
    };

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, (_, v))| {
            let x = if series.len() > 1 {
                MARGIN_LEFT + step * i as f64
            } else {
                MARGIN_LEFT + plot_w / 2.0
            };
            (x, MARGIN_TOP + plot_h - *v as f64 / y_max as f64 * plot_h)
        })
        .collect();

    let mut svg = svg_open(title);
    draw_axes(&mut svg, y_max);

    let polyline: Vec<String> = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect();
    let _ = write!(
        svg,
        r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
        polyline.join(" "),
        color
    );
    for ((x, y), (label, value)) in points.iter().zip(series) {
        let _ = write!(
            svg,
            r#"<circle cx="{:.1}" cy="{:.1}" r="3.5" fill="{}"/><text x="{:.1}" y="{:.1}" font-size="11" text-anchor="middle">{}</text>"#,
            x,
            y,
            color,
            x,
            y - 8.0,
            value
        );
        x_label(&mut svg, *x, label);
    }

    svg.push_str("</svg>");
    Some(svg)
}

fn svg_open(title: &str) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="Helvetica, Arial, sans-serif"><rect width="{w}" height="{h}" fill="white"/><text x="{cx}" y="28" font-size="18" font-weight="bold" text-anchor="middle">{t}</text>"#,
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        t = escape(title)
    )
}

fn draw_axes(svg: &mut String, y_max: usize) {
    let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;
    for tick in 0..=4 {
        let value = y_max as f64 * tick as f64 / 4.0;
        let y = bottom - plot_h * tick as f64 / 4.0;
        let _ = write!(
            svg,
            r##"<line x1="{l:.1}" y1="{y:.1}" x2="{r:.1}" y2="{y:.1}" stroke="#dddddd"/><text x="{tx:.1}" y="{ty:.1}" font-size="11" text-anchor="end">{v}</text>"##,
            l = MARGIN_LEFT,
            r = WIDTH - MARGIN_RIGHT,
            y = y,
            tx = MARGIN_LEFT - 6.0,
            ty = y + 4.0,
            v = value.round() as usize
        );
    }
    let _ = write!(
        svg,
        r##"<line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="#333333"/><line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#333333"/>"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom,
        r = WIDTH - MARGIN_RIGHT
    );
}

fn x_label(svg: &mut String, x: f64, label: &str) {
    let y = HEIGHT - MARGIN_BOTTOM + 16.0;
    let _ = write!(
        svg,
        r#"<text x="{:.1}" y="{:.1}" font-size="11" text-anchor="end" transform="rotate(-35 {:.1} {:.1})">{}</text>"#,
        x,
        y,
        x,
        y,
        escape(label)
    );
}

/// Round the axis maximum up to 4, 8, 20, 40... so ticks land on whole numbers.
fn nice_max(max: usize) -> usize {
    if max <= 4 {
        return 4;
    }
    let mut step = 1;
    while max > step * 4 * 10 {
        step *= 10;
    }
    max.div_ceil(step * 4) * step * 4
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();

fn system_fonts() -> Arc<fontdb::Database> {
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            Arc::new(db)
        })
        .clone()
}

/// Rasterise an SVG document on a white background.
pub fn svg_to_png(svg: &str) -> Result<Vec<u8>, Error> {
    let mut options = usvg::Options::default();
    options.fontdb = system_fonts();

    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| Error::Svg(e.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| Error::Render("invalid chart size".to_string()))?;
    pixmap.fill(tiny_skia::Color::WHITE);
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| Error::Render(e.to_string()))
}
