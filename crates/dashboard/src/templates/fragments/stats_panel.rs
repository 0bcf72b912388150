use maud::{html, Markup};
use mailmind_core::stats::{Averages, Summary};

use crate::templates::components::empty_notice;

/// Numbers behind the statistics tab
pub struct StatsView {
    pub summary: Summary,
    /// Long-run reference, absent in all-logs mode or when no logs exist
    pub averages: Option<Averages>,
    /// Fragment URL polled every minute when auto refresh is on
    pub refresh_url: Option<String>,
}

/// Metric cards, alerts and averages.
///
/// When `refresh_url` is set the panel replaces itself every 60 seconds.
pub fn stats_panel(view: &StatsView) -> Markup {
    let summary = &view.summary;
    let (ai, fallbacks) = summary.ai_vs_fallback();
    html! {
        div id="stats-panel"
            hx-get=[view.refresh_url.as_deref()]
            hx-trigger=[view.refresh_url.as_ref().map(|_| "every 60s")]
            hx-swap=[view.refresh_url.as_ref().map(|_| "outerHTML")] {
            @if summary.total == 0 {
                (empty_notice())
            } @else {
                @for alert in summary.alerts() {
                    div class=(format!("notification is-light {}", alert.severity_class())) {
                        (alert.message())
                    }
                }

                div class="box" {
                    h2 class="title is-5 mb-4" { "Statistics" }

                    div class="columns is-multiline is-mobile" {
                        (stat_card("Total emails", summary.total.to_string(), "has-text-link", None))
                        (stat_card("Unique senders", summary.unique_senders.to_string(), "has-text-info", None))
                        (stat_card(
                            "Answered",
                            summary.answered.to_string(),
                            "has-text-success",
                            Some(format!("{:.1}%", summary.answered_pct)),
                        ))
                        (stat_card(
                            "Fallbacks",
                            summary.fallbacks.to_string(),
                            "has-text-warning-dark",
                            Some(format!("{:.1}%", summary.fallback_pct)),
                        ))
                        (stat_card("Complaints", summary.complaints.to_string(), "has-text-danger", None))
                        (stat_card(
                            "AI vs fallback",
                            format!("{}/{}", ai, fallbacks),
                            "has-text-primary",
                            None,
                        ))
                    }
                }
            }

            @if let Some(averages) = &view.averages {
                p class="has-text-grey is-size-7 mt-2" {
                    "Average over all logs: "
                    (format!("{:.1}%", averages.answered_pct)) " answered, "
                    (format!("{:.1}%", averages.complaint_pct)) " complaints"
                }
            }
        }
    }
}

fn stat_card(label: &str, value: String, color: &str, detail: Option<String>) -> Markup {
    html! {
        div class="column is-half-mobile is-one-third-tablet is-2-desktop" {
            div class="stat-card" {
                div class=(format!("stat-value {}", color)) { (value) }
                div class="stat-label" { (label) }
                @if let Some(detail) = detail {
                    p class="is-size-7 has-text-grey" { (detail) }
                }
            }
        }
    }
}
