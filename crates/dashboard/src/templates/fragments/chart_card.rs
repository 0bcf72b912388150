use maud::{html, Markup, PreEscaped};

/// One rendered chart plus where to fetch its PNG
pub struct ChartCard {
    pub title: String,
    pub svg: String,
    pub png_href: String,
}

pub fn chart_card(card: &ChartCard) -> Markup {
    html! {
        div class="column is-half-desktop is-full-tablet" {
            div class="box chart-card" {
                div class="chart" role="img" aria-label=(card.title) { (PreEscaped(&card.svg)) }
                div class="has-text-right mt-2" {
                    a class="button is-small is-light" href=(card.png_href) download {
                        "Download PNG"
                    }
                }
            }
        }
    }
}
