use maud::{html, Markup, DOCTYPE};

use crate::templates::components::navbar;

pub struct PageConfig<'a> {
    pub title: &'a str,
    pub current_page: CurrentPage,
    /// Encoded period and filter query, carried over when switching tabs
    pub query: &'a str,
    /// Auto refresh is on
    pub refresh: bool,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum CurrentPage {
    Statistics,
    Logs,
    Charts,
    Trends,
    Export,
    Config,
}

impl CurrentPage {
    pub const ALL: [CurrentPage; 6] = [
        CurrentPage::Statistics,
        CurrentPage::Logs,
        CurrentPage::Charts,
        CurrentPage::Trends,
        CurrentPage::Export,
        CurrentPage::Config,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            CurrentPage::Statistics => "/",
            CurrentPage::Logs => "/logs",
            CurrentPage::Charts => "/charts",
            CurrentPage::Trends => "/trends",
            CurrentPage::Export => "/export",
            CurrentPage::Config => "/config",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CurrentPage::Statistics => "Statistics",
            CurrentPage::Logs => "Logs",
            CurrentPage::Charts => "Charts",
            CurrentPage::Trends => "Trends",
            CurrentPage::Export => "Export",
            CurrentPage::Config => "Configuration",
        }
    }

    /// Link to this tab keeping the encoded query
    pub fn href(&self, query: &str) -> String {
        if query.is_empty() {
            self.path().to_string()
        } else {
            format!("{}?{}", self.path(), query)
        }
    }

    /// The statistics tab refreshes through its own fragment instead of the
    /// whole page.
    fn polls_main_content(&self) -> bool {
        !matches!(self, CurrentPage::Statistics)
    }
}

/// Page shell with header, tabs and `#main-content`.
///
/// With auto refresh on, `#main-content` reloads itself from the current tab
/// every 60 seconds.
pub fn base(config: &PageConfig, content: Markup) -> Markup {
    let poll_url = (config.refresh && config.current_page.polls_main_content())
        .then(|| config.current_page.href(config.query));
    html! {
        (DOCTYPE)
        html lang="en" {
            (head(config.title))
            body {
                section class="section" {
                    div class="container" {
                        nav class="level mb-4" {
                            div class="level-left" {
                                a href="/" class="has-text-current" style="text-decoration: none;" {
                                    h1 class="title level-item" { "MailMind Dashboard" }
                                }
                            }
                            div class="level-right" {
                                form class="level-item" method="post" action="/logout" {
                                    button class="button is-light is-small" type="submit" { "Log out" }
                                }
                            }
                        }

                        (navbar(config.current_page, config.query))

                        div id="main-content"
                            hx-get=[poll_url.as_deref()]
                            hx-trigger=[poll_url.as_ref().map(|_| "every 60s")]
                            hx-select=[poll_url.as_ref().map(|_| "#main-content")]
                            hx-swap=[poll_url.as_ref().map(|_| "outerHTML")] {
                            (content)
                        }
                    }
                }
            }
        }
    }
}

/// Layout without navigation, for the login screen
pub fn bare(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            (head(title))
            body {
                section class="section" {
                    div class="container" {
                        (content)
                    }
                }
            }
        }
    }
}

fn head(title: &str) -> Markup {
    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (title) }
            link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bulma@1.0.4/css/bulma.min.css";
            link rel="stylesheet" href="/static/styles.css";
            script src="https://cdn.jsdelivr.net/npm/htmx.org@1.9.10/dist/htmx.min.js" {}
        }
    }
}
