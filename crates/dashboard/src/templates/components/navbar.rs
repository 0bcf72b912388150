use maud::{html, Markup};

use crate::templates::layouts::CurrentPage;

/// Tab bar. Links keep the current period and filters.
pub fn navbar(current_page: CurrentPage, query: &str) -> Markup {
    html! {
        nav class="tabs is-boxed mb-4" role="navigation" aria-label="main navigation" {
            ul {
                @for page in CurrentPage::ALL {
                    li class=[(current_page == page).then_some("is-active")] {
                        a href=(page.href(query)) { (page.label()) }
                    }
                }
            }
        }
    }
}
