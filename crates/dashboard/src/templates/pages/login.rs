use maud::{html, Markup};

use crate::templates::layouts::bare;

pub fn login_page(error: Option<&str>) -> Markup {
    bare(
        "MailMind - Login",
        html! {
            div class="columns is-centered" {
                div class="column is-one-third" {
                    div class="box" {
                        h1 class="title is-4" { "MailMind Dashboard" }
                        @if let Some(error) = error {
                            div class="notification is-danger is-light" { (error) }
                        }
                        form method="post" action="/login" {
                            div class="field" {
                                label class="label" for="username" { "Username" }
                                div class="control" {
                                    input class="input" type="text" id="username" name="username"
                                          autocomplete="username" required;
                                }
                            }
                            div class="field" {
                                label class="label" for="password" { "Password" }
                                div class="control" {
                                    input class="input" type="password" id="password" name="password"
                                          autocomplete="current-password" required;
                                }
                            }
                            button class="button is-link is-fullwidth" type="submit" { "Log in" }
                        }
                    }
                }
            }
        },
    )
}
