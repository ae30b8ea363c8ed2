// templates/pages/home.rs

use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn home_page() -> Markup {
    desktop_layout(
        "Home",
        html! {
            main class="container" {
                h1 { "Find your next getaway" }

                section class="card" {
                    form method="get" action="/properties/" class="search" {
                        label class="sr-only" for="location" { "Location" }
                        input
                            type="search"
                            id="location"
                            name="location"
                            placeholder="City, state or destination"
                            autocomplete="off";
                        button type="submit" class="primary" { "Search" }
                    }
                }

                p { a href="/properties/" { "Browse all properties" } }
            }
        },
    )
}
