// templates/pages/property_list.rs

use crate::domain::{Page, PropertySummary};
use crate::requests::Params;
use crate::state::AppState;
use crate::templates::components::{pagination, property_card};
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct PropertyListVm<'a> {
    pub page: &'a Page<PropertySummary>,
    pub location: Option<&'a str>,
    pub params: &'a Params,
}

pub fn property_list_page(vm: &PropertyListVm, state: &AppState) -> Markup {
    desktop_layout(
        "Properties",
        html! {
            main class="container" {
                h1 {
                    @match vm.location {
                        Some(location) => { "Properties in “" (location) "”" }
                        None => { "All properties" }
                    }
                }

                form method="get" action="/properties/" class="search" {
                    input type="search" name="location" value=(vm.location.unwrap_or_default())
                        placeholder="City, state or destination";
                    button type="submit" { "Search" }
                }

                p class="muted" { (vm.page.total) " properties found" }

                @if vm.page.items.is_empty() {
                    p { "No properties match your search." }
                } @else {
                    div class="grid" {
                        @for property in &vm.page.items {
                            (property_card(property, state))
                        }
                    }
                }

                (pagination(vm.page, "/properties/", vm.params))
            }
        },
    )
}
