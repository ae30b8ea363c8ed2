use crate::domain::PropertySummary;
use crate::state::AppState;
use maud::{html, Markup};

/// One tile of the property grid.
pub fn property_card(property: &PropertySummary, state: &AppState) -> Markup {
    html! {
        div class="card property-card" {
            a href=(format!("/property/{}/", property.id)) {
                @match &property.first_image {
                    Some(path) => {
                        img src=(state.image_url(path)) alt=(property.title) loading="lazy";
                    }
                    None => {
                        div class="placeholder-image" { "No image" }
                    }
                }
            }
            div class="card-body" {
                h2 {
                    a href=(format!("/property/{}/", property.id)) { (property.title) }
                }
                @if let Some(location) = &property.location {
                    p class="location" { (location) }
                }
                p class="specs" {
                    (property.bedrooms) " bd · "
                    (property.bathrooms) " ba · sleeps "
                    (property.max_guests)
                }
                p class="price" { "$" (property.price_per_night) " / night" }
            }
        }
    }
}
