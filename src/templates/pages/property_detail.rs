// templates/pages/property_detail.rs

use crate::domain::PropertyDetail;
use crate::state::AppState;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub fn property_detail_page(detail: &PropertyDetail, state: &AppState) -> Markup {
    let p = &detail.property;
    let amenities = p.amenities_list();

    desktop_layout(
        &p.title,
        html! {
            main class="container" {
                h1 { (p.title) }
                @if let Some(location) = &detail.location {
                    p class="location" { (location) }
                }
                @if !p.is_available {
                    p class="badge unavailable" { "Currently unavailable" }
                }

                @if !detail.images.is_empty() {
                    div class="gallery" {
                        @for image in &detail.images {
                            figure class=[image.is_primary.then_some("primary")] {
                                img src=(state.image_url(&image.image))
                                    alt=(image.caption.as_deref().unwrap_or(&p.title));
                                @if let Some(caption) = &image.caption {
                                    figcaption { (caption) }
                                }
                            }
                        }
                    }
                }

                section class="card" {
                    table {
                        tbody {
                            @if let Some(kind) = &p.property_type {
                                tr { th { "Type" } td { (kind) } }
                            }
                            tr { th { "Bedrooms" } td { (p.bedrooms) } }
                            tr { th { "Bathrooms" } td { (p.bathrooms) } }
                            tr { th { "Sleeps" } td { (p.max_guests) } }
                            tr { th { "Price" } td { "$" (p.price_per_night) " / night" } }
                            @if let Some(address) = &p.address {
                                tr { th { "Address" } td { (address) } }
                            }
                        }
                    }
                }

                @if !p.description.is_empty() {
                    section class="card" {
                        h3 { "About this place" }
                        p { (p.description) }
                    }
                }

                @if !amenities.is_empty() {
                    section class="card" {
                        h3 { "Amenities" }
                        ul class="amenities" {
                            @for tag in &amenities {
                                li { (tag) }
                            }
                        }
                    }
                }

                p { a href="/properties/" { "← Back to all properties" } }
            }
        },
    )
}
