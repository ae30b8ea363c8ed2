use crate::domain::{Location, Property, PropertyImage, PropertySummary};
use crate::state::AppState;
use crate::templates::desktop_layout;
use maud::{html, Markup};

pub struct PropertyFormVm<'a> {
    /// `None` renders an empty create form.
    pub property: Option<&'a Property>,
    pub locations: &'a [Location],
}

pub struct AdminVm {
    pub locations: Vec<Location>,
    pub properties: Vec<PropertySummary>,
    pub images: Vec<(PropertyImage, String)>,
}

const TH: &str = "padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;";
const TD: &str = "padding: 8px; border-bottom: 1px solid #f3f4f6;";
const FORM_GRID: &str = "display: grid; grid-template-columns: 160px 1fr; gap: 8px 12px; align-items: center; max-width: 640px;";
const LINK_BUTTON: &str = "color: #dc2626; background: none; border: none; cursor: pointer; font-size: 0.9em; font-weight: 500; padding: 0;";

fn post_button(action: String, label: &str, confirm: Option<&str>) -> Markup {
    html! {
        form action=(action) method="post" style="margin: 0; display: inline;"
            onsubmit=[confirm.map(|msg| format!("return confirm('{msg}');"))]
        {
            button type="submit" style=(LINK_BUTTON) { (label) }
        }
    }
}

pub fn admin_page(vm: &AdminVm, state: &AppState) -> Markup {
    desktop_layout(
        "Admin",
        html! {
            main class="container" {
                h1 { "Admin" }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Locations" }
                    form action="/admin/locations" method="post" style="display: flex; gap: 8px; flex-wrap: wrap; margin-bottom: 1rem;" {
                        input type="text" name="name" placeholder="Name" required;
                        input type="text" name="city" placeholder="City" required;
                        input type="text" name="state" placeholder="State" required;
                        input type="text" name="country" placeholder="Country (USA)";
                        input type="text" name="description" placeholder="Description";
                        button type="submit" { "Add location" }
                    }
                    div style="overflow-x: auto;" {
                        table style="width: 100%; border-collapse: collapse;" {
                            thead {
                                tr {
                                    th style=(TH) { "ID" }
                                    th style=(TH) { "Name" }
                                    th style=(TH) { "City" }
                                    th style=(TH) { "State" }
                                    th style=(TH) { "Country" }
                                    th style=(TH) { "Actions" }
                                }
                            }
                            tbody {
                                @for location in &vm.locations {
                                    tr {
                                        td style=(TD) { (location.id) }
                                        td style=(TD) { (location.name) }
                                        td style=(TD) { (location.city) }
                                        td style=(TD) { (location.state) }
                                        td style=(TD) { (location.country) }
                                        td style=(TD) {
                                            a href=(format!("/admin/locations/{}", location.id)) style="margin-right: 8px;" { "Edit" }
                                            (post_button(
                                                format!("/admin/locations/{}/delete", location.id),
                                                "Delete",
                                                Some("Delete this location? Its properties will lose their location."),
                                            ))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div class="card" style="margin-bottom: 2rem;" {
                    div style="display: flex; justify-content: space-between; align-items: center;" {
                        h3 { "Properties" }
                        a href="/admin/properties/new" { "Add property" }
                    }
                    div style="overflow-x: auto;" {
                        table style="width: 100%; border-collapse: collapse;" {
                            thead {
                                tr {
                                    th style=(TH) { "ID" }
                                    th style=(TH) { "Title" }
                                    th style=(TH) { "Location" }
                                    th style=(TH) { "Price" }
                                    th style=(TH) { "Available" }
                                    th style=(TH) { "Add image" }
                                    th style=(TH) { "Actions" }
                                }
                            }
                            tbody {
                                @for property in &vm.properties {
                                    tr {
                                        td style=(TD) { (property.id) }
                                        td style=(TD) {
                                            a href=(format!("/property/{}/", property.id)) { (property.title) }
                                        }
                                        td style=(TD) {
                                            @match &property.location {
                                                Some(location) => { (location) }
                                                None => {
                                                    span style="color: #b45309; font-style: italic;" { "Needs location" }
                                                }
                                            }
                                        }
                                        td style=(TD) { (property.price_per_night) }
                                        td style=(TD) {
                                            @if property.is_available { "Yes" } @else { "No" }
                                        }
                                        td style=(TD) {
                                            form action=(format!("/admin/properties/{}/images", property.id)) method="post" style="display: flex; gap: 4px; margin: 0;" {
                                                input type="text" name="image" placeholder="property_images/file.jpg" required;
                                                input type="text" name="caption" placeholder="Caption";
                                                label { input type="checkbox" name="is_primary" value="true"; " primary" }
                                                button type="submit" { "Add" }
                                            }
                                        }
                                        td style=(TD) {
                                            a href=(format!("/admin/properties/{}", property.id)) style="margin-right: 8px;" { "Edit" }
                                            (post_button(
                                                format!("/admin/properties/{}/delete", property.id),
                                                "Delete",
                                                Some("Delete this property and its images?"),
                                            ))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                div class="card" {
                    h3 { "Images" }
                    div style="overflow-x: auto;" {
                        table style="width: 100%; border-collapse: collapse; font-size: 0.9em;" {
                            thead {
                                tr {
                                    th style=(TH) { "Property" }
                                    th style=(TH) { "Image" }
                                    th style=(TH) { "Caption" }
                                    th style=(TH) { "Primary" }
                                    th style=(TH) { "Actions" }
                                }
                            }
                            tbody {
                                @for (image, title) in &vm.images {
                                    tr {
                                        td style=(TD) { (title) }
                                        td style=(TD) {
                                            a href=(state.image_url(&image.image)) { (image.image) }
                                        }
                                        td style=(TD) { (image.caption.as_deref().unwrap_or("")) }
                                        td style=(TD) {
                                            @if image.is_primary {
                                                span style="background: #dbeafe; color: #1e40af; padding: 2px 6px; border-radius: 4px;" { "Primary" }
                                            } @else {
                                                (post_button(format!("/admin/images/{}/primary", image.id), "Make primary", None))
                                            }
                                        }
                                        td style=(TD) {
                                            (post_button(format!("/admin/images/{}/delete", image.id), "Delete", Some("Delete this image?")))
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn location_form_page(location: &Location) -> Markup {
    desktop_layout(
        "Edit location",
        html! {
            main class="container" {
                p { a href="/admin" { "← Admin" } }
                h1 { "Edit location" }
                div class="card" {
                    form action=(format!("/admin/locations/{}", location.id)) method="post" style=(FORM_GRID) {
                        label for="name" { "Name" }
                        input type="text" id="name" name="name" value=(location.name) required;
                        label for="city" { "City" }
                        input type="text" id="city" name="city" value=(location.city) required;
                        label for="state" { "State" }
                        input type="text" id="state" name="state" value=(location.state) required;
                        label for="country" { "Country" }
                        input type="text" id="country" name="country" value=(location.country);
                        label for="description" { "Description" }
                        textarea id="description" name="description" rows="3" {
                            (location.description.as_deref().unwrap_or(""))
                        }
                        span {}
                        button type="submit" { "Save" }
                    }
                }
            }
        },
    )
}

/// Create and edit share one form; the action and prefilled values depend
/// on whether a property is given.
pub fn property_form_page(vm: &PropertyFormVm) -> Markup {
    let property = vm.property;
    let (title, action) = match property {
        Some(p) => ("Edit property", format!("/admin/properties/{}", p.id)),
        None => ("Add property", "/admin/properties".to_string()),
    };
    let selected = property.and_then(|p| p.location_id);
    let name = property.map_or("", |p| p.title.as_str());
    let description = property.map_or("", |p| p.description.as_str());
    let property_type = property.and_then(|p| p.property_type.as_deref()).unwrap_or("");
    let address = property.and_then(|p| p.address.as_deref()).unwrap_or("");
    let amenities = property.and_then(|p| p.amenities.as_deref()).unwrap_or("");

    desktop_layout(
        title,
        html! {
            main class="container" {
                p { a href="/admin" { "← Admin" } }
                h1 { (title) }
                div class="card" {
                    form action=(action) method="post" style=(FORM_GRID) {
                        label for="title" { "Title" }
                        input type="text" id="title" name="title" value=(name) required;

                        label for="location" { "Location" }
                        select id="location" name="location" {
                            option value="" selected[selected.is_none()] { "(none)" }
                            @for location in vm.locations {
                                option value=(location.id) selected[selected == Some(location.id)] { (location) }
                            }
                        }

                        label for="price_per_night" { "Price per night" }
                        input type="text" id="price_per_night" name="price_per_night"
                            value=[property.map(|p| p.price_per_night)] required;
                        label for="bedrooms" { "Bedrooms" }
                        input type="number" id="bedrooms" name="bedrooms" min="0" value=[property.map(|p| p.bedrooms)];
                        label for="bathrooms" { "Bathrooms" }
                        input type="text" id="bathrooms" name="bathrooms" value=[property.map(|p| p.bathrooms)];
                        label for="max_guests" { "Max guests" }
                        input type="number" id="max_guests" name="max_guests" min="1" value=[property.map(|p| p.max_guests)];

                        label for="property_type" { "Type" }
                        input type="text" id="property_type" name="property_type" value=(property_type);
                        label for="address" { "Address" }
                        input type="text" id="address" name="address" value=(address);
                        label for="amenities" { "Amenities" }
                        input type="text" id="amenities" name="amenities" placeholder="WiFi, Pool" value=(amenities);
                        label for="description" { "Description" }
                        textarea id="description" name="description" rows="4" {
                            (description)
                        }

                        label for="is_available" { "Available" }
                        input type="checkbox" id="is_available" name="is_available" value="true"
                            checked[property.map_or(true, |p| p.is_available)];

                        span {}
                        button type="submit" { "Save" }
                    }
                }
            }
        },
    )
}
