// src/api/dto.rs
//
// Wire shapes of the JSON API. Decimals serialize as strings keeping
// their scale ("4.5", "450.00"); image paths become public URLs.

use crate::domain::{Location, Page, PropertyDetail, PropertyImage, PropertySummary};
use crate::requests::Params;
use crate::state::AppState;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct LocationDto {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl From<&Location> for LocationDto {
    fn from(l: &Location) -> Self {
        LocationDto {
            id: l.id,
            name: l.name.clone(),
            city: l.city.clone(),
            state: l.state.clone(),
            country: l.country.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageDto {
    pub id: i64,
    pub image: String,
    pub caption: Option<String>,
    pub is_primary: bool,
}

impl ImageDto {
    pub fn new(image: &PropertyImage, state: &AppState) -> Self {
        ImageDto {
            id: image.id,
            image: state.image_url(&image.image),
            caption: image.caption.clone(),
            is_primary: image.is_primary,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyListDto {
    pub id: i64,
    pub title: String,
    pub location: Option<LocationDto>,
    pub property_type: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: Decimal,
    pub max_guests: i64,
    pub price_per_night: Decimal,
    pub first_image: Option<String>,
    pub is_available: bool,
}

impl PropertyListDto {
    pub fn new(p: &PropertySummary, state: &AppState) -> Self {
        PropertyListDto {
            id: p.id,
            title: p.title.clone(),
            location: p.location.as_ref().map(LocationDto::from),
            property_type: p.property_type.clone(),
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            max_guests: p.max_guests,
            price_per_night: p.price_per_night,
            first_image: p.first_image.as_deref().map(|path| state.image_url(path)),
            is_available: p.is_available,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertyDetailDto {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: Option<LocationDto>,
    pub property_type: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: Decimal,
    pub max_guests: i64,
    pub price_per_night: Decimal,
    pub address: Option<String>,
    pub amenities: Option<String>,
    pub amenities_list: Vec<String>,
    pub is_available: bool,
    pub images: Vec<ImageDto>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PropertyDetailDto {
    pub fn new(detail: &PropertyDetail, state: &AppState) -> Self {
        let p = &detail.property;
        PropertyDetailDto {
            id: p.id,
            title: p.title.clone(),
            description: p.description.clone(),
            location: detail.location.as_ref().map(LocationDto::from),
            property_type: p.property_type.clone(),
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            max_guests: p.max_guests,
            price_per_night: p.price_per_night,
            address: p.address.clone(),
            amenities: p.amenities.clone(),
            amenities_list: p.amenities_list(),
            is_available: p.is_available,
            images: detail.images.iter().map(|i| ImageDto::new(i, state)).collect(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Paged envelope. `next` and `previous` are the request path with the
/// page parameter swapped, or null at either end.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new<U>(
        page: &Page<U>,
        path: &str,
        params: &Params,
        convert: impl Fn(&U) -> T,
    ) -> Self {
        let link = |number: u64| {
            let query = params.with_page(number);
            if query.is_empty() {
                path.to_string()
            } else {
                format!("{path}?{query}")
            }
        };

        Paginated {
            count: page.total,
            next: page.next_page_number().map(&link),
            previous: page.previous_page_number().map(&link),
            results: page.items.iter().map(convert).collect(),
        }
    }
}
