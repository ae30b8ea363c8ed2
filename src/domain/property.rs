// src/domain/property.rs

use crate::domain::{Location, PropertyImage};
use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

pub const DEFAULT_BEDROOMS: i64 = 1;
pub const DEFAULT_MAX_GUESTS: i64 = 2;
pub const BATHROOMS_SCALE: u32 = 1;
pub const PRICE_SCALE: u32 = 2;

/// 1.0 bathrooms.
pub fn default_bathrooms() -> Decimal {
    Decimal::new(10, BATHROOMS_SCALE)
}

/// 100.00 per night, used when an imported price cannot be parsed.
pub fn default_price_per_night() -> Decimal {
    Decimal::new(10000, PRICE_SCALE)
}

/// Parses a fixed-point value and normalizes it to exactly `scale`
/// fractional digits ("2" -> "2.0", "99.999" -> "100.00").
pub fn parse_scaled(raw: &str, scale: u32) -> Option<Decimal> {
    let mut parsed = Decimal::from_str(raw.trim())
        .ok()?
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    parsed.rescale(scale);
    Some(parsed)
}

/// A rental listing as stored in the `properties` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location_id: Option<i64>,
    pub property_type: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: Decimal,
    pub max_guests: i64,
    pub price_per_night: Decimal,
    pub address: Option<String>,
    pub amenities: Option<String>,
    pub is_available: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Property {
    pub fn amenities_list(&self) -> Vec<String> {
        amenities_list(self.amenities.as_deref())
    }
}

/// Every writable column of a property. Used for both inserts and
/// in-place updates, so an update replaces all attributes at once.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyFields {
    pub title: String,
    pub description: String,
    pub location_id: Option<i64>,
    pub property_type: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: Decimal,
    pub max_guests: i64,
    pub price_per_night: Decimal,
    pub address: Option<String>,
    pub amenities: Option<String>,
    pub is_available: bool,
}

impl PropertyFields {
    /// A property with every attribute at its documented default.
    pub fn new(title: impl Into<String>, price_per_night: Decimal) -> Self {
        PropertyFields {
            title: title.into(),
            description: String::new(),
            location_id: None,
            property_type: None,
            bedrooms: DEFAULT_BEDROOMS,
            bathrooms: default_bathrooms(),
            max_guests: DEFAULT_MAX_GUESTS,
            price_per_night,
            address: None,
            amenities: None,
            is_available: true,
        }
    }
}

/// List-view row: the property with its location joined in and only the
/// first image path.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySummary {
    pub id: i64,
    pub title: String,
    pub location: Option<Location>,
    pub property_type: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: Decimal,
    pub max_guests: i64,
    pub price_per_night: Decimal,
    pub first_image: Option<String>,
    pub is_available: bool,
}

/// Detail view: the full property, its location and every image in
/// display order (primary first, then by upload time).
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyDetail {
    pub property: Property,
    pub location: Option<Location>,
    pub images: Vec<PropertyImage>,
}

/// Splits the stored comma-separated amenities, trimming each tag.
pub fn amenities_list(amenities: Option<&str>) -> Vec<String> {
    amenities
        .map(|a| {
            a.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
