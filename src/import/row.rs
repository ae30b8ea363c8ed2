// src/import/row.rs

use crate::domain::property::{
    default_bathrooms, default_price_per_night, parse_scaled, BATHROOMS_SCALE, DEFAULT_BEDROOMS,
    DEFAULT_MAX_GUESTS, PRICE_SCALE,
};
use crate::domain::{NewLocation, PropertyFields};
use csv::StringRecord;
use rust_decimal::Decimal;

/// Column positions resolved once from the header row. A column missing
/// from the header reads as absent on every row.
#[derive(Debug, Default)]
pub struct Columns {
    title: Option<usize>,
    description: Option<usize>,
    location: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    country: Option<usize>,
    property_type: Option<usize>,
    bedrooms: Option<usize>,
    bathrooms: Option<usize>,
    max_guests: Option<usize>,
    price_per_night: Option<usize>,
    address: Option<usize>,
    amenities: Option<usize>,
    is_available: Option<usize>,
}

impl Columns {
    pub fn from_headers(headers: &StringRecord) -> Self {
        let mut columns = Columns::default();
        for (idx, name) in headers.iter().enumerate() {
            // Excel likes to prepend a byte-order mark.
            let name = name.trim_start_matches('\u{feff}').trim();
            let slot = match name {
                "title" => &mut columns.title,
                "description" => &mut columns.description,
                "location" => &mut columns.location,
                "city" => &mut columns.city,
                "state" => &mut columns.state,
                "country" => &mut columns.country,
                "property_type" => &mut columns.property_type,
                "bedrooms" => &mut columns.bedrooms,
                "bathrooms" => &mut columns.bathrooms,
                "max_guests" => &mut columns.max_guests,
                "price_per_night" => &mut columns.price_per_night,
                "address" => &mut columns.address,
                "amenities" => &mut columns.amenities,
                "is_available" => &mut columns.is_available,
                _ => continue,
            };
            slot.get_or_insert(idx);
        }
        columns
    }
}

/// One CSV record as optional strings, untrimmed and unvalidated.
/// `None` means the column is missing from the header, the record is
/// shorter than the header, or the cell is empty. `is_available` is the
/// exception: an empty cell stays `Some("")`, which reads as false.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawRow {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub property_type: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub max_guests: Option<String>,
    pub price_per_night: Option<String>,
    pub address: Option<String>,
    pub amenities: Option<String>,
    pub is_available: Option<String>,
}

impl RawRow {
    pub fn from_record(columns: &Columns, record: &StringRecord) -> Self {
        let raw_cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).map(str::to_string);
        let cell = |idx: Option<usize>| raw_cell(idx).filter(|v| !v.is_empty());

        RawRow {
            title: cell(columns.title),
            description: cell(columns.description),
            location: cell(columns.location),
            city: cell(columns.city),
            state: cell(columns.state),
            country: cell(columns.country),
            property_type: cell(columns.property_type),
            bedrooms: cell(columns.bedrooms),
            bathrooms: cell(columns.bathrooms),
            max_guests: cell(columns.max_guests),
            price_per_night: cell(columns.price_per_night),
            address: cell(columns.address),
            amenities: cell(columns.amenities),
            is_available: raw_cell(columns.is_available),
        }
    }
}

/// Why a row was rejected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("Missing location data, skipping")]
    MissingLocation,
    #[error("Missing title, skipping")]
    MissingTitle,
}

/// A validated row: trimmed text, parsed numbers with defaults applied,
/// and the location to resolve (none in skip-location mode).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub location: Option<NewLocation>,
    pub title: String,
    pub description: String,
    pub property_type: Option<String>,
    pub bedrooms: i64,
    pub bathrooms: Decimal,
    pub max_guests: i64,
    pub price_per_night: Decimal,
    pub address: Option<String>,
    pub amenities: Option<String>,
    pub is_available: bool,
}

impl ImportRow {
    /// Location is checked before the title, so a row missing both reports
    /// the location.
    pub fn decode(raw: &RawRow, skip_location: bool) -> Result<Self, RowError> {
        let location = if skip_location {
            None
        } else {
            let location = NewLocation::from_parts(
                raw.location.as_deref().unwrap_or_default(),
                raw.city.as_deref().unwrap_or_default(),
                raw.state.as_deref().unwrap_or_default(),
                raw.country.as_deref(),
                None,
            )
            .ok_or(RowError::MissingLocation)?;
            Some(location)
        };

        let title = trimmed(raw.title.as_deref()).ok_or(RowError::MissingTitle)?;

        Ok(ImportRow {
            location,
            title,
            description: trimmed(raw.description.as_deref()).unwrap_or_default(),
            property_type: trimmed(raw.property_type.as_deref()),
            bedrooms: parse_int(raw.bedrooms.as_deref(), DEFAULT_BEDROOMS),
            bathrooms: parse_decimal(raw.bathrooms.as_deref(), BATHROOMS_SCALE)
                .unwrap_or_else(default_bathrooms),
            max_guests: parse_int(raw.max_guests.as_deref(), DEFAULT_MAX_GUESTS),
            price_per_night: parse_decimal(raw.price_per_night.as_deref(), PRICE_SCALE)
                .unwrap_or_else(default_price_per_night),
            address: trimmed(raw.address.as_deref()),
            amenities: trimmed(raw.amenities.as_deref()),
            is_available: raw
                .is_available
                .as_deref()
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(true),
        })
    }

    pub fn property_fields(&self, location_id: Option<i64>) -> PropertyFields {
        PropertyFields {
            title: self.title.clone(),
            description: self.description.clone(),
            location_id,
            property_type: self.property_type.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            max_guests: self.max_guests,
            price_per_night: self.price_per_night,
            address: self.address.clone(),
            amenities: self.amenities.clone(),
            is_available: self.is_available,
        }
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Unparsable input falls back to `default` instead of failing the row.
fn parse_int(value: Option<&str>, default: i64) -> i64 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(default)
}

fn parse_decimal(value: Option<&str>, scale: u32) -> Option<Decimal> {
    value.and_then(|v| parse_scaled(v, scale))
}
