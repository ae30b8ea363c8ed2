// src/query/filters.rs

/// Sort keys accepted by the property listing. The raw form is the
/// field name, optionally prefixed with `-` for descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PropertyOrdering {
    #[default]
    NewestFirst,
    OldestFirst,
    PriceAsc,
    PriceDesc,
    BedroomsAsc,
    BedroomsDesc,
}

impl PropertyOrdering {
    /// Unknown keys fall back to newest first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "created_at" => PropertyOrdering::OldestFirst,
            "-created_at" => PropertyOrdering::NewestFirst,
            "price_per_night" => PropertyOrdering::PriceAsc,
            "-price_per_night" => PropertyOrdering::PriceDesc,
            "bedrooms" => PropertyOrdering::BedroomsAsc,
            "-bedrooms" => PropertyOrdering::BedroomsDesc,
            _ => PropertyOrdering::NewestFirst,
        }
    }

    pub(crate) fn order_by(self) -> &'static str {
        match self {
            PropertyOrdering::NewestFirst => "p.created_at DESC, p.id DESC",
            PropertyOrdering::OldestFirst => "p.created_at ASC, p.id ASC",
            PropertyOrdering::PriceAsc => "CAST(p.price_per_night AS REAL) ASC, p.id ASC",
            PropertyOrdering::PriceDesc => "CAST(p.price_per_night AS REAL) DESC, p.id DESC",
            PropertyOrdering::BedroomsAsc => "p.bedrooms ASC, p.id ASC",
            PropertyOrdering::BedroomsDesc => "p.bedrooms DESC, p.id DESC",
        }
    }
}

/// How the free-text location filter is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationMatch {
    /// Location name or city (the JSON API).
    #[default]
    NameOrCity,
    /// Location name, city or state (the HTML pages).
    NameCityOrState,
}

/// Filters over the property catalog. Every field is optional; the
/// default query matches every property, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyQuery {
    /// Restrict to `is_available = true` regardless of other filters.
    pub available_only: bool,
    pub location_text: Option<String>,
    pub location_match: LocationMatch,
    pub location_id: Option<i64>,
    pub property_type: Option<String>,
    pub bedrooms: Option<i64>,
    pub is_available: Option<bool>,
    /// Each term must appear in the title, description or location name.
    pub search: Vec<String>,
    pub ordering: PropertyOrdering,
}

impl PropertyQuery {
    /// The public listing page: available properties only, optionally
    /// narrowed by a location name, city or state.
    pub fn for_listing_page(location: Option<&str>) -> Self {
        PropertyQuery {
            available_only: true,
            location_text: non_blank(location),
            location_match: LocationMatch::NameCityOrState,
            ..PropertyQuery::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LocationOrdering {
    #[default]
    NameAsc,
    NameDesc,
    CityAsc,
    CityDesc,
}

impl LocationOrdering {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim).unwrap_or_default() {
            "-name" => LocationOrdering::NameDesc,
            "city" => LocationOrdering::CityAsc,
            "-city" => LocationOrdering::CityDesc,
            _ => LocationOrdering::NameAsc,
        }
    }

    pub(crate) fn order_by(self) -> &'static str {
        match self {
            LocationOrdering::NameAsc => "name ASC, id ASC",
            LocationOrdering::NameDesc => "name DESC, id DESC",
            LocationOrdering::CityAsc => "city ASC, id ASC",
            LocationOrdering::CityDesc => "city DESC, id DESC",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    /// Each term must appear in the name, city or state.
    pub search: Vec<String>,
    pub ordering: LocationOrdering,
}

/// Splits search text into lowercase terms on whitespace and commas.
pub fn search_terms(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
