mod filters;
mod service;

pub use filters::{
    search_terms, LocationMatch, LocationOrdering, LocationQuery, PropertyOrdering, PropertyQuery,
};
pub use service::{
    autocomplete_locations, get_location, get_property_detail, list_locations, list_properties,
};

/// Page size of the HTML listing.
pub const PAGE_SIZE_HTML: u64 = 9;
/// Page size of the JSON API.
pub const PAGE_SIZE_API: u64 = 10;
/// Maximum number of autocomplete suggestions.
pub const AUTOCOMPLETE_LIMIT: i64 = 5;
