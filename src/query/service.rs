// src/query/service.rs
//
// Read side shared by the JSON API and the HTML pages. Both surfaces go
// through these functions so filtering and paging behave the same.

use crate::db::{locations, properties};
use crate::domain::{Location, Page, PageWindow, PropertyDetail, PropertySummary};
use crate::errors::ServerError;
use crate::query::{LocationQuery, PropertyQuery};
use rusqlite::Connection;

/// Filtered, paged property list. `page` is the raw request parameter;
/// anything unusable resolves to a valid page rather than an error.
pub fn list_properties(
    conn: &Connection,
    query: &PropertyQuery,
    page: Option<&str>,
    per_page: u64,
) -> Result<Page<PropertySummary>, ServerError> {
    let total = properties::count_properties(conn, query)?;
    let window = PageWindow::resolve(page, total, per_page);
    let items =
        properties::list_property_summaries(conn, query, Some((window.limit(), window.offset())))?;

    tracing::debug!(total, page = window.number, items = items.len(), "listed properties");
    Ok(Page::new(items, window, total))
}

pub fn get_property_detail(
    conn: &Connection,
    id: i64,
) -> Result<Option<PropertyDetail>, ServerError> {
    properties::find_property_detail(conn, id)
}

pub fn list_locations(
    conn: &Connection,
    query: &LocationQuery,
    page: Option<&str>,
    per_page: u64,
) -> Result<Page<Location>, ServerError> {
    let total = locations::count_locations(conn, query)?;
    let window = PageWindow::resolve(page, total, per_page);
    let items = locations::list_locations(conn, query, window.limit(), window.offset())?;
    Ok(Page::new(items, window, total))
}

pub fn get_location(conn: &Connection, id: i64) -> Result<Option<Location>, ServerError> {
    locations::find_location(conn, id)
}

/// Blank input returns nothing rather than matching everything.
pub fn autocomplete_locations(conn: &Connection, q: &str) -> Result<Vec<Location>, ServerError> {
    let q = q.trim();
    if q.is_empty() {
        return Ok(Vec::new());
    }
    locations::autocomplete_locations(conn, q)
}
