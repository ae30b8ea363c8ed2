// src/api/locations.rs

use crate::api::dto::{LocationDto, Paginated};
use crate::errors::{ResultResp, ServerError};
use crate::query::{self, search_terms, LocationOrdering, LocationQuery, PAGE_SIZE_API};
use crate::requests::Params;
use crate::responses::json_response;
use crate::state::AppState;
use astra::Request;

pub fn list(req: &Request, state: &AppState) -> ResultResp {
    let params = Params::from_query(req);
    let query = LocationQuery {
        search: search_terms(params.get("search")),
        ordering: LocationOrdering::parse(params.get("ordering")),
    };

    let page = state.db.with_conn(|conn| {
        query::list_locations(conn, &query, params.get("page"), PAGE_SIZE_API)
    })?;

    json_response(&Paginated::new(&page, req.uri().path(), &params, |l| {
        LocationDto::from(l)
    }))
}

pub fn detail(id: i64, state: &AppState) -> ResultResp {
    let location = state
        .db
        .with_conn(|conn| query::get_location(conn, id))?
        .ok_or(ServerError::NotFound)?;
    json_response(&LocationDto::from(&location))
}

/// Bare array, no envelope.
pub fn autocomplete(req: &Request, state: &AppState) -> ResultResp {
    let params = Params::from_query(req);
    let q = params.get("q").unwrap_or_default();

    let hits = state
        .db
        .with_conn(|conn| query::autocomplete_locations(conn, q))?;
    let body: Vec<LocationDto> = hits.iter().map(LocationDto::from).collect();
    json_response(&body)
}
