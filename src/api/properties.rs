// src/api/properties.rs

use crate::api::dto::{Paginated, PropertyDetailDto, PropertyListDto};
use crate::errors::{ResultResp, ServerError};
use crate::query::{self, search_terms, PropertyOrdering, PropertyQuery, PAGE_SIZE_API};
use crate::requests::Params;
use crate::responses::json_response;
use crate::state::AppState;
use astra::Request;

/// Maps API query parameters onto a [`PropertyQuery`]. An integer
/// `location` selects by id; any other text matches name or city.
pub fn property_query(params: &Params) -> Result<PropertyQuery, ServerError> {
    let mut query = PropertyQuery {
        property_type: params.non_blank("property_type").map(str::to_string),
        bedrooms: params.parse_opt("bedrooms")?,
        is_available: params.flag("is_available")?,
        search: search_terms(params.get("search")),
        ordering: PropertyOrdering::parse(params.get("ordering")),
        ..PropertyQuery::default()
    };

    if let Some(location) = params.non_blank("location") {
        match location.parse::<i64>() {
            Ok(id) => query.location_id = Some(id),
            Err(_) => query.location_text = Some(location.to_string()),
        }
    }
    Ok(query)
}

pub fn list(req: &Request, state: &AppState) -> ResultResp {
    let params = Params::from_query(req);
    let query = property_query(&params)?;

    let page = state.db.with_conn(|conn| {
        query::list_properties(conn, &query, params.get("page"), PAGE_SIZE_API)
    })?;

    json_response(&Paginated::new(&page, req.uri().path(), &params, |p| {
        PropertyListDto::new(p, state)
    }))
}

pub fn detail(id: i64, state: &AppState) -> ResultResp {
    let detail = state
        .db
        .with_conn(|conn| query::get_property_detail(conn, id))?
        .ok_or(ServerError::NotFound)?;
    json_response(&PropertyDetailDto::new(&detail, state))
}
