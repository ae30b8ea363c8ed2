// src/web/pages.rs

use crate::errors::{ResultResp, ServerError};
use crate::query::{self, PropertyQuery, PAGE_SIZE_HTML};
use crate::requests::Params;
use crate::responses::html_response;
use crate::state::AppState;
use crate::templates::pages::{home_page, property_detail_page, property_list_page, PropertyListVm};
use astra::Request;

pub fn home() -> ResultResp {
    html_response(home_page())
}

/// Available properties only, optionally narrowed by location text.
pub fn property_list(req: &Request, state: &AppState) -> ResultResp {
    let params = Params::from_query(req);
    let location = params.non_blank("location");
    let query = PropertyQuery::for_listing_page(location);

    let page = state.db.with_conn(|conn| {
        query::list_properties(conn, &query, params.get("page"), PAGE_SIZE_HTML)
    })?;

    let vm = PropertyListVm {
        page: &page,
        location,
        params: &params,
    };
    html_response(property_list_page(&vm, state))
}

pub fn property_detail(id: i64, state: &AppState) -> ResultResp {
    let detail = state
        .db
        .with_conn(|conn| query::get_property_detail(conn, id))?
        .ok_or(ServerError::NotFound)?;
    html_response(property_detail_page(&detail, state))
}
