use crate::api;
use crate::errors::{ResultResp, ServerError};
use crate::requests::segments;
use crate::responses::{html_error_response, json_error_response};
use crate::state::AppState;
use crate::web::{admin, pages};
use astra::{Request, Response};

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();

    match (method.as_str(), segments(&path).as_slice()) {
        // Pages
        ("GET", []) => pages::home(),
        ("GET", ["properties"]) => pages::property_list(&req, state),
        ("GET", ["property", id]) => pages::property_detail(parse_id(id)?, state),

        // JSON API
        ("GET", ["api", "locations"]) => api::locations::list(&req, state),
        ("GET", ["api", "locations", "autocomplete"]) => api::locations::autocomplete(&req, state),
        ("GET", ["api", "locations", id]) => api::locations::detail(parse_id(id)?, state),
        ("GET", ["api", "properties"]) => api::properties::list(&req, state),
        ("GET", ["api", "properties", id]) => api::properties::detail(parse_id(id)?, state),

        // Admin
        ("GET", ["admin"]) => admin::dashboard(state),
        ("POST", ["admin", "locations"]) => admin::create_location(&mut req, state),
        ("GET", ["admin", "locations", id]) => admin::edit_location(parse_id(id)?, state),
        ("POST", ["admin", "locations", id]) => {
            admin::update_location(parse_id(id)?, &mut req, state)
        }
        ("POST", ["admin", "locations", id, "delete"]) => {
            admin::delete_location(parse_id(id)?, state)
        }
        ("GET", ["admin", "properties", "new"]) => admin::new_property(state),
        ("POST", ["admin", "properties"]) => admin::create_property(&mut req, state),
        ("GET", ["admin", "properties", id]) => admin::edit_property(parse_id(id)?, state),
        ("POST", ["admin", "properties", id]) => {
            admin::update_property(parse_id(id)?, &mut req, state)
        }
        ("POST", ["admin", "properties", id, "delete"]) => {
            admin::delete_property(parse_id(id)?, state)
        }
        ("POST", ["admin", "properties", id, "images"]) => {
            admin::add_image(parse_id(id)?, &mut req, state)
        }
        ("POST", ["admin", "images", id, "primary"]) => {
            admin::set_primary_image(parse_id(id)?, state)
        }
        ("POST", ["admin", "images", id, "delete"]) => admin::delete_image(parse_id(id)?, state),

        _ => Err(ServerError::NotFound),
    }
}

/// Runs [`handle`] and renders failures: JSON under `/api/`, an HTML page
/// everywhere else.
pub fn respond(req: Request, state: &AppState) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match handle(req, state) {
        Ok(resp) => {
            tracing::debug!(%method, %path, status = resp.status().as_u16(), "request");
            resp
        }
        Err(err) => {
            let status = err.status();
            if status >= 500 {
                tracing::error!(%method, %path, status, error = %err, "request failed");
            } else {
                tracing::info!(%method, %path, status, error = %err, "request rejected");
            }

            if path.starts_with("/api/") {
                json_error_response(err)
            } else {
                html_error_response(err)
            }
        }
    }
}

/// A path id that is not a positive integer cannot name a row.
fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(ServerError::NotFound)
}
