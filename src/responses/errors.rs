use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use serde_json::json;

/// Text shown to the client. Store failures are logged in full but not
/// echoed back.
fn public_message(err: &ServerError) -> String {
    match err {
        ServerError::NotFound => "Not found.".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        ServerError::DbError(msg) => {
            tracing::error!(error = %msg, "database error");
            "Internal server error.".to_string()
        }
        ServerError::InternalError => "Internal server error.".to_string(),
    }
}

fn build(status: u16, content_type: &str, body: String) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

/// Error page for the browser-facing routes.
pub fn html_error_response(err: ServerError) -> Response {
    let status = err.status();
    let markup = error_page(status, &public_message(&err));
    build(status, mime::TEXT_HTML_UTF_8.as_ref(), markup.into_string())
}

/// `{"detail": "..."}` for the API routes.
pub fn json_error_response(err: ServerError) -> Response {
    let status = err.status();
    let body = json!({ "detail": public_message(&err) }).to_string();
    build(status, mime::APPLICATION_JSON.as_ref(), body)
}
