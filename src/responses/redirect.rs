use crate::errors::{ResultResp, ServerError};
use astra::{Body, ResponseBuilder};

/// 302 to `location`, used after every successful form post.
pub fn redirect(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
