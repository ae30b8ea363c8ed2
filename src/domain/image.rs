// src/domain/image.rs

use chrono::NaiveDateTime;

/// An uploaded picture attached to a property. `image` is the stored
/// file path relative to the media root; bytes are served elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyImage {
    pub id: i64,
    pub property_id: i64,
    pub image: String,
    pub caption: Option<String>,
    pub is_primary: bool,
    pub uploaded_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewImage {
    pub image: String,
    pub caption: Option<String>,
    pub is_primary: bool,
}
