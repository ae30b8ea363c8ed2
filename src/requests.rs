// src/requests.rs
//
// Query-string and form decoding for handlers.

use crate::errors::ServerError;
use astra::Request;
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

/// Decoded `key=value` pairs. A repeated key keeps its last value.
#[derive(Debug, Default, Clone)]
pub struct Params(HashMap<String, String>);

impl Params {
    pub fn parse(raw: &str) -> Self {
        Params(form_urlencoded::parse(raw.as_bytes()).into_owned().collect())
    }

    pub fn from_query(req: &Request) -> Self {
        Params::parse(req.uri().query().unwrap_or_default())
    }

    /// Reads an `application/x-www-form-urlencoded` body.
    pub fn from_form(req: &mut Request) -> Result<Self, ServerError> {
        let mut raw = String::new();
        req.body_mut()
            .reader()
            .read_to_string(&mut raw)
            .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
        Ok(Params::parse(&raw))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// The value, trimmed, or `None` when missing or blank.
    pub fn non_blank(&self, key: &str) -> Option<&str> {
        self.get(key).map(str::trim).filter(|v| !v.is_empty())
    }

    /// An optional typed value. Blank means absent; anything else that
    /// fails to parse is a 400.
    pub fn parse_opt<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>, ServerError> {
        match self.non_blank(key) {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| ServerError::BadRequest(format!("invalid value for {key}: {raw}"))),
        }
    }

    /// Checkbox-style booleans: `true`/`1`/`on` and `false`/`0`/`off`.
    pub fn flag(&self, key: &str) -> Result<Option<bool>, ServerError> {
        match self.non_blank(key).map(str::to_ascii_lowercase).as_deref() {
            None => Ok(None),
            Some("true" | "1" | "on") => Ok(Some(true)),
            Some("false" | "0" | "off") => Ok(Some(false)),
            Some(other) => Err(ServerError::BadRequest(format!(
                "invalid value for {key}: {other}"
            ))),
        }
    }

    /// Re-encodes every pair except `page`, then appends `page` when it is
    /// past the first. Used for next/previous links.
    pub fn with_page(&self, page: u64) -> String {
        let mut keys: Vec<&String> = self.0.keys().filter(|k| k.as_str() != "page").collect();
        keys.sort();

        let mut out = form_urlencoded::Serializer::new(String::new());
        for key in keys {
            out.append_pair(key, &self.0[key]);
        }
        if page > 1 {
            out.append_pair("page", &page.to_string());
        }
        out.finish()
    }
}

/// Splits a path into its non-empty segments: `/api/properties/7/` gives
/// `["api", "properties", "7"]`.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}
