// src/state.rs
use crate::db::Database;

/// Everything a request handler needs. Cloned into every worker.
#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Database,
    media_url: String,
}

impl AppState {
    pub fn new(db: Database, media_url: &str) -> Self {
        let mut media_url = media_url.trim().to_string();
        if !media_url.ends_with('/') {
            media_url.push('/');
        }
        AppState { db, media_url }
    }

    pub fn media_url(&self) -> &str {
        &self.media_url
    }

    /// Public URL of a stored image path.
    pub fn image_url(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path.trim_start_matches('/'))
    }
}
