use crate::db::connection::{init_db, Database};
use crate::db::properties::insert_property;
use crate::domain::{Location, NewLocation, PropertyFields};
use crate::state::AppState;
use astra::{Body, Response};
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::io::Read;
use std::ops::Deref;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_DB: AtomicUsize = AtomicUsize::new(0);

/// App state over a throwaway database file, removed again on drop.
pub struct TestApp {
    state: AppState,
    path: PathBuf,
}

impl Deref for TestApp {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A fresh database file per test, with the production schema applied.
pub fn init_test_db() -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let n = NEXT_DB.fetch_add(1, Ordering::SeqCst);
    let path = std::env::temp_dir().join(format!(
        "rentals_test_{}_{nanos}_{n}.sqlite3",
        std::process::id()
    ));

    let db = Database::new(path.to_string_lossy().into_owned());
    init_db(&db).unwrap_or_else(|e| panic!("Database initialization failed: {e}"));

    TestApp {
        state: AppState::new(db, "/media/"),
        path,
    }
}

pub fn seed_location(conn: &Connection, name: &str, city: &str, state: &str) -> Location {
    let new = NewLocation::from_parts(name, city, state, None, None).unwrap();
    let (location, _) =
        crate::db::locations::get_or_create_location(conn, &new, Utc::now().naive_utc()).unwrap();
    location
}

pub fn seed_property(
    conn: &Connection,
    title: &str,
    location_id: Option<i64>,
    price: &str,
    available: bool,
) -> i64 {
    let mut fields = PropertyFields::new(title, Decimal::from_str(price).unwrap());
    fields.location_id = location_id;
    fields.is_available = available;
    insert_property(conn, &fields, Utc::now().naive_utc()).unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_json(resp: Response) -> serde_json::Value {
    serde_json::from_str(&body_string(resp)).unwrap()
}

pub fn get(uri: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(http::Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_form(uri: &str, form: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(http::Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

#[test]
fn test_database_is_removed_on_drop() {
    let app = init_test_db();
    let path = PathBuf::from(app.db.path());
    assert!(path.exists());

    drop(app);
    assert!(!path.exists());
}
