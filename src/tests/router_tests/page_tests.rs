use crate::router::{handle, respond};
use crate::tests::utils::{body_string, get, init_test_db, seed_location, seed_property};

#[test]
fn home_page_has_search_form() {
    let app = init_test_db();
    let resp = handle(get("/"), &app).expect("handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains(r#"action="/properties/""#));
    assert!(body.contains(r#"name="location""#));
}

#[test]
fn listing_paginates_nine_per_page_and_hides_unavailable() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            for n in 0..25 {
                seed_property(conn, &format!("Listing {n:02}"), None, "100.00", true);
            }
            seed_property(conn, "Withdrawn Cottage", None, "100.00", false);
            Ok(())
        })
        .unwrap();

    let first = body_string(handle(get("/properties/"), &app).unwrap());
    assert!(first.contains("25 properties found"));
    assert!(first.contains("Page 1 of 3"));
    assert!(first.contains("Listing 24"));
    assert!(!first.contains("Withdrawn Cottage"));
    assert!(first.contains(r#"href="/properties/?page=2""#));

    let last = body_string(handle(get("/properties/?page=3"), &app).unwrap());
    assert!(last.contains("Page 3 of 3"));
    assert_eq!(last.matches("property-card").count(), 7);

    // out-of-range and garbage pages still render
    let clamped = body_string(handle(get("/properties/?page=99"), &app).unwrap());
    assert!(clamped.contains("Page 3 of 3"));
    let garbage = body_string(handle(get("/properties/?page=abc"), &app).unwrap());
    assert!(garbage.contains("Page 1 of 3"));
}

#[test]
fn listing_location_matches_state_too() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            let aspen = seed_location(conn, "Aspen Village", "Aspen", "Colorado");
            let miami = seed_location(conn, "Miami Beach", "Miami", "Florida");
            seed_property(conn, "Ski Chalet", Some(aspen.id), "350.00", true);
            seed_property(conn, "Ocean Villa", Some(miami.id), "450.00", true);
            Ok(())
        })
        .unwrap();

    let body = body_string(handle(get("/properties/?location=colorado"), &app).unwrap());
    assert!(body.contains("Ski Chalet"));
    assert!(!body.contains("Ocean Villa"));
    assert!(body.contains("1 properties found"));
}

#[test]
fn detail_page_and_missing_property() {
    let app = init_test_db();
    let id = app
        .db
        .with_conn(|conn| {
            let loc = seed_location(conn, "Lake Tahoe", "Tahoe City", "California");
            Ok(seed_property(conn, "Pine Cabin", Some(loc.id), "120.00", true))
        })
        .unwrap();

    let body = body_string(handle(get(&format!("/property/{id}/")), &app).unwrap());
    assert!(body.contains("Pine Cabin"));
    assert!(body.contains("Lake Tahoe, California, USA"));
    assert!(body.contains("120.00"));

    let missing = respond(get("/property/4242/"), &app);
    assert_eq!(missing.status(), 404);
    assert!(body_string(missing).contains("Error 404"));
}
