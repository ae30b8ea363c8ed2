use crate::db::images::add_image;
use crate::domain::NewImage;
use crate::router::{handle, respond};
use crate::tests::utils::{body_json, get, init_test_db, seed_location, seed_property};
use rstest::rstest;
use serde_json::json;

#[test]
fn location_filter_matches_name_or_city_case_insensitively() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            let beach = seed_location(conn, "MIAMI BEACH", "Miami Beach", "Florida");
            let downtown = seed_location(conn, "Brickell", "miami", "Florida");
            let aspen = seed_location(conn, "Aspen Village", "Aspen", "Colorado");
            seed_property(conn, "Ocean Villa", Some(beach.id), "450.00", true);
            seed_property(conn, "City Loft", Some(downtown.id), "200.00", false);
            seed_property(conn, "Ski Chalet", Some(aspen.id), "350.00", true);
            Ok(())
        })
        .unwrap();

    let resp = handle(get("/api/properties/?location=Miami"), &app).expect("handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_json(resp);
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["next"], json!(null));
    assert_eq!(body["previous"], json!(null));

    let titles: Vec<&str> = body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["City Loft", "Ocean Villa"]);
}

#[test]
fn property_detail_shape() {
    let app = init_test_db();
    let id = app
        .db
        .with_conn(|conn| {
            let loc = seed_location(conn, "Miami Beach", "Miami", "Florida");
            let id = seed_property(conn, "Ocean Villa", Some(loc.id), "450.00", true);
            conn.execute(
                "UPDATE properties SET amenities = 'WiFi, Pool ,Kitchen', bathrooms = '4.5' WHERE id = ?1",
                [id],
            )?;
            add_image(
                conn,
                id,
                &NewImage {
                    image: "property_images/front.jpg".into(),
                    caption: Some("Front".into()),
                    is_primary: true,
                },
            )?;
            Ok(id)
        })
        .unwrap();

    let resp = handle(get(&format!("/api/properties/{id}/")), &app).expect("handler failed");
    let body = body_json(resp);

    assert_eq!(body["title"], json!("Ocean Villa"));
    assert_eq!(body["price_per_night"], json!("450.00"));
    assert_eq!(body["bathrooms"], json!("4.5"));
    assert_eq!(body["location"]["name"], json!("Miami Beach"));
    assert_eq!(body["location"]["country"], json!("USA"));
    assert_eq!(body["amenities_list"], json!(["WiFi", "Pool", "Kitchen"]));
    assert_eq!(body["images"][0]["image"], json!("/media/property_images/front.jpg"));
    assert_eq!(body["images"][0]["is_primary"], json!(true));
}

#[rstest]
#[case("/api/properties/999/")]
#[case("/api/properties/abc/")]
#[case("/api/locations/999/")]
#[case("/api/nowhere/")]
fn missing_resources_are_json_404s(#[case] uri: &str) {
    let app = init_test_db();
    let resp = respond(get(uri), &app);
    assert_eq!(resp.status(), 404);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );
    assert_eq!(body_json(resp)["detail"], json!("Not found."));
}

#[rstest]
#[case("/api/properties/?bedrooms=two")]
#[case("/api/properties/?is_available=sometimes")]
fn malformed_exact_filters_are_400(#[case] uri: &str) {
    let app = init_test_db();
    let resp = respond(get(uri), &app);
    assert_eq!(resp.status(), 400);
}

#[test]
fn autocomplete_returns_at_most_five() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            for name in ["Hotel", "Golf", "Foxtrot", "Echo", "Delta", "Charlie", "Bravo", "Alpha"] {
                seed_location(conn, &format!("{name} Key"), "Key West", "Florida");
            }
            Ok(())
        })
        .unwrap();

    let body = body_json(handle(get("/api/locations/autocomplete/?q=key"), &app).unwrap());
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha Key", "Bravo Key", "Charlie Key", "Delta Key", "Echo Key"]);

    let empty = body_json(handle(get("/api/locations/autocomplete/?q=+"), &app).unwrap());
    assert_eq!(empty, json!([]));
}

#[test]
fn pagination_links_keep_filters() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            for n in 0..12 {
                seed_property(conn, &format!("Listing {n}"), None, "100.00", true);
            }
            Ok(())
        })
        .unwrap();

    let first = body_json(handle(get("/api/properties/?is_available=true"), &app).unwrap());
    assert_eq!(first["count"], json!(12));
    assert_eq!(first["results"].as_array().unwrap().len(), 10);
    assert_eq!(
        first["next"],
        json!("/api/properties/?is_available=true&page=2")
    );

    let second =
        body_json(handle(get("/api/properties/?is_available=true&page=2"), &app).unwrap());
    assert_eq!(second["results"].as_array().unwrap().len(), 2);
    assert_eq!(second["next"], json!(null));
    assert_eq!(second["previous"], json!("/api/properties/?is_available=true"));
}

#[test]
fn locations_list_search_and_ordering() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            seed_location(conn, "Miami Beach", "Miami", "Florida");
            seed_location(conn, "Aspen Village", "Aspen", "Colorado");
            seed_location(conn, "Key Largo", "Key Largo", "Florida");
            Ok(())
        })
        .unwrap();

    let body = body_json(handle(get("/api/locations/?search=florida&ordering=-name"), &app).unwrap());
    assert_eq!(body["count"], json!(2));
    assert_eq!(body["results"][0]["name"], json!("Miami Beach"));
    assert_eq!(body["results"][1]["name"], json!("Key Largo"));
}
