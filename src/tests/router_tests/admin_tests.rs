use crate::db::images::{add_image, images_for_property};
use crate::db::locations::{all_locations, find_location};
use crate::db::properties::find_property;
use crate::domain::NewImage;
use crate::import::import_csv;
use crate::router::{handle, respond};
use crate::tests::utils::{
    body_string, get, init_test_db, post_form, seed_location, seed_property,
};

fn assert_redirects_to_admin(resp: &astra::Response) {
    assert_eq!(resp.status(), 302, "should redirect after a post");
    assert_eq!(
        resp.headers().get("Location").unwrap().to_str().unwrap(),
        "/admin"
    );
}

#[test]
fn admin_page_lists_everything() {
    let app = init_test_db();
    app.db
        .with_conn(|conn| {
            let loc = seed_location(conn, "Miami Beach", "Miami", "Florida");
            seed_property(conn, "Ocean Villa", Some(loc.id), "450.00", true);
            seed_property(conn, "Orphan Loft", None, "90.00", true);
            Ok(())
        })
        .unwrap();

    let resp = handle(get("/admin"), &app).expect("handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Miami Beach"));
    assert!(body.contains("Ocean Villa"));
    assert!(body.contains("Needs location"));
}

#[test]
fn create_location_then_reject_duplicate() {
    let app = init_test_db();
    let form = "name=Miami+Beach&city=Miami&state=Florida&country=&description=Sunny";

    let resp = handle(post_form("/admin/locations", form), &app).expect("handler failed");
    assert_redirects_to_admin(&resp);

    let locations = app.db.with_conn(|conn| all_locations(conn)).unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].country, "USA");
    assert_eq!(locations[0].description.as_deref(), Some("Sunny"));

    let dup = respond(post_form("/admin/locations", form), &app);
    assert_eq!(dup.status(), 400);

    let blank = respond(post_form("/admin/locations", "name=&city=Miami&state=FL"), &app);
    assert_eq!(blank.status(), 400);
}

#[test]
fn delete_location_keeps_properties() {
    let app = init_test_db();
    let (loc_id, property_id) = app
        .db
        .with_conn(|conn| {
            let loc = seed_location(conn, "Aspen Village", "Aspen", "Colorado");
            Ok((loc.id, seed_property(conn, "Ski Chalet", Some(loc.id), "350.00", true)))
        })
        .unwrap();

    let resp = handle(post_form(&format!("/admin/locations/{loc_id}/delete"), ""), &app).unwrap();
    assert_redirects_to_admin(&resp);

    let property = app
        .db
        .with_conn(|conn| find_property(conn, property_id))
        .unwrap()
        .unwrap();
    assert_eq!(property.location_id, None);

    let again = respond(post_form(&format!("/admin/locations/{loc_id}/delete"), ""), &app);
    assert_eq!(again.status(), 404);
}

#[test]
fn image_workflow() {
    let app = init_test_db();
    let property_id = app
        .db
        .with_conn(|conn| Ok(seed_property(conn, "Beach Hut", None, "80.00", true)))
        .unwrap();

    let uri = format!("/admin/properties/{property_id}/images");
    let resp = handle(
        post_form(&uri, "image=property_images%2Fa.jpg&caption=Porch&is_primary=true"),
        &app,
    )
    .unwrap();
    assert_redirects_to_admin(&resp);
    handle(post_form(&uri, "image=property_images%2Fb.jpg&caption="), &app).unwrap();

    let images = app
        .db
        .with_conn(|conn| images_for_property(conn, property_id))
        .unwrap();
    assert_eq!(images.len(), 2);
    assert!(images[0].is_primary);
    assert_eq!(images[0].caption.as_deref(), Some("Porch"));
    assert_eq!(images[1].caption, None);

    let second = images[1].id;
    let resp = handle(post_form(&format!("/admin/images/{second}/primary"), ""), &app).unwrap();
    assert_redirects_to_admin(&resp);

    let images = app
        .db
        .with_conn(|conn| images_for_property(conn, property_id))
        .unwrap();
    let primaries: Vec<i64> = images.iter().filter(|i| i.is_primary).map(|i| i.id).collect();
    assert_eq!(primaries, vec![second]);

    let resp = handle(post_form(&format!("/admin/images/{second}/delete"), ""), &app).unwrap();
    assert_redirects_to_admin(&resp);
    let left = app
        .db
        .with_conn(|conn| images_for_property(conn, property_id))
        .unwrap();
    assert_eq!(left.len(), 1);

    let missing = respond(post_form("/admin/properties/9999/images", "image=x.jpg"), &app);
    assert_eq!(missing.status(), 404);
}

#[test]
fn delete_property_removes_images() {
    let app = init_test_db();
    let property_id = app
        .db
        .with_conn(|conn| {
            let id = seed_property(conn, "Tree House", None, "60.00", true);
            add_image(
                conn,
                id,
                &NewImage {
                    image: "property_images/tree.jpg".into(),
                    caption: None,
                    is_primary: true,
                },
            )?;
            Ok(id)
        })
        .unwrap();

    let resp = handle(
        post_form(&format!("/admin/properties/{property_id}/delete"), ""),
        &app,
    )
    .unwrap();
    assert_redirects_to_admin(&resp);

    let gone = app
        .db
        .with_conn(|conn| find_property(conn, property_id))
        .unwrap();
    assert!(gone.is_none());
    let images = app
        .db
        .with_conn(|conn| images_for_property(conn, property_id))
        .unwrap();
    assert!(images.is_empty());
}

#[test]
fn create_property_with_location() {
    let app = init_test_db();
    let loc_id = app
        .db
        .with_conn(|conn| Ok(seed_location(conn, "Lake Tahoe", "Tahoe City", "California").id))
        .unwrap();

    let page = handle(get("/admin/properties/new"), &app).unwrap();
    let body = body_string(page);
    assert!(body.contains(r#"<select id="location" name="location">"#));
    assert!(body.contains("Lake Tahoe, California, USA"));

    let form = format!(
        "title=Lake+Cabin&location={loc_id}&price_per_night=199.5&bedrooms=3\
         &bathrooms=2&max_guests=6&amenities=WiFi%2C+Dock&is_available=true"
    );
    let resp = handle(post_form("/admin/properties", &form), &app).unwrap();
    assert_redirects_to_admin(&resp);

    let property = app.db.with_conn(|conn| find_property(conn, 1)).unwrap().unwrap();
    assert_eq!(property.title, "Lake Cabin");
    assert_eq!(property.location_id, Some(loc_id));
    assert_eq!(property.price_per_night.to_string(), "199.50");
    assert_eq!(property.bathrooms.to_string(), "2.0");
    assert_eq!(property.bedrooms, 3);
    assert_eq!(property.max_guests, 6);
    assert!(property.is_available);
}

#[test]
fn property_form_rejects_bad_values() {
    let app = init_test_db();

    let cases = [
        "title=&price_per_night=100",
        "title=Cabin&price_per_night=",
        "title=Cabin&price_per_night=cheap",
        "title=Cabin&price_per_night=100&bedrooms=two",
        "title=Cabin&price_per_night=100&bedrooms=-1",
        "title=Cabin&price_per_night=100&location=42",
    ];
    for form in cases {
        let resp = respond(post_form("/admin/properties", form), &app);
        assert_eq!(resp.status(), 400, "form {form:?} should be rejected");
    }

    let count: i64 = app
        .db
        .with_conn(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM properties", [], |r| r.get(0))?))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn edit_property_assigns_location_after_skip_location_import() {
    let app = init_test_db();
    let csv = "title,location,city,state,price_per_night,bedrooms,is_available\n\
               Harbor Loft,Old Port,Portland,Maine,210.00,2,true\n";
    let (summary, loc_id) = app
        .db
        .with_conn(|conn| {
            let summary = import_csv(conn, csv, true).expect("import failed");
            let loc = seed_location(conn, "Old Port", "Portland", "Maine");
            Ok((summary, loc.id))
        })
        .unwrap();
    assert_eq!(summary.created, 1);

    let imported = app.db.with_conn(|conn| find_property(conn, 1)).unwrap().unwrap();
    assert_eq!(imported.location_id, None);

    let page = body_string(handle(get("/admin/properties/1"), &app).unwrap());
    assert!(page.contains(r#"value="Harbor Loft""#));
    assert!(page.contains(r#"<option value="" selected>(none)</option>"#));

    // The checkbox is left unticked, so availability turns off.
    let form = format!("title=Harbor+Loft&location={loc_id}&price_per_night=210.00&bedrooms=2");
    let resp = handle(post_form("/admin/properties/1", &form), &app).unwrap();
    assert_redirects_to_admin(&resp);

    let property = app.db.with_conn(|conn| find_property(conn, 1)).unwrap().unwrap();
    assert_eq!(property.location_id, Some(loc_id));
    assert!(!property.is_available);
    assert!(property.updated_at >= imported.updated_at);

    let admin = body_string(handle(get("/admin"), &app).unwrap());
    assert!(!admin.contains("Needs location"));

    let missing = respond(post_form("/admin/properties/999", &form), &app);
    assert_eq!(missing.status(), 404);
}

#[test]
fn edit_location_keeps_triple_unique() {
    let app = init_test_db();
    let (aspen, vail) = app
        .db
        .with_conn(|conn| {
            let aspen = seed_location(conn, "Aspen Village", "Aspen", "Colorado");
            let vail = seed_location(conn, "Vail Valley", "Vail", "Colorado");
            Ok((aspen.id, vail.id))
        })
        .unwrap();

    let page = body_string(handle(get(&format!("/admin/locations/{aspen}")), &app).unwrap());
    assert!(page.contains(r#"value="Aspen Village""#));

    let resp = handle(
        post_form(
            &format!("/admin/locations/{aspen}"),
            "name=Aspen+Highlands&city=Aspen&state=CO&country=&description=Ski+town",
        ),
        &app,
    )
    .unwrap();
    assert_redirects_to_admin(&resp);

    let renamed = app
        .db
        .with_conn(|conn| find_location(conn, aspen))
        .unwrap()
        .unwrap();
    assert_eq!(renamed.name, "Aspen Highlands");
    assert_eq!(renamed.state, "CO");
    assert_eq!(renamed.country, "USA");
    assert_eq!(renamed.description.as_deref(), Some("Ski town"));

    let clash = respond(
        post_form(
            &format!("/admin/locations/{vail}"),
            "name=Aspen+Highlands&city=Aspen&state=Colorado",
        ),
        &app,
    );
    assert_eq!(clash.status(), 400);

    let untouched = app
        .db
        .with_conn(|conn| find_location(conn, vail))
        .unwrap()
        .unwrap();
    assert_eq!(untouched.name, "Vail Valley");

    let missing = respond(post_form("/admin/locations/999", "name=X&city=Y&state=Z"), &app);
    assert_eq!(missing.status(), 404);
}
