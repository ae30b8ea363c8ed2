// src/web/admin.rs
//
// Data-entry forms. Every successful post redirects back to /admin.

use crate::db::{images, locations, properties};
use crate::domain::property::{parse_scaled, BATHROOMS_SCALE, PRICE_SCALE};
use crate::domain::{NewImage, NewLocation, PropertyFields};
use crate::errors::{ResultResp, ServerError};
use crate::query::PropertyQuery;
use crate::requests::Params;
use crate::responses::{html_response, redirect};
use crate::state::AppState;
use crate::templates::pages::{
    admin_page, location_form_page, property_form_page, AdminVm, PropertyFormVm,
};
use astra::Request;
use chrono::Utc;
use rusqlite::Connection;
use rust_decimal::Decimal;

const ADMIN: &str = "/admin";

pub fn dashboard(state: &AppState) -> ResultResp {
    let vm = state.db.with_conn(|conn| {
        Ok(AdminVm {
            locations: locations::all_locations(conn)?,
            properties: properties::list_property_summaries(
                conn,
                &PropertyQuery::default(),
                None,
            )?,
            images: images::all_images_with_titles(conn)?,
        })
    })?;
    html_response(admin_page(&vm, state))
}

fn location_from_form(form: &Params) -> Result<NewLocation, ServerError> {
    NewLocation::from_parts(
        form.get("name").unwrap_or_default(),
        form.get("city").unwrap_or_default(),
        form.get("state").unwrap_or_default(),
        form.get("country"),
        form.get("description"),
    )
    .ok_or_else(|| ServerError::BadRequest("name, city and state are required".into()))
}

pub fn create_location(req: &mut Request, state: &AppState) -> ResultResp {
    let form = Params::from_form(req)?;
    let new = location_from_form(&form)?;

    let location = state
        .db
        .with_conn(|conn| locations::create_location(conn, &new))?;
    tracing::info!(location_id = location.id, name = %location.name, "created location");
    redirect(ADMIN)
}

pub fn edit_location(id: i64, state: &AppState) -> ResultResp {
    let location = state
        .db
        .with_conn(|conn| locations::find_location(conn, id))?
        .ok_or(ServerError::NotFound)?;
    html_response(location_form_page(&location))
}

pub fn update_location(id: i64, req: &mut Request, state: &AppState) -> ResultResp {
    let form = Params::from_form(req)?;
    let new = location_from_form(&form)?;

    found(
        state
            .db
            .with_conn(|conn| locations::update_location(conn, id, &new))?,
    )?;
    tracing::info!(location_id = id, "updated location");
    redirect(ADMIN)
}

pub fn delete_location(id: i64, state: &AppState) -> ResultResp {
    found(state.db.with_conn(|conn| locations::delete_location(conn, id))?)?;
    redirect(ADMIN)
}

/// Reads the property form. Unlike the importer, a value that does not
/// parse is rejected rather than replaced by a default. An unticked
/// `is_available` checkbox is absent from the body and means false.
fn property_from_form(conn: &Connection, form: &Params) -> Result<PropertyFields, ServerError> {
    let title = form
        .non_blank("title")
        .ok_or_else(|| ServerError::BadRequest("title is required".into()))?;
    let price = form
        .non_blank("price_per_night")
        .ok_or_else(|| ServerError::BadRequest("price_per_night is required".into()))?;

    let mut fields = PropertyFields::new(title, scaled(price, PRICE_SCALE, "price_per_night")?);
    fields.description = form.non_blank("description").unwrap_or_default().to_string();
    fields.property_type = form.non_blank("property_type").map(str::to_string);
    fields.address = form.non_blank("address").map(str::to_string);
    fields.amenities = form.non_blank("amenities").map(str::to_string);
    fields.is_available = form.flag("is_available")?.unwrap_or(false);

    if let Some(bedrooms) = form.parse_opt("bedrooms")? {
        fields.bedrooms = bedrooms;
    }
    if let Some(max_guests) = form.parse_opt("max_guests")? {
        fields.max_guests = max_guests;
    }
    if let Some(bathrooms) = form.non_blank("bathrooms") {
        fields.bathrooms = scaled(bathrooms, BATHROOMS_SCALE, "bathrooms")?;
    }
    if fields.bedrooms < 0 || fields.max_guests < 1 || fields.bathrooms.is_sign_negative() {
        return Err(ServerError::BadRequest(
            "bedrooms, bathrooms or max_guests out of range".into(),
        ));
    }

    fields.location_id = match form.parse_opt::<i64>("location")? {
        Some(id) => {
            locations::find_location(conn, id)?
                .ok_or_else(|| ServerError::BadRequest(format!("unknown location {id}")))?;
            Some(id)
        }
        None => None,
    };
    Ok(fields)
}

fn scaled(raw: &str, scale: u32, field: &str) -> Result<Decimal, ServerError> {
    parse_scaled(raw, scale)
        .ok_or_else(|| ServerError::BadRequest(format!("invalid value for {field}: {raw}")))
}

pub fn new_property(state: &AppState) -> ResultResp {
    let locations = state.db.with_conn(|conn| locations::all_locations(conn))?;
    html_response(property_form_page(&PropertyFormVm {
        property: None,
        locations: &locations,
    }))
}

pub fn create_property(req: &mut Request, state: &AppState) -> ResultResp {
    let form = Params::from_form(req)?;
    let property_id = state.db.with_conn(|conn| {
        let fields = property_from_form(conn, &form)?;
        properties::insert_property(conn, &fields, Utc::now().naive_utc())
    })?;
    tracing::info!(property_id, "created property");
    redirect(ADMIN)
}

pub fn edit_property(id: i64, state: &AppState) -> ResultResp {
    let (property, locations) = state.db.with_conn(|conn| {
        let property = properties::find_property(conn, id)?.ok_or(ServerError::NotFound)?;
        Ok((property, locations::all_locations(conn)?))
    })?;
    html_response(property_form_page(&PropertyFormVm {
        property: Some(&property),
        locations: &locations,
    }))
}

pub fn update_property(id: i64, req: &mut Request, state: &AppState) -> ResultResp {
    let form = Params::from_form(req)?;
    state.db.with_conn(|conn| {
        properties::find_property(conn, id)?.ok_or(ServerError::NotFound)?;
        let fields = property_from_form(conn, &form)?;
        properties::update_property(conn, id, &fields, Utc::now().naive_utc())
    })?;
    tracing::info!(property_id = id, "updated property");
    redirect(ADMIN)
}

pub fn delete_property(id: i64, state: &AppState) -> ResultResp {
    found(state.db.with_conn(|conn| properties::delete_property(conn, id))?)?;
    redirect(ADMIN)
}

pub fn add_image(property_id: i64, req: &mut Request, state: &AppState) -> ResultResp {
    let form = Params::from_form(req)?;
    let new = NewImage {
        image: form
            .non_blank("image")
            .ok_or_else(|| ServerError::BadRequest("image path is required".into()))?
            .to_string(),
        caption: form.non_blank("caption").map(str::to_string),
        is_primary: form.flag("is_primary")?.unwrap_or(false),
    };

    let image = state
        .db
        .with_conn(|conn| images::add_image(conn, property_id, &new))?;
    tracing::info!(image_id = image.id, property_id, primary = image.is_primary, "added image");
    redirect(ADMIN)
}

pub fn set_primary_image(id: i64, state: &AppState) -> ResultResp {
    found(state.db.with_conn(|conn| images::set_primary_image(conn, id))?)?;
    redirect(ADMIN)
}

pub fn delete_image(id: i64, state: &AppState) -> ResultResp {
    found(state.db.with_conn(|conn| images::delete_image(conn, id))?)?;
    tracing::info!(image_id = id, "deleted image");
    redirect(ADMIN)
}

fn found(hit: bool) -> Result<(), ServerError> {
    if hit {
        Ok(())
    } else {
        Err(ServerError::NotFound)
    }
}
