// src/db/properties.rs
use crate::db::connection::write_tx;
use crate::db::images::images_for_property;
use crate::db::locations::joined_location;
use crate::domain::{Property, PropertyDetail, PropertyFields, PropertySummary};
use crate::errors::ServerError;
use crate::query::{LocationMatch, PropertyQuery};
use chrono::NaiveDateTime;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

const PROPERTY_COLUMNS: &str = r#"
    p.id, p.title, p.description, p.location_id, p.property_type,
    p.bedrooms, p.bathrooms, p.max_guests, p.price_per_night,
    p.address, p.amenities, p.is_available, p.created_at, p.updated_at
"#;

const JOINED_LOCATION_COLUMNS: &str = r#"
    l.id, l.name, l.city, l.state, l.country, l.description, l.created_at, l.updated_at
"#;

/// Decimals live in TEXT columns; parse them back keeping their scale.
fn decimal_at(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn property_from_row(row: &Row) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        location_id: row.get(3)?,
        property_type: row.get(4)?,
        bedrooms: row.get(5)?,
        bathrooms: decimal_at(row, 6)?,
        max_guests: row.get(7)?,
        price_per_night: decimal_at(row, 8)?,
        address: row.get(9)?,
        amenities: row.get(10)?,
        is_available: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

pub fn find_property(conn: &Connection, id: i64) -> Result<Option<Property>, ServerError> {
    let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties p WHERE p.id = ?1");
    Ok(conn.query_row(&sql, params![id], property_from_row).optional()?)
}

/// The importer's natural key. Only meaningful with a location: a
/// property without one is never matched.
pub fn find_property_id_by_title_and_location(
    conn: &Connection,
    title: &str,
    location_id: i64,
) -> Result<Option<i64>, ServerError> {
    Ok(conn
        .query_row(
            "SELECT id FROM properties WHERE title = ?1 AND location_id = ?2 ORDER BY id LIMIT 1",
            params![title, location_id],
            |row| row.get(0),
        )
        .optional()?)
}

pub fn insert_property(
    conn: &Connection,
    fields: &PropertyFields,
    now: NaiveDateTime,
) -> Result<i64, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        INSERT INTO properties (
            title, description, location_id, property_type,
            bedrooms, bathrooms, max_guests, price_per_night,
            address, amenities, is_available, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)
        "#,
    )?;
    stmt.execute(params![
        &fields.title,
        &fields.description,
        fields.location_id,
        &fields.property_type,
        fields.bedrooms,
        fields.bathrooms.to_string(),
        fields.max_guests,
        fields.price_per_night.to_string(),
        &fields.address,
        &fields.amenities,
        fields.is_available,
        now,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites every writable column of an existing property.
pub fn update_property(
    conn: &Connection,
    id: i64,
    fields: &PropertyFields,
    now: NaiveDateTime,
) -> Result<(), ServerError> {
    conn.execute(
        r#"
        UPDATE properties SET
            title = ?1, description = ?2, location_id = ?3, property_type = ?4,
            bedrooms = ?5, bathrooms = ?6, max_guests = ?7, price_per_night = ?8,
            address = ?9, amenities = ?10, is_available = ?11, updated_at = ?12
        WHERE id = ?13
        "#,
        params![
            &fields.title,
            &fields.description,
            fields.location_id,
            &fields.property_type,
            fields.bedrooms,
            fields.bathrooms.to_string(),
            fields.max_guests,
            fields.price_per_night.to_string(),
            &fields.address,
            &fields.amenities,
            fields.is_available,
            now,
            id,
        ],
    )?;
    Ok(())
}

/// Deletes a property together with all of its images.
pub fn delete_property(conn: &mut Connection, id: i64) -> Result<bool, ServerError> {
    let tx = write_tx(conn)?;
    let images = tx.execute("DELETE FROM property_images WHERE property_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM properties WHERE id = ?1", params![id])?;
    tx.commit()?;

    if deleted == 1 {
        tracing::info!(property_id = id, images, "deleted property");
    }
    Ok(deleted == 1)
}

/// Builds the WHERE clause shared by the count and the page query.
/// Every user-supplied value travels as a bound parameter.
fn filter_clause(query: &PropertyQuery) -> (String, Vec<Value>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut values = Vec::new();

    if query.available_only {
        clauses.push("p.is_available = 1".into());
    }

    if let Some(text) = &query.location_text {
        let clause = match query.location_match {
            LocationMatch::NameOrCity => {
                "(instr(casefold(l.name), casefold(?)) > 0 OR instr(casefold(l.city), casefold(?)) > 0)"
            }
            LocationMatch::NameCityOrState => {
                "(instr(casefold(l.name), casefold(?)) > 0 OR instr(casefold(l.city), casefold(?)) > 0 \
                 OR instr(casefold(l.state), casefold(?)) > 0)"
            }
        };
        let binds = match query.location_match {
            LocationMatch::NameOrCity => 2,
            LocationMatch::NameCityOrState => 3,
        };
        clauses.push(clause.into());
        for _ in 0..binds {
            values.push(Value::Text(text.clone()));
        }
    }

    if let Some(location_id) = query.location_id {
        clauses.push("p.location_id = ?".into());
        values.push(Value::Integer(location_id));
    }

    if let Some(property_type) = &query.property_type {
        clauses.push("p.property_type = ?".into());
        values.push(Value::Text(property_type.clone()));
    }

    if let Some(bedrooms) = query.bedrooms {
        clauses.push("p.bedrooms = ?".into());
        values.push(Value::Integer(bedrooms));
    }

    if let Some(is_available) = query.is_available {
        clauses.push("p.is_available = ?".into());
        values.push(Value::Integer(i64::from(is_available)));
    }

    for term in &query.search {
        clauses.push(
            "(instr(casefold(p.title), casefold(?)) > 0 \
             OR instr(casefold(p.description), casefold(?)) > 0 \
             OR instr(casefold(coalesce(l.name, '')), casefold(?)) > 0)"
                .into(),
        );
        for _ in 0..3 {
            values.push(Value::Text(term.clone()));
        }
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    (where_sql, values)
}

pub fn count_properties(conn: &Connection, query: &PropertyQuery) -> Result<u64, ServerError> {
    let (where_sql, values) = filter_clause(query);
    let sql = format!(
        "SELECT COUNT(*) FROM properties p LEFT JOIN locations l ON l.id = p.location_id {where_sql}"
    );
    let n: i64 = conn.query_row(&sql, params_from_iter(values.iter()), |r| r.get(0))?;
    Ok(n.unsigned_abs())
}

/// One page of list rows in a single statement: the location comes from
/// a join and the cover image from a LIMIT 1 subquery in image display
/// order, so the cost does not grow with the number of images.
/// `window` is `(limit, offset)`; `None` returns every match.
pub fn list_property_summaries(
    conn: &Connection,
    query: &PropertyQuery,
    window: Option<(u64, u64)>,
) -> Result<Vec<PropertySummary>, ServerError> {
    let (where_sql, mut values) = filter_clause(query);

    let (limit, offset) = window
        .map(|(limit, offset)| {
            (
                i64::try_from(limit).unwrap_or(i64::MAX),
                i64::try_from(offset).unwrap_or(i64::MAX),
            )
        })
        // SQLite reads a negative LIMIT as "no limit"
        .unwrap_or((-1, 0));
    values.push(Value::Integer(limit));
    values.push(Value::Integer(offset));

    let sql = format!(
        r#"
        SELECT
            p.id,               -- 0
            p.title,            -- 1
            p.property_type,    -- 2
            p.bedrooms,         -- 3
            p.bathrooms,        -- 4
            p.max_guests,       -- 5
            p.price_per_night,  -- 6
            p.is_available,     -- 7
            (
                SELECT i.image FROM property_images i
                WHERE i.property_id = p.id
                ORDER BY i.is_primary DESC, i.uploaded_at ASC, i.id ASC
                LIMIT 1
            ) AS first_image,   -- 8
            {JOINED_LOCATION_COLUMNS}  -- 9..=16
        FROM properties p
        LEFT JOIN locations l ON l.id = p.location_id
        {where_sql}
        ORDER BY {}
        LIMIT ? OFFSET ?
        "#,
        query.ordering.order_by()
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), |row| {
        Ok(PropertySummary {
            id: row.get(0)?,
            title: row.get(1)?,
            property_type: row.get(2)?,
            bedrooms: row.get(3)?,
            bathrooms: decimal_at(row, 4)?,
            max_guests: row.get(5)?,
            price_per_night: decimal_at(row, 6)?,
            is_available: row.get(7)?,
            first_image: row.get(8)?,
            location: joined_location(row, 9)?,
        })
    })?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row?);
    }
    Ok(results)
}

/// The property with its location (joined) and its full image set (one
/// extra query).
pub fn find_property_detail(
    conn: &Connection,
    id: i64,
) -> Result<Option<PropertyDetail>, ServerError> {
    let sql = format!(
        r#"
        SELECT {PROPERTY_COLUMNS}, {JOINED_LOCATION_COLUMNS}
        FROM properties p
        LEFT JOIN locations l ON l.id = p.location_id
        WHERE p.id = ?1
        "#
    );

    let found = conn
        .query_row(&sql, params![id], |row| {
            Ok((property_from_row(row)?, joined_location(row, 14)?))
        })
        .optional()?;

    let Some((property, location)) = found else {
        return Ok(None);
    };

    let images = images_for_property(conn, property.id)?;
    Ok(Some(PropertyDetail {
        property,
        location,
        images,
    }))
}
