// src/db/locations.rs
use crate::db::connection::write_tx;
use crate::domain::{Location, NewLocation};
use crate::errors::ServerError;
use crate::query::{LocationQuery, AUTOCOMPLETE_LIMIT};
use chrono::{NaiveDateTime, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ErrorCode, OptionalExtension, Row};

const LOCATION_COLUMNS: &str =
    "id, name, city, state, country, description, created_at, updated_at";

fn location_from_row(row: &Row) -> rusqlite::Result<Location> {
    Ok(Location {
        id: row.get(0)?,
        name: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        country: row.get(4)?,
        description: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

/// Reads a LEFT JOINed location starting at column `start`. All eight
/// columns are NULL when the property has no location.
pub(crate) fn joined_location(row: &Row, start: usize) -> rusqlite::Result<Option<Location>> {
    let id: Option<i64> = row.get(start)?;
    let Some(id) = id else {
        return Ok(None);
    };
    Ok(Some(Location {
        id,
        name: row.get(start + 1)?,
        city: row.get(start + 2)?,
        state: row.get(start + 3)?,
        country: row.get(start + 4)?,
        description: row.get(start + 5)?,
        created_at: row.get(start + 6)?,
        updated_at: row.get(start + 7)?,
    }))
}

pub fn find_location(conn: &Connection, id: i64) -> Result<Option<Location>, ServerError> {
    let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], location_from_row).optional()?)
}

fn find_location_by_key(
    conn: &Connection,
    name: &str,
    city: &str,
    country: &str,
) -> Result<Option<Location>, ServerError> {
    let sql = format!(
        "SELECT {LOCATION_COLUMNS} FROM locations WHERE name = ?1 AND city = ?2 AND country = ?3"
    );
    Ok(conn
        .query_row(&sql, params![name, city, country], location_from_row)
        .optional()?)
}

/// Resolves the location named by (name, city, country), creating it when
/// absent. `state` and `description` only apply on creation; an existing
/// row is returned untouched. Returns the location and whether it was
/// created by this call.
///
/// A concurrent writer that inserts the same triple first makes our insert
/// a no-op (`ON CONFLICT DO NOTHING`), and the re-select returns its row.
pub fn get_or_create_location(
    conn: &Connection,
    new: &NewLocation,
    now: NaiveDateTime,
) -> Result<(Location, bool), ServerError> {
    if let Some(existing) = find_location_by_key(conn, &new.name, &new.city, &new.country)? {
        return Ok((existing, false));
    }

    let inserted = conn.execute(
        r#"
        INSERT INTO locations (name, city, state, country, description, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        ON CONFLICT (name, city, country) DO NOTHING
        "#,
        params![
            &new.name,
            &new.city,
            &new.state,
            &new.country,
            &new.description,
            now
        ],
    )?;

    let location = find_location_by_key(conn, &new.name, &new.city, &new.country)?
        .ok_or_else(|| ServerError::DbError("location vanished after insert".into()))?;

    Ok((location, inserted == 1))
}

/// Admin-side creation. Unlike the importer, a duplicate triple is
/// reported back to the caller.
pub fn create_location(conn: &Connection, new: &NewLocation) -> Result<Location, ServerError> {
    let now = Utc::now().naive_utc();
    let result = conn.execute(
        r#"
        INSERT INTO locations (name, city, state, country, description, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
        "#,
        params![
            &new.name,
            &new.city,
            &new.state,
            &new.country,
            &new.description,
            now
        ],
    );

    result.map_err(|e| duplicate_as_bad_request(e, new))?;

    let id = conn.last_insert_rowid();
    find_location(conn, id)?.ok_or(ServerError::InternalError)
}

/// Admin edit of every field. Moving onto another location's
/// (name, city, country) is rejected like a duplicate create. Returns
/// `false` when the location does not exist.
pub fn update_location(
    conn: &Connection,
    id: i64,
    new: &NewLocation,
) -> Result<bool, ServerError> {
    let now = Utc::now().naive_utc();
    let updated = conn
        .execute(
            r#"
            UPDATE locations
            SET name = ?1, city = ?2, state = ?3, country = ?4, description = ?5, updated_at = ?6
            WHERE id = ?7
            "#,
            params![
                &new.name,
                &new.city,
                &new.state,
                &new.country,
                &new.description,
                now,
                id
            ],
        )
        .map_err(|e| duplicate_as_bad_request(e, new))?;
    Ok(updated == 1)
}

fn duplicate_as_bad_request(err: rusqlite::Error, new: &NewLocation) -> ServerError {
    match err {
        rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation => {
            ServerError::BadRequest(format!(
                "location \"{}\" in {}, {} already exists",
                new.name, new.city, new.country
            ))
        }
        other => other.into(),
    }
}

/// Deletes a location. Properties pointing at it keep existing with
/// their location cleared, in the same transaction.
pub fn delete_location(conn: &mut Connection, id: i64) -> Result<bool, ServerError> {
    let now = Utc::now().naive_utc();
    let tx = write_tx(conn)?;

    let detached = tx.execute(
        "UPDATE properties SET location_id = NULL, updated_at = ?1 WHERE location_id = ?2",
        params![now, id],
    )?;
    let deleted = tx.execute("DELETE FROM locations WHERE id = ?1", params![id])?;

    tx.commit()?;

    if deleted == 1 {
        tracing::info!(location_id = id, detached, "deleted location");
    }
    Ok(deleted == 1)
}

/// Every location, by name. Used by the admin page.
pub fn all_locations(conn: &Connection) -> Result<Vec<Location>, ServerError> {
    let sql = format!("SELECT {LOCATION_COLUMNS} FROM locations ORDER BY name, id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], location_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn search_clause(query: &LocationQuery) -> (String, Vec<Value>) {
    let mut clauses = Vec::new();
    let mut values = Vec::new();

    for term in &query.search {
        clauses.push(
            "(instr(casefold(name), casefold(?)) > 0 OR instr(casefold(city), casefold(?)) > 0 \
             OR instr(casefold(state), casefold(?)) > 0)",
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

pub fn count_locations(conn: &Connection, query: &LocationQuery) -> Result<u64, ServerError> {
    let (where_sql, values) = search_clause(query);
    let sql = format!("SELECT COUNT(*) FROM locations {where_sql}");
    let n: i64 = conn.query_row(&sql, params_from_iter(values.iter()), |r| r.get(0))?;
    Ok(n.unsigned_abs())
}

pub fn list_locations(
    conn: &Connection,
    query: &LocationQuery,
    limit: u64,
    offset: u64,
) -> Result<Vec<Location>, ServerError> {
    let (where_sql, mut values) = search_clause(query);
    let sql = format!(
        "SELECT {LOCATION_COLUMNS} FROM locations {where_sql} ORDER BY {} LIMIT ? OFFSET ?",
        query.ordering.order_by()
    );
    values.push(Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)));
    values.push(Value::Integer(i64::try_from(offset).unwrap_or(i64::MAX)));

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(values.iter()), location_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Case-insensitive substring match on name, city or state; at most
/// [`AUTOCOMPLETE_LIMIT`] rows ordered by name. `needle` must be
/// non-empty, the caller short-circuits blank input.
pub fn autocomplete_locations(conn: &Connection, needle: &str) -> Result<Vec<Location>, ServerError> {
    let sql = format!(
        r#"
        SELECT {LOCATION_COLUMNS} FROM locations
        WHERE instr(casefold(name), casefold(?1)) > 0
           OR instr(casefold(city), casefold(?1)) > 0
           OR instr(casefold(state), casefold(?1)) > 0
        ORDER BY name, id
        LIMIT ?2
        "#
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![needle, AUTOCOMPLETE_LIMIT], location_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{init_test_db, seed_location, seed_property};

    fn miami() -> NewLocation {
        NewLocation::from_parts("Miami Beach", "Miami", "Florida", None, None).unwrap()
    }

    #[test]
    fn get_or_create_reuses_existing_triple() {
        let app = init_test_db();
        app.db
            .with_conn(|conn| {
                let now = Utc::now().naive_utc();
                let (first, created) = get_or_create_location(conn, &miami(), now)?;
                assert!(created);

                let mut later = miami();
                later.state = "FL".into();
                let (second, created) = get_or_create_location(conn, &later, now)?;
                assert!(!created);
                assert_eq!(second.id, first.id);
                // first writer wins
                assert_eq!(second.state, "Florida");

                assert_eq!(all_locations(conn)?.len(), 1);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn admin_create_rejects_duplicate_triple() {
        let app = init_test_db();
        app.db
            .with_conn(|conn| {
                create_location(conn, &miami())?;
                let err = create_location(conn, &miami()).unwrap_err();
                assert!(matches!(err, ServerError::BadRequest(_)));
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn update_location_keeps_triple_unique() {
        let app = init_test_db();
        app.db
            .with_conn(|conn| {
                let miami = create_location(conn, &miami())?;
                let aspen = seed_location(conn, "Aspen Village", "Aspen", "Colorado");

                let mut renamed = self::miami();
                renamed.state = "FL".into();
                renamed.description = Some("Sunny".into());
                assert!(update_location(conn, miami.id, &renamed)?);
                let stored = find_location(conn, miami.id)?.unwrap();
                assert_eq!(stored.state, "FL");
                assert_eq!(stored.description.as_deref(), Some("Sunny"));

                let err = update_location(conn, aspen.id, &self::miami()).unwrap_err();
                assert!(matches!(err, ServerError::BadRequest(_)));

                assert!(!update_location(conn, 9999, &self::miami())?);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn deleting_location_nulls_property_reference() {
        let app = init_test_db();
        app.db
            .with_conn(|conn| {
                let loc = seed_location(conn, "Aspen Village", "Aspen", "Colorado");
                let property_id = seed_property(conn, "Ski Chalet", Some(loc.id), "350.00", true);

                assert!(delete_location(conn, loc.id)?);
                assert!(find_location(conn, loc.id)?.is_none());

                let property = crate::db::properties::find_property(conn, property_id)?
                    .expect("property survives its location");
                assert_eq!(property.location_id, None);

                assert!(!delete_location(conn, loc.id)?);
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn autocomplete_caps_at_five_ordered_by_name() {
        let app = init_test_db();
        app.db
            .with_conn(|conn| {
                for name in ["Hotel", "Golf", "Foxtrot", "Echo", "Delta", "Charlie", "Bravo", "Alpha"] {
                    seed_location(conn, &format!("{name} Bay"), "Tampa", "Florida");
                }

                let hits = autocomplete_locations(conn, "BAY")?;
                let names: Vec<&str> = hits.iter().map(|l| l.name.as_str()).collect();
                assert_eq!(
                    names,
                    vec!["Alpha Bay", "Bravo Bay", "Charlie Bay", "Delta Bay", "Echo Bay"]
                );

                // state matches too
                assert_eq!(autocomplete_locations(conn, "flor")?.len(), 5);
                assert!(autocomplete_locations(conn, "Denver")?.is_empty());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn autocomplete_folds_non_ascii_case() {
        let app = init_test_db();
        app.db
            .with_conn(|conn| {
                seed_location(conn, "Île Verte", "QUÉBEC", "Québec");
                assert_eq!(autocomplete_locations(conn, "québec")?.len(), 1);
                assert_eq!(autocomplete_locations(conn, "ÎLE")?.len(), 1);
                Ok(())
            })
            .unwrap();
    }
}
