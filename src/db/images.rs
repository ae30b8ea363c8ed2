// src/db/images.rs
use crate::db::connection::write_tx;
use crate::domain::{NewImage, PropertyImage};
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

const IMAGE_COLUMNS: &str = "id, property_id, image, caption, is_primary, uploaded_at";

// Display order: cover image first, then oldest upload first.
const IMAGE_ORDER: &str = "is_primary DESC, uploaded_at ASC, id ASC";

fn image_from_row(row: &Row) -> rusqlite::Result<PropertyImage> {
    Ok(PropertyImage {
        id: row.get(0)?,
        property_id: row.get(1)?,
        image: row.get(2)?,
        caption: row.get(3)?,
        is_primary: row.get(4)?,
        uploaded_at: row.get(5)?,
    })
}

pub fn find_image(conn: &Connection, id: i64) -> Result<Option<PropertyImage>, ServerError> {
    let sql = format!("SELECT {IMAGE_COLUMNS} FROM property_images WHERE id = ?1");
    Ok(conn.query_row(&sql, params![id], image_from_row).optional()?)
}

pub fn images_for_property(
    conn: &Connection,
    property_id: i64,
) -> Result<Vec<PropertyImage>, ServerError> {
    let sql = format!(
        "SELECT {IMAGE_COLUMNS} FROM property_images WHERE property_id = ?1 ORDER BY {IMAGE_ORDER}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![property_id], image_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Every image with the title of its property, for the admin page.
pub fn all_images_with_titles(
    conn: &Connection,
) -> Result<Vec<(PropertyImage, String)>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT i.id, i.property_id, i.image, i.caption, i.is_primary, i.uploaded_at, p.title
        FROM property_images i
        JOIN properties p ON p.id = i.property_id
        ORDER BY p.title, i.is_primary DESC, i.uploaded_at ASC, i.id ASC
        "#,
    )?;
    let rows = stmt.query_map([], |row| Ok((image_from_row(row)?, row.get(6)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn clear_primary(conn: &Connection, property_id: i64, keep: Option<i64>) -> Result<(), ServerError> {
    conn.execute(
        r#"
        UPDATE property_images SET is_primary = 0
        WHERE property_id = ?1 AND is_primary = 1 AND id IS NOT ?2
        "#,
        params![property_id, keep],
    )?;
    Ok(())
}

/// Attaches an image to a property. When the new image is primary, the
/// previous cover is demoted in the same transaction.
pub fn add_image(
    conn: &mut Connection,
    property_id: i64,
    new: &NewImage,
) -> Result<PropertyImage, ServerError> {
    let now = Utc::now().naive_utc();
    let tx = write_tx(conn)?;

    let exists: Option<i64> = tx
        .query_row(
            "SELECT id FROM properties WHERE id = ?1",
            params![property_id],
            |r| r.get(0),
        )
        .optional()?;
    if exists.is_none() {
        return Err(ServerError::NotFound);
    }

    if new.is_primary {
        clear_primary(&tx, property_id, None)?;
    }

    tx.execute(
        r#"
        INSERT INTO property_images (property_id, image, caption, is_primary, uploaded_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
        params![property_id, &new.image, &new.caption, new.is_primary, now],
    )?;
    let id = tx.last_insert_rowid();
    let image = find_image(&tx, id)?.ok_or(ServerError::InternalError)?;

    tx.commit()?;
    Ok(image)
}

/// Makes `image_id` the cover image of its property, clearing every other
/// primary flag first. Returns `false` when the image does not exist.
pub fn set_primary_image(conn: &mut Connection, image_id: i64) -> Result<bool, ServerError> {
    let tx = write_tx(conn)?;

    let Some(image) = find_image(&tx, image_id)? else {
        return Ok(false);
    };

    clear_primary(&tx, image.property_id, Some(image.id))?;
    tx.execute(
        "UPDATE property_images SET is_primary = 1 WHERE id = ?1",
        params![image.id],
    )?;

    tx.commit()?;
    tracing::info!(image_id, property_id = image.property_id, "set primary image");
    Ok(true)
}

pub fn delete_image(conn: &Connection, image_id: i64) -> Result<bool, ServerError> {
    let deleted = conn.execute("DELETE FROM property_images WHERE id = ?1", params![image_id])?;
    Ok(deleted == 1)
}
