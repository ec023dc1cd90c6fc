use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::fields::parse_active_years;
use crate::models::Musician;

const MUSICIAN_COLUMNS: &str = "id, full_name, genres, instruments, labels, dob, active_years, \
     spouses, kids, relatives, works, photo";

/// Map a row selected with [`MUSICIAN_COLUMNS`] back into a `Musician`,
/// unpacking the `start-end` active-years column.
fn musician_from_row(row: &Row<'_>) -> rusqlite::Result<Musician> {
    let active_years: Option<String> = row.get(6)?;
    let (start_year, end_year) = active_years
        .as_deref()
        .map(parse_active_years)
        .unwrap_or((None, None));
    Ok(Musician {
        id: row.get(0)?,
        full_name: row.get(1)?,
        genres: row.get(2)?,
        instruments: row.get(3)?,
        labels: row.get(4)?,
        dob: row.get(5)?,
        start_year,
        end_year,
        spouses: row.get(7)?,
        kids: row.get(8)?,
        relatives: row.get(9)?,
        works: row.get(10)?,
        photo: row.get(11)?,
    })
}

/// Every stored musician in insertion order. The roster sorts them itself,
/// so the query does not try to.
pub fn fetch_musicians(conn: &Connection) -> Result<Vec<Musician>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {MUSICIAN_COLUMNS} FROM musicians ORDER BY id"
        ))
        .context("failed to prepare musician query")?;

    let musicians = stmt
        .query_map([], musician_from_row)
        .context("failed to load musicians")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect musicians")?;

    Ok(musicians)
}

/// Insert a new musician. Active years are packed into a single `start-end`
/// column with an empty side for a missing year, or `NULL` when neither is
/// known.
pub fn create_musician(conn: &Connection, musician: &Musician) -> Result<Musician> {
    conn.execute(
        "INSERT INTO musicians (full_name, genres, instruments, labels, dob, active_years,
                                spouses, kids, relatives, works, photo)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            musician.full_name,
            musician.genres,
            musician.instruments,
            musician.labels,
            musician.dob,
            musician.active_years(),
            musician.spouses,
            musician.kids,
            musician.relatives,
            musician.works,
            musician.photo,
        ],
    )
    .context("failed to insert musician")?;

    Ok(Musician {
        id: Some(conn.last_insert_rowid()),
        ..musician.clone()
    })
}

/// Overwrite every column of the musician with `id`. Zero affected rows is
/// reported as an error so a stale id never looks like a successful save.
pub fn update_musician(conn: &Connection, id: i64, musician: &Musician) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE musicians
             SET full_name = ?1, genres = ?2, instruments = ?3, labels = ?4, dob = ?5,
                 active_years = ?6, spouses = ?7, kids = ?8, relatives = ?9, works = ?10,
                 photo = ?11
             WHERE id = ?12",
            params![
                musician.full_name,
                musician.genres,
                musician.instruments,
                musician.labels,
                musician.dob,
                musician.active_years(),
                musician.spouses,
                musician.kids,
                musician.relatives,
                musician.works,
                musician.photo,
                id,
            ],
        )
        .context("failed to update musician")?;

    if updated == 0 {
        Err(anyhow!("Musician not found"))
    } else {
        Ok(())
    }
}

/// Remove one musician row. A missing id is an error for the same reason as
/// in [`update_musician`].
pub fn delete_musician(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM musicians WHERE id = ?1", params![id])
        .context("failed to delete musician")?;

    if deleted == 0 {
        Err(anyhow!("Musician not found"))
    } else {
        Ok(())
    }
}

/// Remove every musician, returning how many rows went away.
pub fn delete_all_musicians(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM musicians", [])
        .context("failed to delete musicians")
}
