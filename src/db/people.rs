use anyhow::{anyhow, Context, Result};
use rusqlite::{params, Connection, Row};

use crate::fields::{join_csv, split_csv};
use crate::models::Person;

const PERSON_COLUMNS: &str =
    "id, name, occupation, nationality, birth_date, birth_place, bio, achievements, image";

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    let achievements: String = row.get(7)?;
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        occupation: row.get(2)?,
        nationality: row.get(3)?,
        birth_date: row.get(4)?,
        birth_place: row.get(5)?,
        bio: row.get(6)?,
        achievements: split_csv(&achievements),
        image: row.get(8)?,
    })
}

/// Every stored person in insertion order. Presentation order is the
/// sorter's job, not the query's.
pub fn fetch_people(conn: &Connection) -> Result<Vec<Person>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {PERSON_COLUMNS} FROM people ORDER BY id"))
        .context("failed to prepare people query")?;

    let people = stmt
        .query_map([], person_from_row)
        .context("failed to load people")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect people")?;

    Ok(people)
}

/// Insert a new person row and return it with its assigned id.
pub fn create_person(conn: &Connection, person: &Person) -> Result<Person> {
    conn.execute(
        "INSERT INTO people (name, occupation, nationality, birth_date, birth_place, bio, achievements, image)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            person.name,
            person.occupation,
            person.nationality,
            person.birth_date,
            person.birth_place,
            person.bio,
            join_csv(&person.achievements),
            person.image,
        ],
    )
    .context("failed to insert person")?;

    Ok(Person {
        id: Some(conn.last_insert_rowid()),
        ..person.clone()
    })
}

/// Overwrite every column of the person with `id`, failing when no row
/// matched.
pub fn update_person(conn: &Connection, id: i64, person: &Person) -> Result<()> {
    let updated = conn
        .execute(
            "UPDATE people
             SET name = ?1, occupation = ?2, nationality = ?3, birth_date = ?4,
                 birth_place = ?5, bio = ?6, achievements = ?7, image = ?8
             WHERE id = ?9",
            params![
                person.name,
                person.occupation,
                person.nationality,
                person.birth_date,
                person.birth_place,
                person.bio,
                join_csv(&person.achievements),
                person.image,
                id,
            ],
        )
        .context("failed to update person")?;

    if updated == 0 {
        Err(anyhow!("Person not found"))
    } else {
        Ok(())
    }
}

/// Remove one person row, failing when no row matched.
pub fn delete_person(conn: &Connection, id: i64) -> Result<()> {
    let deleted = conn
        .execute("DELETE FROM people WHERE id = ?1", params![id])
        .context("failed to delete person")?;

    if deleted == 0 {
        Err(anyhow!("Person not found"))
    } else {
        Ok(())
    }
}

/// Remove every person, returning how many rows went away.
pub fn delete_all_people(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM people", [])
        .context("failed to delete people")
}
