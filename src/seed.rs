//! One-time import of a bundled JSON list into an empty collection.
//!
//! Every image or poster referenced by the imported entries becomes one of
//! the candidates the picker offers later on.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use crate::db::{RecordStore, SqliteStore};
use crate::fields::parse_active_years;
use crate::models::{Musician, Person, Record, RecordKind};

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub imported: usize,
    /// Entries dropped because an equal entry was already present.
    pub skipped: usize,
    /// Size of the available image list after the import.
    pub images: usize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct MusicianSeed {
    full_name: Option<String>,
    genres: Option<String>,
    instruments: Option<String>,
    labels: Option<String>,
    born: Option<f64>,
    years_active: Option<String>,
    spouses: Option<String>,
    children: Option<String>,
    relatives: Option<String>,
    notable_works: Option<String>,
    #[serde(rename = "imageURL")]
    image_url: Option<String>,
}

impl From<MusicianSeed> for Musician {
    fn from(seed: MusicianSeed) -> Self {
        let (start_year, end_year) = seed
            .years_active
            .as_deref()
            .map(parse_active_years)
            .unwrap_or((None, None));
        Musician {
            id: None,
            full_name: trimmed(seed.full_name),
            genres: trimmed(seed.genres),
            instruments: trimmed(seed.instruments),
            labels: trimmed(seed.labels),
            dob: seed.born.map(|born| born as i64),
            start_year,
            end_year,
            spouses: trimmed(seed.spouses),
            kids: trimmed(seed.children),
            relatives: trimmed(seed.relatives),
            works: trimmed(seed.notable_works),
            photo: image_id(seed.image_url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PersonSeed {
    name: String,
    occupation: String,
    nationality: String,
    birth_date: Option<f64>,
    birth_place: String,
    bio: String,
    achievements: Vec<String>,
    image: Option<String>,
}

impl From<PersonSeed> for Person {
    fn from(seed: PersonSeed) -> Self {
        Person {
            id: None,
            name: seed.name.trim().to_string(),
            occupation: seed.occupation.trim().to_string(),
            nationality: seed.nationality.trim().to_string(),
            birth_date: seed.birth_date.map(|born| born as i64),
            birth_place: seed.birth_place.trim().to_string(),
            bio: seed.bio.trim().to_string(),
            achievements: seed
                .achievements
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            image: image_id(seed.image),
        }
    }
}

// Seeded text is held to the same trimming as form input.
fn trimmed(value: Option<String>) -> String {
    value.map(|text| text.trim().to_string()).unwrap_or_default()
}

fn image_id(value: Option<String>) -> Option<String> {
    value
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// Import `path` into the collection for `kind`. Returns `None` when that
/// collection has been seeded before.
pub fn seed_file(
    store: &mut SqliteStore,
    kind: RecordKind,
    path: &Path,
) -> Result<Option<SeedReport>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    match kind {
        RecordKind::Person => seed_people(store, &raw),
        RecordKind::Musician => seed_musicians(store, &raw),
    }
}

pub fn seed_musicians(store: &mut SqliteStore, json: &str) -> Result<Option<SeedReport>> {
    let seeds: Vec<MusicianSeed> =
        serde_json::from_str(json).context("seed file is not a JSON array of musicians")?;
    import(store, seeds.into_iter().map(Musician::from).collect())
}

pub fn seed_people(store: &mut SqliteStore, json: &str) -> Result<Option<SeedReport>> {
    let seeds: Vec<PersonSeed> =
        serde_json::from_str(json).context("seed file is not a JSON array of people")?;
    import(store, seeds.into_iter().map(Person::from).collect())
}

fn import<R: Record>(store: &mut SqliteStore, records: Vec<R>) -> Result<Option<SeedReport>>
where
    SqliteStore: RecordStore<R>,
{
    if store.is_seeded(R::KIND)? {
        info!(collection = R::KIND.key(), "already seeded, skipping import");
        return Ok(None);
    }

    let mut existing: Vec<R> = <SqliteStore as RecordStore<R>>::fetch_all(store)?;
    let mut images = store.available_images(R::KIND)?;
    let mut report = SeedReport {
        imported: 0,
        skipped: 0,
        images: 0,
    };

    for record in records {
        if let Some(image) = record.image() {
            if !images.iter().any(|known| known == image) {
                images.push(image.to_string());
            }
        }
        if existing.iter().any(|known| known.same_entry(&record)) {
            report.skipped += 1;
            continue;
        }
        let saved = <SqliteStore as RecordStore<R>>::insert(store, &record)?;
        existing.push(saved);
        report.imported += 1;
    }

    store.set_available_images(R::KIND, &images)?;
    store.mark_seeded(R::KIND)?;
    report.images = images.len();
    info!(
        collection = R::KIND.key(),
        imported = report.imported,
        skipped = report.skipped,
        images = report.images,
        "seed import finished"
    );
    Ok(Some(report))
}
