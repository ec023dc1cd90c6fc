//! Domain models for the two collections the tool keeps. The types stay plain
//! data holders; the `Record` trait is the seam the validator, sorter, search
//! and roster use so they never need to know which kind they are handling.

use std::fmt;

use crate::fields::{
    format_date, join_csv, parse_date, parse_year, split_csv, FieldError, FormField,
    MusicianField, PersonField,
};
use crate::validate::{check_active_years, ValidationError};

/// The two collections kept by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Person,
    Musician,
}

impl RecordKind {
    /// Singular noun used in titles and messages.
    pub fn noun(self) -> &'static str {
        match self {
            RecordKind::Person => "Person",
            RecordKind::Musician => "Musician",
        }
    }

    /// Lowercase noun for sentences.
    pub fn singular(self) -> &'static str {
        match self {
            RecordKind::Person => "person",
            RecordKind::Musician => "musician",
        }
    }

    /// Prefix for every settings key that belongs to this collection.
    pub fn key(self) -> &'static str {
        match self {
            RecordKind::Person => "people",
            RecordKind::Musician => "musicians",
        }
    }
}

/// Behaviour every stored entry exposes to the kind-agnostic layers.
pub trait Record: Clone + fmt::Debug + Default {
    type Field: FormField;
    const KIND: RecordKind;

    /// Primary key from the store. `None` until the record has been saved.
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: Option<i64>);

    /// Display name, also the alphabetical sort key and the search target.
    fn name(&self) -> &str;

    /// Birth timestamp in epoch seconds.
    fn born(&self) -> Option<i64>;

    /// Length of the active career in years. Kinds without active years, or
    /// records missing either end, report zero.
    fn active_span(&self) -> i64 {
        0
    }

    fn image(&self) -> Option<&str>;
    fn set_image(&mut self, image: Option<String>);

    /// Whether the field holds no value: empty (after trimming) for text and
    /// lists, `None` for optional scalars.
    fn is_blank(&self, field: Self::Field) -> bool;

    /// Store raw form text into the field, converting it to the field's type.
    fn set_field(&mut self, field: Self::Field, text: &str) -> Result<(), FieldError>;

    /// Render a field back into the text a form would show.
    fn field_text(&self, field: Self::Field) -> String;

    /// Whether `other` describes the same real-world entry.
    fn same_entry(&self, other: &Self) -> bool;

    /// Kind-specific rules checked after every mandatory field is present.
    fn check_rules(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A notable person. Mirrors a row in the `people` table.
pub struct Person {
    pub id: Option<i64>,
    pub name: String,
    pub occupation: String,
    pub nationality: String,
    /// Epoch seconds.
    pub birth_date: Option<i64>,
    pub birth_place: String,
    pub bio: String,
    pub achievements: Vec<String>,
    /// URL of the chosen portrait.
    pub image: Option<String>,
}

impl Record for Person {
    type Field = PersonField;
    const KIND: RecordKind = RecordKind::Person;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn born(&self) -> Option<i64> {
        self.birth_date
    }

    fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    fn set_image(&mut self, image: Option<String>) {
        self.image = image;
    }

    fn is_blank(&self, field: PersonField) -> bool {
        match field {
            PersonField::Name => is_blank_text(&self.name),
            PersonField::Occupation => is_blank_text(&self.occupation),
            PersonField::Nationality => is_blank_text(&self.nationality),
            PersonField::BirthDate => self.birth_date.is_none(),
            PersonField::BirthPlace => is_blank_text(&self.birth_place),
            PersonField::Achievements => self.achievements.is_empty(),
            PersonField::Bio => is_blank_text(&self.bio),
        }
    }

    fn set_field(&mut self, field: PersonField, text: &str) -> Result<(), FieldError> {
        match field {
            PersonField::Name => self.name = text.trim().to_string(),
            PersonField::Occupation => self.occupation = text.trim().to_string(),
            PersonField::Nationality => self.nationality = text.trim().to_string(),
            PersonField::BirthDate => self.birth_date = parse_date(text)?,
            PersonField::BirthPlace => self.birth_place = text.trim().to_string(),
            PersonField::Achievements => self.achievements = split_csv(text),
            PersonField::Bio => self.bio = text.trim().to_string(),
        }
        Ok(())
    }

    fn field_text(&self, field: PersonField) -> String {
        match field {
            PersonField::Name => self.name.clone(),
            PersonField::Occupation => self.occupation.clone(),
            PersonField::Nationality => self.nationality.clone(),
            PersonField::BirthDate => self.birth_date.map(format_date).unwrap_or_default(),
            PersonField::BirthPlace => self.birth_place.clone(),
            PersonField::Achievements => join_csv(&self.achievements),
            PersonField::Bio => self.bio.clone(),
        }
    }

    fn same_entry(&self, other: &Self) -> bool {
        self.name == other.name
            && self.occupation == other.occupation
            && self.nationality == other.nationality
            && self.birth_date == other.birth_date
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.name, self.occupation, self.nationality)?;
        if let Some(born) = self.birth_date {
            write!(f, " | born {}", format_date(born))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// A musician entry. Active years are kept split into two optional years
/// while editing; the store packs them back into a single `start-end` column.
pub struct Musician {
    pub id: Option<i64>,
    pub full_name: String,
    pub genres: String,
    pub instruments: String,
    pub labels: String,
    /// Epoch seconds.
    pub dob: Option<i64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub spouses: String,
    pub kids: String,
    pub relatives: String,
    pub works: String,
    /// Poster identifier chosen from the available posters.
    pub photo: Option<String>,
}

impl Musician {
    /// `start-end`, with an empty side for a missing year. `None` when
    /// neither year is known.
    pub fn active_years(&self) -> Option<String> {
        crate::fields::format_active_years(self.start_year, self.end_year)
    }
}

impl Record for Musician {
    type Field = MusicianField;
    const KIND: RecordKind = RecordKind::Musician;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.full_name
    }

    fn born(&self) -> Option<i64> {
        self.dob
    }

    fn active_span(&self) -> i64 {
        match (self.start_year, self.end_year) {
            (Some(start), Some(end)) => i64::from(end) - i64::from(start),
            _ => 0,
        }
    }

    fn image(&self) -> Option<&str> {
        self.photo.as_deref()
    }

    fn set_image(&mut self, image: Option<String>) {
        self.photo = image;
    }

    fn is_blank(&self, field: MusicianField) -> bool {
        match field {
            MusicianField::Name => is_blank_text(&self.full_name),
            MusicianField::Genres => is_blank_text(&self.genres),
            MusicianField::Instruments => is_blank_text(&self.instruments),
            MusicianField::Labels => is_blank_text(&self.labels),
            MusicianField::Dob => self.dob.is_none(),
            MusicianField::StartYear => self.start_year.is_none(),
            MusicianField::EndYear => self.end_year.is_none(),
            MusicianField::Spouses => is_blank_text(&self.spouses),
            MusicianField::Kids => is_blank_text(&self.kids),
            MusicianField::Relatives => is_blank_text(&self.relatives),
            MusicianField::Works => is_blank_text(&self.works),
        }
    }

    fn set_field(&mut self, field: MusicianField, text: &str) -> Result<(), FieldError> {
        match field {
            MusicianField::Name => self.full_name = text.trim().to_string(),
            MusicianField::Genres => self.genres = text.trim().to_string(),
            MusicianField::Instruments => self.instruments = text.trim().to_string(),
            MusicianField::Labels => self.labels = text.trim().to_string(),
            MusicianField::Dob => self.dob = parse_date(text)?,
            MusicianField::StartYear => self.start_year = parse_year(text),
            MusicianField::EndYear => self.end_year = parse_year(text),
            MusicianField::Spouses => self.spouses = text.trim().to_string(),
            MusicianField::Kids => self.kids = text.trim().to_string(),
            MusicianField::Relatives => self.relatives = text.trim().to_string(),
            MusicianField::Works => self.works = text.trim().to_string(),
        }
        Ok(())
    }

    fn field_text(&self, field: MusicianField) -> String {
        match field {
            MusicianField::Name => self.full_name.clone(),
            MusicianField::Genres => self.genres.clone(),
            MusicianField::Instruments => self.instruments.clone(),
            MusicianField::Labels => self.labels.clone(),
            MusicianField::Dob => self.dob.map(format_date).unwrap_or_default(),
            MusicianField::StartYear => self.start_year.map(|y| y.to_string()).unwrap_or_default(),
            MusicianField::EndYear => self.end_year.map(|y| y.to_string()).unwrap_or_default(),
            MusicianField::Spouses => self.spouses.clone(),
            MusicianField::Kids => self.kids.clone(),
            MusicianField::Relatives => self.relatives.clone(),
            MusicianField::Works => self.works.clone(),
        }
    }

    fn same_entry(&self, other: &Self) -> bool {
        self.full_name == other.full_name && self.dob == other.dob
    }

    fn check_rules(&self) -> Result<(), ValidationError> {
        check_active_years(self.start_year, self.end_year)
    }
}

impl fmt::Display for Musician {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.full_name, self.genres, self.instruments)?;
        if let Some(years) = self.active_years() {
            write!(f, " | active {years}")?;
        }
        Ok(())
    }
}

/// A registered account. Credentials never leave the `db` and `auth`
/// modules; this is the part that is safe to print.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) <{}>", self.username, self.full_name, self.email)
    }
}

fn is_blank_text(value: &str) -> bool {
    value.trim().is_empty()
}
