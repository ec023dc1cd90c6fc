//! Editable fields for each record kind plus the small text codecs used when a
//! form value crosses into (or out of) a typed record. The field enums double
//! as the declaration order that validation walks, so the variant order here
//! is significant.

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

/// Date layout accepted by form inputs and printed by listings.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Problems turning raw form text into a typed field value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("\"{0}\" is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("unknown field \"{0}\"")]
    UnknownField(String),
}

/// Behaviour shared by the per-kind field enums.
pub trait FormField: Copy + Eq + std::fmt::Debug + 'static {
    /// Every field, in declaration order.
    const ALL: &'static [Self];

    /// Human label shown next to the input and inside error messages.
    fn label(self) -> &'static str;

    /// Snake-case key used on the command line.
    fn key(self) -> &'static str;

    fn is_mandatory(self) -> bool;

    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL.iter().copied().find(|field| field.key() == key)
    }

    /// Mandatory fields in declaration order.
    fn mandatory() -> Vec<Self> {
        Self::ALL
            .iter()
            .copied()
            .filter(|field| field.is_mandatory())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Name,
    Occupation,
    Nationality,
    BirthDate,
    BirthPlace,
    Achievements,
    Bio,
}

impl FormField for PersonField {
    const ALL: &'static [Self] = &[
        PersonField::Name,
        PersonField::Occupation,
        PersonField::Nationality,
        PersonField::BirthDate,
        PersonField::BirthPlace,
        PersonField::Achievements,
        PersonField::Bio,
    ];

    fn label(self) -> &'static str {
        match self {
            PersonField::Name => "Name",
            PersonField::Occupation => "Occupation",
            PersonField::Nationality => "Nationality",
            PersonField::BirthDate => "Birth Date",
            PersonField::BirthPlace => "Birth Place",
            PersonField::Achievements => "Achievements",
            PersonField::Bio => "Bio",
        }
    }

    fn key(self) -> &'static str {
        match self {
            PersonField::Name => "name",
            PersonField::Occupation => "occupation",
            PersonField::Nationality => "nationality",
            PersonField::BirthDate => "birth_date",
            PersonField::BirthPlace => "birth_place",
            PersonField::Achievements => "achievements",
            PersonField::Bio => "bio",
        }
    }

    fn is_mandatory(self) -> bool {
        matches!(
            self,
            PersonField::Name | PersonField::Occupation | PersonField::Nationality
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MusicianField {
    Name,
    Genres,
    Instruments,
    Labels,
    Dob,
    StartYear,
    EndYear,
    Spouses,
    Kids,
    Relatives,
    Works,
}

impl FormField for MusicianField {
    const ALL: &'static [Self] = &[
        MusicianField::Name,
        MusicianField::Genres,
        MusicianField::Instruments,
        MusicianField::Labels,
        MusicianField::Dob,
        MusicianField::StartYear,
        MusicianField::EndYear,
        MusicianField::Spouses,
        MusicianField::Kids,
        MusicianField::Relatives,
        MusicianField::Works,
    ];

    fn label(self) -> &'static str {
        match self {
            MusicianField::Name => "Name",
            MusicianField::Genres => "Genres",
            MusicianField::Instruments => "Instruments",
            MusicianField::Labels => "Labels",
            MusicianField::Dob => "DOB",
            MusicianField::StartYear => "Debut year",
            MusicianField::EndYear => "Retirement year",
            MusicianField::Spouses => "Spouses",
            MusicianField::Kids => "Children",
            MusicianField::Relatives => "Relatives",
            MusicianField::Works => "Notable works",
        }
    }

    fn key(self) -> &'static str {
        match self {
            MusicianField::Name => "name",
            MusicianField::Genres => "genres",
            MusicianField::Instruments => "instruments",
            MusicianField::Labels => "labels",
            MusicianField::Dob => "dob",
            MusicianField::StartYear => "start_year",
            MusicianField::EndYear => "end_year",
            MusicianField::Spouses => "spouses",
            MusicianField::Kids => "kids",
            MusicianField::Relatives => "relatives",
            MusicianField::Works => "works",
        }
    }

    fn is_mandatory(self) -> bool {
        matches!(
            self,
            MusicianField::Name | MusicianField::Genres | MusicianField::Instruments
        )
    }
}

/// Split comma-separated form text into trimmed items. Blank input yields an
/// empty list rather than a single empty item.
pub fn split_csv(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    text.split(',').map(|item| item.trim().to_string()).collect()
}

pub fn join_csv(items: &[String]) -> String {
    items.join(", ")
}

/// Parse a `YYYY-MM-DD` date into epoch seconds at midnight UTC. Blank text
/// clears the value.
pub fn parse_date(text: &str) -> Result<Option<i64>, FieldError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| FieldError::InvalidDate(trimmed.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| FieldError::InvalidDate(trimmed.to_string()))?;
    Ok(Some(midnight.and_utc().timestamp()))
}

pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Year inputs are lenient: anything that is not an integer clears the year.
pub fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse::<i32>().ok()
}

/// Encode an active-years pair as `start-end`. A missing side is left empty
/// (`1959-`, `-1970`) so half-known pairs survive a round trip.
pub fn format_active_years(start: Option<i32>, end: Option<i32>) -> Option<String> {
    match (start, end) {
        (None, None) => None,
        (start, end) => Some(format!(
            "{}-{}",
            start.map(|year| year.to_string()).unwrap_or_default(),
            end.map(|year| year.to_string()).unwrap_or_default()
        )),
    }
}

/// Decode a stored `YYYY-YYYY` string. The start year lives in the first four
/// characters and the end year in the last four; either side only counts
/// when it is four digits, so `1959-present` keeps its start year.
pub fn parse_active_years(text: &str) -> (Option<i32>, Option<i32>) {
    let chars: Vec<char> = text.trim().chars().collect();
    if chars.len() < 4 {
        return (None, None);
    }
    (
        four_digit_year(&chars[..4]),
        four_digit_year(&chars[chars.len() - 4..]),
    )
}

fn four_digit_year(chars: &[char]) -> Option<i32> {
    if !chars.iter().all(char::is_ascii_digit) {
        return None;
    }
    chars.iter().collect::<String>().parse().ok()
}
