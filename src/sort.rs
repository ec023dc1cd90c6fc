//! Client-side ordering of record lists.
//!
//! Every ordering is a stable sort: records that compare equal keep their
//! input order, which callers depend on when scrolling back to an entry after
//! an insert or edit.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOption {
    /// Ascending by name, case-sensitive.
    #[default]
    Alphabetical,
    /// Most recent birth first.
    Youngest,
    /// Earliest birth first.
    Oldest,
    /// Longest active span first.
    MostActiveYears,
    /// Shortest active span first.
    LeastActiveYears,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option \"{0}\" (expected one of: alphabetical, youngest, oldest, most-active, least-active)")]
pub struct UnknownSortOption(pub String);

impl SortOption {
    pub const ALL: [SortOption; 5] = [
        SortOption::Alphabetical,
        SortOption::Youngest,
        SortOption::Oldest,
        SortOption::MostActiveYears,
        SortOption::LeastActiveYears,
    ];

    /// Stable key used on the command line and in the settings table.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::Alphabetical => "alphabetical",
            SortOption::Youngest => "youngest",
            SortOption::Oldest => "oldest",
            SortOption::MostActiveYears => "most-active",
            SortOption::LeastActiveYears => "least-active",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SortOption::Alphabetical => "Alphabetically",
            SortOption::Youngest => "Youngest",
            SortOption::Oldest => "Oldest",
            SortOption::MostActiveYears => "Most active years",
            SortOption::LeastActiveYears => "Least active years",
        }
    }

    /// Compare two records under this option.
    pub fn compare<R: Record>(self, a: &R, b: &R) -> Ordering {
        match self {
            SortOption::Alphabetical => a.name().cmp(b.name()),
            SortOption::Youngest => by_birth(a.born(), b.born(), true),
            SortOption::Oldest => by_birth(a.born(), b.born(), false),
            SortOption::MostActiveYears => b.active_span().cmp(&a.active_span()),
            SortOption::LeastActiveYears => a.active_span().cmp(&b.active_span()),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = UnknownSortOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str() == key)
            .ok_or_else(|| UnknownSortOption(key.to_string()))
    }
}

/// Return a new list ordered by `option`.
pub fn sort<R: Record>(records: &[R], option: SortOption) -> Vec<R> {
    let mut sorted = records.to_vec();
    sort_in_place(&mut sorted, option);
    sorted
}

pub fn sort_in_place<R: Record>(records: &mut [R], option: SortOption) {
    // `sort_by` is stable.
    records.sort_by(|a, b| option.compare(a, b));
}

// Undated records go last under both birth orderings.
fn by_birth(a: Option<i64>, b: Option<i64>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Musician, Person};

    fn person(name: &str, born: Option<i64>, tag: &str) -> Person {
        Person {
            name: name.to_string(),
            birth_date: born,
            bio: tag.to_string(),
            ..Person::default()
        }
    }

    fn musician(name: &str, start: Option<i32>, end: Option<i32>) -> Musician {
        Musician {
            full_name: name.to_string(),
            start_year: start,
            end_year: end,
            ..Musician::default()
        }
    }

    fn tags(people: &[Person]) -> Vec<&str> {
        people.iter().map(|p| p.bio.as_str()).collect()
    }

    fn names<R: Record>(records: &[R]) -> Vec<&str> {
        records.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn alphabetical_is_stable() {
        let input = vec![
            person("B", None, "b"),
            person("A", None, "a1"),
            person("A", None, "a2"),
        ];
        let sorted = sort(&input, SortOption::Alphabetical);
        assert_eq!(tags(&sorted), vec!["a1", "a2", "b"]);
    }

    #[test]
    fn alphabetical_is_case_sensitive() {
        let input = vec![person("bob", None, ""), person("Zoe", None, "")];
        let sorted = sort(&input, SortOption::Alphabetical);
        assert_eq!(names(&sorted), vec!["Zoe", "bob"]);
    }

    #[test]
    fn birth_orderings_put_undated_last() {
        let input = vec![
            person("undated", None, ""),
            person("old", Some(-500), ""),
            person("young", Some(900), ""),
            person("mid", Some(0), ""),
        ];
        assert_eq!(
            names(&sort(&input, SortOption::Youngest)),
            vec!["young", "mid", "old", "undated"]
        );
        assert_eq!(
            names(&sort(&input, SortOption::Oldest)),
            vec!["old", "mid", "young", "undated"]
        );
    }

    #[test]
    fn span_orderings_treat_missing_years_as_zero() {
        let input = vec![
            musician("none", None, None),
            musician("long", Some(1950), Some(2000)),
            musician("half", Some(1990), None),
            musician("short", Some(1990), Some(1995)),
        ];
        assert_eq!(
            names(&sort(&input, SortOption::MostActiveYears)),
            vec!["long", "short", "none", "half"]
        );
        assert_eq!(
            names(&sort(&input, SortOption::LeastActiveYears)),
            vec!["none", "half", "short", "long"]
        );
    }

    #[test]
    fn people_tie_on_span() {
        let input = vec![person("b", None, ""), person("a", None, "")];
        assert_eq!(
            names(&sort(&input, SortOption::MostActiveYears)),
            vec!["b", "a"]
        );
    }

    fn tagged(tag: &str, name: &str, dob: Option<i64>) -> Musician {
        Musician {
            full_name: name.to_string(),
            dob,
            start_year: Some(1960),
            end_year: Some(1970),
            works: tag.to_string(),
            ..Musician::default()
        }
    }

    fn works(musicians: &[Musician]) -> Vec<&str> {
        musicians.iter().map(|m| m.works.as_str()).collect()
    }

    // Every span is ten years, the dated entries share one birth date and the
    // names repeat, so each option sees ties.
    fn tied_input() -> Vec<Musician> {
        vec![
            tagged("d1", "Same", Some(100)),
            tagged("u1", "Undated", None),
            tagged("d2", "Same", Some(100)),
            tagged("u2", "Undated", None),
            tagged("d3", "Same", Some(100)),
        ]
    }

    fn expected_for(option: SortOption, reversed: bool) -> Vec<&'static str> {
        match (option, reversed) {
            (SortOption::Alphabetical | SortOption::Youngest | SortOption::Oldest, false) => {
                vec!["d1", "d2", "d3", "u1", "u2"]
            }
            (SortOption::Alphabetical | SortOption::Youngest | SortOption::Oldest, true) => {
                vec!["d3", "d2", "d1", "u2", "u1"]
            }
            (SortOption::MostActiveYears | SortOption::LeastActiveYears, false) => {
                vec!["d1", "u1", "d2", "u2", "d3"]
            }
            (SortOption::MostActiveYears | SortOption::LeastActiveYears, true) => {
                vec!["d3", "u2", "d2", "u1", "d1"]
            }
        }
    }

    #[test]
    fn ties_keep_input_order_under_every_option() {
        let input = tied_input();
        let mut reversed = tied_input();
        reversed.reverse();

        for option in SortOption::ALL {
            assert_eq!(
                works(&sort(&input, option)),
                expected_for(option, false),
                "{option} reordered tied entries"
            );
            assert_eq!(
                works(&sort(&reversed, option)),
                expected_for(option, true),
                "{option} reordered tied entries"
            );
        }
    }

    #[test]
    fn sorting_is_idempotent() {
        let input = vec![
            musician("c", Some(1960), Some(1970)),
            musician("a", None, None),
            musician("b", Some(1960), Some(1970)),
            musician("a", Some(2000), Some(2001)),
        ];
        for option in SortOption::ALL {
            let once = sort(&input, option);
            let twice = sort(&once, option);
            assert_eq!(once, twice, "{option} is not idempotent");
        }
    }

    #[test]
    fn does_not_touch_the_input() {
        let input = vec![person("b", None, ""), person("a", None, "")];
        let _ = sort(&input, SortOption::Alphabetical);
        assert_eq!(names(&input), vec!["b", "a"]);
    }

    #[test]
    fn keys_parse_back() {
        for option in SortOption::ALL {
            assert_eq!(option.as_str().parse::<SortOption>(), Ok(option));
        }
        assert_eq!(
            "newest".parse::<SortOption>(),
            Err(UnknownSortOption("newest".to_string()))
        );
        assert_eq!(SortOption::default(), SortOption::Alphabetical);
    }
}
