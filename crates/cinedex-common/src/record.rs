//! Movie record representation.

use crate::error::{CinedexError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// Number of fields in a catalog record line.
pub const RECORD_FIELD_COUNT: usize = 7;

/// A single movie in the catalog.
///
/// The title is the unique key; the remaining fields are payload and
/// never participate in equality or ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// Movie title (unique, case-sensitive key).
    pub title: String,
    /// Release date as it appears in the catalog.
    pub release_date: String,
    /// Runtime in minutes.
    pub runtime_min: u32,
    /// Release status (e.g. "Released").
    pub status: String,
    /// Popularity score.
    pub popularity: f64,
    /// Average vote.
    pub vote_average: f64,
    /// Number of votes.
    pub vote_count: u64,
}

impl Record {
    /// Creates a record from already-typed values.
    pub fn new(
        title: impl Into<String>,
        release_date: impl Into<String>,
        runtime_min: u32,
        status: impl Into<String>,
        popularity: f64,
        vote_average: f64,
        vote_count: u64,
    ) -> Self {
        Self {
            title: title.into(),
            release_date: release_date.into(),
            runtime_min,
            status: status.into(),
            popularity,
            vote_average,
            vote_count,
        }
    }

    /// Builds a record from exactly [`RECORD_FIELD_COUNT`] text fields,
    /// in catalog column order: title, release date, runtime, status,
    /// popularity, vote average, vote count.
    ///
    /// Fails with [`CinedexError::MalformedRecord`] on a wrong field
    /// count and [`CinedexError::InvalidField`] on an unparseable
    /// numeric field. No partially-valid record is ever produced.
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() != RECORD_FIELD_COUNT {
            return Err(CinedexError::MalformedRecord {
                expected: RECORD_FIELD_COUNT,
                actual: fields.len(),
            });
        }

        Ok(Self {
            title: fields[0].to_string(),
            release_date: fields[1].to_string(),
            runtime_min: parse_field("runtime", fields[2])?,
            status: fields[3].to_string(),
            popularity: parse_field("popularity", fields[4])?,
            vote_average: parse_field("vote_average", fields[5])?,
            vote_count: parse_field("vote_count", fields[6])?,
        })
    }

    /// Returns the title of this record.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renders all seven fields.
    pub fn full_display(&self) -> String {
        format!(
            "{}: {}; {}; {}; {}; {}; {}",
            self.title,
            self.release_date,
            self.runtime_min,
            self.status,
            self.popularity,
            self.vote_average,
            self.vote_count
        )
    }
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CinedexError::InvalidField {
            field,
            value: value.to_string(),
        })
}

// Equality and ordering are defined on the title alone.

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl Eq for Record {}

impl PartialOrd for Record {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Record {
    fn cmp(&self, other: &Self) -> Ordering {
        self.title.cmp(&other.title)
    }
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}
