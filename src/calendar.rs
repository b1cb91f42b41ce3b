// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Calendar arithmetic shared by the aggregator and the enricher.
//!
//! Publish timestamps are resolved to local dates under one fixed UTC offset,
//! and both consumers read weekdays through [`Calendar::weekday_index`] so a
//! release is classified identically everywhere.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Offset, Utc};
use regex::Regex;

use crate::{error::Error, release::Release};

const OFFSET_PATTERN: &str = r"^([+-])(\d{2}):?(\d{2})$";

/// Release whose publish timestamp has been resolved to a local date.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct DatedRelease
{
    /// Tag name copied from the release.
    pub tag_name: String,
    /// Local calendar date of publication.
    pub date:     NaiveDate,
}

/// Fixed-offset calendar with a localized weekday table.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct Calendar
{
    offset:        FixedOffset,
    weekday_names: [String; 7],
}

impl Calendar
{
    /// Creates a calendar for the given offset and weekday names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] unless exactly seven names are supplied.
    pub fn new(offset: FixedOffset, weekday_names: &[String],) -> Result<Self, Error,>
    {
        let weekday_names: [String; 7] = weekday_names.to_vec().try_into().map_err(
            |names: Vec<String,>| {
                Error::validation(format!(
                    "weekday_names must list exactly 7 names, found {}",
                    names.len()
                ),)
            },
        )?;

        Ok(Self {
            offset,
            weekday_names,
        },)
    }

    /// Zero offset used when nothing is configured.
    pub fn utc_offset() -> FixedOffset
    {
        Utc.fix()
    }

    pub fn offset(&self,) -> FixedOffset
    {
        self.offset
    }

    /// Resolves a release timestamp to its local date.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Timestamp`] when `published_at` is missing or is not
    /// an RFC 3339 timestamp.
    pub fn date_of(&self, release: &Release,) -> Result<NaiveDate, Error,>
    {
        let raw = release.published_at.as_deref().ok_or_else(|| Error::Timestamp {
            tag:    release.tag_name.clone(),
            value:  String::new(),
            reason: "release has no publish timestamp".to_owned(),
        },)?;

        let parsed = DateTime::parse_from_rfc3339(raw,).map_err(|e| Error::Timestamp {
            tag:    release.tag_name.clone(),
            value:  raw.to_owned(),
            reason: e.to_string(),
        },)?;

        Ok(parsed.with_timezone(&self.offset,).date_naive(),)
    }

    /// Resolves every release, keeping input order.
    ///
    /// # Errors
    ///
    /// Fails on the first release whose timestamp cannot be resolved.
    pub fn date_releases(&self, releases: &[Release],) -> Result<Vec<DatedRelease,>, Error,>
    {
        releases
            .iter()
            .map(|release| {
                Ok(DatedRelease {
                    tag_name: release.tag_name.clone(), date: self.date_of(release,)?,
                },)
            },)
            .collect()
    }

    /// Day of week with 0 = Sunday through 6 = Saturday.
    pub fn weekday_index(date: NaiveDate,) -> usize
    {
        date.weekday().num_days_from_sunday() as usize
    }

    /// Saturday and Sunday.
    pub fn is_weekend(date: NaiveDate,) -> bool
    {
        matches!(Self::weekday_index(date,), 0 | 6)
    }

    /// Localized name for the date's weekday.
    pub fn weekday_name(&self, date: NaiveDate,) -> &str
    {
        &self.weekday_names[Self::weekday_index(date,)]
    }
}

/// `YYYY-MM-DD` key of the day bucket.
pub fn day_key(date: NaiveDate,) -> String
{
    date.format("%Y-%m-%d",).to_string()
}

/// `YYYY-W<NN>` key of the week bucket.
///
/// The year is the calendar year of the Monday that starts the week and the
/// number is that Monday's ISO week, so the last days of December can land in
/// `W01` of the same calendar year.
pub fn week_key(date: NaiveDate,) -> String
{
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday(),),);
    format!("{}-W{:02}", monday.year(), monday.iso_week().week())
}

/// `YYYY` key of the year bucket.
pub fn year_key(date: NaiveDate,) -> String
{
    format!("{:04}", date.year())
}

/// Parses a fixed UTC offset such as `+09:00`, `-0530`, `Z` or `UTC`.
///
/// # Errors
///
/// Returns [`Error::Validation`] for anything else, including offsets of a
/// day or more.
pub fn parse_utc_offset(raw: &str,) -> Result<FixedOffset, Error,>
{
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("z",) || trimmed.eq_ignore_ascii_case("utc",) {
        return Ok(Calendar::utc_offset(),);
    }

    let pattern = Regex::new(OFFSET_PATTERN,)
        .map_err(|e| Error::validation(format!("invalid offset pattern: {e}"),),)?;
    let invalid = || Error::validation(format!("invalid utc_offset '{raw}'"),);

    let captures = pattern.captures(trimmed,).ok_or_else(invalid,)?;
    let hours: i32 = captures[2].parse().map_err(|_| invalid(),)?;
    let minutes: i32 = captures[3].parse().map_err(|_| invalid(),)?;
    if minutes >= 60 {
        return Err(invalid(),);
    }

    let seconds = (hours * 60 + minutes) * 60;
    let signed = if &captures[1] == "-" { -seconds } else { seconds };

    FixedOffset::east_opt(signed,).ok_or_else(invalid,)
}
