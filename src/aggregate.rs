// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Period bucketing of release dates.
///
/// Counts releases per day, week and year in one pass. Releases published on
/// Saturday or Sunday are left out of every bucket so the counts describe
/// business-day cadence; week and year totals therefore undercount the true
/// release volume.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::calendar::{Calendar, DatedRelease, day_key, week_key, year_key};

/// Bucket granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,)]
#[serde(rename_all = "lowercase")]
pub enum Period
{
    Day,
    Week,
    Year,
}

/// One row of `release_stats.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize,)]
pub struct StatRecord
{
    /// Repository name.
    pub repo:   String,
    /// Bucket granularity.
    pub period: Period,
    /// Bucket key, formatted according to the period.
    pub date:   String,
    /// Number of weekday releases in the bucket.
    pub count:  u32,
}

/// Per-period counters for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq,)]
pub struct PeriodBuckets
{
    day:  BTreeMap<String, u32,>,
    week: BTreeMap<String, u32,>,
    year: BTreeMap<String, u32,>,
}

impl PeriodBuckets
{
    /// Count recorded for a `YYYY-MM-DD` day key, 0 when absent.
    pub fn day_count(&self, key: &str,) -> u32
    {
        self.day.get(key,).copied().unwrap_or(0,)
    }

    /// Count recorded for a key of the given period, 0 when absent.
    pub fn count(&self, period: Period, key: &str,) -> u32
    {
        self.bucket(period,).get(key,).copied().unwrap_or(0,)
    }

    /// Sum of all counts of one period.
    pub fn total(&self, period: Period,) -> u32
    {
        self.bucket(period,).values().sum()
    }

    pub fn is_empty(&self,) -> bool
    {
        self.day.is_empty()
    }

    /// Flattens the buckets into records: days, then weeks, then years, each
    /// sorted by key.
    pub fn into_records(self, repo: &str,) -> Vec<StatRecord,>
    {
        let Self {
            day,
            week,
            year,
        } = self;

        [(Period::Day, day,), (Period::Week, week,), (Period::Year, year,)]
            .into_iter()
            .flat_map(|(period, bucket,)| {
                bucket.into_iter().map(move |(date, count,)| StatRecord {
                    repo: repo.to_owned(),
                    period,
                    date,
                    count,
                },)
            },)
            .collect()
    }

    fn bucket(&self, period: Period,) -> &BTreeMap<String, u32,>
    {
        match period {
            Period::Day => &self.day,
            Period::Week => &self.week,
            Period::Year => &self.year,
        }
    }
}

/// Buckets weekday releases by day, week and year.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use release_cadence::{DatedRelease, Period, group_by_period};
///
/// let releases = vec![
///     DatedRelease {
///         tag_name: "v1".to_owned(),
///         date:     NaiveDate::from_ymd_opt(2024, 1, 1,).expect("date",),
///     },
///     DatedRelease {
///         tag_name: "v2".to_owned(),
///         date:     NaiveDate::from_ymd_opt(2024, 1, 6,).expect("date",),
///     },
/// ];
/// let buckets = group_by_period(&releases,);
/// assert_eq!(buckets.day_count("2024-01-01"), 1);
/// assert_eq!(buckets.day_count("2024-01-06"), 0);
/// assert_eq!(buckets.total(Period::Year), 1);
/// ```
pub fn group_by_period(releases: &[DatedRelease],) -> PeriodBuckets
{
    let mut buckets = PeriodBuckets::default();

    for release in releases.iter().filter(|release| !Calendar::is_weekend(release.date,),) {
        *buckets.day.entry(day_key(release.date,),).or_insert(0,) += 1;
        *buckets.week.entry(week_key(release.date,),).or_insert(0,) += 1;
        *buckets.year.entry(year_key(release.date,),).or_insert(0,) += 1;
    }

    buckets
}
