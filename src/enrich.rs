// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Per-release enrichment for the raw event table.
///
/// Unlike bucketing, enrichment keeps weekend releases. Such a release gets a
/// full record whose `release_count` is 0, because the day bucket it would
/// read from never counted it. That mismatch is kept as is for compatibility
/// with existing consumers of `release-raw.csv`.
use chrono::NaiveDate;
use serde::Serialize;

use crate::{
    aggregate::{Period, PeriodBuckets},
    calendar::{Calendar, DatedRelease, day_key},
};

/// One row of `release-raw.csv`.
#[derive(Debug, Clone, PartialEq, Serialize,)]
pub struct RawReleaseRecord
{
    /// Repository name.
    pub repo_name:              String,
    /// Tag of the release.
    pub release_tag:            String,
    /// Always [`Period::Day`].
    pub period:                 Period,
    /// Local publish date, `YYYY-MM-DD`.
    pub date:                   String,
    /// Localized weekday name.
    #[serde(rename = "day_of_week")]
    pub day_of_week_name:       String,
    /// Whole days since the previous release in the list, 0 for the first.
    #[serde(rename = "release_gap_days")]
    pub gap_days:               i64,
    /// Releases per day across the repository's span, two decimals.
    #[serde(rename = "avg_releases_per_period")]
    pub avg_releases_per_day:   f64,
    /// Weekday releases counted on the same date.
    #[serde(rename = "release_count")]
    pub same_day_release_count: u32,
    /// 1-based position of the release in the list.
    #[serde(rename = "cumulative_releases")]
    pub cumulative_index:       usize,
}

/// Produces one record per release, in input order.
///
/// `day_buckets` must be the result of
/// [`group_by_period`](crate::group_by_period) over the same releases. An empty
/// list yields no records.
pub fn enrich_releases(
    releases: &[DatedRelease],
    repo: &str,
    day_buckets: &PeriodBuckets,
    calendar: &Calendar,
) -> Vec<RawReleaseRecord,>
{
    let (Some(first,), Some(last,),) = (releases.first(), releases.last(),) else {
        return Vec::new();
    };

    let average = average_per_day(releases.len(), (last.date - first.date).num_days(),);
    let mut previous: Option<NaiveDate,> = None;

    releases
        .iter()
        .enumerate()
        .map(|(index, release,)| {
            let date = day_key(release.date,);
            let gap_days = previous.map_or(0, |prior| (release.date - prior).num_days().abs(),);
            previous = Some(release.date,);

            RawReleaseRecord {
                repo_name: repo.to_owned(),
                release_tag: release.tag_name.clone(),
                period: Period::Day,
                day_of_week_name: calendar.weekday_name(release.date,).to_owned(),
                gap_days,
                avg_releases_per_day: average,
                same_day_release_count: day_buckets.day_count(&date,),
                cumulative_index: index + 1,
                date,
            }
        },)
        .collect()
}

/// Release count over the day span, the span floored at one day, rounded to
/// two decimals.
pub fn average_per_day(release_count: usize, span_days: i64,) -> f64
{
    let span = span_days.abs().max(1,) as f64;
    let average = release_count as f64 / span;
    (average * 100.0).round() / 100.0
}
