// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// CSV output for the two result tables.
///
/// Header rows are written explicitly so a table with no data rows still
/// carries its column names.
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::{
    aggregate::StatRecord,
    enrich::RawReleaseRecord,
    error::{self, Error},
};

/// File name of the bucketed statistics table.
pub const STATS_FILE_NAME: &str = "release_stats.csv";
/// File name of the per-release table.
pub const RAW_FILE_NAME: &str = "release-raw.csv";

const STATS_HEADERS: [&str; 4] = ["repo", "period", "date", "count"];
const RAW_HEADERS: [&str; 9] = [
    "repo_name",
    "release_tag",
    "period",
    "date",
    "day_of_week",
    "release_gap_days",
    "avg_releases_per_period",
    "release_count",
    "cumulative_releases",
];

/// Locations of the written tables.
#[derive(Debug, Clone, PartialEq, Eq,)]
pub struct ReportPaths
{
    pub stats: PathBuf,
    pub raw:   PathBuf,
}

/// Writes `release_stats.csv` rows to any writer.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] on serialization or I/O failure.
pub fn write_stats<W: io::Write,>(writer: W, records: &[StatRecord],) -> Result<(), csv::Error,>
{
    write_table(writer, &STATS_HEADERS, records,)
}

/// Writes `release-raw.csv` rows to any writer.
///
/// # Errors
///
/// Returns the underlying [`csv::Error`] on serialization or I/O failure.
pub fn write_raw<W: io::Write,>(writer: W, records: &[RawReleaseRecord],) -> Result<(), csv::Error,>
{
    write_table(writer, &RAW_HEADERS, records,)
}

/// Writes both tables into `output_dir`.
///
/// # Errors
///
/// Returns [`Error::Export`] naming the file that could not be written.
pub fn write_report(
    output_dir: &Path,
    stats: &[StatRecord],
    raw: &[RawReleaseRecord],
) -> Result<ReportPaths, Error,>
{
    let paths = ReportPaths {
        stats: output_dir.join(STATS_FILE_NAME,),
        raw:   output_dir.join(RAW_FILE_NAME,),
    };

    write_file(&paths.stats, |file| write_stats(file, stats,),)?;
    info!("Wrote {} stat rows to {}", stats.len(), paths.stats.display());

    write_file(&paths.raw, |file| write_raw(file, raw,),)?;
    info!("Wrote {} raw rows to {}", raw.len(), paths.raw.display());

    Ok(paths,)
}

fn write_file<F,>(path: &Path, write: F,) -> Result<(), Error,>
where
    F: FnOnce(File,) -> Result<(), csv::Error,>,
{
    let file = File::create(path,).map_err(|e| error::export_error(path, csv::Error::from(e,),),)?;
    write(file,).map_err(|e| error::export_error(path, e,),)
}

fn write_table<W, R,>(writer: W, headers: &[&str], records: &[R],) -> Result<(), csv::Error,>
where
    W: io::Write,
    R: Serialize,
{
    let mut writer = WriterBuilder::new().has_headers(false,).from_writer(writer,);
    writer.write_record(headers,)?;
    for record in records {
        writer.serialize(record,)?;
    }
    writer.flush()?;
    Ok((),)
}
