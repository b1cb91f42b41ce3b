//! Release cadence statistics for GitHub repositories.
//!
//! The library fetches the full release history of each configured
//! repository, counts weekday releases per day, week and year, derives one
//! enriched record per release, and writes both result sets as CSV tables.
//! Repositories are processed sequentially and nothing is written unless
//! every repository succeeds.

mod aggregate;
mod calendar;
mod config;
mod enrich;
mod error;
mod export;
mod fetch;
mod pipeline;
mod release;

pub use aggregate::{Period, PeriodBuckets, StatRecord, group_by_period};
pub use calendar::{Calendar, DatedRelease, day_key, parse_utc_offset, week_key, year_key};
pub use config::{CadenceConfig, RepositoryEntry, load_config, parse_config};
pub use enrich::{RawReleaseRecord, average_per_day, enrich_releases};
pub use error::{Error, io_error};
pub use export::{RAW_FILE_NAME, ReportPaths, STATS_FILE_NAME, write_raw, write_report, write_stats};
pub use fetch::{PAGE_SIZE, RELEASES_MEDIA_TYPE, ReleaseClient};
pub use pipeline::{CadenceReport, collect_report, run_pipeline, summarize};
pub use release::Release;
