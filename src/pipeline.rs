// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// End-to-end collection of release cadence statistics.
///
/// Repositories are processed strictly one after another: all pages of one
/// repository are fetched before it is aggregated, and the next repository is
/// only started afterwards. Results stay in memory until every repository has
/// succeeded, so a failure anywhere leaves no output files behind.
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    aggregate::{StatRecord, group_by_period},
    calendar::Calendar,
    config::CadenceConfig,
    enrich::{RawReleaseRecord, enrich_releases},
    error::Error,
    export::{ReportPaths, write_report},
    fetch::ReleaseClient,
    release::Release,
};

/// Accumulated results across all configured repositories.
#[derive(Debug, Clone, Default, PartialEq,)]
pub struct CadenceReport
{
    /// Bucketed rows for `release_stats.csv`.
    pub stats: Vec<StatRecord,>,
    /// Per-release rows for `release-raw.csv`.
    pub raw:   Vec<RawReleaseRecord,>,
}

/// Fetches and aggregates every configured repository.
///
/// # Errors
///
/// Returns the first fetch, timestamp or configuration error; repositories
/// after the failing one are not contacted.
pub async fn collect_report(
    client: &ReleaseClient,
    config: &CadenceConfig,
) -> Result<CadenceReport, Error,>
{
    let calendar = config.calendar()?;
    let mut report = CadenceReport::default();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
            .unwrap_or_else(|_| ProgressStyle::default_spinner(),),
    );

    for repository in &config.repositories {
        pb.set_message(format!("Fetching releases for {repository}..."),);
        info!("Fetching releases for {}", repository);

        let releases = match client.fetch_releases(repository,).await {
            Ok(releases,) => releases,
            Err(error,) => {
                pb.finish_and_clear();
                return Err(error,);
            }
        };
        info!("Fetched {} releases for {}", releases.len(), repository);

        pb.set_message(format!("Aggregating {} releases of {repository}...", releases.len()),);
        let (stats, raw,) = summarize(&releases, &repository.repository, &calendar,)?;
        debug!("{} produced {} stat rows and {} raw rows", repository, stats.len(), raw.len());

        report.stats.extend(stats,);
        report.raw.extend(raw,);
    }

    pb.finish_with_message(format!(
        "Collected {} stat rows and {} raw rows",
        report.stats.len(),
        report.raw.len()
    ),);

    Ok(report,)
}

/// Aggregates and enriches the releases of one repository.
///
/// Enrichment is skipped when the repository has no releases.
///
/// # Errors
///
/// Returns [`Error::Timestamp`] when a release cannot be dated.
pub fn summarize(
    releases: &[Release],
    repo: &str,
    calendar: &Calendar,
) -> Result<(Vec<StatRecord,>, Vec<RawReleaseRecord,>,), Error,>
{
    let dated = calendar.date_releases(releases,)?;
    let buckets = group_by_period(&dated,);

    let raw = if dated.is_empty() {
        debug!("{} has no releases, skipping enrichment", repo);
        Vec::new()
    } else {
        enrich_releases(&dated, repo, &buckets, calendar,)
    };

    Ok((buckets.into_records(repo,), raw,),)
}

/// Collects the report and writes both tables into `output_dir`.
///
/// # Errors
///
/// Propagates collection errors before anything is written, then export
/// errors.
pub async fn run_pipeline(
    client: &ReleaseClient,
    config: &CadenceConfig,
    output_dir: &Path,
) -> Result<ReportPaths, Error,>
{
    let report = collect_report(client, config,).await?;
    write_report(output_dir, &report.stats, &report.raw,)
}

#[cfg(test)]
mod tests
{
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    use super::*;
    use crate::{Period, RepositoryEntry};

    fn config(server: &MockServer, repositories: &[(&str, &str,)],) -> CadenceConfig
    {
        CadenceConfig {
            repositories: repositories
                .iter()
                .map(|(owner, repository,)| RepositoryEntry::new(*owner, *repository,),)
                .collect(),
            api_base: Some(server.uri(),),
            ..CadenceConfig::default()
        }
    }

    async fn mount_releases(server: &MockServer, repo_path: &str, body: serde_json::Value,)
    {
        Mock::given(method("GET",),)
            .and(path(repo_path,),)
            .and(query_param("page", "1",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(body,),)
            .mount(server,)
            .await;
        Mock::given(method("GET",),)
            .and(path(repo_path,),)
            .and(query_param("page", "2",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([]),),)
            .mount(server,)
            .await;
    }

    fn client(config: &CadenceConfig,) -> ReleaseClient
    {
        ReleaseClient::new(None, config.api_base.as_deref(),).expect("client",)
    }

    #[tokio::test]
    async fn pipeline_writes_both_tables()
    {
        let server = MockServer::start().await;
        mount_releases(
            &server,
            "/repos/daangn/stackflow/releases",
            json!([
                {"tag_name": "v1", "published_at": "2024-01-01T09:00:00Z"},
                {"tag_name": "v2", "published_at": "2024-01-06T09:00:00Z"},
                {"tag_name": "v3", "published_at": "2024-01-08T09:00:00Z"}
            ]),
        )
        .await;
        mount_releases(&server, "/repos/daangn/seed-design/releases", json!([]),).await;

        let config = config(&server, &[("daangn", "stackflow",), ("daangn", "seed-design",)],);
        let temp = tempdir().expect("failed to create tempdir",);

        let paths = run_pipeline(&client(&config,), &config, temp.path(),)
            .await
            .expect("pipeline failed",);

        let stats = std::fs::read_to_string(&paths.stats,).expect("failed to read stats",);
        assert_eq!(
            stats,
            "repo,period,date,count\n\
             stackflow,day,2024-01-01,1\n\
             stackflow,day,2024-01-08,1\n\
             stackflow,week,2024-W01,1\n\
             stackflow,week,2024-W02,1\n\
             stackflow,year,2024,2\n"
        );

        let raw = std::fs::read_to_string(&paths.raw,).expect("failed to read raw",);
        let rows: Vec<&str,> = raw.lines().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2], "stackflow,v2,day,2024-01-06,Saturday,5,0.43,0,2");
        assert_eq!(rows[3], "stackflow,v3,day,2024-01-08,Monday,2,0.43,1,3");
    }

    #[tokio::test]
    async fn forbidden_response_aborts_before_writing()
    {
        let server = MockServer::start().await;
        mount_releases(
            &server,
            "/repos/daangn/stackflow/releases",
            json!([{"tag_name": "v1", "published_at": "2024-01-01T09:00:00Z"}]),
        )
        .await;
        Mock::given(method("GET",),)
            .and(path("/repos/daangn/seed-design/releases",),)
            .respond_with(ResponseTemplate::new(403,).set_body_json(json!({
                "message": "Resource not accessible",
                "documentation_url": "https://docs.github.com/rest"
            }),),)
            .mount(&server,)
            .await;
        Mock::given(method("GET",),)
            .and(path("/repos/daangn/never-reached/releases",),)
            .respond_with(ResponseTemplate::new(200,).set_body_json(json!([]),),)
            .expect(0,)
            .mount(&server,)
            .await;

        let config = config(
            &server,
            &[("daangn", "stackflow",), ("daangn", "seed-design",), ("daangn", "never-reached",)],
        );
        let temp = tempdir().expect("failed to create tempdir",);

        let error = run_pipeline(&client(&config,), &config, temp.path(),)
            .await
            .expect_err("expected fetch failure",);

        assert!(matches!(error, Error::Fetch { ref repository, .. } if repository == "daangn/seed-design"));
        let written = std::fs::read_dir(temp.path(),).expect("tempdir readable",).count();
        assert_eq!(written, 0);
    }

    #[test]
    fn summarize_skips_enrichment_for_empty_repository()
    {
        let calendar = CadenceConfig::default().calendar().expect("calendar",);
        let (stats, raw,) = summarize(&[], "seed-design", &calendar,).expect("summary",);

        assert!(stats.is_empty());
        assert!(raw.is_empty());
    }

    #[test]
    fn summarize_propagates_unparseable_timestamps()
    {
        let calendar = CadenceConfig::default().calendar().expect("calendar",);
        let releases = vec![Release {
            tag_name: "v1".to_owned(), published_at: Some("01/08/2024".to_owned(),),
        }];

        let error = summarize(&releases, "stackflow", &calendar,).expect_err("expected error",);
        assert!(matches!(error, Error::Timestamp { .. }));
    }

    #[test]
    fn summarize_counts_match_between_tables()
    {
        let calendar = CadenceConfig::default().calendar().expect("calendar",);
        let releases: Vec<Release,> = ["2024-05-06T10:00:00Z", "2024-05-06T15:00:00Z", "2024-05-07T08:00:00Z"]
            .iter()
            .enumerate()
            .map(|(index, published_at,)| Release {
                tag_name:     format!("v{index}"),
                published_at: Some((*published_at).to_owned(),),
            },)
            .collect();

        let (stats, raw,) = summarize(&releases, "stackflow", &calendar,).expect("summary",);

        for record in &raw {
            let bucket = stats
                .iter()
                .find(|stat| stat.period == Period::Day && stat.date == record.date,)
                .expect("day bucket",);
            assert_eq!(bucket.count, record.same_day_release_count);
        }
    }
}
