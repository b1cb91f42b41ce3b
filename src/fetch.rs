// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Release retrieval from the GitHub REST API.
///
/// Pages through `/repos/{owner}/{repo}/releases` until an empty page is
/// returned. There is no retry: the first failing page aborts the fetch and
/// everything gathered so far for that repository is dropped.
use std::fmt;

use http::header::ACCEPT;
use octocrab::{Octocrab, service::middleware::retry::RetryConfig};
use serde::Serialize;
use tracing::debug;

use crate::{config::RepositoryEntry, error::Error, release::Release};

/// Number of releases requested per page.
pub const PAGE_SIZE: u8 = 100;
/// Media type sent in the `Accept` header of every page request.
pub const RELEASES_MEDIA_TYPE: &str = "application/vnd.github+json";

#[derive(Debug, Serialize,)]
struct PageQuery
{
    per_page: u8,
    page:     u32,
}

/// GitHub client scoped to release listing.
#[derive(Clone,)]
pub struct ReleaseClient
{
    octocrab: Octocrab,
}

impl fmt::Debug for ReleaseClient
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.debug_struct("ReleaseClient",).finish_non_exhaustive()
    }
}

impl ReleaseClient
{
    /// Builds a client, authenticated when a non-blank token is supplied.
    ///
    /// # Arguments
    ///
    /// * `token` - Optional personal access token sent as a bearer token
    /// * `api_base` - Optional API base URI replacing `https://api.github.com`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] when the base URI is invalid or the HTTP
    /// client cannot be initialized.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use release_cadence::{ReleaseClient, RepositoryEntry};
    ///
    /// # async fn example() -> Result<(), release_cadence::Error> {
    /// let token = std::env::var("GITHUB_TOKEN",).ok();
    /// let client = ReleaseClient::new(token.as_deref(), None,)?;
    /// let releases =
    ///     client.fetch_releases(&RepositoryEntry::new("daangn", "stackflow",),).await?;
    /// println!("{} releases", releases.len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(token: Option<&str,>, api_base: Option<&str,>,) -> Result<Self, Error,>
    {
        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None,)
            .add_header(ACCEPT, RELEASES_MEDIA_TYPE.to_owned(),);

        if let Some(token,) = token.map(str::trim,).filter(|value| !value.is_empty(),) {
            builder = builder.personal_token(token.to_owned(),);
        } else {
            debug!("No GitHub token configured, sending unauthenticated requests");
        }

        if let Some(base,) = api_base {
            builder = builder.base_uri(base,).map_err(|e| Error::Client {
                message: format!("invalid API base '{base}': {e}"),
            },)?;
        }

        let octocrab = builder.build().map_err(|e| Error::Client {
            message: e.to_string(),
        },)?;

        Ok(Self {
            octocrab,
        },)
    }

    /// Fetches a single page of releases.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] carrying the HTTP status text when the request
    /// does not succeed or its body cannot be decoded.
    pub async fn fetch_page(
        &self,
        repository: &RepositoryEntry,
        page: u32,
    ) -> Result<Vec<Release,>, Error,>
    {
        let route = format!("/repos/{}/{}/releases", repository.owner, repository.repository);
        let query = PageQuery {
            per_page: PAGE_SIZE, page,
        };

        self.octocrab
            .get(route, Some(&query,),)
            .await
            .map_err(|e| Error::fetch(repository.to_string(), describe_failure(&e,),),)
    }

    /// Fetches every release of a repository in API order.
    ///
    /// # Errors
    ///
    /// Propagates the first [`Error::Fetch`]; pages fetched before the failure
    /// are discarded.
    pub async fn fetch_releases(
        &self,
        repository: &RepositoryEntry,
    ) -> Result<Vec<Release,>, Error,>
    {
        let mut releases = Vec::new();
        let mut page = 1u32;

        loop {
            let batch = self.fetch_page(repository, page,).await?;
            if batch.is_empty() {
                break;
            }

            debug!("Fetched {} releases from page {} of {}", batch.len(), page, repository);
            releases.extend(batch,);
            page += 1;
        }

        Ok(releases,)
    }
}

fn describe_failure(error: &octocrab::Error,) -> String
{
    match error {
        octocrab::Error::GitHub {
            source, ..
        } => format!("{} ({})", source.status_code, source.message),
        other => other.to_string(),
    }
}
