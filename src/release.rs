// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};

/// Release entry as returned by the GitHub releases endpoint.
///
/// Only the fields the cadence statistics need are kept. `published_at` is
/// `null` for draft releases, so it stays optional here and is validated when
/// the release is dated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct Release
{
    /// Git tag the release points at.
    pub tag_name:     String,
    /// RFC 3339 publish timestamp.
    #[serde(default)]
    pub published_at: Option<String,>,
}

impl std::fmt::Display for Release
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        match self.published_at.as_deref() {
            Some(published_at,) => write!(f, "{} ({published_at})", self.tag_name),
            None => write!(f, "{} (unpublished)", self.tag_name),
        }
    }
}
