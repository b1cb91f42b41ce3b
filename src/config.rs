//! Configuration document describing which repositories are analysed and how
//! publish timestamps are mapped onto calendar days.
//!
//! The document is YAML, read once at startup and injected into the pipeline.
//! Nothing in the aggregation logic embeds repository names or weekday labels;
//! they all flow from [`CadenceConfig`].

use std::{fmt, fs, path::Path, str::FromStr};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    calendar::{Calendar, parse_utc_offset},
    error::{self, Error},
};

/// Repositories analysed when no configuration file is supplied.
const DEFAULT_REPOSITORIES: &[(&str, &str,)] = &[("daangn", "stackflow",), ("daangn", "seed-design",)];
/// Weekday labels indexed from Sunday.
const DEFAULT_WEEKDAY_NAMES: [&str; 7] =
    ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];
const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9_.-]+$";

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use release_cadence::CadenceConfig;
///
/// let yaml = r#"
/// repositories:
///   - owner: octocat
///     repo: hello-world
/// "#;
/// let config = release_cadence::parse_config(yaml,).expect("valid configuration",);
/// assert_eq!(config.repositories.len(), 1);
/// assert_eq!(config.weekday_names.len(), 7);
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq,)]
pub struct CadenceConfig
{
    /// Repositories processed in the listed order.
    #[serde(default)]
    pub repositories: Vec<RepositoryEntry,>,

    /// Seven weekday names, index 0 being Sunday.
    #[serde(default = "default_weekday_names", alias = "weekdays")]
    pub weekday_names: Vec<String,>,

    /// Fixed UTC offset such as `+09:00` that defines local dates.
    #[serde(default, alias = "utc-offset", alias = "utcOffset")]
    pub utc_offset: Option<String,>,

    /// Optional GitHub API base URI override.
    #[serde(default, alias = "api-base", alias = "apiBase")]
    pub api_base: Option<String,>,
}

impl Default for CadenceConfig
{
    fn default() -> Self
    {
        Self {
            repositories:  DEFAULT_REPOSITORIES
                .iter()
                .map(|(owner, repository,)| RepositoryEntry::new(*owner, *repository,),)
                .collect(),
            weekday_names: default_weekday_names(),
            utc_offset:    None,
            api_base:      None,
        }
    }
}

impl CadenceConfig
{
    /// Checks the document invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the repository list is empty, an
    /// identifier contains unsupported characters, the weekday table does not
    /// hold exactly seven non-blank names, or the UTC offset is malformed.
    pub fn validate(&self,) -> Result<(), Error,>
    {
        if self.repositories.is_empty() {
            return Err(Error::validation("at least one repository must be configured",),);
        }

        for entry in &self.repositories {
            validate_identifier("owner", &entry.owner,)?;
            validate_identifier("repository", &entry.repository,)?;
        }

        self.calendar()?;

        if let Some(index,) = self.weekday_names.iter().position(|name| name.trim().is_empty(),) {
            return Err(Error::validation(format!("weekday name at index {index} is blank"),),);
        }

        Ok((),)
    }

    /// Builds the calendar used to resolve release dates.
    ///
    /// # Errors
    ///
    /// Propagates validation errors for the offset or the weekday table.
    pub fn calendar(&self,) -> Result<Calendar, Error,>
    {
        let offset = match self.utc_offset.as_deref() {
            Some(raw,) => parse_utc_offset(raw,)?,
            None => Calendar::utc_offset(),
        };

        Calendar::new(offset, &self.weekday_names,)
    }
}

/// Repository identifier as listed in the configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash,)]
pub struct RepositoryEntry
{
    /// GitHub account that owns the repository.
    #[serde(alias = "user")]
    pub owner: String,

    /// Repository name.
    #[serde(alias = "repo", alias = "name")]
    pub repository: String,
}

impl RepositoryEntry
{
    /// Creates an entry from owner and repository names.
    pub fn new<O, R,>(owner: O, repository: R,) -> Self
    where
        O: Into<String,>,
        R: Into<String,>,
    {
        Self {
            owner: owner.into(), repository: repository.into(),
        }
    }
}

impl fmt::Display for RepositoryEntry
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        write!(f, "{}/{}", self.owner, self.repository)
    }
}

impl FromStr for RepositoryEntry
{
    type Err = Error;

    /// Parses the `owner/name` form accepted by the `--repo` flag.
    fn from_str(value: &str,) -> Result<Self, Self::Err,>
    {
        let (owner, repository,) = value
            .trim()
            .split_once('/',)
            .ok_or_else(|| Error::validation(format!("expected OWNER/NAME, got '{value}'"),),)?;

        validate_identifier("owner", owner,)?;
        validate_identifier("repository", repository,)?;

        Ok(Self::new(owner, repository,),)
    }
}

/// Loads and validates a configuration document from disk.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, [`Error::Parse`] for
/// malformed YAML and [`Error::Validation`] for documents violating the rules
/// enforced by [`CadenceConfig::validate`].
pub fn load_config(path: &Path,) -> Result<CadenceConfig, Error,>
{
    let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
    parse_config(&contents,)
}

/// Parses and validates a configuration document from a string.
///
/// # Errors
///
/// Same as [`load_config`] minus the I/O failure.
pub fn parse_config(contents: &str,) -> Result<CadenceConfig, Error,>
{
    let config: CadenceConfig = serde_yaml::from_str(contents,)?;
    config.validate()?;
    Ok(config,)
}

fn default_weekday_names() -> Vec<String,>
{
    DEFAULT_WEEKDAY_NAMES.iter().map(|name| (*name).to_owned(),).collect()
}

fn validate_identifier(kind: &str, value: &str,) -> Result<(), Error,>
{
    let pattern = Regex::new(IDENTIFIER_PATTERN,)
        .map_err(|e| Error::validation(format!("invalid identifier pattern: {e}"),),)?;

    if pattern.is_match(value,) {
        Ok((),)
    } else {
        Err(Error::validation(format!("invalid {kind} name '{value}'"),),)
    }
}
