#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the release-cadence crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the fetcher, the aggregation pipeline and
/// the CLI.
///
/// Every variant aborts the run. Instances are usually built through the
/// helper constructors below or the provided `From` implementations.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when the configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Returned when the GitHub client cannot be constructed.
    #[error("failed to initialize GitHub client: {message}")]
    Client {
        /// Human readable message describing the builder failure.
        message: String
    },
    /// A page request for a repository's releases did not succeed.
    #[error("failed to fetch releases for {repository}: {status}")]
    Fetch {
        /// Repository in `owner/name` form.
        repository: String,
        /// HTTP status text or transport failure description.
        status:     String
    },
    /// A release carried a missing or malformed `published_at` value.
    #[error("invalid publish timestamp {value:?} on release {tag}: {reason}")]
    Timestamp {
        /// Tag name of the offending release.
        tag:    String,
        /// Raw timestamp as delivered by the API.
        value:  String,
        /// Parser diagnostic.
        reason: String
    },
    /// Wraps CSV failures while writing an output table.
    #[error("failed to write {path:?}: {source}")]
    Export {
        /// Output file being produced.
        path:   PathBuf,
        /// Underlying CSV error, which also covers I/O failures.
        source: csv::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a fetch error for the given repository.
    pub fn fetch<R, S>(repository: R, status: S) -> Self
    where
        R: Into<String>,
        S: Into<String>
    {
        Self::Fetch {
            repository: repository.into(),
            status:     status.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// The returned string matches the [`std::fmt::Display`] implementation
    /// and is what the CLI writes to stderr.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Export`] variant capturing the output path and source.
pub fn export_error(path: &Path, source: csv::Error) -> Error {
    Error::Export {
        path: path.to_path_buf(),
        source
    }
}
