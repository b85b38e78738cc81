/*
 *  Copyright 2025 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Error types for the reporting job.
//!
//! All failures surface synchronously to the immediate caller; the job never
//! retries, falls back to another dialect, or masks executor errors. An empty
//! matching set is not an error (it yields a null total).

use thiserror::Error;

/// The platform version string could not be parsed into `major.minor.patch`.
///
/// This is a configuration error: the version is supplied by the surrounding
/// deployment, not derived from data.
#[derive(Debug, Error)]
pub enum VersionError {
    /// The raw version string is not a valid three-part version.
    #[error("Invalid platform version '{version}': {source}")]
    Parse {
        version: String,
        #[source]
        source: semver::Error,
    },
}

/// Errors raised while executing an aggregation statement.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Failed to obtain a pooled connection or run the blocking closure.
    #[error("Connection pool error: {0}")]
    ConnectionPool(String),

    /// The store rejected the statement. A schema-mismatch (e.g. dialect
    /// resolved as current but the history table is absent) surfaces here.
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
}

/// Top-level error for a reporting run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Query(#[from] QueryError),
}
