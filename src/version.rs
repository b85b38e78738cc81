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

//! Platform version resolution to a metadata schema dialect.
//!
//! Platform 2.10 split completed task-instance records across a live table
//! and a history table. Everything before that keeps a single table. The
//! dialect is resolved once per run from the installed platform version and
//! trusted from then on; there is no runtime schema negotiation.

use semver::Version;

use crate::error::VersionError;

/// First platform version whose metadata schema splits completed
/// task-instance records into a separate history table.
pub const SCHEMA_SPLIT_VERSION: (u64, u64, u64) = (2, 10, 0);

/// The table layout the aggregation statements must target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDialect {
    /// Single `task_instance` table (platform < 2.10).
    Legacy,
    /// Live `task_instance` table plus `task_instance_history` archive
    /// (platform >= 2.10).
    Current,
}

impl SchemaDialect {
    /// Resolves the dialect for an installed platform version.
    ///
    /// Pure tuple comparison on `(major, minor, patch)`; total over any
    /// well-formed version, including pre-releases of the split version.
    pub fn for_version(version: &Version) -> Self {
        if (version.major, version.minor, version.patch) >= SCHEMA_SPLIT_VERSION {
            SchemaDialect::Current
        } else {
            SchemaDialect::Legacy
        }
    }

    /// The tables holding completed task instances under this dialect, in
    /// the order the aggregator queries them.
    ///
    /// Under [`SchemaDialect::Current`] both tables must be queried: retention
    /// moves completed records out of the live table, and reading only one of
    /// the two silently undercounts.
    pub fn tables(&self) -> &'static [&'static str] {
        match self {
            SchemaDialect::Legacy => &["task_instance"],
            SchemaDialect::Current => &["task_instance", "task_instance_history"],
        }
    }
}

/// Parses the raw platform version string supplied by the deployment.
pub fn parse_platform_version(raw: &str) -> Result<Version, VersionError> {
    Version::parse(raw.trim()).map_err(|source| VersionError::Parse {
        version: raw.to_string(),
        source,
    })
}
