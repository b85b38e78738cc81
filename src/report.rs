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

//! The job entry point: one invocation resolves the schema dialect from the
//! installed platform version and runs the duration aggregation over the
//! supplied window.

use tracing::info;

use crate::dal::{DurationAggregator, QueryExecutor};
use crate::error::ReportError;
use crate::models::{DateWindow, DurationReport};
use crate::version::{parse_platform_version, SchemaDialect};

/// Computes the total completed-task duration over `window`.
///
/// `platform_version` is the installed platform's raw version string; it
/// picks the schema dialect and nothing else. The report is returned to the
/// caller, which owns any persistence or scheduling around it. Repeating the
/// call with identical inputs against unchanged data yields an identical
/// report.
pub async fn total_task_duration(
    platform_version: &str,
    window: DateWindow,
    executor: &dyn QueryExecutor,
) -> Result<DurationReport, ReportError> {
    let version = parse_platform_version(platform_version)?;
    let dialect = SchemaDialect::for_version(&version);
    info!(%version, ?dialect, "Resolved metadata schema dialect");

    let report = DurationAggregator::new(executor)
        .total_duration(dialect, window)
        .await?;

    info!(
        start_date = %report.start_date,
        end_date = %report.end_date,
        total_duration_minutes = ?report.total_duration_minutes,
        "Computed total task duration"
    );
    Ok(report)
}
