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

//! Duration aggregation over the metadata store's task-instance tables.
//!
//! One aggregation statement is rendered and issued per table of the
//! resolved [`SchemaDialect`]; each statement sums `(end_date - start_date)`
//! in fractional minutes over the rows inside the half-open date window.
//! The nullable per-table subtotals are then reduced to one grand total.
//!
//! Statements carry bound date parameters, never interpolated literals; the
//! table names come from the dialect's fixed table set, not from input.

use async_trait::async_trait;
use tracing::debug;

use crate::database::BackendType;
use crate::error::QueryError;
use crate::models::{DateWindow, DurationReport};
use crate::version::SchemaDialect;

/// Capability to run one aggregation statement against the metadata store.
///
/// This is the job's sole I/O boundary. The statement has exactly two bound
/// parameters, the window's start and end dates in that order, and yields at
/// most one row holding a single nullable numeric column.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// The backend the rendered statements must target.
    fn backend(&self) -> BackendType;

    /// Executes `statement` with the window's dates bound and returns the
    /// aggregate value. `None` means the store returned no row or a null
    /// aggregate (no matching completed instances).
    async fn fetch_duration_sum(
        &self,
        statement: &str,
        window: DateWindow,
    ) -> Result<Option<f64>, QueryError>;
}

/// Computes the total completed-task duration for one date window.
pub struct DurationAggregator<'a> {
    executor: &'a dyn QueryExecutor,
}

impl<'a> DurationAggregator<'a> {
    pub fn new(executor: &'a dyn QueryExecutor) -> Self {
        Self { executor }
    }

    /// Sums completed-instance durations across every table of `dialect`.
    ///
    /// A null per-table subtotal contributes nothing; if every subtotal is
    /// null the grand total is null. Executor failures (including a
    /// schema-mismatch against the actual store) propagate unchanged - there
    /// is no retry and no fallback dialect.
    pub async fn total_duration(
        &self,
        dialect: SchemaDialect,
        window: DateWindow,
    ) -> Result<DurationReport, QueryError> {
        let mut total: Option<f64> = None;

        for table in dialect.tables() {
            let statement = duration_sum_statement(self.executor.backend(), table);
            debug!(table, "Issuing duration aggregation statement");
            let subtotal = self.executor.fetch_duration_sum(&statement, window).await?;
            debug!(table, ?subtotal, "Table subtotal");

            if let Some(minutes) = subtotal {
                total = Some(total.unwrap_or(0.0) + minutes);
            }
        }

        Ok(DurationReport {
            start_date: window.start_date,
            end_date: window.end_date,
            total_duration_minutes: total,
        })
    }
}

/// Renders the per-table aggregation statement for `backend`.
///
/// Filter semantics are identical on both backends: instances that started on
/// or after the first bound date and ended strictly before the second, with
/// both timestamps non-null. Only the elapsed-minutes expression and the bind
/// placeholders differ.
fn duration_sum_statement(backend: BackendType, table: &str) -> String {
    match backend {
        #[cfg(feature = "postgres")]
        BackendType::Postgres => format!(
            "SELECT CAST(SUM(EXTRACT(EPOCH FROM (end_date - start_date)) / 60) AS DOUBLE PRECISION) AS total_duration_minutes \
             FROM {table} \
             WHERE start_date >= $1 \
             AND end_date < $2 \
             AND start_date IS NOT NULL \
             AND end_date IS NOT NULL"
        ),
        #[cfg(feature = "sqlite")]
        BackendType::Sqlite => format!(
            "SELECT SUM((julianday(end_date) - julianday(start_date)) * 1440.0) AS total_duration_minutes \
             FROM {table} \
             WHERE start_date >= ? \
             AND end_date < ? \
             AND start_date IS NOT NULL \
             AND end_date IS NOT NULL"
        ),
    }
}
