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

//! Taskmeter - total task-instance duration reporting
//!
//! Taskmeter is a single-invocation reporting job that totals the wall-clock
//! execution time, in minutes, of completed task instances recorded in a
//! workflow orchestrator's relational metadata store, over a caller-supplied
//! date window.
//!
//! From platform 2.10 onward the metadata schema relocates completed
//! task-instance records into a secondary history table, so the job first
//! resolves a [`SchemaDialect`] from the installed platform version and then
//! aggregates across one table (legacy) or two tables (current).
//!
//! # Architecture
//!
//! - [`version`]: maps the platform version to a schema dialect
//! - [`dal`]: the duration aggregator and the [`QueryExecutor`] capability it
//!   runs against
//! - [`database`]: deadpool-backed PostgreSQL/SQLite connection handling and
//!   the production [`QueryExecutor`] implementation
//! - [`models`]: the date window input and the duration report output
//! - [`report`]: the job entry point tying the pieces together
//!
//! # Example
//!
//! ```rust,ignore
//! use taskmeter::{total_task_duration, Database, DateWindow};
//!
//! let db = Database::new("postgres://localhost:5432", "metadata", 5);
//! let window = DateWindow::parse("2024-01-01", "2024-02-01")?;
//! let report = total_task_duration("2.10.3", window, &db).await?;
//! println!("{:?}", report.total_duration_minutes);
//! ```
//!
//! Scheduling, retries, and persistence of the report are the caller's
//! concern; each invocation is independent and performs exactly one pass.

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("taskmeter requires at least one backend feature: `postgres` or `sqlite`");

pub mod dal;
pub mod database;
pub mod error;
pub mod models;
pub mod report;
pub mod version;

pub use dal::{DurationAggregator, QueryExecutor};
pub use database::{BackendType, Database};
pub use error::{QueryError, ReportError, VersionError};
pub use models::{DateWindow, DurationReport};
pub use report::total_task_duration;
pub use version::SchemaDialect;
