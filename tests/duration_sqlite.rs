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

//! Integration tests driving the production executor against an in-memory
//! SQLite metadata store with hand-created task-instance tables. The store
//! schema is owned by the platform being reported on, so the fixtures create
//! it with raw DDL rather than migrations.

#![cfg(feature = "sqlite")]

use diesel::prelude::*;

use taskmeter::{
    total_task_duration, Database, DateWindow, DurationAggregator, SchemaDialect,
};

async fn execute(db: &Database, sql: &str) {
    let conn = db.get_sqlite_connection().await.unwrap();
    let sql = sql.to_string();
    conn.interact(move |conn| diesel::sql_query(sql).execute(conn))
        .await
        .unwrap()
        .unwrap();
}

/// Creates an empty metadata store with both the live and the history table.
async fn fresh_store() -> Database {
    let db = Database::new(":memory:", "", 1);
    execute(
        &db,
        "CREATE TABLE task_instance (task_id TEXT NOT NULL, start_date TEXT, end_date TEXT)",
    )
    .await;
    execute(
        &db,
        "CREATE TABLE task_instance_history (task_id TEXT NOT NULL, start_date TEXT, end_date TEXT)",
    )
    .await;
    db
}

/// Inserts one task-instance row. `start` and `end` are SQL fragments so
/// tests can insert NULL timestamps.
async fn insert(db: &Database, table: &str, task_id: &str, start: &str, end: &str) {
    execute(
        db,
        &format!(
            "INSERT INTO {table} (task_id, start_date, end_date) VALUES ('{task_id}', {start}, {end})"
        ),
    )
    .await;
}

fn january_2024() -> DateWindow {
    DateWindow::parse("2024-01-01", "2024-02-01").unwrap()
}

fn assert_minutes(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("expected a non-null total");
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected} minutes, got {actual}"
    );
}

#[tokio::test]
async fn test_current_platform_sums_live_and_history_tables() {
    let db = fresh_store().await;
    insert(
        &db,
        "task_instance",
        "ingest",
        "'2024-01-10 08:00:00'",
        "'2024-01-10 08:05:00'",
    )
    .await;
    insert(
        &db,
        "task_instance_history",
        "transform",
        "'2024-01-12 09:00:00'",
        "'2024-01-12 09:10:00'",
    )
    .await;

    let report = total_task_duration("2.10.3", january_2024(), &db)
        .await
        .unwrap();
    assert_eq!(report.start_date, january_2024().start_date);
    assert_eq!(report.end_date, january_2024().end_date);
    assert_minutes(report.total_duration_minutes, 15.0);
}

#[tokio::test]
async fn test_legacy_platform_reads_only_live_table() {
    let db = fresh_store().await;
    insert(
        &db,
        "task_instance",
        "ingest",
        "'2024-01-10 08:00:00'",
        "'2024-01-10 08:05:00'",
    )
    .await;
    insert(
        &db,
        "task_instance_history",
        "transform",
        "'2024-01-12 09:00:00'",
        "'2024-01-12 09:10:00'",
    )
    .await;

    let report = total_task_duration("2.9.2", january_2024(), &db)
        .await
        .unwrap();
    assert_minutes(report.total_duration_minutes, 5.0);
}

#[tokio::test]
async fn test_window_start_is_inclusive_and_end_is_exclusive() {
    let db = fresh_store().await;
    // Starts exactly at the window's start boundary: included.
    insert(
        &db,
        "task_instance",
        "on_start",
        "'2024-01-01 00:00:00'",
        "'2024-01-01 00:02:00'",
    )
    .await;
    // Ends exactly at midnight on the end date: excluded.
    insert(
        &db,
        "task_instance",
        "on_end",
        "'2024-01-31 23:00:00'",
        "'2024-02-01 00:00:00'",
    )
    .await;

    let report = DurationAggregator::new(&db)
        .total_duration(SchemaDialect::Legacy, january_2024())
        .await
        .unwrap();
    assert_minutes(report.total_duration_minutes, 2.0);
}

#[tokio::test]
async fn test_out_of_window_instances_do_not_contribute() {
    let db = fresh_store().await;
    // Entirely before the window.
    insert(
        &db,
        "task_instance",
        "early",
        "'2023-12-30 10:00:00'",
        "'2023-12-30 10:30:00'",
    )
    .await;
    // Ends after the end boundary.
    insert(
        &db,
        "task_instance",
        "late",
        "'2024-01-31 23:00:00'",
        "'2024-02-01 01:00:00'",
    )
    .await;
    insert(
        &db,
        "task_instance",
        "inside",
        "'2024-01-15 12:00:00'",
        "'2024-01-15 12:07:30'",
    )
    .await;

    let report = DurationAggregator::new(&db)
        .total_duration(SchemaDialect::Legacy, january_2024())
        .await
        .unwrap();
    assert_minutes(report.total_duration_minutes, 7.5);
}

#[tokio::test]
async fn test_instances_with_null_timestamps_are_ignored() {
    let db = fresh_store().await;
    insert(&db, "task_instance", "running", "'2024-01-10 08:00:00'", "NULL").await;
    insert(&db, "task_instance", "queued", "NULL", "NULL").await;
    insert(
        &db,
        "task_instance",
        "done",
        "'2024-01-10 08:00:00'",
        "'2024-01-10 08:03:00'",
    )
    .await;

    let report = DurationAggregator::new(&db)
        .total_duration(SchemaDialect::Legacy, january_2024())
        .await
        .unwrap();
    assert_minutes(report.total_duration_minutes, 3.0);
}

#[tokio::test]
async fn test_empty_store_yields_null_total() {
    let db = fresh_store().await;
    let report = total_task_duration("2.10.0", january_2024(), &db)
        .await
        .unwrap();
    assert_eq!(report.total_duration_minutes, None);
}

#[tokio::test]
async fn test_fractional_minutes_are_preserved() {
    let db = fresh_store().await;
    insert(
        &db,
        "task_instance",
        "quick",
        "'2024-01-05 00:00:00'",
        "'2024-01-05 00:01:30'",
    )
    .await;

    let report = DurationAggregator::new(&db)
        .total_duration(SchemaDialect::Legacy, january_2024())
        .await
        .unwrap();
    assert_minutes(report.total_duration_minutes, 1.5);
}

#[tokio::test]
async fn test_repeated_runs_are_idempotent() {
    let db = fresh_store().await;
    insert(
        &db,
        "task_instance",
        "ingest",
        "'2024-01-10 08:00:00'",
        "'2024-01-10 08:05:00'",
    )
    .await;

    let first = total_task_duration("2.10.0", january_2024(), &db)
        .await
        .unwrap();
    let second = total_task_duration("2.10.0", january_2024(), &db)
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_history_table_surfaces_schema_mismatch() {
    // A store created by a pre-2.10 platform has no history table; resolving
    // the dialect as current must surface the executor's error, not mask it.
    let db = Database::new(":memory:", "", 1);
    execute(
        &db,
        "CREATE TABLE task_instance (task_id TEXT NOT NULL, start_date TEXT, end_date TEXT)",
    )
    .await;

    let result = total_task_duration("2.10.0", january_2024(), &db).await;
    assert!(result.is_err());
}
