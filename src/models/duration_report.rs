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

//! The reporting window and the report record it produces.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// A half-open calendar date range: inclusive of `start_date`, exclusive of
/// `end_date`.
///
/// A task instance is in the window when it started on or after `start_date`
/// and ended strictly before `end_date`. Comparison is date-only, so an
/// instance ending exactly at midnight on `end_date` is excluded. The window
/// is never validated for ordering; an inverted window matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateWindow {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Parses a window from two ISO `YYYY-MM-DD` strings.
    pub fn parse(start_date: &str, end_date: &str) -> Result<Self, chrono::ParseError> {
        Ok(Self {
            start_date: NaiveDate::parse_from_str(start_date, "%Y-%m-%d")?,
            end_date: NaiveDate::parse_from_str(end_date, "%Y-%m-%d")?,
        })
    }

    /// The default reporting window: the two months trailing `today`.
    pub fn trailing_two_months(today: NaiveDate) -> Self {
        Self {
            start_date: today - Months::new(2),
            end_date: today,
        }
    }
}

/// The result of one reporting run: the window it covered and the summed
/// duration of every completed task instance inside it.
///
/// `total_duration_minutes` is `None` when no completed instance fell inside
/// the window. That is a normal outcome, distinct from a zero-minute total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_duration_minutes: Option<f64>,
}
