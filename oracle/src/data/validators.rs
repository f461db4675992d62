// BSD 3-Clause License
//
// Copyright (c) 2025, BlackPortal ○
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use super::dataset::{Dataset, Value};
use super::error::DataError;

/// Fails with [`DataError::DuplicateKey`] if any value of `column_name`
/// occurs more than once.
///
/// Run this after [`remove_empty`]: rows that are about to be dropped must
/// not be able to trigger a duplicate.
pub fn check_unique_column(dataset: &Dataset, column_name: &str) -> Result<(), DataError> {
    let column = dataset
        .column(column_name)
        .ok_or_else(|| DataError::MissingColumn { column: column_name.to_string() })?;

    let mut seen = HashSet::with_capacity(column.len());
    for value in column.values() {
        if !seen.insert(value.key()) {
            return Err(DataError::DuplicateKey {
                column: column.name().to_string(),
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

/// Drops every row that has a missing value in any column. Columns are never
/// removed.
pub fn remove_empty(dataset: &Dataset) -> Dataset {
    dataset.filter_rows(|row| !row.iter().any(Value::is_missing))
}

/// Replaces missing cells of `column_name` with `sentinel`. A dataset without
/// that column is returned as is.
pub fn fill_missing(dataset: &Dataset, column_name: &str, sentinel: &str) -> Dataset {
    match dataset.column_index(column_name) {
        Some(index) => dataset.map_column(index, |value| match value {
            Value::Missing => Value::Text(sentinel.to_string()),
            other => other.clone(),
        }),
        None => dataset.clone(),
    }
}

/// Keeps rows whose `column_name` value is a number inside `range`.
/// Missing and non-numeric values fail the check.
pub fn filter_numeric_range(
    dataset: &Dataset,
    column_name: &str,
    range: &RangeInclusive<f64>,
) -> Dataset {
    match dataset.column_index(column_name) {
        Some(index) => {
            dataset.filter_rows(|row| row[index].as_number().is_some_and(|n| range.contains(&n)))
        }
        None => dataset.clone(),
    }
}

/// Keeps rows whose `column_name` value is exactly one of `accepted`.
/// Comparison is case sensitive and nothing is trimmed.
pub fn filter_categorical(dataset: &Dataset, column_name: &str, accepted: &[String]) -> Dataset {
    match dataset.column_index(column_name) {
        Some(index) => dataset.filter_rows(|row| {
            row[index].as_text().is_some_and(|text| accepted.iter().any(|a| a == text))
        }),
        None => dataset.clone(),
    }
}
