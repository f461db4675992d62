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

use std::fmt;

use super::error::LoadError;

/// A single cell of a [`Dataset`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Key used for equality checks across a column. Numbers compare by their
    /// bit pattern so `1.0` and `1.0` collide while `1.0` and `"1"` do not.
    pub(crate) fn key(&self) -> ValueKey<'_> {
        match self {
            Value::Number(n) if *n == 0.0 => ValueKey::Number(0.0f64.to_bits()),
            Value::Number(n) => ValueKey::Number(n.to_bits()),
            Value::Text(s) => ValueKey::Text(s),
            Value::Missing => ValueKey::Missing,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Missing => f.write_str("NaN"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Missing, Into::into)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum ValueKey<'a> {
    Number(u64),
    Text(&'a str),
    Missing,
}

/// Rows of named columns, as parsed from one uploaded file.
///
/// Stages never mutate a dataset they are handed; each one builds a new
/// value from its input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Builds a dataset, padding short rows with [`Value::Missing`].
    ///
    /// A row with more cells than there are columns is rejected. Rows are
    /// numbered as in a file whose first line is the header.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Value>>) -> Result<Self, LoadError> {
        let width = columns.len();
        for (i, row) in rows.iter_mut().enumerate() {
            if row.len() > width {
                return Err(LoadError::InconsistentColumns {
                    row: i + 2,
                    actual: row.len(),
                    expected: width,
                });
            }
            row.resize(width, Value::Missing);
        }
        Ok(Dataset { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        let index = self.column_index(name)?;
        Some(Column { name: &self.columns[index], index, rows: &self.rows })
    }

    /// Value at `row` in the column called `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&Value> {
        let index = self.column_index(name)?;
        self.rows.get(row).map(|r| &r[index])
    }

    /// Keeps the rows for which `keep` returns true, preserving order.
    pub fn filter_rows<F>(&self, mut keep: F) -> Dataset
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self.rows.iter().filter(|row| keep(row)).cloned().collect();
        Dataset { columns: self.columns.clone(), rows }
    }

    /// Rewrites every cell of column `index` with `f`.
    pub(crate) fn map_column<F>(&self, index: usize, mut f: F) -> Dataset
    where
        F: FnMut(&Value) -> Value,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row[index] = f(&row[index]);
                row
            })
            .collect();
        Dataset { columns: self.columns.clone(), rows }
    }
}

/// Borrowed view of one column of a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    name: &'a str,
    index: usize,
    rows: &'a [Vec<Value>],
}

impl<'a> Column<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &'a Value> + 'a {
        let index = self.index;
        self.rows.iter().map(move |row| &row[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec!["PID".into(), "Price".into()],
            vec![vec!["P1".into(), 10.0.into()], vec!["P2".into()]],
        )
        .unwrap()
    }

    #[test]
    fn test_new_pads_short_rows() {
        let ds = sample();
        assert_eq!(ds.rows()[1], vec![Value::from("P2"), Value::Missing]);
    }

    #[test]
    fn test_new_rejects_long_rows() {
        let result = Dataset::new(
            vec!["PID".into()],
            vec![vec!["P1".into()], vec!["P2".into(), "extra".into()]],
        );
        assert!(matches!(
            result,
            Err(LoadError::InconsistentColumns { row: 3, actual: 2, expected: 1 })
        ));
    }

    #[test]
    fn test_column_lookup() {
        let ds = sample();
        assert!(ds.column("Age").is_none());
        let price = ds.column("Price").expect("Price column");
        assert_eq!(price.name(), "Price");
        let values: Vec<&Value> = price.values().collect();
        assert_eq!(values, vec![&Value::Number(10.0), &Value::Missing]);
        assert_eq!(ds.get(0, "PID"), Some(&Value::from("P1")));
    }

    #[test]
    fn test_filter_rows_leaves_input_untouched() {
        let ds = sample();
        let filtered = ds.filter_rows(|row| !row[1].is_missing());
        assert_eq!(filtered.len(), 1);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn test_value_keys() {
        assert_eq!(Value::Number(0.0).key(), Value::Number(-0.0).key());
        assert_ne!(Value::Number(1.0).key(), Value::from("1").key());
    }
}
