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
use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use log::debug;

use super::dataset::{Dataset, Value};
use super::error::{DataError, LoadError};
use super::format::{FileFormat, SourceFile};
use super::processors::ValidationConfig;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub struct CsvLoader;
pub struct WorkbookLoader;

/// Parses raw file contents into a [`Dataset`] without imposing a schema.
pub trait DataLoader {
    type Error: std::error::Error + 'static;

    fn load(contents: &[u8], config: &ValidationConfig) -> Result<Dataset, Self::Error>;
}

pub fn load_data<T: DataLoader>(
    contents: &[u8],
    config: &ValidationConfig,
) -> Result<Dataset, T::Error> {
    T::load(contents, config)
}

/// Reads `file` as delimited text when its name ends in `.csv`, and as the
/// first sheet of a workbook otherwise.
pub fn convert_to_df(file: &SourceFile, config: &ValidationConfig) -> Result<Dataset, DataError> {
    load_file(file, FileFormat::from_name(file.name()), config)
}

/// Reads `file` with the loader for an already detected `format`.
pub fn load_file(
    file: &SourceFile,
    format: FileFormat,
    config: &ValidationConfig,
) -> Result<Dataset, DataError> {
    let name = file.name();
    let contents = file.read().map_err(|e| DataError::corrupted(name, e))?;

    let dataset = match format {
        FileFormat::Csv => load_data::<CsvLoader>(&contents, config),
        FileFormat::Workbook => load_data::<WorkbookLoader>(&contents, config),
    }
    .map_err(|e| DataError::corrupted(name, e))?;

    debug!("Loaded {}: {} rows, columns {:?}", name, dataset.len(), dataset.columns());
    Ok(dataset)
}

/// Configured missing markers become [`Value::Missing`]; any other text is
/// kept verbatim until its column is typed.
fn text_cell(raw: &str, config: &ValidationConfig) -> Value {
    if config.is_missing_marker(raw) {
        Value::Missing
    } else {
        Value::Text(raw.to_string())
    }
}

fn numeric_cell(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Value::Missing => None,
    }
}

/// Types every column as a whole. A column becomes numeric only when each
/// present cell reads as a finite float; otherwise its text stays as read,
/// so `"007"` and `"7"` remain distinct.
fn type_columns(rows: &mut [Vec<Value>], width: usize) {
    for index in 0..width {
        let numeric = rows
            .iter()
            .filter_map(|row| row.get(index))
            .filter(|value| !value.is_missing())
            .all(|value| numeric_cell(value).is_some());
        if !numeric {
            continue;
        }
        for cell in rows.iter_mut().filter_map(|row| row.get_mut(index)) {
            if let Some(n) = numeric_cell(cell) {
                *cell = Value::Number(n);
            }
        }
    }
}

/// Names blank headers `Unnamed: {i}` and suffixes repeats with `.1`, `.2`...
fn header_names<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for (i, name) in raw.into_iter().enumerate() {
        let base = match name {
            Some(n) if !n.is_empty() => n,
            _ => format!("Unnamed: {}", i),
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while !seen.insert(candidate.clone()) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

impl DataLoader for CsvLoader {
    type Error = LoadError;

    fn load(contents: &[u8], config: &ValidationConfig) -> Result<Dataset, Self::Error> {
        let contents = contents.strip_prefix(UTF8_BOM).unwrap_or(contents);
        let mut rdr =
            csv::ReaderBuilder::new().has_headers(false).flexible(true).from_reader(contents);

        let mut records = rdr.records();
        let header = match records.next() {
            Some(record) => record?,
            None => return Err(LoadError::Empty),
        };
        let columns = header_names(header.iter().map(|h| Some(h.to_string())));

        let mut rows = Vec::new();
        for result in records {
            let record = result?;
            rows.push(record.iter().map(|field| text_cell(field, config)).collect::<Vec<_>>());
        }

        type_columns(&mut rows, columns.len());
        Dataset::new(columns, rows)
    }
}

fn workbook_cell(cell: &Data, config: &ValidationConfig) -> Value {
    match cell {
        Data::Int(i) => Value::Number(*i as f64),
        Data::Float(f) if f.is_nan() => Value::Missing,
        Data::Float(f) => Value::Number(*f),
        Data::DateTime(dt) => Value::Number(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => text_cell(s, config),
        Data::Bool(b) => Value::Text(if *b { "True" } else { "False" }.to_string()),
        Data::Error(_) | Data::Empty => Value::Missing,
    }
}

impl DataLoader for WorkbookLoader {
    type Error = LoadError;

    fn load(contents: &[u8], config: &ValidationConfig) -> Result<Dataset, Self::Error> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(contents.to_vec()))?;
        let range = workbook.worksheet_range_at(0).ok_or(LoadError::NoWorksheet)??;

        let mut sheet_rows = range.rows();
        let Some(header) = sheet_rows.next() else {
            return Ok(Dataset::default());
        };
        let columns = header_names(header.iter().map(|cell| match cell {
            Data::Empty => None,
            other => Some(other.to_string()),
        }));

        let mut rows: Vec<Vec<Value>> = sheet_rows
            .map(|row| row.iter().map(|cell| workbook_cell(cell, config)).collect())
            .collect();

        type_columns(&mut rows, columns.len());
        Dataset::new(columns, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn load_csv(content: &str) -> Result<Dataset, LoadError> {
        load_data::<CsvLoader>(content.as_bytes(), &ValidationConfig::default())
    }

    #[test]
    fn test_load_mixed_cells() {
        let ds = load_csv("PID,Name,Price\nP1,Lamp,12.5\nP2,,7\n").expect("Failed to load CSV");

        assert_eq!(ds.columns(), &["PID", "Name", "Price"]);
        assert_eq!(
            ds.rows(),
            &[
                vec![Value::from("P1"), Value::from("Lamp"), Value::Number(12.5)],
                vec![Value::from("P2"), Value::Missing, Value::Number(7.0)],
            ]
        );
    }

    #[test]
    fn test_missing_markers() {
        let ds = load_csv("a,b,c,d\nNA,NaN,null,n/a\n").expect("Failed to load CSV");
        assert!(ds.rows()[0].iter().all(Value::is_missing));
    }

    #[test]
    fn test_only_configured_markers_are_missing() {
        let ds = load_csv("CID,Name\nC1,Nan\nC2,NAN\nC3,nan\n").expect("Failed to load CSV");
        let names: Vec<&Value> = ds.column("Name").expect("Name column").values().collect();
        assert_eq!(names, vec![&Value::from("Nan"), &Value::from("NAN"), &Value::Missing]);

        let config = ValidationConfig::new().with_missing_markers([""]);
        let ds = load_data::<CsvLoader>(b"PID,Note\nP1,NAN\nP2,nan\nP3,\n", &config)
            .expect("Failed to load CSV");
        assert_eq!(ds.get(0, "Note"), Some(&Value::from("NAN")));
        assert_eq!(ds.get(1, "Note"), Some(&Value::from("nan")));
        assert_eq!(ds.get(2, "Note"), Some(&Value::Missing));
    }

    #[test]
    fn test_columns_are_typed_as_a_whole() {
        let ds = load_csv("PID,Qty\nP1,007\n007,7\n7, 1\n").expect("Failed to load CSV");
        let pids: Vec<&Value> = ds.column("PID").expect("PID column").values().collect();
        assert_eq!(pids, vec![&Value::from("P1"), &Value::from("007"), &Value::from("7")]);
        let qty: Vec<&Value> = ds.column("Qty").expect("Qty column").values().collect();
        assert_eq!(qty, vec![&Value::Number(7.0), &Value::Number(7.0), &Value::Number(1.0)]);
    }

    #[test]
    fn test_non_finite_text_keeps_column_textual() {
        let ds = load_csv("PID\nINF\ninf\n1\n").expect("Failed to load CSV");
        let pids: Vec<&Value> = ds.column("PID").expect("PID column").values().collect();
        assert_eq!(pids, vec![&Value::from("INF"), &Value::from("inf"), &Value::from("1")]);
    }

    #[test]
    fn test_missing_cells_do_not_block_numeric_columns() {
        let ds = load_csv("Age\n30\nNA\n 41.5\n").expect("Failed to load CSV");
        let ages: Vec<&Value> = ds.column("Age").expect("Age column").values().collect();
        assert_eq!(ages, vec![&Value::Number(30.0), &Value::Missing, &Value::Number(41.5)]);
    }

    #[test]
    fn test_text_is_not_trimmed() {
        let ds = load_csv("Gender\n Male\n").expect("Failed to load CSV");
        assert_eq!(ds.rows()[0][0], Value::from(" Male"));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let ds = load_csv("SID,CID,Qty\n1,C1\n").expect("Failed to load CSV");
        assert_eq!(ds.rows()[0][2], Value::Missing);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = load_csv("SID,CID\n1,C1\n2,C2,extra\n");
        assert!(matches!(
            result,
            Err(LoadError::InconsistentColumns { row: 3, actual: 3, expected: 2 })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(load_csv(""), Err(LoadError::Empty)));
    }

    #[test]
    fn test_header_only() {
        let ds = load_csv("PID,Name\n").expect("Failed to load CSV");
        assert_eq!(ds.columns().len(), 2);
        assert!(ds.is_empty());
    }

    #[test]
    fn test_header_names_are_made_unique() {
        let ds = load_csv("A,A,,A\n1,2,3,4\n").expect("Failed to load CSV");
        assert_eq!(ds.columns(), &["A", "A.1", "Unnamed: 2", "A.2"]);
    }

    #[test]
    fn test_bom_is_stripped() {
        let ds = load_data::<CsvLoader>(b"\xEF\xBB\xBFPID\nP1\n", &ValidationConfig::default())
            .expect("Failed to load CSV");
        assert_eq!(ds.columns(), &["PID"]);
    }

    #[test]
    fn test_invalid_utf8_is_a_csv_error() {
        let result = load_data::<CsvLoader>(b"PID\n\xFF\xFE\n", &ValidationConfig::default());
        assert!(matches!(result, Err(LoadError::Csv(_))));
    }

    #[test]
    fn test_convert_csv_from_disk() {
        let temp_file = create_temp_csv("CID,Age\nC1,30\n");
        let file = SourceFile::from_path(temp_file.path());

        let ds = convert_to_df(&file, &ValidationConfig::default()).expect("Failed to load CSV");
        assert_eq!(ds.get(0, "Age"), Some(&Value::Number(30.0)));
    }

    #[test]
    fn test_convert_nonexistent_file() {
        let file = SourceFile::from_path("nonexistent.csv");
        let result = convert_to_df(&file, &ValidationConfig::default());
        assert!(matches!(
            result,
            Err(DataError::CorruptedFile { source: LoadError::Io(_), .. })
        ));
    }

    #[test]
    fn test_garbage_workbook_is_corrupted() {
        let file = SourceFile::from_bytes("products.xlsx", b"PID,Name\nP1,Lamp\n".to_vec());
        let result = convert_to_df(&file, &ValidationConfig::default());
        match result {
            Err(DataError::CorruptedFile { name, source: LoadError::Workbook(_) }) => {
                assert_eq!(name, "products.xlsx")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_load_xlsx_first_sheet() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "CID").unwrap();
        sheet.write_string(0, 1, "Age").unwrap();
        sheet.write_string(0, 2, "Gender").unwrap();
        sheet.write_string(1, 0, "C1").unwrap();
        sheet.write_number(1, 1, 42.0).unwrap();
        sheet.write_string(1, 2, "Female").unwrap();
        sheet.write_string(2, 0, "C2").unwrap();
        sheet.write_string(2, 2, "Male").unwrap();
        let other = workbook.add_worksheet();
        other.write_string(0, 0, "ignored").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let file = SourceFile::from_bytes("customers.xlsx", bytes);
        let ds = convert_to_df(&file, &ValidationConfig::default()).expect("Failed to load xlsx");

        assert_eq!(ds.columns(), &["CID", "Age", "Gender"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.get(0, "Age"), Some(&Value::Number(42.0)));
        assert_eq!(ds.get(1, "Age"), Some(&Value::Missing));
        assert_eq!(ds.get(1, "Gender"), Some(&Value::from("Male")));
    }

    #[test]
    fn test_workbook_mixed_column_keeps_native_numbers() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "PID").unwrap();
        sheet.write_string(0, 1, "Price").unwrap();
        sheet.write_number(1, 0, 7.0).unwrap();
        sheet.write_string(1, 1, "12").unwrap();
        sheet.write_string(2, 0, "007").unwrap();
        sheet.write_number(2, 1, 3.5).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let ds = load_data::<WorkbookLoader>(&bytes, &ValidationConfig::default())
            .expect("Failed to load xlsx");
        assert_eq!(ds.get(0, "PID"), Some(&Value::Number(7.0)));
        assert_eq!(ds.get(1, "PID"), Some(&Value::from("007")));
        assert_eq!(ds.get(0, "Price"), Some(&Value::Number(12.0)));
        assert_eq!(ds.get(1, "Price"), Some(&Value::Number(3.5)));
    }
}
