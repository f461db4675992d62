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

use thiserror::Error;

/// Failures raised by the dataset cleaning pipeline.
///
/// Every orchestrator stops at the first stage that fails and returns that
/// stage's error unchanged.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid file extension: {0}")]
    InvalidFileExtension(#[from] ExtensionError),

    #[error("Failed to load file: {name}")]
    CorruptedFile {
        name: String,
        #[source]
        source: LoadError,
    },

    #[error("Duplicate values found in column: {column} (first repeat: '{value}')")]
    DuplicateKey { column: String, value: String },

    #[error("Column not found: {column}")]
    MissingColumn { column: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtensionError {
    #[error("No file uploaded. Please select a file.")]
    NoFile,

    #[error("Invalid file format: {name}. Allowed formats: {}", allowed.join(", "))]
    Unsupported { name: String, allowed: Vec<String> },
}

/// Parse failures wrapped by [`DataError::CorruptedFile`].
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("File has no header row")]
    Empty,

    #[error("Workbook contains no worksheets")]
    NoWorksheet,

    #[error("Inconsistent column count: row {row} has {actual} columns, expected {expected}")]
    InconsistentColumns { row: usize, actual: usize, expected: usize },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),
}

impl DataError {
    pub(crate) fn corrupted(name: &str, source: impl Into<LoadError>) -> Self {
        DataError::CorruptedFile { name: name.to_string(), source: source.into() }
    }
}
