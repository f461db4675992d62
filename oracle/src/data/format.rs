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

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{DataError, ExtensionError, LoadError};
use super::processors::ValidationConfig;

/// How a file's contents are parsed, decided from its name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Workbook,
}

impl FileFormat {
    /// `.csv` in any case is delimited text; any other name is a workbook.
    pub fn from_name(name: &str) -> Self {
        if has_suffix(name, ".csv") {
            FileFormat::Csv
        } else {
            FileFormat::Workbook
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

/// A named file handed to the pipeline, either already in memory (an upload)
/// or a path that is read only once its extension has been accepted.
#[derive(Debug, Clone)]
pub struct SourceFile {
    name: String,
    source: Source,
}

impl SourceFile {
    pub fn from_bytes(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        SourceFile { name: name.into(), source: Source::Memory(contents.into()) }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        SourceFile { name: path.to_string_lossy().into_owned(), source: Source::Disk(path.into()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reads the whole file. For on-disk sources the handle is dropped before
    /// this returns.
    pub(crate) fn read(&self) -> Result<Vec<u8>, LoadError> {
        match &self.source {
            Source::Memory(bytes) => Ok(bytes.clone()),
            Source::Disk(path) => Ok(fs::read(path)?),
        }
    }
}

fn has_suffix(name: &str, suffix: &str) -> bool {
    name.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase())
}

/// Rejects missing files and names without an accepted extension.
///
/// The check is lexical: nothing is read from the file.
pub fn check_extension(
    file: Option<&SourceFile>,
    config: &ValidationConfig,
) -> Result<FileFormat, DataError> {
    accept_file(file, config).map(|(_, format)| format)
}

/// Like [`check_extension`], but also hands back the accepted file.
pub(crate) fn accept_file<'a>(
    file: Option<&'a SourceFile>,
    config: &ValidationConfig,
) -> Result<(&'a SourceFile, FileFormat), DataError> {
    let file = file.ok_or(ExtensionError::NoFile)?;
    let name = file.name();

    if !config.accepted_extensions().iter().any(|ext| has_suffix(name, ext)) {
        return Err(ExtensionError::Unsupported {
            name: name.to_string(),
            allowed: config.accepted_extensions().to_vec(),
        }
        .into());
    }

    Ok((file, FileFormat::from_name(name)))
}
