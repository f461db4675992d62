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
use std::ops::RangeInclusive;

use log::{debug, info};

use super::dataset::Dataset;
use super::error::DataError;
use super::format::{SourceFile, accept_file};
use super::loaders::load_file;
use super::validators::{
    check_unique_column, fill_missing, filter_categorical, filter_numeric_range, remove_empty,
};

pub const ACCEPTED_EXTENSIONS: [&str; 5] = [".csv", ".xls", ".xlsx", ".xlsm", ".xlsb"];
pub const MISSING_MARKERS: [&str; 11] =
    ["", "NA", "N/A", "n/a", "NaN", "nan", "NULL", "null", "None", "#N/A", "<NA>"];
pub const VALID_GENDERS: [&str; 3] = ["Male", "Female", "Trans"];

pub const PRODUCT_KEY: &str = "PID";
pub const SALES_KEY: &str = "SID";
pub const CUSTOMER_KEY: &str = "CID";
pub const AGE_COLUMN: &str = "Age";
pub const GENDER_COLUMN: &str = "Gender";

/// Rules shared by every cleaning pipeline.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    accepted_extensions: Vec<String>,
    missing_markers: Vec<String>,
    age_range: RangeInclusive<f64>,
    valid_genders: Vec<String>,
    cid_sentinel: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig::new()
    }
}

impl ValidationConfig {
    pub fn new() -> Self {
        ValidationConfig {
            accepted_extensions: ACCEPTED_EXTENSIONS.map(String::from).to_vec(),
            missing_markers: MISSING_MARKERS.map(String::from).to_vec(),
            age_range: 0.0..=120.0,
            valid_genders: VALID_GENDERS.map(String::from).to_vec(),
            cid_sentinel: "0".to_string(),
        }
    }

    pub fn with_accepted_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_missing_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_age_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.age_range = range;
        self
    }

    pub fn with_valid_genders<I, S>(mut self, genders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.valid_genders = genders.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cid_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.cid_sentinel = sentinel.into();
        self
    }

    pub fn accepted_extensions(&self) -> &[String] {
        &self.accepted_extensions
    }

    pub fn is_missing_marker(&self, raw: &str) -> bool {
        self.missing_markers.iter().any(|m| m == raw)
    }

    pub fn age_range(&self) -> &RangeInclusive<f64> {
        &self.age_range
    }

    pub fn valid_genders(&self) -> &[String] {
        &self.valid_genders
    }

    pub fn cid_sentinel(&self) -> &str {
        &self.cid_sentinel
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Product,
    Sales,
    Customer,
}

impl DatasetKind {
    /// Column whose values must be distinct once the dataset is clean.
    pub fn key_column(self) -> &'static str {
        match self {
            DatasetKind::Product => PRODUCT_KEY,
            DatasetKind::Sales => SALES_KEY,
            DatasetKind::Customer => CUSTOMER_KEY,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DatasetKind::Product => "product",
            DatasetKind::Sales => "sales",
            DatasetKind::Customer => "customer",
        })
    }
}

fn load(
    kind: DatasetKind,
    file: Option<&SourceFile>,
    config: &ValidationConfig,
) -> Result<Dataset, DataError> {
    let (file, format) = accept_file(file, config)?;
    info!("Processing {} file {} as {:?}", kind, file.name(), format);
    load_file(file, format, config)
}

fn finish(kind: DatasetKind, df: Dataset, rows_read: usize) -> Result<Dataset, DataError> {
    let df = remove_empty(&df);
    debug!("{}: {} rows left after removing incomplete rows", kind, df.len());
    check_unique_column(&df, kind.key_column())?;
    info!("{} file cleaned: kept {} of {} rows", kind, df.len(), rows_read);
    Ok(df)
}

/// Extension check, load, drop incomplete rows, then require unique `PID`s.
pub fn process_product_file(
    file: Option<&SourceFile>,
    config: &ValidationConfig,
) -> Result<Dataset, DataError> {
    let df = load(DatasetKind::Product, file, config)?;
    let rows_read = df.len();
    finish(DatasetKind::Product, df, rows_read)
}

/// Like [`process_product_file`], but a missing `CID` is first replaced by
/// the configured sentinel so anonymous sales survive, and `SID` is the key.
pub fn process_sales_file(
    file: Option<&SourceFile>,
    config: &ValidationConfig,
) -> Result<Dataset, DataError> {
    let df = load(DatasetKind::Sales, file, config)?;
    let rows_read = df.len();
    let df = fill_missing(&df, CUSTOMER_KEY, config.cid_sentinel());
    finish(DatasetKind::Sales, df, rows_read)
}

/// Drops rows with an out-of-range `Age` or an unknown `Gender` (each only
/// when the column exists) before the generic cleaning; `CID` is the key.
pub fn process_customer_file(
    file: Option<&SourceFile>,
    config: &ValidationConfig,
) -> Result<Dataset, DataError> {
    let df = load(DatasetKind::Customer, file, config)?;
    let rows_read = df.len();

    let df = filter_numeric_range(&df, AGE_COLUMN, config.age_range());
    debug!("customer: {} rows left after the {} filter", df.len(), AGE_COLUMN);
    let df = filter_categorical(&df, GENDER_COLUMN, config.valid_genders());
    debug!("customer: {} rows left after the {} filter", df.len(), GENDER_COLUMN);

    finish(DatasetKind::Customer, df, rows_read)
}

pub fn process_file(
    kind: DatasetKind,
    file: Option<&SourceFile>,
    config: &ValidationConfig,
) -> Result<Dataset, DataError> {
    match kind {
        DatasetKind::Product => process_product_file(file, config),
        DatasetKind::Sales => process_sales_file(file, config),
        DatasetKind::Customer => process_customer_file(file, config),
    }
}

/// The three cleaned inputs of one analysis session.
#[derive(Debug, Clone)]
pub struct RetailDatasets {
    pub products: Dataset,
    pub sales: Dataset,
    pub customers: Dataset,
}

impl RetailDatasets {
    /// Cleans products, then sales, then customers, stopping at the first
    /// failure.
    pub fn load(
        products: Option<&SourceFile>,
        sales: Option<&SourceFile>,
        customers: Option<&SourceFile>,
        config: &ValidationConfig,
    ) -> Result<Self, DataError> {
        Ok(RetailDatasets {
            products: process_product_file(products, config)?,
            sales: process_sales_file(sales, config)?,
            customers: process_customer_file(customers, config)?,
        })
    }
}
