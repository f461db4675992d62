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

//! Loading and cleaning of the product, sales and customer datasets.
//!
//! Every dataset goes through the same ordered stages: extension check,
//! parsing, dataset-specific pre-cleaning, removal of incomplete rows and
//! finally the unique-key check. The first failing stage ends the pipeline
//! and its [`DataError`] is returned as is.

pub mod dataset;
pub mod error;
pub mod format;
pub mod loaders;
pub mod processors;
pub mod validators;

pub use dataset::{Column, Dataset, Value};
pub use error::{DataError, ExtensionError, LoadError};
pub use format::{FileFormat, SourceFile, check_extension};
pub use loaders::{CsvLoader, DataLoader, WorkbookLoader, convert_to_df, load_data, load_file};
pub use processors::{
    DatasetKind, RetailDatasets, ValidationConfig, process_customer_file, process_file,
    process_product_file, process_sales_file,
};
pub use validators::{
    check_unique_column, fill_missing, filter_categorical, filter_numeric_range, remove_empty,
};
