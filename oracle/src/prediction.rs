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

use log::info;

use crate::algorithms::{LinearRegression, RegressionModel, TrainingConfig};
use crate::data::{DataError, Dataset, Value};
use crate::errors::ModelError;

pub const PRICE_COLUMN: &str = "Sales_Price";
pub const QUANTITY_COLUMN: &str = "Quantity_Sold";

pub const SALES_LEARNING_RATE: f64 = 0.001;
pub const SALES_EPOCHS: usize = 10_000;

fn column_index(dataset: &Dataset, name: &str) -> Result<usize, ModelError> {
    dataset
        .column_index(name)
        .ok_or_else(|| DataError::MissingColumn { column: name.to_string() }.into())
}

/// Fits `y_column` against `x_column` of a cleaned dataset.
///
/// Rows where either column is missing are skipped. Text cells are not
/// skipped: they fail the numeric check and the whole fit is rejected.
/// Normalization is always applied, whatever `config.normalize` says.
pub fn fit_columns(
    dataset: &Dataset,
    x_column: &str,
    y_column: &str,
    config: &TrainingConfig,
) -> Result<RegressionModel, ModelError> {
    let x_idx = column_index(dataset, x_column)?;
    let y_idx = column_index(dataset, y_column)?;

    let (x, y): (Vec<&Value>, Vec<&Value>) = dataset
        .rows()
        .iter()
        .filter(|row| !row[x_idx].is_missing() && !row[y_idx].is_missing())
        .map(|row| (&row[x_idx], &row[y_idx]))
        .unzip();

    info!("Fitting {} against {} on {} rows", y_column, x_column, x.len());

    let mut regression = LinearRegression::new().config(config.with_normalize(true)).build();
    let model = regression.fit(&x, &y)?;
    info!("{} trend: {}", y_column, model);
    Ok(model)
}

/// Trend of quantity sold against sale price.
pub fn predict_quantity_sold(sales: &Dataset) -> Result<RegressionModel, ModelError> {
    let config = TrainingConfig::new(SALES_LEARNING_RATE, SALES_EPOCHS);
    fit_columns(sales, PRICE_COLUMN, QUANTITY_COLUMN, &config)
}
