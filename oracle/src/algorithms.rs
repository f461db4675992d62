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

use log::{debug, log_enabled, warn};
use ndarray::Array1;

use crate::data::Value;
use crate::errors::{LossError, ModelError, ScalerError};
use crate::losses::{HalfMSE, LossFunction};
use crate::optimizers::{BatchGradientDescent, Optimizer};
use crate::scalers::{Scaler, StandardScaler};

pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
pub const DEFAULT_EPOCHS: usize = 1000;

const LOG_EVERY: usize = 1000;

/// Coercion of an input cell to a float. Anything that is not a number
/// becomes NaN and is rejected by [`validate_data`].
pub trait ToNumeric {
    fn to_numeric(&self) -> f64;
}

macro_rules! impl_to_numeric {
    ($($t:ty),*) => {
        $(impl ToNumeric for $t {
            fn to_numeric(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_to_numeric!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl ToNumeric for str {
    fn to_numeric(&self) -> f64 {
        self.trim().parse().unwrap_or(f64::NAN)
    }
}

impl ToNumeric for String {
    fn to_numeric(&self) -> f64 {
        self.as_str().to_numeric()
    }
}

impl ToNumeric for Value {
    fn to_numeric(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.to_numeric(),
            Value::Missing => f64::NAN,
        }
    }
}

impl<T: ToNumeric + ?Sized> ToNumeric for &T {
    fn to_numeric(&self) -> f64 {
        (**self).to_numeric()
    }
}

/// `y = weight * x + bias`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    pub weight: f64,
    pub bias: f64,
}

impl RegressionModel {
    pub fn new(weight: f64, bias: f64) -> Self {
        RegressionModel { weight, bias }
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.weight * x + self.bias
    }

    pub fn predict_all(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|v| self.predict(v))
    }
}

impl fmt::Display for RegressionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.2}x + {:.2}", self.weight, self.bias)
    }
}

/// Checks that `x` and `y` have the same, non-zero length and contain only
/// numbers, and returns both as float arrays.
pub fn validate_data<X, Y>(x: &[X], y: &[Y]) -> Result<(Array1<f64>, Array1<f64>), ModelError>
where
    X: ToNumeric,
    Y: ToNumeric,
{
    if x.len() != y.len() {
        return Err(ModelError::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    if x.is_empty() {
        return Err(ModelError::EmptyInput);
    }

    let x: Array1<f64> = x.iter().map(ToNumeric::to_numeric).collect();
    let y: Array1<f64> = y.iter().map(ToNumeric::to_numeric).collect();

    if x.iter().any(|v| v.is_nan()) || y.iter().any(|v| v.is_nan()) {
        return Err(ModelError::InvalidNumericValue);
    }

    Ok((x, y))
}

/// `1/(2n) * sum((weight * x + bias - y)^2)`.
pub fn compute_cost(
    x: &Array1<f64>,
    y: &Array1<f64>,
    weight: f64,
    bias: f64,
) -> Result<f64, LossError> {
    let predictions = RegressionModel::new(weight, bias).predict_all(x);
    HalfMSE.calculate(&predictions, y)
}

fn check_shapes(x: &Array1<f64>, y: &Array1<f64>) -> Result<(), ModelError> {
    if x.len() != y.len() {
        return Err(ModelError::DataLengthMismatch { x_len: x.len(), y_len: y.len() });
    }
    if x.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    if x.iter().chain(y.iter()).any(|v| v.is_nan()) {
        return Err(ModelError::InvalidNumericValue);
    }
    Ok(())
}

fn descend(
    optimizer: &dyn Optimizer,
    x: &Array1<f64>,
    y: &Array1<f64>,
    mut weight: f64,
    mut bias: f64,
    learning_rate: f64,
    epochs: usize,
) -> (f64, f64) {
    for epoch in 0..epochs {
        if epoch % LOG_EVERY == 0 && log_enabled!(log::Level::Debug) {
            if let Ok(cost) = compute_cost(x, y, weight, bias) {
                debug!("Epoch {}: cost = {:.6}, weight = {}, bias = {}", epoch, cost, weight, bias);
            }
        }

        let (grad_weight, grad_bias) = optimizer.compute_gradients(x, y, weight, bias);
        weight -= learning_rate * grad_weight;
        bias -= learning_rate * grad_bias;
    }

    if !weight.is_finite() || !bias.is_finite() {
        warn!(
            "Gradient descent diverged after {} epochs (learning rate {}); \
             normalize the inputs or lower the rate",
            epochs, learning_rate
        );
    }
    (weight, bias)
}

/// Runs exactly `epochs` full-batch updates starting from `(weight, bias)`.
/// Both gradients are taken at the pre-update parameters.
pub fn gradient_descent(
    x: &Array1<f64>,
    y: &Array1<f64>,
    weight: f64,
    bias: f64,
    learning_rate: f64,
    epochs: usize,
) -> Result<(f64, f64), ModelError> {
    check_shapes(x, y)?;
    Ok(descend(&BatchGradientDescent, x, y, weight, bias, learning_rate, epochs))
}

/// Fits a line to raw `x`/`y` from `(0, 0)`. No normalization is applied;
/// see [`LinearRegression`] for that.
pub fn linear_regression<X, Y>(
    x: &[X],
    y: &[Y],
    learning_rate: f64,
    epochs: usize,
) -> Result<RegressionModel, ModelError>
where
    X: ToNumeric,
    Y: ToNumeric,
{
    let (x, y) = validate_data(x, y)?;
    let (weight, bias) = gradient_descent(&x, &y, 0.0, 0.0, learning_rate, epochs)?;
    Ok(RegressionModel { weight, bias })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub epochs: usize,
    pub normalize: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            learning_rate: DEFAULT_LEARNING_RATE,
            epochs: DEFAULT_EPOCHS,
            normalize: false,
        }
    }
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, epochs: usize) -> Self {
        TrainingConfig { learning_rate, epochs, normalize: false }
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }
}

pub struct LinearRegressionBuilder {
    loss_function: Box<dyn LossFunction>,
    optimizer: Box<dyn Optimizer>,
    config: TrainingConfig,
}

impl LinearRegressionBuilder {
    pub fn optimizer(mut self, optimizer: impl Optimizer + 'static) -> Self {
        self.optimizer = Box::new(optimizer);
        self
    }

    pub fn loss_function(mut self, loss_function: impl LossFunction + 'static) -> Self {
        self.loss_function = Box::new(loss_function);
        self
    }

    pub fn learning_rate(mut self, learning_rate: f64) -> Self {
        self.config.learning_rate = learning_rate;
        self
    }

    pub fn epochs(mut self, epochs: usize) -> Self {
        self.config.epochs = epochs;
        self
    }

    pub fn normalize(mut self, normalize: bool) -> Self {
        self.config.normalize = normalize;
        self
    }

    pub fn config(mut self, config: TrainingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> LinearRegression {
        LinearRegression {
            model: None,
            loss_function: self.loss_function,
            optimizer: self.optimizer,
            config: self.config,
        }
    }
}

/// Univariate linear regression trained by gradient descent.
///
/// With `normalize(true)` both columns are standardized before training and
/// the fitted coefficients are mapped back to the original scale:
/// `w = w_n * sy / sx` and `b = b_n * sy + my - w * mx`. A constant column
/// is reported as [`ModelError::ZeroVariance`] instead of being trained on.
pub struct LinearRegression {
    model: Option<RegressionModel>,
    loss_function: Box<dyn LossFunction>,
    optimizer: Box<dyn Optimizer>,
    config: TrainingConfig,
}

fn scaler_error(column: &'static str) -> impl FnOnce(ScalerError) -> ModelError {
    move |e| match e {
        ScalerError::ZeroVariance => ModelError::ZeroVariance(column),
        other => ModelError::Scaler(other),
    }
}

impl LinearRegression {
    pub fn new() -> LinearRegressionBuilder {
        LinearRegressionBuilder {
            loss_function: Box::new(HalfMSE),
            optimizer: Box::new(BatchGradientDescent),
            config: TrainingConfig::default(),
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn model(&self) -> Option<RegressionModel> {
        self.model
    }

    pub fn fit<X, Y>(&mut self, x: &[X], y: &[Y]) -> Result<RegressionModel, ModelError>
    where
        X: ToNumeric,
        Y: ToNumeric,
    {
        let (x, y) = validate_data(x, y)?;
        let model = if self.config.normalize {
            self.fit_normalized(&x, &y)?
        } else {
            self.fit_raw(&x, &y)
        };
        debug!("Fitted {} (normalize = {})", model, self.config.normalize);
        self.model = Some(model);
        Ok(model)
    }

    fn fit_raw(&self, x: &Array1<f64>, y: &Array1<f64>) -> RegressionModel {
        let (weight, bias) = descend(
            self.optimizer.as_ref(),
            x,
            y,
            0.0,
            0.0,
            self.config.learning_rate,
            self.config.epochs,
        );
        RegressionModel { weight, bias }
    }

    fn fit_normalized(
        &self,
        x: &Array1<f64>,
        y: &Array1<f64>,
    ) -> Result<RegressionModel, ModelError> {
        let mut x_scaler = StandardScaler::new();
        let mut y_scaler = StandardScaler::new();
        let x_scaled = x_scaler.fit_transform(x).map_err(scaler_error("x"))?;
        let y_scaled = y_scaler.fit_transform(y).map_err(scaler_error("y"))?;

        debug!(
            "Standardized x (mean {:?}, std {:?}) and y (mean {:?}, std {:?})",
            x_scaler.mean(),
            x_scaler.std(),
            y_scaler.mean(),
            y_scaler.std()
        );

        let scaled = self.fit_raw(&x_scaled, &y_scaled);

        let (Some(x_std), Some(y_std)) = (x_scaler.std(), y_scaler.std()) else {
            return Err(ModelError::Scaler(ScalerError::NotFitted));
        };
        let weight = scaled.weight * (y_std / x_std);

        // the bias is the prediction at x = 0, mapped back through the y scaler
        let origin = x_scaler.transform(&Array1::zeros(1))?;
        let bias = y_scaler.inverse_transform(&scaled.predict_all(&origin))?[0];
        Ok(RegressionModel { weight, bias })
    }

    pub fn predict(&self, x: &Array1<f64>) -> Result<Array1<f64>, ModelError> {
        let model = self.model.ok_or(ModelError::NotFitted)?;
        Ok(model.predict_all(x))
    }

    pub fn calculate_loss(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
    ) -> Result<f64, LossError> {
        self.loss_function.calculate(predictions, actuals)
    }
}
