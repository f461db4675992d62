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

use ndarray::Array1;

use crate::errors::LossError;

pub trait LossFunction {
    fn calculate(&self, predictions: &Array1<f64>, actuals: &Array1<f64>)
    -> Result<f64, LossError>;
}

fn check_inputs(predictions: &Array1<f64>, actuals: &Array1<f64>) -> Result<(), LossError> {
    if predictions.is_empty() || actuals.is_empty() {
        return Err(LossError::EmptyInput);
    }

    if predictions.len() != actuals.len() {
        return Err(LossError::DimensionMismatch {
            expected: predictions.len(),
            actual: actuals.len(),
        });
    }

    if predictions.iter().any(|&v| !v.is_finite()) || actuals.iter().any(|&v| !v.is_finite()) {
        return Err(LossError::InvalidNumericValue);
    }

    Ok(())
}

pub struct MSE;

impl LossFunction for MSE {
    fn calculate(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
    ) -> Result<f64, LossError> {
        check_inputs(predictions, actuals)?;

        let diff = predictions - actuals;
        let mse = diff.mapv(|x| x * x).mean().ok_or(LossError::EmptyInput)?;
        Ok(mse)
    }
}

/// Mean squared error scaled by `1/(2n)`, the cost minimised by gradient
/// descent on a line.
pub struct HalfMSE;

impl LossFunction for HalfMSE {
    fn calculate(
        &self,
        predictions: &Array1<f64>,
        actuals: &Array1<f64>,
    ) -> Result<f64, LossError> {
        Ok(MSE.calculate(predictions, actuals)? / 2.0)
    }
}
