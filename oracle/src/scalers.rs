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

use crate::errors::ScalerError;

pub trait Scaler {
    fn fit(&mut self, x: &Array1<f64>) -> Result<(), ScalerError>;

    fn transform(&self, x: &Array1<f64>) -> Result<Array1<f64>, ScalerError>;

    fn inverse_transform(&self, x: &Array1<f64>) -> Result<Array1<f64>, ScalerError>;

    fn fit_transform(&mut self, x: &Array1<f64>) -> Result<Array1<f64>, ScalerError> {
        self.fit(x)?;
        self.transform(x)
    }
}

/// Rescales a column to zero mean and unit (population) standard deviation.
///
/// Unlike a scaler that silently substitutes 1 for a zero deviation, fitting
/// a constant column fails with [`ScalerError::ZeroVariance`].
#[derive(Debug, Clone, Default)]
pub struct StandardScaler {
    params: Option<(f64, f64)>,
}

impl StandardScaler {
    pub fn new() -> Self {
        StandardScaler { params: None }
    }

    pub fn mean(&self) -> Option<f64> {
        self.params.map(|(mean, _)| mean)
    }

    pub fn std(&self) -> Option<f64> {
        self.params.map(|(_, std)| std)
    }

    fn fitted(&self) -> Result<(f64, f64), ScalerError> {
        self.params.ok_or(ScalerError::NotFitted)
    }
}

impl Scaler for StandardScaler {
    fn fit(&mut self, x: &Array1<f64>) -> Result<(), ScalerError> {
        let mean = x.mean().ok_or(ScalerError::EmptyInput)?;
        let std = x.std(0.0);
        if std == 0.0 {
            self.params = None;
            return Err(ScalerError::ZeroVariance);
        }
        self.params = Some((mean, std));
        Ok(())
    }

    fn transform(&self, x: &Array1<f64>) -> Result<Array1<f64>, ScalerError> {
        let (mean, std) = self.fitted()?;
        Ok(x.mapv(|v| (v - mean) / std))
    }

    fn inverse_transform(&self, x: &Array1<f64>) -> Result<Array1<f64>, ScalerError> {
        let (mean, std) = self.fitted()?;
        Ok(x.mapv(|v| v * std + mean))
    }
}
