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

use crate::data::DataError;

#[derive(Error, Debug)]
pub enum LossError {
    #[error("Input arrays are empty")]
    EmptyInput,

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Input contains NaN or infinite values")]
    InvalidNumericValue,
}

#[derive(Error, Debug, PartialEq)]
pub enum ScalerError {
    #[error("Input array is empty")]
    EmptyInput,

    #[error("Data issue: Zero variance")]
    ZeroVariance,

    #[error("Scaler not fitted")]
    NotFitted,
}

/// Failures of a training call.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Input columns must have the same length (x has {x_len}, y has {y_len})")]
    DataLengthMismatch { x_len: usize, y_len: usize },

    #[error("Input columns are empty")]
    EmptyInput,

    #[error("Input contains NaN values. Please clean the data.")]
    InvalidNumericValue,

    #[error("Data issue: Zero variance in {0}")]
    ZeroVariance(&'static str),

    #[error("Model has not been fitted")]
    NotFitted,

    #[error("Loss error: {0}")]
    Loss(#[from] LossError),

    #[error("Scaler error: {0}")]
    Scaler(#[from] ScalerError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),
}
