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

/// Computes the gradient of the cost with respect to a line's weight and
/// bias. Inputs are assumed to be validated and of equal, non-zero length.
pub trait Optimizer {
    fn compute_gradients(
        &self,
        x: &Array1<f64>,
        y: &Array1<f64>,
        weight: f64,
        bias: f64,
    ) -> (f64, f64);
}

/// Mean gradient over the whole sample, no shuffling.
pub struct BatchGradientDescent;

impl Optimizer for BatchGradientDescent {
    fn compute_gradients(
        &self,
        x: &Array1<f64>,
        y: &Array1<f64>,
        weight: f64,
        bias: f64,
    ) -> (f64, f64) {
        let n = y.len() as f64;
        let errors = x.mapv(|v| weight * v + bias) - y;
        let grad_weight = (&errors * x).sum() / n;
        let grad_bias = errors.sum() / n;
        (grad_weight, grad_bias)
    }
}
