// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Classic HyperLogLog estimator for a 32-bit hash space.
//!
//! - small-range linear counting correction,
//! - large-range correction for 32-bit hashes.

const TWO_TO_32: f64 = 4_294_967_296.0;

/// Bias-correction constant for `m` registers.
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

/// Estimate the cardinality behind `registers`, of which `num_zeros` are empty.
pub(crate) fn estimate(registers: &[u8], num_zeros: u32) -> f64 {
    let m = registers.len() as f64;
    if num_zeros as usize == registers.len() {
        return 0.0;
    }

    let harmonic_sum = registers
        .iter()
        .map(|&register| 2_f64.powi(-(register as i32)))
        .sum::<f64>();
    let raw_estimate = alpha(registers.len()) * m * m / harmonic_sum;

    if raw_estimate <= 2.5 * m {
        if num_zeros > 0 {
            // Linear counting
            return m * (m / num_zeros as f64).ln();
        }
        return raw_estimate;
    }

    if raw_estimate <= TWO_TO_32 / 30.0 {
        raw_estimate
    } else {
        -TWO_TO_32 * (1.0 - raw_estimate / TWO_TO_32).ln()
    }
}
