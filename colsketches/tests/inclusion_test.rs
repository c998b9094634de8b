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

use colsketches::ErrorKind;
use colsketches::inclusion::InclusionEstimator;
use googletest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

fn range_column(start: u32, end: u32) -> Vec<String> {
    (start..end).map(|i| i.to_string()).collect()
}

fn estimator_with_seed(seed: u32) -> InclusionEstimator {
    InclusionEstimator::builder().seed(seed).build()
}

#[gtest]
fn test_small_partial_overlap() {
    // Exact inclusion of X in Y is 2 / 4. With 16 buckets most buckets are
    // empty in both digests, which biases small columns upwards.
    let x = ["a", "b", "c", "d"];
    let y = ["c", "d", "e", "f"];
    for seed in 0..32 {
        let phi = estimator_with_seed(seed).estimate_inclusion(&x, &y).unwrap();
        expect_that!(phi, all![ge(0.0), le(1.0)]);
        expect_that!(phi, near(0.5, 0.45));
    }

    let phi = InclusionEstimator::default()
        .estimate_inclusion(&x, &y)
        .unwrap();
    expect_that!(phi, near(0.78125, 1e-9));
}

#[gtest]
fn test_repeated_single_value() {
    let estimator = InclusionEstimator::default();
    let x = ["a", "a", "a"];
    let y = ["a"];

    let details = estimator.estimate_with_details(&x, &y).unwrap();
    expect_that!(details.n_x, near(1.0, 0.01));
    expect_that!(details.n_y, near(1.0, 0.01));
    expect_that!(details.agreement, eq(1.0));
    expect_that!(details.phi(), near(1.0, 0.02));

    let phi = estimator.estimate_inclusion(&y, &x).unwrap();
    expect_that!(phi, near(1.0, 0.02));
}

#[gtest]
fn test_identical_columns() {
    let x = range_column(0, 1_000);
    for seed in [9001, 1, 2, 3] {
        let phi = estimator_with_seed(seed).estimate_inclusion(&x, &x).unwrap();
        expect_that!(phi, all![ge(0.98), le(1.0)]);
    }
}

#[gtest]
fn test_half_overlap() {
    let x = range_column(0, 1_000);
    let y = range_column(500, 1_500);
    for seed in [9001, 0, 1, 2, 3, 4, 5, 6, 7] {
        let phi = estimator_with_seed(seed).estimate_inclusion(&x, &y).unwrap();
        expect_that!(phi, near(0.5, 0.1), "seed={seed}");
    }
}

#[gtest]
fn test_disjoint_columns() {
    let x = range_column(0, 1_000);
    let y = range_column(5_000, 6_000);
    for seed in [9001, 0, 1, 2, 3, 4, 5, 6, 7] {
        match estimator_with_seed(seed).estimate_inclusion(&x, &y) {
            Ok(phi) => expect_that!(phi, all![ge(0.0), le(0.1)], "seed={seed}"),
            // Sketch noise can put P below the model's floor at n_tau = 0.
            Err(err) => expect_that!(err.kind(), eq(ErrorKind::NonConvergence)),
        }
    }
}

#[gtest]
fn test_inclusion_is_directional() {
    let large = range_column(0, 1_000);
    let small = range_column(0, 300);
    for seed in [9001, 1, 2, 3] {
        let estimator = estimator_with_seed(seed);

        let phi = estimator.estimate_inclusion(&small, &large).unwrap();
        expect_that!(phi, all![ge(0.9), le(1.0)]);

        // The agreement ratio lies above the model's value at n_tau = n_y,
        // so the search stalls against the upper bound |Y| / |X|.
        let err = estimator.estimate_inclusion(&large, &small).unwrap_err();
        expect_that!(err.kind(), eq(ErrorKind::NonConvergence));
        expect_that!(err.message(), eq("search interval collapsed"));
        let phi: f64 = err.context_value("phi").unwrap().parse().unwrap();
        expect_that!(phi, near(small.len() as f64 / large.len() as f64, 0.02));
    }
}

#[gtest]
fn test_details_are_consistent() {
    let x = range_column(0, 1_000);
    let y = range_column(500, 1_500);
    let details = InclusionEstimator::default()
        .estimate_with_details(&x, &y)
        .unwrap();

    expect_that!(details.n_x, near(1_000.0, 100.0));
    expect_that!(details.n_y, near(1_000.0, 100.0));
    expect_that!(details.params.m, eq(9u8));
    expect_that!(details.params.k, eq(23u8));
    expect_that!(details.agreement, all![ge(0.0), le(1.0)]);
    expect_that!(
        details.outcome.n_tau / details.n_x,
        near(details.phi(), 1e-12)
    );
    expect_that!(
        details.outcome.prob,
        near(details.agreement, InclusionEstimator::default().lookup().tolerance())
    );
}

#[gtest]
fn test_estimate_from_reused_parts() {
    let estimator = InclusionEstimator::default();
    let sketcher = estimator.sketcher();
    let x = range_column(0, 1_000);
    let y = range_column(500, 1_500);

    let n_x = sketcher.estimate_distinct(&x);
    let n_y = sketcher.estimate_distinct(&y);
    let m = colsketches::inclusion::choose_bucket_exponent(n_x, n_y);
    let s_x = sketcher.build_sketch(&x, m);
    let s_y = sketcher.build_sketch(&y, m);

    let from_parts = estimator.estimate_from_parts(&s_x, &s_y, n_x, n_y).unwrap();
    let direct = estimator.estimate_with_details(&x, &y).unwrap();
    assert_eq!(from_parts, direct);

    let other = sketcher.build_sketch(&y, m + 1);
    let err = estimator
        .estimate_from_parts(&s_x, &other, n_x, n_y)
        .unwrap_err();
    expect_that!(err.kind(), eq(ErrorKind::SketchMismatch));
}

#[gtest]
fn test_empty_columns_are_rejected() {
    let estimator = InclusionEstimator::default();
    let empty: Vec<String> = vec![];
    let x = range_column(0, 10);

    let err = estimator.estimate_inclusion(&empty, &x).unwrap_err();
    expect_that!(err.kind(), eq(ErrorKind::DegenerateInput));
    let err = estimator.estimate_inclusion(&x, &empty).unwrap_err();
    expect_that!(err.kind(), eq(ErrorKind::DegenerateInput));

    let err = estimator.estimate_inclusion(&empty, &empty).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"DegenerateInput, context: { n_x: 0, n_y: 0 } => both columns need a positive distinct count"
    );
}

#[gtest]
fn test_order_and_duplicates_do_not_matter() {
    let estimator = InclusionEstimator::default();
    let x = range_column(0, 800);
    let y = range_column(200, 1_200);
    let expected = estimator.estimate_with_details(&x, &y).unwrap();

    let mut rng = StdRng::seed_from_u64(42);
    let mut shuffled = x.clone();
    shuffled.extend(x.iter().take(300).cloned());
    shuffled.shuffle(&mut rng);

    let actual = estimator.estimate_with_details(&shuffled, &y).unwrap();
    assert_eq!(actual, expected);
}

#[gtest]
fn test_parallel_comparisons_match_sequential() {
    let estimator = InclusionEstimator::default();
    let columns: Vec<Vec<String>> = (0..4)
        .map(|i| range_column(i * 250, i * 250 + 1_000))
        .collect();
    let pairs: Vec<(usize, usize)> = (0..columns.len())
        .flat_map(|i| (0..columns.len()).map(move |j| (i, j)))
        .filter(|(i, j)| i != j)
        .collect();

    let sequential: Vec<_> = pairs
        .iter()
        .map(|&(i, j)| {
            estimator
                .estimate_inclusion(&columns[i], &columns[j])
                .map_err(|err| err.kind())
        })
        .collect();

    let parallel: Vec<_> = std::thread::scope(|scope| {
        let handles: Vec<_> = pairs
            .iter()
            .map(|&(i, j)| {
                let columns = &columns;
                scope.spawn(move || {
                    estimator
                        .estimate_inclusion(&columns[i], &columns[j])
                        .map_err(|err| err.kind())
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    assert_eq!(sequential, parallel);
}
