//! # End-to-End Correction Tests
//!
//! Raw death counts -> life table -> indices -> estimates -> redistributed deaths ->
//! corrected life table.

use approx::assert_abs_diff_eq;
use ltcorrection::prelude::*;

/// 100 deaths in 5-year child classes, juvenile_i = 0.30, senility_i = 0.05.
fn five_year_data() -> DeathData {
    ltdf! {
        "a" => [5_u32, 5, 5, 5, 20, 20, 20],
        "Dx" => [10.0_f64, 15.0, 0.0, 25.0, 30.0, 17.5, 2.5],
    }
    .expect("valid death data")
}

/// 0 / 1-4 child classes, juvenile_i = 0.25, senility_i = 1/3.
fn one_four_year_data() -> DeathData {
    ltdf! {
        "a" => [1_u32, 4, 5, 5, 5, 20, 20, 20],
        "Dx" => [6.0_f64, 4.0, 8.0, 7.0, 15.0, 20.0, 20.0, 20.0],
    }
    .expect("valid death data")
}

fn kind<'a>(err: &'a (dyn std::error::Error + 'static)) -> Option<&'a CorrectionError> {
    err.downcast_ref::<CorrectionError>()
}

#[test]
fn test_five_year_path_end_to_end() {
    let lt = life_table().data(&five_year_data()).call().unwrap();

    let indices = lt_indices().lt(&lt).call().unwrap();
    assert_abs_diff_eq!(indices.juvenile_i, 0.30, epsilon = 1e-12);
    assert_abs_diff_eq!(indices.senility_i, 0.05, epsilon = 1e-12);

    let result = lt_correction().lt(&lt).call().unwrap();

    // e0 = 78.721 * log10(sqrt(1 / 0.30)) - 3.384 = 17.1967...
    let e0 = result.index(IndexName::E0);
    assert_abs_diff_eq!(e0.value, 17.197, epsilon = 1e-9);
    assert_abs_diff_eq!(e0.range_start, 15.694, epsilon = 1e-9);
    assert_abs_diff_eq!(e0.range_end, 18.7, epsilon = 1e-9);

    let q5_0 = 1.154 * (200.0_f64 * 0.30).log10().sqrt() - 1.014;
    let dx_sum_corrected = (100.0 - 10.0) / (1.0 - q5_0);
    let deaths = result.life_table.column("Dx").unwrap();
    assert_abs_diff_eq!(deaths[0], q5_0 * dx_sum_corrected, epsilon = 1e-9);
    assert_eq!(&deaths[1..], &[15.0, 0.0, 25.0, 30.0, 17.5, 2.5]);

    // The corrected table has more infant deaths, so a lower life expectancy
    assert!(result.life_table.e0().unwrap() < lt.e0().unwrap());
}

#[test]
fn test_one_and_four_year_path_end_to_end() {
    let data = one_four_year_data();
    let lt = life_table().data(&data).call().unwrap();
    let result = lt_correction().lt(&lt).call().unwrap();

    let juvenile_i = 0.25;
    let log_200j = (200.0_f64 * juvenile_i).log10();
    let q1_0 = 0.568 * log_200j.sqrt() - 0.438;
    let q5_0 = 1.154 * log_200j.sqrt() - 1.014;
    let dx_sum_corrected = (100.0 - 6.0) / (1.0 - q5_0);

    let deaths = result.life_table.column("Dx").unwrap();
    assert_abs_diff_eq!(deaths[0], q1_0 * dx_sum_corrected, epsilon = 1e-9);
    assert_abs_diff_eq!(deaths[0] + deaths[1], q5_0 * dx_sum_corrected, epsilon = 1e-9);
    assert_eq!(&deaths[2..], &[8.0, 7.0, 15.0, 20.0, 20.0, 20.0]);

    // The caller's table is untouched
    assert_eq!(lt.source.deaths().unwrap(), data.deaths().unwrap());
    assert_eq!(lt.column("Dx").unwrap()[0], 6.0);
}

#[test]
fn test_ranges_are_symmetric_fixed_offsets() {
    let lt = life_table().data(&one_four_year_data()).call().unwrap();
    let result = lt_correction().lt(&lt).call().unwrap();

    let widths: Vec<f64> = result
        .indices
        .iter()
        .map(|i| i.range_end - i.range_start)
        .collect();
    let expected = [3.006, 0.032, 0.082, 0.004, 0.012];
    for (width, expected) in widths.iter().zip(expected) {
        assert_abs_diff_eq!(*width, expected, epsilon = 1e-9);
    }
}

#[test]
fn test_unsupported_layouts() {
    for (a, dx) in [
        (vec![3_u32, 2, 5, 5, 20, 20, 20], vec![2.0, 3.0, 10.0, 15.0, 30.0, 30.0, 10.0]),
        (vec![2_u32, 3, 5, 5, 20, 20, 20], vec![2.0, 3.0, 10.0, 15.0, 30.0, 30.0, 10.0]),
        (vec![1_u32, 9, 5, 5, 20, 20, 20], vec![2.0, 3.0, 10.0, 15.0, 30.0, 30.0, 10.0]),
    ] {
        let data = DeathData::from_columns().a(a).dx(dx).call().unwrap();
        let lt = life_table().data(&data).call().unwrap();
        let err = lt_correction().lt(&lt).call().unwrap_err();
        assert!(
            matches!(kind(err.as_ref()), Some(CorrectionError::UnsupportedLayout { .. })),
            "unexpected error: {err}"
        );
    }
}

#[test]
fn test_zero_juvenile_ratio_is_domain_error() {
    let err = correction_indices()
        .juvenile_i(0.0)
        .senility_i(0.05)
        .call()
        .unwrap_err();
    assert!(matches!(kind(err.as_ref()), Some(CorrectionError::Domain { .. })));
}

#[test]
fn test_negative_five_year_count_is_domain_error() {
    // juvenile_i = 1/50 = 0.02, senility_i = 0.4: valid estimates, but 5q0 < 0
    let data = DeathData::from_columns()
        .a(vec![5, 5, 5, 5, 20, 20, 20])
        .dx(vec![10.0, 1.0, 0.0, 25.0, 30.0, 0.0, 20.0])
        .call()
        .unwrap();
    let lt = life_table().data(&data).call().unwrap();

    let estimates = correction_indices()
        .juvenile_i(0.02)
        .senility_i(0.4)
        .call()
        .unwrap();
    assert!(estimates.q5_0 < 0.0);

    let err = lt_correction().lt(&lt).call().unwrap_err();
    assert!(matches!(kind(err.as_ref()), Some(CorrectionError::Domain { .. })));
    let msg = err.to_string();
    assert!(msg.contains("age class 0-4"), "{msg}");
    assert!(msg.contains("0.0296"), "{msg}");
}

#[test]
fn test_one_and_four_year_window_between_thresholds() {
    // juvenile_i = 2/50 = 0.04, senility_i = 0.5: 0 < 5q0 < 1q0
    let one_four = DeathData::from_columns()
        .a(vec![1, 4, 5, 5, 5, 20, 20, 20])
        .dx(vec![3.0, 2.0, 1.0, 1.0, 5.0, 20.0, 5.0, 25.0])
        .call()
        .unwrap();
    let lt = life_table().data(&one_four).call().unwrap();

    let err = lt_correction().lt(&lt).call().unwrap_err();
    assert!(matches!(kind(err.as_ref()), Some(CorrectionError::Domain { .. })));
    let msg = err.to_string();
    assert!(msg.contains("age class 1-4"), "{msg}");
    assert!(msg.contains("0.0462"), "{msg}");

    // The same juvenility index is still correctable with a 5-year first class
    let five_year = DeathData::from_columns()
        .a(vec![5, 5, 5, 5, 20, 20, 20])
        .dx(vec![10.0, 1.0, 1.0, 25.0, 30.0, 0.0, 20.0])
        .call()
        .unwrap();
    let lt = life_table().data(&five_year).call().unwrap();
    let result = lt_correction().lt(&lt).call().unwrap();
    assert!(result.life_table.column("Dx").unwrap()[0] > 0.0);
}

#[test]
fn test_batch_matches_single_corrections() {
    let five = life_table().data(&five_year_data()).call().unwrap();
    let one_four = life_table().data(&one_four_year_data()).call().unwrap();
    let config = LifeTableConfig::builder()
        .agecorfac(vec![0.3, 0.4])
        .build()
        .unwrap();

    let output = lt_correction_input()
        .input(LifeTableInput::Collection(vec![
            ("five".to_string(), five.clone()),
            ("one_four".to_string(), one_four.clone()),
        ]))
        .config(&config)
        .call()
        .unwrap();

    let CorrectionOutput::Collection(results) = output else {
        panic!("expected a collection result");
    };
    assert_eq!(results.len(), 2);

    for ((name, batch), lt) in results.iter().zip([five, one_four]) {
        let single = lt_correction().lt(&lt).config(&config).call().unwrap();
        assert_eq!(batch.indices, single.indices, "{name}");
        assert_eq!(
            batch.life_table.column("ex").unwrap(),
            single.life_table.column("ex").unwrap()
        );
        assert_eq!(batch.life_table.config, config);
    }
}

#[test]
fn test_invalid_input_is_type_mismatch() {
    let err = lt_correction_input()
        .input(LifeTableInput::Invalid("a list of strings".to_string()))
        .call()
        .unwrap_err();
    assert!(matches!(kind(err.as_ref()), Some(CorrectionError::TypeMismatch { .. })));
    assert!(err.to_string().contains("a list of strings"));
}
