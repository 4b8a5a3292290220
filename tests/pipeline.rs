use polars::prelude::*;

use ident_pressurekit::schema::{activity, metrics, need, region};
use ident_pressurekit::{run_age_pressure, run_district_pressure, PipelineConfig};

fn str_values(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap().to_string())
        .collect()
}

fn f64_value(df: &DataFrame, column: &str, idx: usize) -> Option<f64> {
    df.column(column).unwrap().f64().unwrap().get(idx)
}

#[test]
fn district_pressure_on_the_medchal_scenario() {
    // Three pincodes of one district, with the raw label artifacts the
    // source systems produce.
    let records = df!(
        region::STATE => ["westbengal ", "westbengal ", "westbengal "],
        region::DISTRICT => ["Medchal?malkajgiri", "Medchal?malkajgiri", "Medchal?malkajgiri"],
        region::PINCODE => ["500100", "500101", "500102"],
        activity::TOTAL_ENROLMENTS => [500.0, 0.0, 10.0],
        activity::DEMO_ACTIVITY => [0.0, 800.0, 5.0],
        activity::BIO_ACTIVITY => [0.0, 900.0, 5.0],
    )
    .unwrap();

    let report = run_district_pressure(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(report.regions.height(), 1);
    assert_eq!(str_values(&report.regions, region::STATE), vec!["West Bengal"]);
    assert_eq!(
        str_values(&report.regions, region::DISTRICT),
        vec!["Medchal-Malkajgiri"]
    );

    assert_eq!(
        f64_value(&report.regions, activity::TOTAL_ENROLMENTS, 0),
        Some(510.0)
    );
    assert_eq!(
        f64_value(&report.regions, activity::DEMO_ACTIVITY, 0),
        Some(805.0)
    );
    assert_eq!(
        f64_value(&report.regions, activity::BIO_ACTIVITY, 0),
        Some(905.0)
    );

    let ratio = f64_value(&report.regions, metrics::UPDATE_TO_ENROLMENT_RATIO, 0).unwrap();
    assert!((ratio - 1710.0 / 510.0).abs() < 1e-9);

    assert_eq!(report.volume_cutoff, Some(1000.0));

    // The single surviving district is its own 90th percentile, and its
    // biometric channel dominates.
    assert_eq!(report.heavy.height(), 1);
    assert_eq!(
        str_values(&report.heavy, metrics::DOMINANT_NEED),
        vec![need::BIO_HEAVY]
    );

    // Ratio well under the outlier cutoff: ranked among the states.
    assert_eq!(report.outliers.extreme.height(), 0);
    assert_eq!(
        str_values(&report.leading_states, region::STATE),
        vec!["West Bengal"]
    );
}

#[test]
fn zero_enrolment_regions_never_reach_ratio_rankings() {
    // "Ghost" district: plenty of update traffic, zero enrolments. Its
    // raw counts clear the volume filter but every enrolment-denominated
    // ratio is undefined.
    let records = df!(
        region::STATE => ["Alpha", "Alpha", "Beta"],
        region::DISTRICT => ["Ghost", "Ghost", "Solid"],
        activity::TOTAL_ENROLMENTS => [0.0, 0.0, 1000.0],
        activity::DEMO_ACTIVITY => [50.0, 30.0, 100.0],
        activity::BIO_ACTIVITY => [1500.0, 500.0, 100.0],
    )
    .unwrap();

    let report = run_district_pressure(&records, &PipelineConfig::default()).unwrap();

    // Both districts survive the volume filter; the ghost row keeps its
    // counters and its undefined ratio.
    assert_eq!(report.regions.height(), 2);
    let by_district = report
        .regions
        .sort([region::DISTRICT], SortMultipleOptions::default())
        .unwrap();
    assert_eq!(
        f64_value(&by_district, metrics::UPDATE_TO_ENROLMENT_RATIO, 0),
        None
    );

    // But no ranking ever shows it, no matter how large the raw counts.
    assert_eq!(str_values(&report.leading_states, region::STATE), vec!["Beta"]);
    for name in str_values(&report.outliers.extreme, region::DISTRICT) {
        assert_ne!(name, "Ghost");
    }
    // Undefined ratios are not extreme either; the row sits in `normal`.
    assert_eq!(report.outliers.normal.height() + report.outliers.extreme.height(), 2);
}

#[test]
fn extreme_outliers_leave_the_state_ranking() {
    // One anomalous district with a defined but absurd ratio, one sane
    // district in another state.
    let records = df!(
        region::STATE => ["Anom", "Sane"],
        region::DISTRICT => ["Spike", "Plain"],
        activity::TOTAL_ENROLMENTS => [10.0, 2000.0],
        activity::DEMO_ACTIVITY => [2000.0, 500.0],
        activity::BIO_ACTIVITY => [1000.0, 500.0],
    )
    .unwrap();

    let report = run_district_pressure(&records, &PipelineConfig::default()).unwrap();

    // Spike: 3000 / 10 = 300 > 150 -> extreme, reported separately.
    assert_eq!(report.outliers.extreme.height(), 1);
    assert_eq!(
        str_values(&report.top_outliers, region::DISTRICT),
        vec!["Spike"]
    );
    // The state ranking is computed over the normal partition only.
    assert_eq!(str_values(&report.leading_states, region::STATE), vec!["Sane"]);
}

#[test]
fn empty_tables_flow_through_every_stage() {
    let records = df!(
        region::STATE => ["Alpha"],
        region::DISTRICT => ["Tiny"],
        activity::TOTAL_ENROLMENTS => [10.0],
        activity::DEMO_ACTIVITY => [5.0],
        activity::BIO_ACTIVITY => [5.0],
    )
    .unwrap();

    // Nothing clears the default volume threshold.
    let report = run_district_pressure(&records, &PipelineConfig::default()).unwrap();
    assert_eq!(report.regions.height(), 0);
    assert_eq!(report.heavy.height(), 0);
    assert_eq!(report.heavy_cutoff, None);
    assert_eq!(report.top_outliers.height(), 0);
    assert_eq!(report.leading_states.height(), 0);
}

#[test]
fn age_pressure_merges_channels_and_ranks_by_share() {
    let demo = df!(
        region::STATE => ["Alpha", "Alpha", "Alpha", "Alpha"],
        region::DISTRICT => ["AdultTown", "KidVille", "Mid", "Sparse"],
        activity::DEMO_AGE_5_17 => [5.0, 400.0, 100.0, 1.0],
        activity::DEMO_AGE_17_PLUS => [495.0, 100.0, 100.0, 1.0],
    )
    .unwrap();
    // Sparse has no bio records at all; zero-fill keeps it in the table.
    let bio = df!(
        region::STATE => ["Alpha", "Alpha", "Alpha"],
        region::DISTRICT => ["AdultTown", "KidVille", "Mid"],
        activity::BIO_AGE_5_17 => [0.0, 300.0, 100.0],
        activity::BIO_AGE_17_PLUS => [500.0, 200.0, 100.0],
    )
    .unwrap();

    let cfg = PipelineConfig {
        volume_quantile: 0.0, // keep everything with any activity
        ..Default::default()
    };
    let report = run_age_pressure(&demo, &bio, &cfg).unwrap();

    assert_eq!(report.regions.height(), 4);
    let adult_first = str_values(&report.adult_heavy, region::DISTRICT);
    assert_eq!(adult_first.first().map(String::as_str), Some("AdultTown"));
    let child_first = str_values(&report.child_heavy, region::DISTRICT);
    assert_eq!(child_first.first().map(String::as_str), Some("KidVille"));

    // AdultTown: (495 + 500) / 1500
    let regions = report
        .regions
        .sort([region::DISTRICT], SortMultipleOptions::default())
        .unwrap();
    let share = f64_value(&regions, metrics::AGE_17_PLUS_SHARE, 0).unwrap();
    assert!((share - 995.0 / 1500.0).abs() < 1e-9);

    assert!(report.median_share.is_some());
}

#[test]
fn config_deserializes_from_partial_toml() {
    let cfg: PipelineConfig = toml::from_str(
        r#"
        volume_threshold = 500.0

        [state_aliases]
        "Orissa" = "Odisha"
        "#,
    )
    .unwrap();

    assert_eq!(cfg.volume_threshold, 500.0);
    // untouched fields keep their defaults
    assert_eq!(cfg.heavy_quantile, 0.90);
    assert_eq!(cfg.state_aliases.canonical("Orissa"), Some("Odisha"));
    assert!(cfg.validate().is_ok());
}
