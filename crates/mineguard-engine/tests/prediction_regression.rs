//! End-to-end regression tests: JSON artifact -> classification -> metrics.

use mineguard_engine::{
    evaluate_predictions, Class, ClassifyError, ConfusionMatrix, Ensemble, FeatureError,
};
use serde_json::json;

/// A realistic small artifact: two proper trees splitting on the raw value
/// and on the type code, with exporter-style metadata and sentinels.
fn two_tree_artifact() -> Vec<u8> {
    let artifact = json!({
        "model_type": "RandomForestClassifier",
        "n_estimators": 2,
        "n_classes": 2,
        "n_features": 2,
        "classes": [0, 1],
        "trees": [
            [
                { "id": 0, "feature": 0, "threshold": 100.0,
                  "left_child": 1, "right_child": 2, "value": [[60.0, 40.0]] },
                { "id": 1, "feature": -1, "threshold": null,
                  "left_child": null, "right_child": null, "value": [[55.0, 5.0]] },
                { "id": 2, "feature": -1, "threshold": null,
                  "left_child": null, "right_child": null, "value": [[5.0, 35.0]] }
            ],
            [
                { "id": 0, "feature": 1, "threshold": 1.5,
                  "left_child": 1, "right_child": 2, "value": [[50.0, 50.0]] },
                { "id": 1, "feature": -1, "threshold": null,
                  "left_child": null, "right_child": null, "value": [[10.0, 40.0]] },
                { "id": 2, "feature": -1, "threshold": null,
                  "left_child": null, "right_child": null, "value": [[45.0, 5.0]] }
            ]
        ]
    });
    serde_json::to_vec(&artifact).unwrap()
}

#[test]
fn low_co_reading_classifies_as_normal() {
    let ensemble = Ensemble::from_json(&two_tree_artifact()).unwrap();

    // mq7 code 1: tree 1 routes value<=100 to (0.9167, 0.0833)-ish leaf,
    // tree 2 routes code<=1.5 to (0.2, 0.8). Averaged risk stays below 0.5.
    let result = ensemble.classify(50.0, "mq7", None).unwrap();
    assert_eq!(result.trees_used, 2);

    let tree1_risk = 5.0 / 60.0;
    let tree2_risk = 40.0 / 50.0;
    let expected = (tree1_risk + tree2_risk) / 2.0;
    assert!((result.probability_risk - expected).abs() < 1e-9);
    assert_eq!(result.predicted_class, Class::Normal);
}

#[test]
fn high_co_reading_classifies_as_risk() {
    let ensemble = Ensemble::from_json(&two_tree_artifact()).unwrap();

    let result = ensemble.classify(520.0, "mq7", None).unwrap();
    let tree1_risk = 35.0 / 40.0;
    let tree2_risk = 40.0 / 50.0;
    let expected = (tree1_risk + tree2_risk) / 2.0;
    assert!((result.probability_risk - expected).abs() < 1e-9);
    assert_eq!(result.predicted_class, Class::Risk);
}

#[test]
fn probabilities_are_complementary() {
    let ensemble = Ensemble::from_json(&two_tree_artifact()).unwrap();
    for value in [0.0, 37.5, 99.9, 100.0, 100.1, 520.0] {
        for sensor in ["mq7", "pulse", "body_temp", "ax", "ay"] {
            let result = ensemble.classify(value, sensor, None).unwrap();
            assert!(
                (result.probability_risk + result.probability_normal - 1.0).abs() < 1e-9,
                "probabilities for {sensor}@{value} do not sum to 1"
            );
        }
    }
}

#[test]
fn repeated_classification_is_bit_identical() {
    let ensemble = Ensemble::from_json(&two_tree_artifact()).unwrap();
    let first = ensemble.classify(77.7, "pulse", None).unwrap();
    let second = ensemble.classify(77.7, "pulse", None).unwrap();
    assert_eq!(first.probability_risk.to_bits(), second.probability_risk.to_bits());
    assert_eq!(
        first.probability_normal.to_bits(),
        second.probability_normal.to_bits()
    );
}

#[test]
fn threshold_boundary_routes_inclusively_left() {
    let artifact = json!({
        "trees": [[
            { "feature": 0, "threshold": 50.0, "left_child": 1, "right_child": 2 },
            { "left_child": -1, "right_child": -1, "value": [10.0, 0.0] },
            { "left_child": -1, "right_child": -1, "value": [0.0, 10.0] }
        ]]
    });
    let ensemble = Ensemble::from_json(&serde_json::to_vec(&artifact).unwrap()).unwrap();

    let below = ensemble.classify(49.9, "mq7", None).unwrap();
    assert_eq!(below.predicted_class, Class::Normal);

    let on = ensemble.classify(50.0, "mq7", None).unwrap();
    assert_eq!(on.predicted_class, Class::Normal);
    assert!((on.probability_risk - 0.0).abs() < 1e-12);

    let above = ensemble.classify(50.1, "mq7", None).unwrap();
    assert_eq!(above.predicted_class, Class::Risk);
}

#[test]
fn cyclic_tree_is_skipped_and_the_rest_vote() {
    // Three trees; the middle one is a two-node cycle and must be omitted.
    let artifact = json!({
        "trees": [
            [{ "left_child": null, "right_child": null, "value": [3.0, 7.0] }],
            [
                { "feature": 0, "threshold": 10.0, "left_child": 1, "right_child": 1 },
                { "feature": 0, "threshold": 10.0, "left_child": 0, "right_child": 0 }
            ],
            [{ "left_child": null, "right_child": null, "value": [3.0, 7.0] }]
        ]
    });
    let ensemble = Ensemble::from_json(&serde_json::to_vec(&artifact).unwrap()).unwrap();
    let result = ensemble.classify(5.0, "mq7", None).unwrap();
    assert_eq!(result.trees_used, 2);
    assert!((result.probability_risk - 0.7).abs() < 1e-9);
    assert_eq!(result.predicted_class, Class::Risk);
}

#[test]
fn fully_corrupt_model_fails_each_prediction_but_loads() {
    let artifact = json!({
        "trees": [[
            { "feature": 0, "threshold": 10.0, "left_child": 0, "right_child": 0 }
        ]]
    });
    let ensemble = Ensemble::from_json(&serde_json::to_vec(&artifact).unwrap()).unwrap();
    let err = ensemble.classify(5.0, "mq7", None).unwrap_err();
    assert!(matches!(err, ClassifyError::Aggregation(_)));
}

#[test]
fn unknown_sensor_never_reaches_the_trees() {
    let ensemble = Ensemble::from_json(&two_tree_artifact()).unwrap();
    let err = ensemble.classify(5.0, "co2", None).unwrap_err();
    assert!(matches!(
        err,
        ClassifyError::Feature(FeatureError::UnknownSensor { .. })
    ));
}

#[test]
fn evaluation_over_a_labelled_batch() {
    let ensemble = Ensemble::from_json(&two_tree_artifact()).unwrap();

    // Readings engineered so the model is right three times out of four.
    let batch = [
        (520.0, Class::Risk),
        (400.0, Class::Risk),
        (50.0, Class::Normal),
        (30.0, Class::Risk),
    ];

    let pairs: Vec<(Class, Class)> = batch
        .iter()
        .map(|&(value, label)| {
            let prediction = ensemble.classify(value, "mq7", None).unwrap();
            (prediction.predicted_class, label)
        })
        .collect();

    let cm = ConfusionMatrix::from_pairs(&pairs);
    assert_eq!(cm.total(), 4);
    assert_eq!(cm.true_positives(), 2);
    assert_eq!(cm.true_negatives(), 1);
    assert_eq!(cm.false_negatives(), 1);

    let metrics = evaluate_predictions(&pairs);
    assert!((metrics.accuracy - 75.0).abs() < 1e-9);
    assert!((metrics.precision - 100.0).abs() < 1e-9);
    assert!((metrics.recall - (2.0 / 3.0 * 100.0)).abs() < 1e-9);
}
