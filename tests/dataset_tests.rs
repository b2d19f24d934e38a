mod support;

use ror_uta::adapter::dataset::{read_dataset, write_dataset};
use ror_uta::app::RorParameters;
use ror_uta::domain::{CriterionType, PreferenceKind};
use ror_uta::error::{DatasetError, Error};

use support::{write_file, CARS, CONTRADICTORY};

#[test]
fn dataset_file_is_read_with_parameters() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "cars.txt", CARS);

    let loaded = read_dataset(&path).unwrap();
    let dataset = &loaded.dataset;
    assert_eq!(dataset.alternatives(), ["b01", "b02", "b03"]);
    assert_eq!(dataset.criteria()[0].kind, CriterionType::Gain);
    assert_eq!(dataset.criteria()[1].kind, CriterionType::Cost);
    assert_eq!(dataset.raw_value(1, 1), 5.0);
    assert_eq!(dataset.preferences()[0].kind, PreferenceKind::Preference);
    assert_eq!(dataset.eps(), 0.01);
    assert_eq!(loaded.parameters.eps, Some(0.01));
    assert_eq!(loaded.parameters.precision, None);
}

#[test]
fn semicolon_separated_dataset_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "cars.csv", CONTRADICTORY);

    let loaded = read_dataset(&path).unwrap();
    assert_eq!(loaded.dataset.criteria().len(), 2);
    assert_eq!(loaded.dataset.preferences().len(), 2);
}

#[test]
fn written_dataset_reads_back_identically() {
    let dir = tempfile::tempdir().unwrap();
    let source = read_dataset(write_file(dir.path(), "cars.txt", CARS)).unwrap();

    let mut parameters = source.parameters.clone();
    parameters.set("results_aggregator", "BordaResultAggregator").unwrap();
    let target = dir.path().join("copy.txt");
    write_dataset(&target, &source.dataset, &parameters).unwrap();

    let copy = read_dataset(&target).unwrap();
    assert_eq!(copy.dataset, source.dataset);
    assert_eq!(copy.parameters, parameters);
}

#[test]
fn missing_file_is_a_dataset_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_dataset(dir.path().join("absent.txt")).unwrap_err();
    assert!(matches!(err, Error::Dataset(DatasetError::ReadFile(_))));
}

#[test]
fn unknown_alternative_in_preferences_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let text = CARS.replace("b03,b02,preference", "b09,b02,preference");
    let err = read_dataset(write_file(dir.path(), "bad.txt", &text)).unwrap_err();
    assert!(err.to_string().contains("b09"), "{err}");
}

#[test]
fn invalid_parameter_value_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let text = format!("{CARS}precision=11\n");
    let err = read_dataset(write_file(dir.path(), "bad.txt", &text)).unwrap_err();
    assert!(err.to_string().contains("PRECISION"), "{err}");

    let mut parameters = RorParameters::new();
    assert!(parameters.set("number_of_alpha_values", "0").is_err());
}
