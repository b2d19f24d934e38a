#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use ror_uta::domain::{AlphaValue, AlphaValues, RorResult};

/// Three cars, two criteria, one strict preference.
pub const CARS: &str = "\
#Data
alternative id,MaxSpeed[g],FuelCons[c]
b01,180,7.5
b02,150,5.0
b03,165,6.0
#Preferences
b03,b02,preference
#Parameters
eps=0.01
";

/// Same data with preferences that contradict each other.
pub const CONTRADICTORY: &str = "\
#Data
alternative id;MaxSpeed[g];FuelCons[c]
b01;180;7.5
b02;150;5.0
b03;165;6.0
#Preferences
b01;b02;preference
b02;b01;preference
";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write test file");
    path
}

/// a1, a2, a3 with R/Q/S distances `[1, 2, 3]`, `[0, 1, 2]`, `[2, 1, 2]`,
/// keyed by alpha 0.5, 0.0 and 1.0.
pub fn rqs_result(alpha_values: AlphaValues) -> RorResult {
    let mut result = RorResult::new(vec!["a1".into(), "a2".into(), "a3".into()], alpha_values);
    let rows = [
        ("a1", [1.0, 2.0, 3.0]),
        ("a2", [0.0, 1.0, 2.0]),
        ("a3", [2.0, 1.0, 2.0]),
    ];
    let keys = [0.5, 0.0, 1.0].map(AlphaValue::key_for);
    for (alternative, values) in rows {
        for (key, value) in keys.iter().zip(values) {
            result.add_result(alternative, key, value);
        }
    }
    result
}

pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
