//! Dataset text writer.

use std::fmt::Write as _;
use std::path::Path;

use crate::adapter::dataset::{
    ALTERNATIVE_COLUMN, DATA_SECTION, PARAMETERS_SECTION, PREFERENCES_SECTION,
};
use crate::app::config::RorParameters;
use crate::domain::dataset::{Dataset, DEFAULT_BIG_M, DEFAULT_EPS};
use crate::error::Result;

/// Write `dataset` and the explicitly set `parameters` to `path`.
#[allow(clippy::result_large_err)]
pub fn write_dataset<P: AsRef<Path>>(
    path: P,
    dataset: &Dataset,
    parameters: &RorParameters,
) -> Result<()> {
    std::fs::write(path, format_dataset(dataset, parameters))?;
    Ok(())
}

/// Render the dataset text format.
///
/// Values are written in input orientation (cost columns as given). Only
/// parameters set in `parameters` are written, plus the dataset's own `eps`
/// and `M` when they differ from the defaults and no parameter overrides them.
pub fn format_dataset(dataset: &Dataset, parameters: &RorParameters) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{DATA_SECTION}");
    let header: Vec<String> = std::iter::once(ALTERNATIVE_COLUMN.to_string())
        .chain(
            dataset
                .criteria()
                .iter()
                .map(|c| format!("{}[{}]", c.name, c.kind.marker())),
        )
        .collect();
    let _ = writeln!(out, "{}", header.join(","));
    for (i, alternative) in dataset.alternatives().iter().enumerate() {
        let mut row = vec![alternative.clone()];
        row.extend((0..dataset.criteria().len()).map(|c| dataset.raw_value(i, c).to_string()));
        let _ = writeln!(out, "{}", row.join(","));
    }

    let _ = writeln!(out, "{PREFERENCES_SECTION}");
    for relation in dataset.preferences() {
        let _ = writeln!(
            out,
            "{},{},{}",
            relation.alternative_1, relation.alternative_2, relation.kind
        );
    }
    for relation in dataset.intensities() {
        let _ = writeln!(out, "{},{}", relation.alternatives().join(","), relation.kind);
    }

    let mut explicit = parameters.clone();
    if explicit.eps.is_none() && dataset.eps() != DEFAULT_EPS {
        explicit.eps = Some(dataset.eps());
    }
    if explicit.big_m.is_none() && dataset.big_m() != DEFAULT_BIG_M {
        explicit.big_m = Some(dataset.big_m());
    }
    let _ = writeln!(out, "{PARAMETERS_SECTION}");
    for (parameter, value) in explicit.explicit() {
        let _ = writeln!(out, "{}={value}", parameter.key().to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::dataset::parse_dataset;
    use crate::domain::dataset::{Criterion, IntensityRelation, PreferenceKind, PreferenceRelation};

    fn dataset() -> Dataset {
        Dataset::new(
            vec!["b01".into(), "b02".into(), "b03".into()],
            vec![Criterion::gain("MaxSpeed"), Criterion::cost("FuelCons")],
            vec![vec![90.0, 3.0], vec![70.0, 2.5], vec![80.0, 4.0]],
        )
        .unwrap()
        .with_preferences(vec![PreferenceRelation::new(
            "b01",
            "b02",
            PreferenceKind::Indifference,
        )])
        .unwrap()
        .with_intensities(vec![IntensityRelation::new(
            ["b03", "b02", "b01", "b02"],
            PreferenceKind::Preference,
        )])
        .unwrap()
        .with_eps(0.01)
    }

    #[test]
    fn test_format() {
        let mut parameters = RorParameters::new();
        parameters.set("INITIAL_ALPHA", "0.01").unwrap();
        let text = format_dataset(&dataset(), &parameters);
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines.contains(&"#Data"));
        assert!(lines.contains(&"alternative id,MaxSpeed[g],FuelCons[c]"));
        assert!(lines.contains(&"b02,70,2.5"));
        assert!(lines.contains(&"b01,b02,indifference"));
        assert!(lines.contains(&"b03,b02,b01,b02,preference"));
        assert!(lines.contains(&"initial_alpha=0.01"));
        assert!(lines.contains(&"eps=0.01"));
        assert!(!text.contains("precision"));
    }

    #[test]
    fn test_format_then_parse() {
        let original = dataset();
        let loaded = parse_dataset(&format_dataset(&original, &RorParameters::new())).unwrap();
        assert_eq!(loaded.dataset, original);
    }
}
