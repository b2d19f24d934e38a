//! Sectioned dataset text reader.

use std::path::Path;

use tracing::{debug, warn};

use crate::adapter::dataset::{DATA_SECTION, PARAMETERS_SECTION, PREFERENCES_SECTION, SEPARATORS};
use crate::app::config::RorParameters;
use crate::domain::dataset::{
    Criterion, CriterionType, Dataset, IntensityRelation, PreferenceKind, PreferenceRelation,
};
use crate::error::{DatasetError, Result};

/// A dataset together with the parameters found in its `#Parameters` section.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    /// Only the keys present in the file.
    pub parameters: RorParameters,
}

/// One non-empty line and its 1-based number.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    number: usize,
    text: &'a str,
}

#[derive(Default)]
struct Sections<'a> {
    data: Option<Vec<Line<'a>>>,
    preferences: Vec<Line<'a>>,
    parameters: Vec<Line<'a>>,
}

/// Read and parse a dataset file.
#[allow(clippy::result_large_err)]
pub fn read_dataset<P: AsRef<Path>>(path: P) -> Result<LoadedDataset> {
    let content = std::fs::read_to_string(path).map_err(DatasetError::ReadFile)?;
    parse_dataset(&content)
}

/// Parse dataset text.
///
/// The dataset's `eps` and `M` come from the `#Parameters` section or the
/// defaults.
#[allow(clippy::result_large_err)]
pub fn parse_dataset(content: &str) -> Result<LoadedDataset> {
    let sections = split_sections(content);
    let data = sections.data.ok_or(DatasetError::MissingSection {
        section: DATA_SECTION,
    })?;
    let (header, rows) = data.split_first().ok_or(DatasetError::MissingSection {
        section: DATA_SECTION,
    })?;

    let separator = detect_separator(header)?;
    let criteria = parse_header(header, separator)?;
    let mut alternatives = Vec::with_capacity(rows.len());
    let mut values = Vec::with_capacity(rows.len());
    for row in rows {
        let (alternative, row_values) = parse_row(row, separator, criteria.len())?;
        alternatives.push(alternative);
        values.push(row_values);
    }

    let mut preferences = Vec::new();
    let mut intensities = Vec::new();
    for line in &sections.preferences {
        match parse_relation(line, separator)? {
            Relation::Pair(relation) => preferences.push(relation),
            Relation::Intensity(relation) => intensities.push(relation),
        }
    }

    let mut parameters = RorParameters::new();
    for line in &sections.parameters {
        let (key, value) = line.text.split_once('=').ok_or_else(|| DatasetError::Malformed {
            line: line.number,
            reason: format!("'{}' is not a key=value pair", line.text),
        })?;
        parameters.set(key.trim(), value.trim())?;
    }

    debug!(
        alternatives = alternatives.len(),
        criteria = criteria.len(),
        preferences = preferences.len(),
        intensities = intensities.len(),
        "Dataset parsed"
    );

    let dataset = Dataset::new(alternatives, criteria, values)?
        .with_preferences(preferences)?
        .with_intensities(intensities)?
        .with_eps(parameters.eps())
        .with_big_m(parameters.big_m());
    Ok(LoadedDataset {
        dataset,
        parameters,
    })
}

fn split_sections(content: &str) -> Sections<'_> {
    let mut sections = Sections::default();
    let mut current: Option<&str> = None;
    for (index, raw) in content.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }
        if text.starts_with('#') {
            current = Some(text);
            if text.eq_ignore_ascii_case(DATA_SECTION) && sections.data.is_none() {
                sections.data = Some(Vec::new());
            }
            continue;
        }
        let line = Line {
            number: index + 1,
            text,
        };
        match current {
            Some(section) if section.eq_ignore_ascii_case(DATA_SECTION) => {
                sections.data.get_or_insert_with(Vec::new).push(line)
            }
            Some(section) if section.eq_ignore_ascii_case(PREFERENCES_SECTION) => {
                sections.preferences.push(line)
            }
            Some(section) if section.eq_ignore_ascii_case(PARAMETERS_SECTION) => {
                sections.parameters.push(line)
            }
            Some(section) => warn!(line = line.number, section, "Skipping line in unknown section"),
            None => warn!(line = line.number, "Skipping line outside of any section"),
        }
    }
    sections
}

/// `,` when the header has one, else `;`.
fn detect_separator(header: &Line<'_>) -> std::result::Result<char, DatasetError> {
    SEPARATORS
        .into_iter()
        .find(|separator| header.text.contains(*separator))
        .ok_or_else(|| DatasetError::Malformed {
            line: header.number,
            reason: "no column separator found, expected ',' or ';'".into(),
        })
}

/// `id,name[g],name[c]`: the first column labels the alternatives.
fn parse_header(header: &Line<'_>, separator: char) -> std::result::Result<Vec<Criterion>, DatasetError> {
    let criteria: Vec<Criterion> = header
        .text
        .split(separator)
        .skip(1)
        .map(|column| parse_criterion(column.trim()))
        .collect::<std::result::Result<_, _>>()?;
    if criteria.is_empty() {
        return Err(DatasetError::Malformed {
            line: header.number,
            reason: "header has no criteria".into(),
        });
    }
    Ok(criteria)
}

fn parse_criterion(column: &str) -> std::result::Result<Criterion, DatasetError> {
    let invalid = |reason: &str| DatasetError::InvalidCriterion {
        criterion: column.to_string(),
        reason: reason.to_string(),
    };
    let (name, rest) = column
        .split_once('[')
        .ok_or_else(|| invalid("expected name[g] or name[c]"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("criterion name is empty"));
    }
    let marker = rest
        .strip_suffix(']')
        .map(str::trim)
        .ok_or_else(|| invalid("missing closing ']'"))?;
    let mut chars = marker.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(marker), None) => CriterionType::from_marker(marker),
        _ => None,
    }
    .ok_or_else(|| invalid("type must be 'g' (gain) or 'c' (cost)"))?;
    Ok(Criterion::new(name, kind))
}

fn parse_row(
    row: &Line<'_>,
    separator: char,
    width: usize,
) -> std::result::Result<(String, Vec<f64>), DatasetError> {
    let mut fields = row.text.split(separator).map(str::trim);
    let alternative = fields.next().unwrap_or_default().to_string();
    let values = fields
        .map(|field| {
            field.parse::<f64>().map_err(|_| DatasetError::Malformed {
                line: row.number,
                reason: format!("'{field}' is not a number"),
            })
        })
        .collect::<std::result::Result<Vec<f64>, _>>()?;
    if values.len() != width {
        return Err(DatasetError::RowWidth {
            alternative,
            expected: width,
            actual: values.len(),
        });
    }
    Ok((alternative, values))
}

enum Relation {
    Pair(PreferenceRelation),
    Intensity(IntensityRelation),
}

fn parse_relation(line: &Line<'_>, separator: char) -> std::result::Result<Relation, DatasetError> {
    let fields: Vec<&str> = line.text.split(separator).map(str::trim).collect();
    let malformed = |reason: String| DatasetError::Malformed {
        line: line.number,
        reason,
    };
    let kind = |name: &str| name.parse::<PreferenceKind>().map_err(malformed);
    match fields.as_slice() {
        [a1, a2, name] => Ok(Relation::Pair(PreferenceRelation::new(*a1, *a2, kind(name)?))),
        [a1, a2, a3, a4, name] => Ok(Relation::Intensity(IntensityRelation::new(
            [*a1, *a2, *a3, *a4],
            kind(name)?,
        ))),
        _ => Err(malformed(format!(
            "expected 3 or 5 fields, got {}",
            fields.len()
        ))),
    }
}
