use crate::domain::dataset::{Dataset, IntensityRelation, PreferenceKind, PreferenceRelation};
use crate::domain::expr::{Constraint, Relation, Variable, VariablesSet};
use crate::error::ModelError;

use super::distance;

fn relation_for(kind: PreferenceKind) -> Relation {
    match kind {
        PreferenceKind::Preference | PreferenceKind::WeakPreference => Relation::LessEqual,
        PreferenceKind::Indifference => Relation::Equal,
    }
}

fn margin(kind: PreferenceKind, eps: f64) -> f64 {
    if kind == PreferenceKind::Preference {
        eps
    } else {
        0.0
    }
}

/// `d(a1) - d(a2) + eps <= 0` for strict preference, `<= 0` for weak
/// preference and `= 0` for indifference.
pub fn preference_constraint(
    dataset: &Dataset,
    relation: &PreferenceRelation,
    alpha: f64,
) -> Result<Constraint, ModelError> {
    let mut lhs = distance(dataset, &relation.alternative_1, alpha)?;
    lhs.merge(distance(dataset, &relation.alternative_2, alpha)?.scaled(-1.0));
    lhs.add(Variable::free(margin(relation.kind, dataset.eps())));

    Ok(Constraint::new(
        format!(
            "preference_{}_{}_{}",
            relation.alternative_1,
            relation.kind.as_str().replace(' ', "_"),
            relation.alternative_2
        ),
        without_zero_terms(lhs),
        relation_for(relation.kind),
        0.0,
    ))
}

/// `d(a1) - d(a2) - d(a3) + d(a4) + eps REL 0`: the distance gap of a1 over
/// a2 exceeds the gap of a3 over a4.
pub fn intensity_constraint(
    dataset: &Dataset,
    relation: &IntensityRelation,
    alpha: f64,
) -> Result<Constraint, ModelError> {
    let [a1, a2, a3, a4] = relation.alternatives();
    let mut lhs = distance(dataset, a1, alpha)?;
    lhs.merge(distance(dataset, a2, alpha)?.scaled(-1.0));
    lhs.merge(distance(dataset, a3, alpha)?.scaled(-1.0));
    lhs.merge(distance(dataset, a4, alpha)?);
    lhs.add(Variable::free(margin(relation.kind, dataset.eps())));

    Ok(Constraint::new(
        format!(
            "intensity_{a1}_{a2}_{}_{a3}_{a4}",
            relation.kind.as_str().replace(' ', "_")
        ),
        without_zero_terms(lhs),
        relation_for(relation.kind),
        0.0,
    ))
}

/// Drop terms that cancelled out, keeping the free term.
fn without_zero_terms(set: VariablesSet) -> VariablesSet {
    set.variables()
        .filter(|v| v.is_free() || v.coefficient() != 0.0)
        .cloned()
        .collect()
}
