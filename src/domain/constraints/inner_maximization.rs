use crate::domain::dataset::Dataset;
use crate::domain::expr::{Constraint, VariablesSet};

use super::{indicator_variable, lambda_variable, utility_variable};

/// Big-M constraints pinning `lambda(a) = 1 - min_c u_c(a)`.
///
/// For every alternative in `alternatives` and every criterion:
///
/// ```text
/// -lambda - u_c           <= -1
/// -lambda - u_c - M * c_c <= -1
///  lambda + u_c - M * c_c <=  1
/// ```
///
/// closed by `sum_c c_c <= n_criteria - 1`, so at least one indicator is 0
/// and the upper bound binds on the argmin criterion.
pub fn inner_maximization_constraints(dataset: &Dataset, alternatives: &[&str]) -> Vec<Constraint> {
    let big_m = dataset.big_m();
    let criteria = dataset.criteria();
    let mut constraints = Vec::with_capacity(alternatives.len() * (3 * criteria.len() + 1));

    for &alternative in alternatives {
        for criterion in criteria {
            let name = &criterion.name;
            constraints.push(Constraint::leq(
                format!("lambda_lower_{name}_{alternative}"),
                VariablesSet::from_variables([
                    lambda_variable(alternative, -1.0),
                    utility_variable(name, alternative, -1.0),
                ]),
                -1.0,
            ));
            constraints.push(Constraint::leq(
                format!("lambda_lower_indicator_{name}_{alternative}"),
                VariablesSet::from_variables([
                    lambda_variable(alternative, -1.0),
                    utility_variable(name, alternative, -1.0),
                    indicator_variable(name, alternative, -big_m),
                ]),
                -1.0,
            ));
            constraints.push(Constraint::leq(
                format!("lambda_upper_{name}_{alternative}"),
                VariablesSet::from_variables([
                    lambda_variable(alternative, 1.0),
                    utility_variable(name, alternative, 1.0),
                    indicator_variable(name, alternative, -big_m),
                ]),
                1.0,
            ));
        }
        let indicators = criteria
            .iter()
            .map(|criterion| indicator_variable(&criterion.name, alternative, 1.0))
            .collect();
        constraints.push(Constraint::leq(
            format!("indicator_sum_{alternative}"),
            indicators,
            criteria.len() as f64 - 1.0,
        ));
    }

    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::constraints::fixtures;
    use crate::domain::expr::Relation;

    #[test]
    fn test_constraint_count() {
        let dataset = fixtures::dataset();
        let constraints = inner_maximization_constraints(&dataset, &["b1", "b3"]);
        // (3 per criterion + 1 closing) per alternative
        assert_eq!(constraints.len(), 2 * (3 * 2 + 1));
        assert!(constraints
            .iter()
            .all(|c| c.relation() == Relation::LessEqual));
    }

    #[test]
    fn test_uses_big_m_from_dataset() {
        let dataset = fixtures::dataset().with_big_m(4.0);
        let constraints = inner_maximization_constraints(&dataset, &["b2"]);

        let upper = constraints
            .iter()
            .find(|c| c.name() == "lambda_upper_Price_b2")
            .unwrap();
        let indicator = upper.variable("c_Price_b2").unwrap();
        assert!(indicator.is_binary());
        assert!((indicator.coefficient() + 4.0).abs() < 1e-12);
        assert!((upper.variable("lambda_all_b2").unwrap().coefficient() - 1.0).abs() < 1e-12);
        assert_eq!(upper.rhs(), 1.0);
    }

    #[test]
    fn test_closing_constraint() {
        let dataset = fixtures::dataset();
        let constraints = inner_maximization_constraints(&dataset, &["b4"]);
        let closing = constraints.last().unwrap();

        assert_eq!(closing.name(), "indicator_sum_b4");
        assert_eq!(closing.number_of_variables(), 2);
        assert_eq!(closing.rhs(), 1.0);
    }

    #[test]
    fn test_empty_reference_set() {
        let dataset = fixtures::dataset();
        assert!(inner_maximization_constraints(&dataset, &[]).is_empty());
    }
}
