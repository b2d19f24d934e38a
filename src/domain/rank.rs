//! Ranks as ordered groups of tied alternatives.

use std::fmt;

use serde::Serialize;

/// One alternative with the value it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankItem {
    pub alternative: String,
    pub value: f64,
}

impl RankItem {
    pub fn new(alternative: impl Into<String>, value: f64) -> Self {
        Self {
            alternative: alternative.into(),
            value,
        }
    }
}

/// Direction of a rank's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Lower value is better (distances).
    Ascending,
    /// Higher value is better (voting scores).
    Descending,
}

/// Sort items by value in the given direction. Equal values keep their
/// incoming order.
pub fn flat_rank(mut items: Vec<RankItem>, order: Order) -> Vec<RankItem> {
    match order {
        Order::Ascending => items.sort_by(|a, b| a.value.total_cmp(&b.value)),
        Order::Descending => items.sort_by(|a, b| b.value.total_cmp(&a.value)),
    }
    items
}

/// Split a sorted flat rank into tied groups.
///
/// A new group starts whenever the gap to the previous item is at least
/// `eps`; otherwise the item joins the current group.
pub fn group_by_eps(items: &[RankItem], eps: f64) -> Vec<Vec<RankItem>> {
    let mut groups: Vec<Vec<RankItem>> = Vec::new();
    let mut previous: Option<f64> = None;
    for item in items {
        let tied = previous.is_some_and(|value| (item.value - value).abs() < eps);
        match groups.len() {
            n if tied && n > 0 => groups[n - 1].push(item.clone()),
            _ => groups.push(vec![item.clone()]),
        }
        previous = Some(item.value);
    }
    groups
}

/// A named rank: groups ordered best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rank {
    pub name: String,
    pub order: Order,
    groups: Vec<Vec<RankItem>>,
}

impl Rank {
    pub fn new(name: impl Into<String>, order: Order, groups: Vec<Vec<RankItem>>) -> Self {
        Self {
            name: name.into(),
            order,
            groups: groups.into_iter().filter(|g| !g.is_empty()).collect(),
        }
    }

    /// Sort `items` and group them by `eps`.
    pub fn grouped(name: impl Into<String>, items: Vec<RankItem>, order: Order, eps: f64) -> Self {
        let sorted = flat_rank(items, order);
        Self::new(name, order, group_by_eps(&sorted, eps))
    }

    /// Sort `items` with every alternative in its own group.
    pub fn flat(name: impl Into<String>, items: Vec<RankItem>, order: Order) -> Self {
        let groups = flat_rank(items, order).into_iter().map(|item| vec![item]).collect();
        Self::new(name, order, groups)
    }

    pub fn groups(&self) -> &[Vec<RankItem>] {
        &self.groups
    }

    pub fn groups_mut(&mut self) -> &mut [Vec<RankItem>] {
        &mut self.groups
    }

    /// 1-based index of the group containing `alternative`.
    pub fn position(&self, alternative: &str) -> Option<usize> {
        self.groups
            .iter()
            .position(|group| group.iter().any(|item| item.alternative == alternative))
            .map(|i| i + 1)
    }

    pub fn item(&self, alternative: &str) -> Option<&RankItem> {
        self.groups
            .iter()
            .flatten()
            .find(|item| item.alternative == alternative)
    }

    /// Items in rank order, ties flattened.
    pub fn flatten(&self) -> Vec<RankItem> {
        self.groups.iter().flatten().cloned().collect()
    }

    /// Alternatives per group.
    pub fn alternatives(&self) -> Vec<Vec<&str>> {
        self.groups
            .iter()
            .map(|group| group.iter().map(|item| item.alternative.as_str()).collect())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<String> = self
            .alternatives()
            .into_iter()
            .map(|group| {
                if group.len() == 1 {
                    group[0].to_string()
                } else {
                    format!("[{}]", group.join(", "))
                }
            })
            .collect();
        write!(f, "{}", groups.join(" > "))
    }
}
