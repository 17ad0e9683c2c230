//! Selection criteria and their satisfaction sets.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::venue::{MenuItem, Venue};

/// A user-supplied filter that at least one venue on the route must meet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Criterion {
    /// Some menu item matches every field that is set.
    MenuItem {
        /// Case-insensitive substring of the item name.
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        max_price: Option<f64>,
        #[serde(default)]
        flag: Option<String>,
    },
    MinRating { rating: f32 },
    Tag { tag: String },
}

impl Criterion {
    pub fn min_rating(rating: f32) -> Self {
        Criterion::MinRating { rating }
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Criterion::Tag { tag: tag.into() }
    }

    pub fn menu_item(name: Option<&str>, max_price: Option<f64>) -> Self {
        Criterion::MenuItem {
            name: name.map(str::to_string),
            max_price,
            flag: None,
        }
    }

    pub fn matches(&self, venue: &Venue) -> bool {
        match self {
            Criterion::MenuItem {
                name,
                max_price,
                flag,
            } => venue.menu.iter().any(|item| {
                menu_item_matches(item, name.as_deref(), *max_price, flag.as_deref())
            }),
            Criterion::MinRating { rating: min } => {
                venue.rating.is_some_and(|rating| rating >= *min)
            }
            Criterion::Tag { tag } => venue.has_tag(tag),
        }
    }
}

fn menu_item_matches(
    item: &MenuItem,
    name: Option<&str>,
    max_price: Option<f64>,
    flag: Option<&str>,
) -> bool {
    let name_ok = name.is_none_or(|wanted| {
        item.name
            .to_lowercase()
            .contains(&wanted.to_lowercase())
    });
    let price_ok = max_price.is_none_or(|max| item.price <= max);
    let flag_ok = flag.is_none_or(|wanted| item.flags.iter().any(|f| f.eq_ignore_ascii_case(wanted)));
    name_ok && price_ok && flag_ok
}

/// Candidate indices satisfying one criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriterionSet {
    members: BTreeSet<usize>,
}

impl CriterionSet {
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when some index in `path` is a member.
    pub fn covered_by(&self, path: &[usize]) -> bool {
        path.iter().any(|index| self.contains(*index))
    }
}

impl FromIterator<usize> for CriterionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// One satisfaction set per criterion, in criterion order.
pub fn satisfaction_sets(venues: &[Venue], criteria: &[Criterion]) -> Vec<CriterionSet> {
    criteria
        .iter()
        .map(|criterion| {
            venues
                .iter()
                .enumerate()
                .filter(|(_, venue)| criterion.matches(venue))
                .map(|(index, _)| index)
                .collect()
        })
        .collect()
}

/// True when every set is covered by `path`. Vacuously true with no criteria.
pub fn all_covered(sets: &[CriterionSet], path: &[usize]) -> bool {
    sets.iter().all(|set| set.covered_by(path))
}
