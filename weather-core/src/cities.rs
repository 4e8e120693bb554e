//! Turn geocoding matches into short, human-distinguishable suggestions.

use std::collections::HashMap;

use crate::model::{CitySuggestion, GeoMatch};

/// Queries shorter than this are not sent upstream.
pub const MIN_QUERY_LEN: usize = 3;
pub const MAX_SUGGESTIONS: usize = 5;

/// Whether a query is long enough to be worth geocoding.
pub fn is_searchable(query: &str) -> bool {
    query.chars().count() >= MIN_QUERY_LEN
}

/// Group matches by name (first-seen order) and qualify each with its state
/// and country where the provider supplied them.
///
/// Truncation happens after every group is expanded, so one popular name
/// with many variants can push other names out of the list.
pub fn disambiguate(matches: &[GeoMatch]) -> Vec<CitySuggestion> {
    let mut groups = NameGroups::default();
    for m in matches {
        groups.push(m);
    }

    groups
        .into_iter()
        .flatten()
        .map(|m| CitySuggestion {
            display_name: qualified_name(m),
            latitude: m.lat,
            longitude: m.lon,
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

fn qualified_name(m: &GeoMatch) -> String {
    let mut name = m.name.clone();
    for part in [&m.state, &m.country].into_iter().flatten() {
        if !part.is_empty() {
            name.push_str(", ");
            name.push_str(part);
        }
    }
    name
}

/// Insertion-ordered map from name to its matches.
#[derive(Default)]
struct NameGroups<'a> {
    index: HashMap<&'a str, usize>,
    groups: Vec<Vec<&'a GeoMatch>>,
}

impl<'a> NameGroups<'a> {
    fn push(&mut self, m: &'a GeoMatch) {
        match self.index.get(m.name.as_str()) {
            Some(&i) => self.groups[i].push(m),
            None => {
                self.index.insert(m.name.as_str(), self.groups.len());
                self.groups.push(vec![m]);
            }
        }
    }
}

impl<'a> IntoIterator for NameGroups<'a> {
    type Item = Vec<&'a GeoMatch>;
    type IntoIter = std::vec::IntoIter<Vec<&'a GeoMatch>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}
