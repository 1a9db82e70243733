//! Derived lists for the detail views.
//!
//! Pure functions over normalized regions: counts, category partitioning and
//! search filtering. None of them allocate facility copies.

use super::region::{Facility, Region};

/// A facility tagged with its category and its ordinal within that category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaggedFacility<'a> {
    pub facility: &'a Facility,
    pub category: &'a str,
    pub index: usize,
}

impl TaggedFacility<'_> {
    /// Key for list rendering; names alone are not unique.
    pub fn list_key(&self) -> String {
        format!("{}-{}-{}", self.facility.name, self.index, self.category)
    }
}

/// Anything with a searchable display name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Facility {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for TaggedFacility<'_> {
    fn name(&self) -> &str {
        &self.facility.name
    }
}

impl<T: Named + ?Sized> Named for &T {
    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Sum of all category list lengths.
pub fn total_facilities(region: &Region) -> usize {
    region
        .institutions
        .iter()
        .map(|(_, list)| list.len())
        .sum()
}

/// All facilities, categories in insertion order, each list in its own order.
pub fn flatten_facilities(region: &Region) -> Vec<TaggedFacility<'_>> {
    region
        .institutions
        .iter()
        .flat_map(|(category, list)| {
            list.iter()
                .enumerate()
                .map(move |(index, facility)| TaggedFacility {
                    facility,
                    category,
                    index,
                })
        })
        .collect()
}

/// Case-insensitive substring match on names, preserving input order.
pub fn filter_by_query<T: Named + Clone>(items: &[T], query: &str) -> Vec<T> {
    if query.is_empty() {
        return items.to_vec();
    }

    let needle = query.to_lowercase();
    items
        .iter()
        .filter(|item| item.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Category keys of a region, empty when there is no region.
pub fn categories_of(region: Option<&Region>) -> Vec<&str> {
    region
        .map(|r| r.institutions.keys().collect())
        .unwrap_or_default()
}

/// Facilities shown in the region detail list.
///
/// With a category selected only that category is listed; an unknown
/// category yields nothing. The query filter is applied afterwards.
pub fn facilities_in_view<'a>(
    region: &'a Region,
    category: Option<&str>,
    query: &str,
) -> Vec<TaggedFacility<'a>> {
    let in_view: Vec<TaggedFacility<'a>> = match category {
        Some(selected) => region
            .institutions
            .iter()
            .find(|(key, _)| *key == selected)
            .map(|(key, list)| {
                list.iter()
                    .enumerate()
                    .map(|(index, facility)| TaggedFacility {
                        facility,
                        category: key,
                        index,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        None => flatten_facilities(region),
    };

    filter_by_query(&in_view, query)
}

/// Display label for a category key: first character uppercased.
pub fn category_label(category: &str) -> String {
    let mut chars = category.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Broad kind of a category, used to pick an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Universities,
    Schools,
    Associations,
    Other,
}

impl CategoryKind {
    pub fn from_key(category: &str) -> Self {
        match category {
            "üniversiteler" | "universities" => CategoryKind::Universities,
            "okullar" | "schools" => CategoryKind::Schools,
            "dernekler" | "associations" => CategoryKind::Associations,
            _ => CategoryKind::Other,
        }
    }
}
