//! Region and facility records.

use geo_types::Coord;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A position in map-surface coordinates.
pub type Point = Coord<f64>;

/// A point of interest inside a region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,

    /// Category key within the owning region. Filled from the enclosing
    /// collection key when the record is loaded.
    #[serde(default)]
    pub category: String,

    pub position: Point,

    #[serde(default)]
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,

    /// External map reference; only `http` prefixed values are displayable.
    #[serde(
        default,
        rename = "mapUrl",
        alias = "map_url",
        skip_serializing_if = "Option::is_none"
    )]
    pub map_url: Option<String>,
}

impl Facility {
    /// Phone number, treating blank strings as absent.
    pub fn phone(&self) -> Option<&str> {
        non_blank(self.phone.as_deref())
    }

    /// Website, treating blank strings as absent.
    pub fn website(&self) -> Option<&str> {
        non_blank(self.website.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Stable reference to a facility: region, category and ordinal within the
/// category. Names alone are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FacilityRef {
    pub region_id: String,
    pub category: String,
    pub index: usize,
}

/// Ordered mapping from category key to facility list.
///
/// Keeps insertion order, which for loaded data is the key order of the
/// source JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorizedFacilities {
    categories: Vec<(String, Vec<Facility>)>,
}

impl CategorizedFacilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a category. A replaced category keeps its position.
    ///
    /// Every facility's `category` is set to `category`.
    pub fn insert(&mut self, category: impl Into<String>, mut facilities: Vec<Facility>) {
        let category = category.into();
        for facility in &mut facilities {
            facility.category.clone_from(&category);
        }

        match self.categories.iter_mut().find(|(key, _)| *key == category) {
            Some((_, existing)) => *existing = facilities,
            None => self.categories.push((category, facilities)),
        }
    }

    pub fn get(&self, category: &str) -> Option<&[Facility]> {
        self.categories
            .iter()
            .find(|(key, _)| key == category)
            .map(|(_, list)| list.as_slice())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    /// Category keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Facility])> {
        self.categories
            .iter()
            .map(|(key, list)| (key.as_str(), list.as_slice()))
    }

    /// Number of categories (not facilities).
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Serialize for CategorizedFacilities {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for CategorizedFacilities {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = CategorizedFacilities;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to facility list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut out = CategorizedFacilities::new();
                while let Some((category, facilities)) =
                    map.next_entry::<String, Vec<Facility>>()?
                {
                    out.insert(category, facilities);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}

/// A region record as supplied by the dataset.
///
/// Accepts the canonical field names as well as the legacy dataset's
/// (`plaka`, `ilismi`, `d`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRegion {
    #[serde(alias = "plaka", deserialize_with = "deserialize_id")]
    pub id: String,

    #[serde(alias = "ilismi")]
    pub name: String,

    /// Outline path descriptor, opaque to the core. May be missing.
    #[serde(default, alias = "d", skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<Point>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institutions: Option<CategorizedFacilities>,
}

impl RawRegion {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            geometry: None,
            center: None,
            institutions: None,
        }
    }
}

/// Identifiers may be written as strings or as plate numbers.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(n) => format!("{:02}", n),
    })
}

/// A normalized region: center and facility collection are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<String>,
    pub center: Point,
    pub institutions: CategorizedFacilities,
}

impl Region {
    /// Resolves a facility reference against this region.
    pub fn facility(&self, facility: &FacilityRef) -> Option<&Facility> {
        if facility.region_id != self.id {
            return None;
        }
        self.institutions
            .get(&facility.category)
            .and_then(|list| list.get(facility.index))
    }
}

impl From<Region> for RawRegion {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            name: region.name,
            geometry: region.geometry,
            center: Some(region.center),
            institutions: Some(region.institutions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_keep_json_key_order() {
        let json = r#"{
            "zeta": [],
            "alpha": [{"name": "A", "position": {"x": 1.0, "y": 2.0}, "address": "a"}],
            "mid": []
        }"#;
        let parsed: CategorizedFacilities = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = parsed.keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(parsed.get("alpha").unwrap()[0].category, "alpha");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut cats = CategorizedFacilities::new();
        cats.insert("a", vec![]);
        cats.insert("b", vec![]);
        cats.insert(
            "a",
            vec![Facility {
                name: "x".into(),
                category: String::new(),
                position: Point { x: 0.0, y: 0.0 },
                address: String::new(),
                phone: None,
                website: None,
                map_url: None,
            }],
        );
        let keys: Vec<_> = cats.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(cats.get("a").unwrap().len(), 1);
        assert_eq!(cats.get("a").unwrap()[0].category, "a");
    }

    #[test]
    fn test_raw_region_legacy_field_names() {
        let json = r#"{"plaka": 6, "ilismi": "Ankara", "d": "M0,0 L1,1 Z"}"#;
        let raw: RawRegion = serde_json::from_str(json).unwrap();
        assert_eq!(raw.id, "06");
        assert_eq!(raw.name, "Ankara");
        assert_eq!(raw.geometry.as_deref(), Some("M0,0 L1,1 Z"));
        assert!(raw.center.is_none());
        assert!(raw.institutions.is_none());
    }

    #[test]
    fn test_raw_region_without_geometry() {
        let raw: RawRegion = serde_json::from_str(r#"{"id": "34", "name": "İstanbul"}"#).unwrap();
        assert_eq!(raw.id, "34");
        assert!(raw.geometry.is_none());
    }

    #[test]
    fn test_blank_contact_fields_are_absent() {
        let json = r#"{"name": "X", "position": {"x": 0, "y": 0}, "phone": "  ", "website": ""}"#;
        let facility: Facility = serde_json::from_str(json).unwrap();
        assert_eq!(facility.phone(), None);
        assert_eq!(facility.website(), None);
    }
}
