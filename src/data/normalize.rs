//! Region normalization.
//!
//! Real facility data, when a record carries it, passes through untouched.
//! Records without facilities get a deterministic placeholder set so that
//! repeated renders and tests see identical data.

use super::links;
use super::region::{CategorizedFacilities, Facility, Point, RawRegion, Region};

/// Center used when a record does not provide one.
pub const FALLBACK_CENTER: Point = Point { x: 100.0, y: 100.0 };

/// Per-index offset applied within each placeholder category.
const PLACEHOLDER_STRIDE: (f64, f64) = (15.0, 5.0);

/// Template for one synthesized category.
struct PlaceholderCategory {
    key: &'static str,
    count: usize,
    /// Noun used in names, addresses and map queries.
    noun: &'static str,
    /// Offset of the first facility from the region center.
    offset: (f64, f64),
    phone_prefix: &'static str,
    site_tag: &'static str,
    site_tld: &'static str,
}

const PLACEHOLDER_CATEGORIES: [PlaceholderCategory; 3] = [
    PlaceholderCategory {
        key: "üniversiteler",
        count: 4,
        noun: "Üniversite",
        offset: (0.0, 0.0),
        phone_prefix: "0270-000-000",
        site_tag: "uni",
        site_tld: "com",
    },
    PlaceholderCategory {
        key: "okullar",
        count: 3,
        noun: "Okul",
        offset: (20.0, 20.0),
        phone_prefix: "0270-111-111",
        site_tag: "okul",
        site_tld: "edu.tr",
    },
    PlaceholderCategory {
        key: "dernekler",
        count: 3,
        noun: "Dernek",
        offset: (40.0, 40.0),
        phone_prefix: "0270-222-222",
        site_tag: "dernek",
        site_tld: "org",
    },
];

/// Produces a fully populated region.
///
/// Idempotent: a region converted back into a `RawRegion` normalizes to
/// itself, since both center and facilities are then present.
pub fn normalize(raw: &RawRegion) -> Region {
    let center = raw.center.unwrap_or(FALLBACK_CENTER);

    let institutions = match &raw.institutions {
        Some(existing) => existing.clone(),
        None => {
            log::debug!("Synthesizing placeholder facilities for {}", raw.id);
            synthesize_facilities(&raw.name, center)
        }
    };

    Region {
        id: raw.id.clone(),
        name: raw.name.clone(),
        geometry: raw.geometry.clone(),
        center,
        institutions,
    }
}

/// Placeholder facility set derived from a region's display name and center.
pub fn synthesize_facilities(region_name: &str, center: Point) -> CategorizedFacilities {
    let region_slug = slug(region_name);
    let mut out = CategorizedFacilities::new();

    for template in &PLACEHOLDER_CATEGORIES {
        let facilities = (0..template.count)
            .map(|i| {
                let n = i + 1;
                let label = format!("{} {} {}", region_name, template.noun, n);
                Facility {
                    name: label.clone(),
                    category: template.key.to_string(),
                    position: Point {
                        x: center.x + template.offset.0 + i as f64 * PLACEHOLDER_STRIDE.0,
                        y: center.y + template.offset.1 + i as f64 * PLACEHOLDER_STRIDE.1,
                    },
                    address: format!("{} {} Adresi {}", region_name, template.noun, n),
                    phone: Some(format!("{}{}", template.phone_prefix, n)),
                    website: Some(format!(
                        "www.{}{}{}.{}",
                        region_slug, template.site_tag, n, template.site_tld
                    )),
                    map_url: Some(links::search_url(&label)),
                }
            })
            .collect();
        out.insert(template.key, facilities);
    }

    out
}

/// ASCII slug for derived identifiers such as placeholder websites.
///
/// Turkish letters are transliterated to their Latin base letter, the result
/// is lowercased, and anything outside `[a-z0-9]` is dropped.
pub fn slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| {
            let base = match c {
                'ç' | 'Ç' => 'c',
                'ğ' | 'Ğ' => 'g',
                'ı' | 'İ' | 'I' | 'i' => 'i',
                'ö' | 'Ö' => 'o',
                'ş' | 'Ş' => 's',
                'ü' | 'Ü' => 'u',
                'â' | 'Â' => 'a',
                'î' | 'Î' => 'i',
                'û' | 'Û' => 'u',
                other => other.to_ascii_lowercase(),
            };
            base.is_ascii_alphanumeric().then_some(base)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::total_facilities;

    fn ankara() -> RawRegion {
        RawRegion::new("06", "Ankara")
    }

    #[test]
    fn test_ankara_placeholder_scenario() {
        let region = normalize(&ankara());

        assert_eq!(region.center, Point { x: 100.0, y: 100.0 });
        assert_eq!(region.institutions.get("üniversiteler").unwrap().len(), 4);
        assert_eq!(region.institutions.get("okullar").unwrap().len(), 3);
        assert_eq!(region.institutions.get("dernekler").unwrap().len(), 3);
        assert_eq!(total_facilities(&region), 10);

        let keys: Vec<_> = region.institutions.keys().collect();
        assert_eq!(keys, vec!["üniversiteler", "okullar", "dernekler"]);
    }

    #[test]
    fn test_placeholder_fields_are_derived() {
        let region = normalize(&ankara());
        let schools = region.institutions.get("okullar").unwrap();
        let second = &schools[1];

        assert_eq!(second.name, "Ankara Okul 2");
        assert_eq!(second.category, "okullar");
        assert_eq!(second.address, "Ankara Okul Adresi 2");
        assert_eq!(second.phone(), Some("0270-111-1112"));
        assert_eq!(second.website(), Some("www.ankaraokul2.edu.tr"));
        assert_eq!(second.position, Point { x: 135.0, y: 125.0 });
        assert!(second.map_url.as_deref().unwrap().starts_with("https://"));
    }

    #[test]
    fn test_placeholder_offsets_follow_provided_center() {
        let mut raw = ankara();
        raw.center = Some(Point { x: 400.0, y: 150.0 });
        let region = normalize(&raw);

        let unis = region.institutions.get("üniversiteler").unwrap();
        assert_eq!(unis[0].position, Point { x: 400.0, y: 150.0 });
        assert_eq!(unis[3].position, Point { x: 445.0, y: 165.0 });

        let assocs = region.institutions.get("dernekler").unwrap();
        assert_eq!(assocs[0].position, Point { x: 440.0, y: 190.0 });
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(&ankara());
        let twice = normalize(&once.clone().into());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_is_deterministic() {
        assert_eq!(normalize(&ankara()), normalize(&ankara()));
    }

    #[test]
    fn test_real_data_bypasses_synthesis() {
        let mut institutions = CategorizedFacilities::new();
        institutions.insert(
            "hastaneler",
            vec![Facility {
                name: "Şehir Hastanesi".into(),
                category: String::new(),
                position: Point { x: 10.0, y: 20.0 },
                address: "Bilkent".into(),
                phone: None,
                website: None,
                map_url: None,
            }],
        );
        let mut raw = ankara();
        raw.center = Some(Point { x: 300.0, y: 120.0 });
        raw.institutions = Some(institutions.clone());

        let region = normalize(&raw);
        assert_eq!(region.institutions, institutions);
        assert_eq!(region.center, Point { x: 300.0, y: 120.0 });
        assert_eq!(total_facilities(&region), 1);
    }

    #[test]
    fn test_real_data_without_center_uses_fallback() {
        let mut raw = ankara();
        raw.institutions = Some(CategorizedFacilities::new());
        let region = normalize(&raw);
        assert_eq!(region.center, FALLBACK_CENTER);
        assert!(region.institutions.is_empty());
    }

    #[test]
    fn test_slug_transliterates_turkish() {
        assert_eq!(slug("Ankara"), "ankara");
        assert_eq!(slug("İstanbul"), "istanbul");
        assert_eq!(slug("Şanlıurfa"), "sanliurfa");
        assert_eq!(slug("Ağrı"), "agri");
        assert_eq!(slug("Kahramanmaraş"), "kahramanmaras");
        assert_eq!(slug("Afyon-Karahisar 03"), "afyonkarahisar03");
        assert_eq!(slug("東京"), "");
    }
}
