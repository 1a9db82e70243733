//! External map links built from facility addresses.

use super::region::Facility;
use url::Url;

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps";
const MAPS_DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";
const MAPS_EMBED_BASE: &str = "https://maps.google.com/maps";

fn with_query(base: &str, params: &[(&str, &str)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.into(),
        Err(e) => {
            // Bases are constants, so this only fires if one is edited badly.
            log::warn!("Failed to build map link from {}: {}", base, e);
            base.to_string()
        }
    }
}

/// Map search link for a free-text query.
pub fn search_url(query: &str) -> String {
    with_query(MAPS_SEARCH_BASE, &[("q", query)])
}

/// Map search link for a facility's address.
pub fn open_in_maps_url(facility: &Facility) -> String {
    search_url(&facility.address)
}

/// Driving directions link to a facility's address.
pub fn directions_url(facility: &Facility) -> String {
    with_query(
        MAPS_DIRECTIONS_BASE,
        &[("api", "1"), ("destination", facility.address.as_str())],
    )
}

/// Whether the facility's map reference can back an embedded map.
pub fn is_displayable(facility: &Facility) -> bool {
    facility
        .map_url
        .as_deref()
        .is_some_and(|url| url.starts_with("http"))
}

/// Embeddable map of the facility's address, or `None` when the map
/// reference is missing or not a URL.
pub fn embed_url(facility: &Facility) -> Option<String> {
    if !is_displayable(facility) {
        return None;
    }

    Some(with_query(
        MAPS_EMBED_BASE,
        &[
            ("q", facility.address.as_str()),
            ("t", ""),
            ("z", "15"),
            ("ie", "UTF8"),
            ("iwloc", ""),
            ("output", "embed"),
        ],
    ))
}

/// Clickable href for a website field that may lack a scheme.
pub fn website_href(website: &str) -> String {
    if website.starts_with("http") {
        website.to_string()
    } else {
        format!("http://{}", website)
    }
}
